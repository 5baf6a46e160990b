//! habit badges command implementation

use std::path::PathBuf;

use crate::achievement::{self, AchievementId};
use crate::error::Result;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::store::Store;

/// Options for `habit badges`
pub struct BadgesOptions {
    pub id: Option<String>,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

#[derive(serde::Serialize)]
struct BadgeEntry {
    id: AchievementId,
    title: &'static str,
    description: &'static str,
    unlocked: bool,
}

#[derive(serde::Serialize)]
struct BadgesReport {
    unlocked: usize,
    total: usize,
    badges: Vec<BadgeEntry>,
}

pub fn run(options: BadgesOptions) -> Result<()> {
    let store = Store::open(options.data_dir)?;
    let registry = achievement::load_registry(&store);

    let selected: Vec<AchievementId> = match &options.id {
        Some(raw) => vec![raw.parse()?],
        None => AchievementId::ALL.to_vec(),
    };

    let badges: Vec<BadgeEntry> = selected
        .into_iter()
        .map(|id| BadgeEntry {
            id,
            title: id.title(),
            description: id.description(),
            unlocked: registry.is_unlocked(id),
        })
        .collect();

    let report = BadgesReport {
        unlocked: registry.unlocked_count(),
        total: registry.total(),
        badges,
    };

    let mut human = HumanOutput::new(format!(
        "habit badges: {} of {} unlocked",
        report.unlocked, report.total
    ));
    for badge in &report.badges {
        let mark = if badge.unlocked { "*" } else { " " };
        human.push_detail(format!("[{mark}] {} - {}", badge.title, badge.description));
    }

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "badges",
        &report,
        Some(&human),
    )?;

    Ok(())
}
