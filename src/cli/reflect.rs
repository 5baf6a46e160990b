//! habit reflect command implementation

use std::path::PathBuf;

use chrono::Utc;

use crate::achievement::AchievementId;
use crate::error::{Error, Result};
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::reflection::{self, Reflection};
use crate::store::Store;

/// Options for `habit reflect`
pub struct ReflectOptions {
    pub text: Option<String>,
    pub list: bool,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

#[derive(serde::Serialize)]
struct SaveReport {
    count: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    unlocked: Vec<AchievementId>,
}

#[derive(serde::Serialize)]
struct ListReport {
    reflections: Vec<Reflection>,
}

pub fn run(options: ReflectOptions) -> Result<()> {
    let store = Store::open(options.data_dir)?;
    let output = OutputOptions {
        json: options.json,
        quiet: options.quiet,
    };

    if options.list {
        let reflections = reflection::list_reflections(&store);
        let mut human = HumanOutput::new(format!(
            "habit reflect: {} saved",
            reflections.len()
        ));
        for entry in &reflections {
            human.push_detail(format!("{}: {}", entry.date.format("%Y-%m-%d"), entry.text));
        }
        let report = ListReport { reflections };
        emit_success(output, "reflect", &report, Some(&human))?;
        return Ok(());
    }

    let text = options.text.ok_or_else(|| {
        Error::InvalidInput("pass reflection text or --list".to_string())
    })?;

    let outcome = reflection::save_reflection(&store, &text, Utc::now())?;

    let mut human = HumanOutput::new("habit reflect: saved");
    human.push_summary("total reflections", outcome.count.to_string());
    for id in &outcome.newly_unlocked {
        human.push_detail(format!("Achievement unlocked: {}", id.title()));
    }

    let report = SaveReport {
        count: outcome.count,
        unlocked: outcome.newly_unlocked,
    };
    emit_success(output, "reflect", &report, Some(&human))?;

    Ok(())
}
