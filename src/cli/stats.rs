//! habit stats command implementation

use std::path::PathBuf;

use chrono::Local;

use crate::analytics;
use crate::engine;
use crate::error::Result;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::store::Store;

/// Options for `habit stats`
pub struct StatsOptions {
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

#[derive(serde::Serialize)]
struct TopStreak {
    id: i64,
    name: String,
    streak: u32,
}

#[derive(serde::Serialize)]
struct StatsReport {
    habits: usize,
    completed_today: usize,
    completion_rate: u32,
    average_streak: u32,
    longest_streak: u32,
    top_streaks: Vec<TopStreak>,
}

pub fn run(options: StatsOptions) -> Result<()> {
    let store = Store::open(options.data_dir)?;
    engine::ensure_daily_reset(&store, Local::now().date_naive())?;

    let habits = store.load_habits();
    let completed_today = habits.iter().filter(|h| h.completed_today).count();
    let top_streaks: Vec<TopStreak> = analytics::top_streaks(&habits, 5)
        .into_iter()
        .map(|h| TopStreak {
            id: h.id,
            name: h.name.clone(),
            streak: h.streak,
        })
        .collect();

    let report = StatsReport {
        habits: habits.len(),
        completed_today,
        completion_rate: analytics::completion_rate(&habits),
        average_streak: analytics::average_streak(&habits),
        longest_streak: analytics::longest_streak(&habits),
        top_streaks,
    };

    let mut human = HumanOutput::new("habit stats");
    human.push_summary(
        "completed today",
        format!("{} of {} ({}%)", completed_today, report.habits, report.completion_rate),
    );
    human.push_summary("average streak", report.average_streak.to_string());
    human.push_summary("longest streak", report.longest_streak.to_string());
    for top in &report.top_streaks {
        human.push_detail(format!("{}: streak {}", top.name, top.streak));
    }
    if report.habits == 0 {
        human.push_warning("no habits yet".to_string());
        human.push_next_step("habit add <name>".to_string());
    }

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "stats",
        &report,
        Some(&human),
    )?;

    Ok(())
}
