//! habit init command implementation
//!
//! Onboarding: persists the user profile to config.toml and seeds the
//! starter habit set when no collection exists yet.

use std::path::PathBuf;

use chrono::Utc;

use crate::config::Config;
use crate::error::Result;
use crate::habit::{Category, Habit};
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::store::Store;

/// Options for `habit init`
pub struct InitOptions {
    pub name: Option<String>,
    pub goal: Option<Category>,
    pub notification_time: Option<String>,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

#[derive(serde::Serialize)]
struct InitReport {
    data_dir: PathBuf,
    seeded: bool,
    habits: Vec<Habit>,
}

pub fn run(options: InitOptions) -> Result<()> {
    let store = Store::open(options.data_dir)?;

    let mut config = Config::load(store.data_dir())?;
    if let Some(name) = &options.name {
        let name = name.trim();
        if !name.is_empty() {
            config.user.name = name.to_string();
        }
    }
    if let Some(goal) = options.goal {
        config.user.primary_goal = Some(goal);
    }
    if let Some(time) = &options.notification_time {
        config.user.notification_time = Some(time.clone());
    }
    config.user.onboarding_complete = true;
    config.save(store.data_dir())?;

    let goal = options.goal.or(config.user.primary_goal);
    let seeded = store.seed_starter_habits(goal, Utc::now())?;

    let habits = store.load_habits();
    let report = InitReport {
        data_dir: store.data_dir().to_path_buf(),
        seeded: seeded.is_some(),
        habits: habits.clone(),
    };

    let mut human = HumanOutput::new(format!("habit init: welcome, {}", config.user.name));
    human.push_summary("data dir", store.data_dir().display().to_string());
    human.push_summary("habits", habits.len().to_string());
    if report.seeded {
        for habit in &habits {
            human.push_detail(format!("{} ({})", habit.name, habit.category.label()));
        }
    } else {
        human.push_warning("habit collection already exists; nothing seeded".to_string());
    }
    human.push_next_step("habit list".to_string());
    human.push_next_step("habit done <id>".to_string());

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "init",
        &report,
        Some(&human),
    )?;

    Ok(())
}
