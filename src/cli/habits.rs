//! habit add/done/list/edit/rm/reset command implementations

use std::path::PathBuf;

use chrono::{Local, Utc};

use crate::achievement::AchievementId;
use crate::config::Config;
use crate::engine;
use crate::error::Result;
use crate::habit::{Category, Difficulty, Frequency, Habit, HabitFields, HabitUpdate};
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::schedule;
use crate::store::Store;

/// Options for `habit add`
pub struct AddOptions {
    pub name: String,
    pub category: Option<Category>,
    pub frequency: Option<Frequency>,
    pub reminder: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub motivation: Option<String>,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

/// Options for `habit done`
pub struct DoneOptions {
    pub id: i64,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

/// Options for `habit list`
pub struct ListOptions {
    pub due: bool,
    pub category: Option<Category>,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

/// Options for `habit edit`
pub struct EditOptions {
    pub id: i64,
    pub name: Option<String>,
    pub category: Option<Category>,
    pub frequency: Option<Frequency>,
    pub reminder: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub motivation: Option<String>,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

/// Options for `habit rm`
pub struct RmOptions {
    pub id: i64,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

/// Options for `habit reset`
pub struct ResetOptions {
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

#[derive(serde::Serialize)]
struct HabitReport {
    habit: Habit,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    unlocked: Vec<AchievementId>,
}

#[derive(serde::Serialize)]
struct ToggleReport {
    habit: Habit,
    completed: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    unlocked: Vec<AchievementId>,
}

#[derive(serde::Serialize)]
struct ListReport {
    habits: Vec<Habit>,
    due_only: bool,
}

#[derive(serde::Serialize)]
struct ResetReport {
    cleared: usize,
    habits: Vec<Habit>,
}

pub fn run_add(options: AddOptions) -> Result<()> {
    let store = Store::open(options.data_dir)?;
    let config = Config::load(store.data_dir())?;

    let fields = HabitFields {
        name: options.name,
        category: options.category.unwrap_or(config.defaults.category),
        frequency: options.frequency.unwrap_or(config.defaults.frequency),
        reminder_time: options
            .reminder
            .unwrap_or_else(|| config.defaults.reminder_time.clone()),
        difficulty: options.difficulty.unwrap_or(config.defaults.difficulty),
        motivation: options.motivation.unwrap_or_default(),
    };

    let outcome = engine::create_habit(&store, fields, Utc::now())?;

    let mut human = HumanOutput::new(format!("habit add: {}", outcome.habit.name));
    human.push_summary("id", outcome.habit.id.to_string());
    human.push_summary("category", outcome.habit.category.label());
    human.push_summary("frequency", outcome.habit.frequency.label());
    push_unlocks(&mut human, &outcome.newly_unlocked);
    human.push_next_step(format!("habit done {}", outcome.habit.id));

    let report = HabitReport {
        habit: outcome.habit,
        unlocked: outcome.newly_unlocked,
    };

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "add",
        &report,
        Some(&human),
    )?;

    Ok(())
}

pub fn run_done(options: DoneOptions) -> Result<()> {
    let store = Store::open(options.data_dir)?;
    engine::ensure_daily_reset(&store, Local::now().date_naive())?;

    let outcome = engine::toggle_completion(&store, options.id, Utc::now())?;

    let header = if outcome.completed {
        format!("Nice! You completed \"{}\"", outcome.habit.name)
    } else {
        format!("habit done: \"{}\" marked not completed", outcome.habit.name)
    };

    let mut human = HumanOutput::new(header);
    human.push_summary("streak", outcome.habit.streak.to_string());
    push_unlocks(&mut human, &outcome.newly_unlocked);
    if outcome.completed {
        human.push_next_step("habit stats".to_string());
    }

    let report = ToggleReport {
        habit: outcome.habit,
        completed: outcome.completed,
        unlocked: outcome.newly_unlocked,
    };

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "done",
        &report,
        Some(&human),
    )?;

    Ok(())
}

pub fn run_list(options: ListOptions) -> Result<()> {
    let store = Store::open(options.data_dir)?;
    let today = Local::now().date_naive();
    engine::ensure_daily_reset(&store, today)?;

    let mut habits = store.load_habits();
    if options.due {
        habits.retain(|h| schedule::is_due(h, today));
    }
    if let Some(category) = options.category {
        habits.retain(|h| h.category == category);
    }
    // Incomplete habits first, matching the dashboard ordering
    habits.sort_by_key(|h| h.completed_today);

    let header = if options.due {
        format!("habit list: {} due today", habits.len())
    } else {
        format!("habit list: {} habits", habits.len())
    };
    let mut human = HumanOutput::new(header);
    for habit in &habits {
        let check = if habit.completed_today { "x" } else { " " };
        human.push_detail(format!(
            "[{check}] {} {} ({} · {}) streak {}",
            habit.id,
            habit.name,
            habit.category.label(),
            habit.frequency.label(),
            habit.streak,
        ));
    }
    if habits.is_empty() {
        human.push_warning("no habits yet".to_string());
        human.push_next_step("habit add <name>".to_string());
    }

    let report = ListReport {
        habits,
        due_only: options.due,
    };

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "list",
        &report,
        Some(&human),
    )?;

    Ok(())
}

pub fn run_edit(options: EditOptions) -> Result<()> {
    let store = Store::open(options.data_dir)?;

    let update = HabitUpdate {
        name: options.name,
        category: options.category,
        frequency: options.frequency,
        reminder_time: options.reminder,
        difficulty: options.difficulty,
        motivation: options.motivation,
    };
    if update.is_empty() {
        return Err(crate::error::Error::InvalidInput(
            "nothing to edit; pass at least one field flag".to_string(),
        ));
    }

    let habit = engine::update_habit(&store, options.id, &update)?;

    let mut human = HumanOutput::new(format!("habit edit: {}", habit.name));
    human.push_summary("id", habit.id.to_string());
    human.push_summary("category", habit.category.label());
    human.push_summary("frequency", habit.frequency.label());
    human.push_summary("streak", habit.streak.to_string());

    let report = HabitReport {
        habit,
        unlocked: Vec::new(),
    };

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "edit",
        &report,
        Some(&human),
    )?;

    Ok(())
}

pub fn run_rm(options: RmOptions) -> Result<()> {
    let store = Store::open(options.data_dir)?;
    let removed = engine::delete_habit(&store, options.id)?;

    let mut human = HumanOutput::new(format!("habit rm: {}", removed.name));
    human.push_summary("id", removed.id.to_string());

    let report = HabitReport {
        habit: removed,
        unlocked: Vec::new(),
    };

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "rm",
        &report,
        Some(&human),
    )?;

    Ok(())
}

pub fn run_reset(options: ResetOptions) -> Result<()> {
    let store = Store::open(options.data_dir)?;
    let cleared = engine::force_daily_reset(&store, Local::now().date_naive())?;

    let habits = store.load_habits();
    let mut human = HumanOutput::new("habit reset");
    human.push_summary("cleared", cleared.to_string());

    let report = ResetReport { cleared, habits };

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "reset",
        &report,
        Some(&human),
    )?;

    Ok(())
}

fn push_unlocks(human: &mut HumanOutput, unlocked: &[AchievementId]) {
    for id in unlocked {
        human.push_detail(format!("Achievement unlocked: {}", id.title()));
    }
}
