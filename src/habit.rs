//! Habit data model.
//!
//! Field names serialize in camelCase so the on-disk JSON matches the
//! shapes described in the storage contract (`habits` key).

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Habit category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum, Default)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Health,
    Productivity,
    Learning,
    Mindfulness,
    #[default]
    Other,
}

impl Category {
    /// Display label for lists and summaries
    pub fn label(&self) -> &'static str {
        match self {
            Category::Health => "Health & Fitness",
            Category::Productivity => "Productivity",
            Category::Learning => "Learning",
            Category::Mindfulness => "Mindfulness",
            Category::Other => "Other",
        }
    }
}

/// Recurrence rule governing which calendar days a habit is due
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum, Default)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    #[default]
    Daily,
    Weekdays,
    Weekends,
    Weekly,
}

impl Frequency {
    pub fn label(&self) -> &'static str {
        match self {
            Frequency::Daily => "Daily",
            Frequency::Weekdays => "Weekdays",
            Frequency::Weekends => "Weekends",
            Frequency::Weekly => "Weekly",
        }
    }
}

/// Self-reported difficulty. Descriptive only, no engine behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

/// A single past completion event.
///
/// Reserved for per-day history tracking; the engine does not populate it
/// yet. The mood slot comes from the post-completion check-in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionEvent {
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<String>,
}

/// A tracked habit record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    /// Unique identifier, timestamp-derived, immutable after creation
    pub id: i64,
    pub name: String,
    pub category: Category,
    pub frequency: Frequency,
    #[serde(default)]
    pub reminder_time: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub motivation: String,
    /// Consecutive-completion counter, never negative
    pub streak: u32,
    pub completed_today: bool,
    /// Creation timestamp, immutable
    pub date_created: DateTime<Utc>,
    #[serde(default)]
    pub completion_history: Vec<CompletionEvent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_completed_date: Option<DateTime<Utc>>,
}

impl Habit {
    /// Construct a fresh habit record: streak 0, not completed, empty history.
    pub fn new(id: i64, fields: HabitFields, created: DateTime<Utc>) -> Self {
        Self {
            id,
            name: fields.name,
            category: fields.category,
            frequency: fields.frequency,
            reminder_time: fields.reminder_time,
            difficulty: fields.difficulty,
            motivation: fields.motivation,
            streak: 0,
            completed_today: false,
            date_created: created,
            completion_history: Vec::new(),
            last_completed_date: None,
        }
    }
}

/// Descriptive fields supplied at creation or edit time
#[derive(Debug, Clone, Default)]
pub struct HabitFields {
    pub name: String,
    pub category: Category,
    pub frequency: Frequency,
    pub reminder_time: String,
    pub difficulty: Difficulty,
    pub motivation: String,
}

impl HabitFields {
    /// Validate required fields. Name must be non-empty after trimming;
    /// category and frequency are enforced by the enum types themselves.
    pub fn validate(mut self) -> Result<Self> {
        self.name = self.name.trim().to_string();
        if self.name.is_empty() {
            return Err(Error::InvalidInput("habit name cannot be empty".to_string()));
        }
        self.motivation = self.motivation.trim().to_string();
        Ok(self)
    }
}

/// Partial update applied by `habit edit`. Unset fields are preserved.
#[derive(Debug, Clone, Default)]
pub struct HabitUpdate {
    pub name: Option<String>,
    pub category: Option<Category>,
    pub frequency: Option<Frequency>,
    pub reminder_time: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub motivation: Option<String>,
}

impl HabitUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.category.is_none()
            && self.frequency.is_none()
            && self.reminder_time.is_none()
            && self.difficulty.is_none()
            && self.motivation.is_none()
    }

    /// Apply the update to descriptive fields only. Identity, streak state,
    /// and creation date are untouched.
    pub fn apply(&self, habit: &mut Habit) -> Result<()> {
        if let Some(name) = &self.name {
            let name = name.trim();
            if name.is_empty() {
                return Err(Error::InvalidInput("habit name cannot be empty".to_string()));
            }
            habit.name = name.to_string();
        }
        if let Some(category) = self.category {
            habit.category = category;
        }
        if let Some(frequency) = self.frequency {
            habit.frequency = frequency;
        }
        if let Some(reminder) = &self.reminder_time {
            habit.reminder_time = reminder.clone();
        }
        if let Some(difficulty) = self.difficulty {
            habit.difficulty = difficulty;
        }
        if let Some(motivation) = &self.motivation {
            habit.motivation = motivation.trim().to_string();
        }
        Ok(())
    }
}
