//! Streak and completion engine.
//!
//! Every operation here is a read-modify-write of the whole habit
//! collection under the store lock, so two CLI invocations never interleave
//! a partial update. Completion toggles drive achievement re-evaluation;
//! presentation of outcomes is left to the caller.

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, info};

use crate::achievement::{self, AchievementId};
use crate::error::{Error, Result};
use crate::habit::{Habit, HabitFields, HabitUpdate};
use crate::schedule;
use crate::store::Store;

/// Result of a completion toggle
#[derive(Debug, Clone)]
pub struct ToggleOutcome {
    /// The habit after the toggle
    pub habit: Habit,
    /// Whether the toggle marked the habit complete (congrats trigger)
    pub completed: bool,
    /// Achievements newly unlocked by this toggle
    pub newly_unlocked: Vec<AchievementId>,
}

/// Result of creating a habit
#[derive(Debug, Clone)]
pub struct CreateOutcome {
    pub habit: Habit,
    pub newly_unlocked: Vec<AchievementId>,
}

/// Flip a habit's completion state for today.
///
/// Completing increments the streak, stamps the completion time, and
/// re-evaluates achievements. Un-completing decrements the streak with a
/// floor of 0 and triggers no feedback.
pub fn toggle_completion(store: &Store, habit_id: i64, now: DateTime<Utc>) -> Result<ToggleOutcome> {
    let _lock = store.lock()?;
    let mut habits = store.load_habits();
    let habit = habits
        .iter_mut()
        .find(|h| h.id == habit_id)
        .ok_or(Error::HabitNotFound(habit_id))?;

    habit.completed_today = !habit.completed_today;
    let completed = habit.completed_today;
    if completed {
        habit.streak += 1;
        habit.last_completed_date = Some(now);
    } else {
        habit.streak = habit.streak.saturating_sub(1);
    }
    let snapshot = habit.clone();
    debug!(id = habit_id, completed, streak = snapshot.streak, "toggled completion");

    store.save_habits(&habits)?;

    let newly_unlocked = if completed {
        achievement::evaluate_completion(store, &habits)?
    } else {
        Vec::new()
    };

    Ok(ToggleOutcome {
        habit: snapshot,
        completed,
        newly_unlocked,
    })
}

/// Create a new habit and append it to the collection.
///
/// The identifier is derived from the current timestamp in milliseconds,
/// bumped past any collision. The very first habit unlocks `first-step`.
pub fn create_habit(store: &Store, fields: HabitFields, now: DateTime<Utc>) -> Result<CreateOutcome> {
    let fields = fields.validate()?;

    let _lock = store.lock()?;
    let mut habits = store.load_habits();

    let mut id = now.timestamp_millis();
    while habits.iter().any(|h| h.id == id) {
        id += 1;
    }

    let habit = Habit::new(id, fields, now);
    habits.push(habit.clone());
    store.save_habits(&habits)?;
    info!(id, name = %habit.name, "habit created");

    let mut newly_unlocked = Vec::new();
    if habits.len() == 1 && achievement::unlock(store, AchievementId::FirstStep)? {
        newly_unlocked.push(AchievementId::FirstStep);
    }

    Ok(CreateOutcome {
        habit,
        newly_unlocked,
    })
}

/// Replace a habit's descriptive fields in place.
///
/// Streak state, identity, and creation date are preserved untouched.
pub fn update_habit(store: &Store, habit_id: i64, update: &HabitUpdate) -> Result<Habit> {
    let _lock = store.lock()?;
    let mut habits = store.load_habits();
    let habit = habits
        .iter_mut()
        .find(|h| h.id == habit_id)
        .ok_or(Error::HabitNotFound(habit_id))?;

    update.apply(habit)?;
    let snapshot = habit.clone();
    store.save_habits(&habits)?;
    Ok(snapshot)
}

/// Remove a habit from the collection, returning the removed record.
pub fn delete_habit(store: &Store, habit_id: i64) -> Result<Habit> {
    let _lock = store.lock()?;
    let mut habits = store.load_habits();
    let index = habits
        .iter()
        .position(|h| h.id == habit_id)
        .ok_or(Error::HabitNotFound(habit_id))?;

    let removed = habits.remove(index);
    store.save_habits(&habits)?;
    info!(id = habit_id, "habit deleted");
    Ok(removed)
}

/// Clear today's completion flag for every habit due on `today`.
///
/// Returns how many habits were reset.
pub fn reset_daily(habits: &mut [Habit], today: NaiveDate) -> usize {
    let mut cleared = 0;
    for habit in habits.iter_mut() {
        if schedule::is_due(habit, today) && habit.completed_today {
            habit.completed_today = false;
            cleared += 1;
        }
    }
    cleared
}

/// Run the daily reset at most once per calendar day.
///
/// The stored last-reset date gates the run; when it differs from `today`
/// the reset executes and the stamp advances. Returns whether a reset ran.
pub fn ensure_daily_reset(store: &Store, today: NaiveDate) -> Result<bool> {
    if store.load_last_reset() == Some(today) {
        return Ok(false);
    }
    force_daily_reset(store, today)?;
    Ok(true)
}

/// Run the daily reset now, regardless of the last-reset stamp.
///
/// `habit reset` uses this. The stamp still advances, so the implicit
/// once-per-day triggers stay quiet for the rest of the day. Returns how
/// many habits were cleared.
pub fn force_daily_reset(store: &Store, today: NaiveDate) -> Result<usize> {
    let _lock = store.lock()?;
    let mut habits = store.load_habits();
    let cleared = reset_daily(&mut habits, today);
    store.save_habits(&habits)?;
    store.save_last_reset(today)?;
    debug!(%today, cleared, "daily reset ran");
    Ok(cleared)
}
