//! Achievement registry and evaluation.
//!
//! Six fixed achievements, stored as a key-to-bool mapping. Unlocks are
//! monotonic and idempotent: once true, never reset, and re-unlocking
//! reports nothing so callers never re-notify.
//!
//! The evaluator runs on every completion toggle, not once per day. When
//! every habit in a non-empty collection is completed today it increments
//! the consecutive-days counter, otherwise it resets the counter to 0.
//! Toggling within one day can therefore bump or reset the counter several
//! times; that observed behavior is kept as is.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::habit::Habit;
use crate::store::Store;

/// Counter value that unlocks `consistent`
pub const CONSISTENT_DAYS: u32 = 3;
/// Counter value that unlocks `week-warrior`
pub const WEEK_WARRIOR_DAYS: u32 = 7;
/// Per-habit streak that unlocks `habit-master`
pub const HABIT_MASTER_STREAK: u32 = 30;

/// The fixed achievement catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AchievementId {
    FirstStep,
    Consistent,
    SocialButterfly,
    WeekWarrior,
    HabitMaster,
    ReflectionStarter,
}

impl AchievementId {
    pub const ALL: [AchievementId; 6] = [
        AchievementId::FirstStep,
        AchievementId::Consistent,
        AchievementId::SocialButterfly,
        AchievementId::WeekWarrior,
        AchievementId::HabitMaster,
        AchievementId::ReflectionStarter,
    ];

    /// Stable storage key (kebab-case)
    pub fn key(&self) -> &'static str {
        match self {
            AchievementId::FirstStep => "first-step",
            AchievementId::Consistent => "consistent",
            AchievementId::SocialButterfly => "social-butterfly",
            AchievementId::WeekWarrior => "week-warrior",
            AchievementId::HabitMaster => "habit-master",
            AchievementId::ReflectionStarter => "reflection-starter",
        }
    }

    /// Display title
    pub fn title(&self) -> &'static str {
        match self {
            AchievementId::FirstStep => "First Step",
            AchievementId::Consistent => "Consistent",
            AchievementId::SocialButterfly => "Social Butterfly",
            AchievementId::WeekWarrior => "Week Warrior",
            AchievementId::HabitMaster => "Habit Master",
            AchievementId::ReflectionStarter => "Reflection Starter",
        }
    }

    /// How the achievement is earned
    pub fn description(&self) -> &'static str {
        match self {
            AchievementId::FirstStep => "Create your first habit",
            AchievementId::Consistent => "Complete all habits 3 days in a row",
            AchievementId::SocialButterfly => "Add a partner or join a challenge",
            AchievementId::WeekWarrior => "Complete all habits 7 days in a row",
            AchievementId::HabitMaster => "Reach a 30-day streak on any habit",
            AchievementId::ReflectionStarter => "Save 5 reflections",
        }
    }
}

impl fmt::Display for AchievementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for AchievementId {
    type Err = Error;

    fn from_str(raw: &str) -> Result<Self> {
        AchievementId::ALL
            .into_iter()
            .find(|id| id.key() == raw)
            .ok_or_else(|| Error::AchievementNotFound(raw.to_string()))
    }
}

/// Persisted unlocked state, one key per achievement.
///
/// A missing registry deserializes to all-false; keys are never removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Registry {
    #[serde(rename = "first-step", default)]
    first_step: bool,
    #[serde(default)]
    consistent: bool,
    #[serde(rename = "social-butterfly", default)]
    social_butterfly: bool,
    #[serde(rename = "week-warrior", default)]
    week_warrior: bool,
    #[serde(rename = "habit-master", default)]
    habit_master: bool,
    #[serde(rename = "reflection-starter", default)]
    reflection_starter: bool,
}

impl Registry {
    pub fn is_unlocked(&self, id: AchievementId) -> bool {
        match id {
            AchievementId::FirstStep => self.first_step,
            AchievementId::Consistent => self.consistent,
            AchievementId::SocialButterfly => self.social_butterfly,
            AchievementId::WeekWarrior => self.week_warrior,
            AchievementId::HabitMaster => self.habit_master,
            AchievementId::ReflectionStarter => self.reflection_starter,
        }
    }

    fn set(&mut self, id: AchievementId) {
        match id {
            AchievementId::FirstStep => self.first_step = true,
            AchievementId::Consistent => self.consistent = true,
            AchievementId::SocialButterfly => self.social_butterfly = true,
            AchievementId::WeekWarrior => self.week_warrior = true,
            AchievementId::HabitMaster => self.habit_master = true,
            AchievementId::ReflectionStarter => self.reflection_starter = true,
        }
    }

    pub fn unlocked_count(&self) -> usize {
        AchievementId::ALL
            .into_iter()
            .filter(|id| self.is_unlocked(*id))
            .count()
    }

    pub fn total(&self) -> usize {
        AchievementId::ALL.len()
    }

    pub fn entries(&self) -> impl Iterator<Item = (AchievementId, bool)> + '_ {
        AchievementId::ALL
            .into_iter()
            .map(move |id| (id, self.is_unlocked(id)))
    }
}

/// Load the registry, initializing all keys to false when absent
pub fn load_registry(store: &Store) -> Registry {
    store.read_json_or_default(&store.achievements_file())
}

/// Unlock an achievement. Idempotent: returns `true` only on the first
/// unlock, so the caller knows whether to notify.
pub fn unlock(store: &Store, id: AchievementId) -> Result<bool> {
    let mut registry = load_registry(store);
    if registry.is_unlocked(id) {
        debug!(achievement = %id, "already unlocked");
        return Ok(false);
    }
    registry.set(id);
    store.write_json(&store.achievements_file(), &registry)?;
    info!(achievement = %id, "achievement unlocked");
    Ok(true)
}

/// Re-evaluate threshold achievements after a completion toggle.
///
/// Updates the consecutive-days counter and returns the newly unlocked
/// achievement ids. Presentation is the caller's job.
pub fn evaluate_completion(store: &Store, habits: &[Habit]) -> Result<Vec<AchievementId>> {
    let mut newly_unlocked = Vec::new();

    let all_completed = !habits.is_empty() && habits.iter().all(|h| h.completed_today);
    if all_completed {
        let days = store.load_consecutive_days() + 1;
        store.save_consecutive_days(days)?;
        debug!(days, "all habits complete, counter incremented");

        if days >= CONSISTENT_DAYS && unlock(store, AchievementId::Consistent)? {
            newly_unlocked.push(AchievementId::Consistent);
        }
        if days >= WEEK_WARRIOR_DAYS && unlock(store, AchievementId::WeekWarrior)? {
            newly_unlocked.push(AchievementId::WeekWarrior);
        }
    } else {
        store.save_consecutive_days(0)?;
    }

    if habits.iter().any(|h| h.streak >= HABIT_MASTER_STREAK)
        && unlock(store, AchievementId::HabitMaster)?
    {
        newly_unlocked.push(AchievementId::HabitMaster);
    }

    Ok(newly_unlocked)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_serializes_with_kebab_keys() {
        let registry = Registry::default();
        let json = serde_json::to_value(registry).unwrap();
        for id in AchievementId::ALL {
            assert_eq!(json[id.key()], serde_json::json!(false), "missing {id}");
        }
    }

    #[test]
    fn missing_registry_is_all_false() {
        let registry: Registry = serde_json::from_str("{}").unwrap();
        assert_eq!(registry.unlocked_count(), 0);
        assert_eq!(registry.total(), 6);
    }

    #[test]
    fn id_parses_from_storage_key() {
        assert_eq!(
            "week-warrior".parse::<AchievementId>().unwrap(),
            AchievementId::WeekWarrior
        );
        assert!(matches!(
            "not-a-badge".parse::<AchievementId>(),
            Err(Error::AchievementNotFound(_))
        ));
    }

    #[test]
    fn unlock_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path().to_path_buf());
        store.init().unwrap();

        assert!(unlock(&store, AchievementId::FirstStep).unwrap());
        assert!(!unlock(&store, AchievementId::FirstStep).unwrap());
        assert!(load_registry(&store).is_unlocked(AchievementId::FirstStep));
    }
}
