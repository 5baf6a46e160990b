//! Reflection journal.
//!
//! A flat list of `{text, date}` entries under its own storage key. The
//! only engine coupling is the `reflection-starter` unlock on the 5th save.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::achievement::{self, AchievementId};
use crate::error::{Error, Result};
use crate::store::Store;

/// Saved reflection count that unlocks `reflection-starter`
pub const REFLECTION_STARTER_COUNT: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reflection {
    pub text: String,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct ReflectOutcome {
    /// Total saved reflections after this one
    pub count: usize,
    pub newly_unlocked: Vec<AchievementId>,
}

/// Append a reflection entry. Empty text is rejected.
pub fn save_reflection(store: &Store, text: &str, now: DateTime<Utc>) -> Result<ReflectOutcome> {
    let text = text.trim();
    if text.is_empty() {
        return Err(Error::InvalidInput(
            "reflection text cannot be empty".to_string(),
        ));
    }

    let _lock = store.lock()?;
    let mut reflections: Vec<Reflection> = store.read_json_or_default(&store.reflections_file());
    reflections.push(Reflection {
        text: text.to_string(),
        date: now,
    });
    store.write_json(&store.reflections_file(), &reflections)?;

    let count = reflections.len();
    let mut newly_unlocked = Vec::new();
    if count == REFLECTION_STARTER_COUNT
        && achievement::unlock(store, AchievementId::ReflectionStarter)?
    {
        newly_unlocked.push(AchievementId::ReflectionStarter);
    }

    Ok(ReflectOutcome {
        count,
        newly_unlocked,
    })
}

/// All saved reflections, oldest first
pub fn list_reflections(store: &Store) -> Vec<Reflection> {
    store.read_json_or_default(&store.reflections_file())
}
