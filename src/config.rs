//! Configuration loading and management
//!
//! Handles the `config.toml` file in the data directory. It carries the
//! user profile collected during onboarding plus defaults applied when
//! `habit add` flags are omitted.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::habit::{Category, Difficulty, Frequency};

pub const CONFIG_FILENAME: &str = "config.toml";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// User profile collected at onboarding
    #[serde(default)]
    pub user: UserConfig,

    /// Defaults applied when `habit add` flags are omitted
    #[serde(default)]
    pub defaults: HabitDefaults,
}

/// User profile fields
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserConfig {
    /// Display name, used as the comment author
    #[serde(default = "default_username")]
    pub name: String,

    /// Primary goal chosen during onboarding (drives starter habit set)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_goal: Option<Category>,

    /// Preferred daily notification time (HH:MM), informational only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification_time: Option<String>,

    /// Set once onboarding has run
    #[serde(default)]
    pub onboarding_complete: bool,
}

fn default_username() -> String {
    "You".to_string()
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            name: default_username(),
            primary_goal: None,
            notification_time: None,
            onboarding_complete: false,
        }
    }
}

/// Per-field defaults for new habits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HabitDefaults {
    #[serde(default)]
    pub category: Category,

    #[serde(default)]
    pub frequency: Frequency,

    #[serde(default)]
    pub difficulty: Difficulty,

    /// Default reminder time (HH:MM) for new habits
    #[serde(default = "default_reminder")]
    pub reminder_time: String,
}

fn default_reminder() -> String {
    "09:00".to_string()
}

impl Default for HabitDefaults {
    fn default() -> Self {
        Self {
            category: Category::default(),
            frequency: Frequency::default(),
            difficulty: Difficulty::default(),
            reminder_time: default_reminder(),
        }
    }
}

impl Config {
    /// Load configuration from `config.toml` under the data directory.
    ///
    /// A missing file yields defaults; a malformed file is a user error
    /// (unlike the data files, the config is hand-edited).
    pub fn load(data_dir: &Path) -> Result<Self> {
        let path = data_dir.join(CONFIG_FILENAME);
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(&path)?;
        toml::from_str(&raw).map_err(|err| {
            Error::InvalidConfig(format!("{}: {err}", path.display()))
        })
    }

    /// Persist the configuration to `config.toml` under the data directory.
    pub fn save(&self, data_dir: &Path) -> Result<()> {
        std::fs::create_dir_all(data_dir)?;
        let rendered = toml::to_string_pretty(self)?;
        std::fs::write(data_dir.join(CONFIG_FILENAME), rendered)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.user.name, "You");
        assert!(!config.user.onboarding_complete);
        assert_eq!(config.defaults.reminder_time, "09:00");
    }

    #[test]
    fn roundtrips_through_toml() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.user.name = "Sam".to_string();
        config.user.primary_goal = Some(Category::Learning);
        config.user.onboarding_complete = true;
        config.save(dir.path()).unwrap();

        let loaded = Config::load(dir.path()).unwrap();
        assert_eq!(loaded.user.name, "Sam");
        assert_eq!(loaded.user.primary_goal, Some(Category::Learning));
        assert!(loaded.user.onboarding_complete);
    }

    #[test]
    fn malformed_file_is_invalid_config() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILENAME), "user = [nonsense").unwrap();
        let err = Config::load(dir.path()).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }
}
