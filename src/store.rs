//! Storage layer for habitmentor
//!
//! All durable state lives as JSON files in a single data directory, one
//! file per logical key:
//!
//! ```text
//! <data-dir>/
//!   config.toml           # User profile and habit defaults
//!   habits.json           # The habit collection (whole-value writes only)
//!   achievements.json     # Fixed six-key achievement registry
//!   consecutive_days      # Stringified all-habits-complete counter
//!   last_reset            # Calendar date of the last daily reset
//!   reflections.json      # Reflection entries
//!   partners.json         # Accountability partners
//!   challenges.json       # Joined challenge ids
//!   comments/<tip>.json   # Per-tip comment lists
//!   .lock                 # Advisory lock for read-modify-write cycles
//! ```
//!
//! Reads of data files degrade to empty defaults on missing or malformed
//! content; every write replaces the whole value under its key.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use chrono::{DateTime, Duration as ChronoDuration, NaiveDate, Utc};
use fs2::FileExt;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::habit::{Category, Difficulty, Frequency, Habit, HabitFields};

/// Default lock timeout in milliseconds
pub const DEFAULT_LOCK_TIMEOUT_MS: u64 = 5000;

/// Retry interval while waiting for the lock
const LOCK_RETRY_INTERVAL_MS: u64 = 50;

/// Storage manager for the habitmentor data directory
#[derive(Debug, Clone)]
pub struct Store {
    data_dir: PathBuf,
}

impl Store {
    /// Create a storage manager rooted at the given data directory
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    /// Open storage, resolving the data directory from the CLI flag (which
    /// clap also feeds from `HABIT_DATA_DIR`) or the platform data dir.
    pub fn open(cli_data_dir: Option<PathBuf>) -> Result<Self> {
        let data_dir = match cli_data_dir {
            Some(dir) => dir,
            None => default_data_dir()?,
        };
        let store = Self::new(data_dir);
        store.init()?;
        Ok(store)
    }

    /// Ensure the directory structure exists
    pub fn init(&self) -> Result<()> {
        fs::create_dir_all(&self.data_dir)?;
        fs::create_dir_all(self.comments_dir())?;
        Ok(())
    }

    // =========================================================================
    // Path accessors
    // =========================================================================

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn habits_file(&self) -> PathBuf {
        self.data_dir.join("habits.json")
    }

    pub fn achievements_file(&self) -> PathBuf {
        self.data_dir.join("achievements.json")
    }

    pub fn consecutive_days_file(&self) -> PathBuf {
        self.data_dir.join("consecutive_days")
    }

    pub fn last_reset_file(&self) -> PathBuf {
        self.data_dir.join("last_reset")
    }

    pub fn reflections_file(&self) -> PathBuf {
        self.data_dir.join("reflections.json")
    }

    pub fn partners_file(&self) -> PathBuf {
        self.data_dir.join("partners.json")
    }

    pub fn challenges_file(&self) -> PathBuf {
        self.data_dir.join("challenges.json")
    }

    pub fn comments_dir(&self) -> PathBuf {
        self.data_dir.join("comments")
    }

    /// Path to the comment list for one community tip
    pub fn comments_file(&self, tip_id: &str) -> PathBuf {
        self.comments_dir().join(format!("{}.json", sanitize_key(tip_id)))
    }

    fn lock_file(&self) -> PathBuf {
        self.data_dir.join(".lock")
    }

    // =========================================================================
    // File I/O helpers
    // =========================================================================

    /// Read a JSON value, treating a missing or malformed file as the
    /// default. Best-effort local state, not a durability guarantee.
    pub fn read_json_or_default<T: DeserializeOwned + Default>(&self, path: &Path) -> T {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(_) => return T::default(),
        };
        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(err) => {
                warn!(path = %path.display(), %err, "malformed data file, using default");
                T::default()
            }
        }
    }

    /// Write JSON data atomically (write to temp, then rename) so a reader
    /// never observes a partial value.
    pub fn write_json<T: Serialize>(&self, path: &Path, data: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(data)?;
        self.write_atomic(path, json.as_bytes())
    }

    /// Write data atomically using temp file + rename
    pub fn write_atomic(&self, path: &Path, data: &[u8]) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let temp_path = path.with_extension("tmp");
        let mut file = File::create(&temp_path)?;
        file.write_all(data)?;
        file.sync_all()?;
        fs::rename(&temp_path, path)?;
        Ok(())
    }

    /// Acquire the exclusive store lock for a read-modify-write cycle.
    /// The guard releases the lock on drop.
    pub fn lock(&self) -> Result<StoreLock> {
        StoreLock::acquire(&self.lock_file(), DEFAULT_LOCK_TIMEOUT_MS)
    }

    // =========================================================================
    // Habit collection
    // =========================================================================

    /// Load the full habit collection; empty if nothing is stored yet or
    /// the stored value cannot be parsed.
    pub fn load_habits(&self) -> Vec<Habit> {
        self.read_json_or_default(&self.habits_file())
    }

    /// Persist the full habit collection, replacing prior state.
    pub fn save_habits(&self, habits: &[Habit]) -> Result<()> {
        debug!(count = habits.len(), "saving habit collection");
        self.write_json(&self.habits_file(), &habits)
    }

    /// Seed storage with a starter habit set on first run only.
    ///
    /// Returns the seeded habits, or `None` when a collection already
    /// exists (idempotent: checks existence before writing).
    pub fn seed_starter_habits(
        &self,
        goal: Option<Category>,
        now: DateTime<Utc>,
    ) -> Result<Option<Vec<Habit>>> {
        if self.habits_file().exists() {
            return Ok(None);
        }
        let habits = match goal {
            Some(goal) => starter_habits_for_goal(goal, now),
            None => default_starter_habits(now),
        };
        self.save_habits(&habits)?;
        Ok(Some(habits))
    }

    // =========================================================================
    // Counters and stamps
    // =========================================================================

    /// Consecutive all-habits-complete evaluations, stored as a
    /// stringified integer. Missing or unparsable content counts as 0.
    pub fn load_consecutive_days(&self) -> u32 {
        fs::read_to_string(self.consecutive_days_file())
            .ok()
            .and_then(|raw| raw.trim().parse().ok())
            .unwrap_or(0)
    }

    pub fn save_consecutive_days(&self, days: u32) -> Result<()> {
        self.write_atomic(&self.consecutive_days_file(), days.to_string().as_bytes())
    }

    /// Calendar date of the last daily reset, if one has run.
    pub fn load_last_reset(&self) -> Option<NaiveDate> {
        fs::read_to_string(self.last_reset_file())
            .ok()
            .and_then(|raw| raw.trim().parse().ok())
    }

    pub fn save_last_reset(&self, date: NaiveDate) -> Result<()> {
        self.write_atomic(&self.last_reset_file(), date.to_string().as_bytes())
    }
}

/// Resolve the platform data directory for habitmentor
fn default_data_dir() -> Result<PathBuf> {
    directories::ProjectDirs::from("", "", "habitmentor")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| {
            Error::DataDirUnavailable(
                "no home directory; pass --data-dir or set HABIT_DATA_DIR".to_string(),
            )
        })
}

/// Keep per-tip file names filesystem-safe
fn sanitize_key(raw: &str) -> String {
    raw.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}

/// A lock guard that releases the advisory lock when dropped
pub struct StoreLock {
    _file: File,
}

impl StoreLock {
    fn acquire(path: &Path, timeout_ms: u64) -> Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;

        let deadline = Instant::now() + Duration::from_millis(timeout_ms);
        loop {
            match file.try_lock_exclusive() {
                Ok(()) => return Ok(Self { _file: file }),
                Err(_) if Instant::now() < deadline => {
                    std::thread::sleep(Duration::from_millis(LOCK_RETRY_INTERVAL_MS));
                }
                Err(_) => return Err(Error::LockFailed(path.to_path_buf())),
            }
        }
    }
}

fn starter(
    id: i64,
    name: &str,
    category: Category,
    reminder: &str,
    difficulty: Difficulty,
    motivation: &str,
    created: DateTime<Utc>,
) -> Habit {
    Habit::new(
        id,
        HabitFields {
            name: name.to_string(),
            category,
            frequency: Frequency::Daily,
            reminder_time: reminder.to_string(),
            difficulty,
            motivation: motivation.to_string(),
        },
        created,
    )
}

/// The fixed first-run sample pair, with a little pre-existing streak so
/// the dashboard is not empty.
fn default_starter_habits(now: DateTime<Utc>) -> Vec<Habit> {
    let mut water = starter(
        1,
        "Drink 8 glasses of water",
        Category::Health,
        "09:00",
        Difficulty::Easy,
        "Stay hydrated for better energy and focus",
        now - ChronoDuration::days(5),
    );
    water.streak = 3;

    let mut read = starter(
        2,
        "Read for 20 minutes",
        Category::Learning,
        "20:00",
        Difficulty::Medium,
        "Expand knowledge and improve focus",
        now - ChronoDuration::days(3),
    );
    read.streak = 1;

    vec![water, read]
}

/// Goal-specific starter sets used when onboarding captured a primary goal
fn starter_habits_for_goal(goal: Category, now: DateTime<Utc>) -> Vec<Habit> {
    let id = now.timestamp_millis();
    match goal {
        Category::Health => vec![
            starter(
                id,
                "Drink 8 glasses of water",
                Category::Health,
                "09:00",
                Difficulty::Easy,
                "Stay hydrated for better energy and focus",
                now,
            ),
            starter(
                id + 1,
                "Exercise for 30 minutes",
                Category::Health,
                "17:00",
                Difficulty::Medium,
                "Stay fit and boost my mood",
                now,
            ),
        ],
        Category::Productivity => vec![
            starter(
                id,
                "Plan my day",
                Category::Productivity,
                "08:00",
                Difficulty::Easy,
                "Start the day organized and focused",
                now,
            ),
            starter(
                id + 1,
                "Zero inbox",
                Category::Productivity,
                "16:00",
                Difficulty::Medium,
                "Maintain email organization and reduce stress",
                now,
            ),
        ],
        Category::Learning => vec![
            starter(
                id,
                "Read for 20 minutes",
                Category::Learning,
                "20:00",
                Difficulty::Medium,
                "Expand knowledge and improve focus",
                now,
            ),
            starter(
                id + 1,
                "Practice a new skill",
                Category::Learning,
                "18:00",
                Difficulty::Medium,
                "Continuous improvement in my skills",
                now,
            ),
        ],
        Category::Mindfulness => vec![
            starter(
                id,
                "Meditate for 10 minutes",
                Category::Mindfulness,
                "07:00",
                Difficulty::Medium,
                "Reduce stress and improve focus",
                now,
            ),
            starter(
                id + 1,
                "Practice gratitude",
                Category::Mindfulness,
                "21:00",
                Difficulty::Easy,
                "Increase happiness and positive outlook",
                now,
            ),
        ],
        Category::Other => vec![starter(
            id,
            "Drink 8 glasses of water",
            Category::Health,
            "09:00",
            Difficulty::Easy,
            "Stay hydrated for better energy and focus",
            now,
        )],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> (tempfile::TempDir, Store) {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path().to_path_buf());
        store.init().unwrap();
        (dir, store)
    }

    #[test]
    fn load_habits_is_empty_when_missing() {
        let (_dir, store) = temp_store();
        assert!(store.load_habits().is_empty());
    }

    #[test]
    fn load_habits_is_empty_when_malformed() {
        let (_dir, store) = temp_store();
        fs::write(store.habits_file(), "{not json").unwrap();
        assert!(store.load_habits().is_empty());
    }

    #[test]
    fn habits_roundtrip() {
        let (_dir, store) = temp_store();
        let habits = default_starter_habits(Utc::now());
        store.save_habits(&habits).unwrap();
        assert_eq!(store.load_habits(), habits);
    }

    #[test]
    fn seeding_is_idempotent() {
        let (_dir, store) = temp_store();
        let seeded = store.seed_starter_habits(None, Utc::now()).unwrap();
        assert_eq!(seeded.as_ref().map(Vec::len), Some(2));

        // Second run must not overwrite
        store.save_habits(&[]).unwrap();
        let again = store.seed_starter_habits(None, Utc::now()).unwrap();
        assert!(again.is_none());
        assert!(store.load_habits().is_empty());
    }

    #[test]
    fn goal_seeding_uses_goal_set() {
        let (_dir, store) = temp_store();
        let seeded = store
            .seed_starter_habits(Some(Category::Mindfulness), Utc::now())
            .unwrap()
            .unwrap();
        assert_eq!(seeded.len(), 2);
        assert!(seeded.iter().all(|h| h.category == Category::Mindfulness));
        assert!(seeded.iter().all(|h| h.streak == 0));
        assert_ne!(seeded[0].id, seeded[1].id);
    }

    #[test]
    fn counter_tolerates_garbage() {
        let (_dir, store) = temp_store();
        assert_eq!(store.load_consecutive_days(), 0);
        fs::write(store.consecutive_days_file(), "not a number").unwrap();
        assert_eq!(store.load_consecutive_days(), 0);
        store.save_consecutive_days(4).unwrap();
        assert_eq!(store.load_consecutive_days(), 4);
    }

    #[test]
    fn last_reset_roundtrip() {
        let (_dir, store) = temp_store();
        assert!(store.load_last_reset().is_none());
        let date = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        store.save_last_reset(date).unwrap();
        assert_eq!(store.load_last_reset(), Some(date));
    }

    #[test]
    fn lock_guard_is_exclusive_until_dropped() {
        let (_dir, store) = temp_store();
        let guard = store.lock().unwrap();
        drop(guard);
        // Reacquire after release
        let _guard = store.lock().unwrap();
    }

    #[test]
    fn comment_keys_are_sanitized() {
        let (_dir, store) = temp_store();
        let path = store.comments_file("../evil");
        assert!(path.starts_with(store.comments_dir()));
        assert!(!path.to_string_lossy().contains(".."));
    }
}
