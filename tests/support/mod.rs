#![allow(dead_code)]

use std::path::Path;

use assert_cmd::Command;
use tempfile::TempDir;

use habitmentor::achievement::Registry;
use habitmentor::habit::Habit;
use habitmentor::store::Store;

/// A throwaway data directory standing in for the user's home state
pub struct TestHome {
    dir: TempDir,
}

impl TestHome {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Library-level store over the same data directory
    pub fn store(&self) -> Store {
        let store = Store::new(self.dir.path().to_path_buf());
        store.init().expect("store init");
        store
    }

    /// The `habit` binary pointed at this data directory
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("habit").expect("binary");
        cmd.env("HABIT_DATA_DIR", self.dir.path());
        cmd
    }

    pub fn read_habits(&self) -> Vec<Habit> {
        self.store().load_habits()
    }

    pub fn read_registry(&self) -> Registry {
        habitmentor::achievement::load_registry(&self.store())
    }

    pub fn consecutive_days(&self) -> u32 {
        self.store().load_consecutive_days()
    }
}
