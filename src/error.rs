//! Error types for habitmentor
//!
//! Exit codes:
//! - 0: Success
//! - 2: User error (unknown id, empty required field, bad config)
//! - 4: Operation failed (IO, serialization, lock contention)

use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the habit CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const USER_ERROR: i32 = 2;
    pub const OPERATION_FAILED: i32 = 4;
}

/// Main error type for habitmentor operations
#[derive(Error, Debug)]
pub enum Error {
    // User errors (exit code 2)
    #[error("Habit not found: {0}")]
    HabitNotFound(i64),

    #[error("Achievement not found: {0}")]
    AchievementNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("No data directory available: {0}")]
    DataDirUnavailable(String),

    // Operation failures (exit code 4)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Lock acquisition failed: {0}")]
    LockFailed(PathBuf),

    #[error("Operation failed: {0}")]
    OperationFailed(String),
}

impl Error {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            // User errors
            Error::HabitNotFound(_)
            | Error::AchievementNotFound(_)
            | Error::InvalidInput(_)
            | Error::InvalidConfig(_)
            | Error::DataDirUnavailable(_) => exit_codes::USER_ERROR,

            // Operation failures
            Error::Io(_)
            | Error::Json(_)
            | Error::TomlParse(_)
            | Error::TomlSerialize(_)
            | Error::LockFailed(_)
            | Error::OperationFailed(_) => exit_codes::OPERATION_FAILED,
        }
    }

    /// Structured details for JSON error envelopes, when the error carries
    /// an identifier worth machine-reading.
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            Error::HabitNotFound(id) => Some(serde_json::json!({ "habit_id": id })),
            Error::AchievementNotFound(id) => Some(serde_json::json!({ "achievement_id": id })),
            _ => None,
        }
    }
}

/// Result type alias for habitmentor operations
pub type Result<T> = std::result::Result<T, Error>;

/// Wrapper for displaying errors in JSON format
#[derive(serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub code: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl From<&Error> for JsonError {
    fn from(err: &Error) -> Self {
        JsonError {
            error: err.to_string(),
            code: err.exit_code(),
            details: err.details(),
        }
    }
}
