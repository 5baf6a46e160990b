//! habitmentor - HabitMentor Library
//!
//! This library provides the core functionality for the habit CLI tool:
//! personal habit tracking with streaks, achievements, and mock social
//! features over a local JSON data directory.
//!
//! # Core Concepts
//!
//! - **Habits**: User-defined recurring actions with a category and a
//!   frequency rule
//! - **Streaks**: Per-habit consecutive-completion counters
//! - **Achievements**: One-way milestone flags derived from activity
//! - **Scheduling**: Which habits are due on a given calendar day
//! - **Analytics**: On-demand completion and streak statistics
//!
//! # Module Organization
//!
//! - `cli`: Command-line interface using clap
//! - `config`: User profile and defaults from `config.toml`
//! - `error`: Error types and result aliases
//! - `store`: Data directory layout, tolerant JSON reads, atomic writes
//! - `habit`: The habit record and its field enums
//! - `engine`: Completion toggles, streak rules, creation and daily reset
//! - `achievement`: Achievement registry and evaluation
//! - `schedule`: Due-date policy
//! - `analytics`: Summary statistics
//! - `reflection`: Reflection journal
//! - `social`: Partners, challenges, nudges, and tip comments (all mock)
//! - `output`: Human and JSON output envelopes

pub mod achievement;
pub mod analytics;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod habit;
pub mod output;
pub mod reflection;
pub mod schedule;
pub mod social;
pub mod store;

pub use error::{Error, Result};
