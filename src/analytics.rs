//! Read-only summary statistics over the habit collection.
//!
//! All functions are pure, return 0 for an empty collection, and are
//! recomputed on demand rather than cached.

use crate::habit::Habit;

/// Percentage of habits completed today, rounded to the nearest integer
pub fn completion_rate(habits: &[Habit]) -> u32 {
    if habits.is_empty() {
        return 0;
    }
    let completed = habits.iter().filter(|h| h.completed_today).count();
    ((completed as f64 / habits.len() as f64) * 100.0).round() as u32
}

/// Average current streak, rounded to the nearest integer
pub fn average_streak(habits: &[Habit]) -> u32 {
    if habits.is_empty() {
        return 0;
    }
    let total: u64 = habits.iter().map(|h| u64::from(h.streak)).sum();
    (total as f64 / habits.len() as f64).round() as u32
}

/// Longest current streak across the collection
pub fn longest_streak(habits: &[Habit]) -> u32 {
    habits.iter().map(|h| h.streak).max().unwrap_or(0)
}

/// The top `n` habits by current streak, descending
pub fn top_streaks(habits: &[Habit], n: usize) -> Vec<&Habit> {
    let mut ranked: Vec<&Habit> = habits.iter().collect();
    ranked.sort_by(|a, b| b.streak.cmp(&a.streak));
    ranked.truncate(n);
    ranked
}
