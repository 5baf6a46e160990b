//! Scheduling policy: which habits are due on a given calendar day.

use chrono::{Datelike, NaiveDate, Weekday};

use crate::habit::{Frequency, Habit};

/// True for Monday through Friday
pub fn is_weekday(date: NaiveDate) -> bool {
    !is_weekend(date)
}

/// True for Saturday and Sunday
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Whether a habit is due on `today` per its frequency rule.
///
/// Weekly habits recur on the weekday they were created.
pub fn is_due(habit: &Habit, today: NaiveDate) -> bool {
    match habit.frequency {
        Frequency::Daily => true,
        Frequency::Weekdays => is_weekday(today),
        Frequency::Weekends => is_weekend(today),
        Frequency::Weekly => habit.date_created.date_naive().weekday() == today.weekday(),
    }
}
