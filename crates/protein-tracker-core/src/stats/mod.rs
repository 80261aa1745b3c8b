//! Statistics derived from reconciled history.
//!
//! Everything here is a pure function of the history list, the current app
//! day and (for week/month windows) the current calendar date.

mod period;
mod streak;

pub use period::{completion_rate, monthly_count, week_bounds, weekly_count};
pub use streak::{current_streak, longest_streak};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::clock::AppDateKey;

/// All aggregates shown to the user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackerStats {
    /// Number of completed days in history
    pub total_days: u32,
    pub current_streak: u32,
    pub longest_streak: u32,
    /// Completed days in the current Sunday-first calendar week
    pub weekly_count: u32,
    /// Completed days in the current calendar month
    pub monthly_count: u32,
    /// Percentage (0-100) of days completed since the first entry
    pub completion_rate: u32,
}

impl TrackerStats {
    pub fn compute(history: &[AppDateKey], today: AppDateKey, calendar_date: NaiveDate) -> Self {
        Self {
            total_days: history.len() as u32,
            current_streak: current_streak(history, today),
            longest_streak: longest_streak(history),
            weekly_count: weekly_count(history, calendar_date),
            monthly_count: monthly_count(history, calendar_date),
            completion_rate: completion_rate(history, today),
        }
    }
}
