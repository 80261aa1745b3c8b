//! Calendar-period counts and completion rate.
//!
//! Week and month windows follow the plain calendar (weeks start on Sunday)
//! and take the calendar date of "now", not the app day. Between midnight and
//! the reset hour the two disagree; the window stays on the calendar date.

use chrono::{Datelike, Duration, NaiveDate};

use crate::clock::AppDateKey;

/// Sunday..=Saturday window containing `date`.
pub fn week_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = date - Duration::days(i64::from(date.weekday().num_days_from_sunday()));
    (start, start + Duration::days(6))
}

/// Completed days inside the calendar week of `calendar_date`.
pub fn weekly_count(history: &[AppDateKey], calendar_date: NaiveDate) -> u32 {
    let (start, end) = week_bounds(calendar_date);
    count_where(history, |d| d >= start && d <= end)
}

/// Completed days inside the calendar month of `calendar_date`.
pub fn monthly_count(history: &[AppDateKey], calendar_date: NaiveDate) -> u32 {
    count_where(history, |d| {
        d.year() == calendar_date.year() && d.month() == calendar_date.month()
    })
}

/// Percentage of days completed since the first recorded day, rounded.
///
/// `round(len / (today - earliest + 1) * 100)`, 0 for empty history. Capped
/// at 100 for histories holding days after `today`.
pub fn completion_rate(history: &[AppDateKey], today: AppDateKey) -> u32 {
    let Some(earliest) = history.iter().min() else {
        return 0;
    };
    let total_days = (today.days_since(*earliest) + 1).max(1) as f64;
    let rate = (history.len() as f64 / total_days * 100.0).round();
    rate.min(100.0) as u32
}

fn count_where(history: &[AppDateKey], pred: impl Fn(NaiveDate) -> bool) -> u32 {
    history.iter().filter(|k| pred(k.date())).count() as u32
}
