//! Month calendar view over completed days.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::clock::AppDateKey;
use crate::error::ValidationError;
use crate::reconcile::DayView;

/// One day cell of a [`MonthCalendar`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    pub date: AppDateKey,
    pub completed: bool,
    pub is_today: bool,
    /// Time the day was marked complete, if recorded.
    pub completed_at: Option<String>,
}

/// Sunday-first grid for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthCalendar {
    pub year: i32,
    pub month: u32,
    /// Empty cells before day 1 in a Sunday-first week row.
    pub leading_blanks: u32,
    pub days: Vec<CalendarDay>,
    pub completed_days: u32,
}

impl MonthCalendar {
    /// Days grouped into week rows, `None` for padding cells.
    pub fn weeks(&self) -> Vec<Vec<Option<&CalendarDay>>> {
        let mut cells: Vec<Option<&CalendarDay>> = Vec::new();
        cells.extend(std::iter::repeat(None).take(self.leading_blanks as usize));
        cells.extend(self.days.iter().map(Some));
        while cells.len() % 7 != 0 {
            cells.push(None);
        }
        cells.chunks(7).map(|row| row.to_vec()).collect()
    }
}

/// Build the calendar for `year`-`month` from a reconciled view.
pub fn month_calendar(view: &DayView, year: i32, month: u32) -> Result<MonthCalendar, ValidationError> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or(ValidationError::InvalidMonth { year, month })?;
    let next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or(ValidationError::InvalidMonth { year, month })?;

    let days: Vec<CalendarDay> = first
        .iter_days()
        .take_while(|d| *d < next_month)
        .map(|d| {
            let key = AppDateKey::new(d);
            CalendarDay {
                date: key,
                completed: view.completed_on(key),
                is_today: key == view.today,
                completed_at: view.timestamp_for(key).map(str::to_string),
            }
        })
        .collect();

    let completed_days = days.iter().filter(|d| d.completed).count() as u32;

    Ok(MonthCalendar {
        year,
        month,
        leading_blanks: first.weekday().num_days_from_sunday(),
        days,
        completed_days,
    })
}
