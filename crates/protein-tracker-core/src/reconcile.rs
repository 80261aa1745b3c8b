//! Reconciliation of the stored flag against the current app day.
//!
//! The stored `dateKey`/`drank` pair only describes the day of the last
//! write. Once the app day rolls over it is stale, and a record written
//! before history existed, or cut off mid-update, can disagree with
//! history. Reconciliation resolves both without touching storage: it
//! returns the view readers should see and, when history had drifted, the
//! repaired record for the caller to persist.
//!
//! | stored day | stored flag | today in history | result                       |
//! |------------|-------------|------------------|------------------------------|
//! | != today   | any         | any              | not done, history unchanged  |
//! | == today   | true        | no               | done, today appended, repair |
//! | == today   | false       | yes              | not done, today removed, repair |
//! | == today   | matches     | matches          | as stored                    |

use serde::Serialize;

use crate::clock::AppDateKey;
use crate::record::{DrinkTimestamp, TrackerRecord};

/// What readers see for the current app day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayView {
    pub today: AppDateKey,
    pub drank_today: bool,
    pub history: Vec<AppDateKey>,
    pub completion_timestamps: Vec<DrinkTimestamp>,
}

impl DayView {
    pub fn completed_on(&self, key: AppDateKey) -> bool {
        self.history.contains(&key)
    }

    pub fn timestamp_for(&self, key: AppDateKey) -> Option<&str> {
        self.completion_timestamps
            .iter()
            .find(|t| t.date == key)
            .map(|t| t.time.as_str())
    }
}

/// Outcome of [`reconcile`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    pub view: DayView,
    /// Healed record to persist, present only when history had drifted.
    pub repaired: Option<TrackerRecord>,
}

impl Reconciliation {
    pub fn needs_write(&self) -> bool {
        self.repaired.is_some()
    }
}

/// Resolve `record` against `today`. Pure.
pub fn reconcile(record: &TrackerRecord, today: AppDateKey) -> Reconciliation {
    if record.last_date_key != Some(today) {
        // New app day with no action yet. Yesterday's pair stays on disk.
        return Reconciliation {
            view: view_of(record, today, false),
            repaired: None,
        };
    }

    let mut healed = record.clone();
    let changed = if record.last_flag {
        healed.insert_day(today)
    } else {
        healed.remove_day(today)
    };

    if changed {
        tracing::debug!(
            day = %today,
            drank = record.last_flag,
            "history disagreed with today's flag, repairing"
        );
    }

    Reconciliation {
        view: view_of(&healed, today, record.last_flag),
        repaired: changed.then_some(healed),
    }
}

fn view_of(record: &TrackerRecord, today: AppDateKey, drank_today: bool) -> DayView {
    DayView {
        today,
        drank_today,
        history: record.history.clone(),
        completion_timestamps: record.completion_timestamps.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> AppDateKey {
        s.parse().unwrap()
    }

    fn record(date: Option<&str>, flag: bool, history: &[&str]) -> TrackerRecord {
        TrackerRecord {
            last_date_key: date.map(key),
            last_flag: flag,
            history: history.iter().map(|s| key(s)).collect(),
            completion_timestamps: Vec::new(),
        }
    }

    #[test]
    fn empty_record_is_not_done() {
        let r = reconcile(&TrackerRecord::default(), key("2024-01-04"));
        assert!(!r.view.drank_today);
        assert!(r.view.history.is_empty());
        assert!(!r.needs_write());
    }

    #[test]
    fn stale_day_reads_false_without_carry_over() {
        let stored = record(Some("2024-01-03"), true, &["2024-01-03"]);
        let r = reconcile(&stored, key("2024-01-04"));
        assert!(!r.view.drank_today);
        assert_eq!(r.view.history, vec![key("2024-01-03")]);
        assert!(r.repaired.is_none());
    }

    #[test]
    fn done_today_missing_from_history_is_healed() {
        let stored = record(Some("2024-01-04"), true, &["2024-01-03"]);
        let r = reconcile(&stored, key("2024-01-04"));
        assert!(r.view.drank_today);
        assert_eq!(r.view.history, vec![key("2024-01-03"), key("2024-01-04")]);
        let repaired = r.repaired.unwrap();
        assert_eq!(repaired.history, r.view.history);
        assert!(repaired.last_flag);
    }

    #[test]
    fn undone_today_still_in_history_is_healed() {
        let mut stored = record(Some("2024-01-04"), false, &["2024-01-03", "2024-01-04"]);
        stored.set_timestamp(key("2024-01-04"), "8:00:00 AM");
        let r = reconcile(&stored, key("2024-01-04"));
        assert!(!r.view.drank_today);
        assert_eq!(r.view.history, vec![key("2024-01-03")]);
        let repaired = r.repaired.unwrap();
        assert!(repaired.completion_timestamps.is_empty());
    }

    #[test]
    fn consistent_record_needs_no_write() {
        let done = record(Some("2024-01-04"), true, &["2024-01-04"]);
        let r = reconcile(&done, key("2024-01-04"));
        assert!(r.view.drank_today);
        assert!(!r.needs_write());

        let undone = record(Some("2024-01-04"), false, &["2024-01-03"]);
        let r = reconcile(&undone, key("2024-01-04"));
        assert!(!r.view.drank_today);
        assert!(!r.needs_write());
    }

    #[test]
    fn view_exposes_timestamps() {
        let mut stored = record(Some("2024-01-04"), true, &["2024-01-04"]);
        stored.set_timestamp(key("2024-01-04"), "6:30:00 PM");
        let r = reconcile(&stored, key("2024-01-04"));
        assert_eq!(r.view.timestamp_for(key("2024-01-04")), Some("6:30:00 PM"));
        assert!(r.view.completed_on(key("2024-01-04")));
        assert!(!r.view.completed_on(key("2024-01-03")));
    }
}
