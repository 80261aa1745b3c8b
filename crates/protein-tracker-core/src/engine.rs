//! Day-state engine.
//!
//! Owns the record store, the clock and the configuration. Reads load the
//! record and reconcile it into a [`DayView`] without writing; the only
//! writes are [`DayStateEngine::set_drank_on`] (and the helpers built on it)
//! and the explicit [`DayStateEngine::reconcile_and_persist`] run once per
//! session.
//!
//! Storage write failures never reach the caller. The mutation is dropped,
//! a warning is logged and the previously stored record stays in place.

use serde::Serialize;
use std::fmt::Write as _;

use crate::calendar::{month_calendar, MonthCalendar};
use crate::clock::{app_date_key, AppDateKey, Clock, SystemClock};
use crate::error::ValidationError;
use crate::export::ExportSnapshot;
use crate::reconcile::{reconcile, DayView};
use crate::record::TrackerRecord;
use crate::stats::TrackerStats;
use crate::storage::{Config, RecordStore};

const FALLBACK_TIME_FORMAT: &str = "%H:%M:%S";

/// Today's status plus the aggregates, as shown on the main screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayStatus {
    pub today: AppDateKey,
    pub drank_today: bool,
    pub completed_at: Option<String>,
    pub stats: TrackerStats,
}

pub struct DayStateEngine<S, C = SystemClock> {
    store: S,
    clock: C,
    config: Config,
}

impl<S: RecordStore, C: Clock> DayStateEngine<S, C> {
    pub fn new(store: S, clock: C) -> Self {
        Self::with_config(store, clock, Config::default())
    }

    pub fn with_config(store: S, clock: C, config: Config) -> Self {
        Self {
            store,
            clock,
            config,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// App day of the clock's current instant.
    pub fn today(&self) -> AppDateKey {
        app_date_key(&self.clock.now(), self.config.day.reset_hour)
    }

    /// Reconciled view for today. Never writes.
    pub fn view(&self) -> DayView {
        reconcile(&self.store.load(), self.today()).view
    }

    /// Reconcile and persist the repair if history had drifted.
    ///
    /// Meant to run once at session start so later reads agree with storage.
    pub fn reconcile_and_persist(&self) -> DayView {
        let outcome = reconcile(&self.store.load(), self.today());
        if let Some(repaired) = &outcome.repaired {
            tracing::info!(day = %outcome.view.today, "persisting reconciled history");
            self.persist(repaired);
        }
        outcome.view
    }

    pub fn current_drank(&self) -> bool {
        self.view().drank_today
    }

    pub fn history(&self) -> Vec<AppDateKey> {
        self.view().history
    }

    /// Mark today done or not done.
    pub fn set_drank(&self, drank: bool) {
        self.set_drank_on(self.today(), drank);
    }

    /// Mark `day` done or not done and persist the whole record.
    ///
    /// Marking done is idempotent for history but refreshes the completion
    /// time. Marking not done removes the day and its completion time.
    pub fn set_drank_on(&self, day: AppDateKey, drank: bool) {
        let mut record = self.store.load();
        if drank {
            record.insert_day(day);
            record.set_timestamp(day, self.completion_time());
        } else {
            record.remove_day(day);
        }
        record.last_date_key = Some(day);
        record.last_flag = drank;

        tracing::debug!(day = %day, drank, "updating tracker record");
        self.persist(&record);
    }

    /// Flip today's effective flag and return the new value.
    pub fn toggle_drank(&self) -> bool {
        let today = self.today();
        let next = !reconcile(&self.store.load(), today).view.drank_today;
        self.set_drank_on(today, next);
        next
    }

    pub fn stats(&self) -> TrackerStats {
        let view = self.view();
        self.stats_for(&view)
    }

    pub fn status(&self) -> DayStatus {
        let view = self.view();
        DayStatus {
            today: view.today,
            drank_today: view.drank_today,
            completed_at: view.timestamp_for(view.today).map(str::to_string),
            stats: self.stats_for(&view),
        }
    }

    /// Calendar for `month` (year, month), or for the current app day's month.
    pub fn calendar(&self, month: Option<(i32, u32)>) -> Result<MonthCalendar, ValidationError> {
        use chrono::Datelike;

        let view = self.view();
        let (year, month) =
            month.unwrap_or_else(|| (view.today.date().year(), view.today.date().month()));
        month_calendar(&view, year, month)
    }

    pub fn export(&self) -> ExportSnapshot {
        let view = self.view();
        let stats = self.stats_for(&view);
        ExportSnapshot::new(&view, &stats, self.clock.now())
    }

    fn stats_for(&self, view: &DayView) -> TrackerStats {
        TrackerStats::compute(&view.history, view.today, self.clock.now().date_naive())
    }

    fn completion_time(&self) -> String {
        let now = self.clock.now();
        let mut formatted = String::new();
        if write!(formatted, "{}", now.format(&self.config.display.time_format)).is_ok() {
            return formatted;
        }
        tracing::warn!(
            format = %self.config.display.time_format,
            "invalid time format, using {FALLBACK_TIME_FORMAT}"
        );
        now.format(FALLBACK_TIME_FORMAT).to_string()
    }

    fn persist(&self, record: &TrackerRecord) -> bool {
        match self
            .store
            .save_with_retention(record, self.config.day.retention_days)
        {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "failed to persist tracker record, change discarded");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::storage::MemoryStore;
    use chrono::{DateTime, Duration, FixedOffset, TimeZone};

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(y, m, d, h, min, 0)
            .unwrap()
    }

    fn key(s: &str) -> AppDateKey {
        s.parse().unwrap()
    }

    fn engine_at(now: DateTime<FixedOffset>) -> DayStateEngine<MemoryStore, FixedClock> {
        DayStateEngine::new(MemoryStore::new(), FixedClock::new(now))
    }

    #[test]
    fn fresh_storage_reads_empty() {
        let engine = engine_at(at(2024, 1, 4, 12, 0));
        assert!(!engine.current_drank());
        assert!(engine.history().is_empty());
        assert!(engine.store().raw().is_none());
    }

    #[test]
    fn set_drank_twice_keeps_one_entry_and_latest_time() {
        let engine = engine_at(at(2024, 1, 4, 8, 0));
        engine.set_drank(true);
        engine.clock().advance(Duration::minutes(5));
        engine.set_drank(true);

        let record = engine.store().load();
        assert_eq!(record.history, vec![key("2024-01-04")]);
        assert_eq!(record.timestamp_for(key("2024-01-04")), Some("8:05:00 AM"));
    }

    #[test]
    fn set_then_unset_restores_state() {
        let engine = engine_at(at(2024, 1, 4, 8, 0));
        engine.set_drank(true);
        engine.set_drank(false);
        let record = engine.store().load();
        assert!(record.history.is_empty());
        assert!(record.completion_timestamps.is_empty());
        assert!(!engine.current_drank());
    }

    #[test]
    fn toggle_flips_and_returns_new_value() {
        let engine = engine_at(at(2024, 1, 4, 20, 0));
        assert!(engine.toggle_drank());
        assert!(engine.current_drank());
        assert!(!engine.toggle_drank());
        assert!(!engine.current_drank());
    }

    #[test]
    fn rollover_resets_flag_but_keeps_history() {
        let engine = engine_at(at(2024, 1, 4, 23, 0));
        engine.set_drank(true);
        // 01:59 next calendar day is still the same app day.
        engine.clock().set(at(2024, 1, 5, 1, 59));
        assert!(engine.current_drank());
        engine.clock().advance(Duration::minutes(1));
        assert!(!engine.current_drank());
        assert_eq!(engine.history(), vec![key("2024-01-04")]);
        // The stale pair is left on disk until the user acts.
        assert_eq!(engine.store().load().last_date_key, Some(key("2024-01-04")));
    }

    #[test]
    fn drink_before_reset_counts_for_previous_day() {
        let engine = engine_at(at(2024, 1, 5, 1, 30));
        engine.set_drank(true);
        assert_eq!(engine.history(), vec![key("2024-01-04")]);
    }

    #[test]
    fn reconcile_and_persist_heals_legacy_record() {
        let store = MemoryStore::with_raw(r#"{"dateKey":"2024-01-04","drank":true}"#);
        let engine = DayStateEngine::new(store, FixedClock::new(at(2024, 1, 4, 12, 0)));

        // A plain read does not write.
        assert_eq!(engine.history(), vec![key("2024-01-04")]);
        assert!(engine.store().load().history.is_empty());

        let view = engine.reconcile_and_persist();
        assert!(view.drank_today);
        assert_eq!(engine.store().load().history, vec![key("2024-01-04")]);
    }

    #[test]
    fn failed_write_is_swallowed() {
        let engine = engine_at(at(2024, 1, 4, 12, 0));
        engine.set_drank(true);
        engine.store().set_fail_writes(true);
        engine.set_drank(false);
        // The failed undo left the previous record in place.
        assert!(engine.current_drank());
        assert!(!engine.toggle_drank());
        assert!(engine.current_drank());
    }

    #[test]
    fn custom_reset_hour_and_time_format() {
        let mut config = Config::default();
        config.day.reset_hour = 5;
        config.display.time_format = "%H:%M".into();
        let engine = DayStateEngine::with_config(
            MemoryStore::new(),
            FixedClock::new(at(2024, 1, 5, 4, 15)),
            config,
        );
        engine.set_drank(true);
        let status = engine.status();
        assert_eq!(status.today, key("2024-01-04"));
        assert_eq!(status.completed_at.as_deref(), Some("04:15"));
    }

    #[test]
    fn invalid_time_format_falls_back() {
        let mut config = Config::default();
        config.display.time_format = "%Q".into();
        let engine = DayStateEngine::with_config(
            MemoryStore::new(),
            FixedClock::new(at(2024, 1, 4, 9, 5)),
            config,
        );
        engine.set_drank(true);
        assert_eq!(engine.status().completed_at.as_deref(), Some("09:05:00"));
    }

    #[test]
    fn calendar_defaults_to_current_app_month() {
        let engine = engine_at(at(2024, 3, 1, 1, 0));
        engine.set_drank(true);
        let cal = engine.calendar(None).unwrap();
        assert_eq!((cal.year, cal.month), (2024, 2));
        assert_eq!(cal.completed_days, 1);
        assert!(engine.calendar(Some((2024, 13))).is_err());
    }

    #[test]
    fn weekly_window_uses_calendar_date() {
        // Sunday 2024-01-07 at 01:00 is still app day Saturday 2024-01-06,
        // but the week window already starts on the Sunday.
        let engine = engine_at(at(2024, 1, 6, 12, 0));
        engine.set_drank(true);
        engine.clock().set(at(2024, 1, 7, 1, 0));
        let stats = engine.stats();
        assert_eq!(stats.current_streak, 1);
        assert_eq!(stats.weekly_count, 0);
    }

    #[test]
    fn export_reflects_stats() {
        let engine = engine_at(at(2024, 1, 4, 12, 0));
        engine.set_drank_on(key("2024-01-03"), true);
        engine.set_drank(true);
        let snapshot = engine.export();
        assert_eq!(snapshot.total_days, 2);
        assert_eq!(snapshot.current_streak, 2);
        assert_eq!(snapshot.completion_rate, 100);
        assert_eq!(snapshot.exported_at, "2024-01-04T12:00:00+00:00");
    }
}
