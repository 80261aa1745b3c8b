//! # Protein Tracker Core Library
//!
//! Business logic for a daily protein-drink tracker. The CLI binary is a thin
//! presentation layer over this crate.
//!
//! ## Architecture
//!
//! - **Clock**: maps a timestamp to an *app day*, which starts at 02:00 local
//!   time instead of midnight
//! - **Record**: the single persisted aggregate (today's flag, bounded
//!   history, completion times)
//! - **Reconciler**: pure resolution of the stored flag against the current
//!   app day
//! - **Stats**: streaks, weekly/monthly counts and completion rate
//! - **Storage**: SQLite key-value slot, in-memory slot, TOML configuration
//!
//! ## Key Components
//!
//! - [`DayStateEngine`]: reads, toggles and session-start reconciliation
//! - [`RecordStore`]: storage slot for the record
//! - [`TrackerStats`]: derived aggregates
//! - [`Config`]: application configuration

pub mod calendar;
pub mod clock;
pub mod engine;
pub mod error;
pub mod export;
pub mod reconcile;
pub mod record;
pub mod stats;
pub mod storage;

pub use calendar::{CalendarDay, MonthCalendar};
pub use clock::{app_date_key, today_key, AppDateKey, Clock, FixedClock, SystemClock};
pub use engine::{DayStateEngine, DayStatus};
pub use error::{ConfigError, CoreError, StorageError, ValidationError};
pub use export::ExportSnapshot;
pub use reconcile::{reconcile, DayView, Reconciliation};
pub use record::{DrinkTimestamp, TrackerRecord};
pub use stats::TrackerStats;
pub use storage::{Config, Database, MemoryStore, RecordStore, Theme};
