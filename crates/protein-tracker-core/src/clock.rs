//! App-day clock.
//!
//! An app day runs from the reset hour (02:00 local by default) to just
//! before the reset hour on the next calendar day. A drink logged at 01:30
//! on the 5th therefore counts for the 4th.

use chrono::{DateTime, Duration, FixedOffset, Local, NaiveDate, TimeZone, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cell::Cell;
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Local hour at which a new app day starts.
pub const DEFAULT_RESET_HOUR: u32 = 2;

const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// Calendar date identifying one app day, serialized as `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AppDateKey(NaiveDate);

impl AppDateKey {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// The following app day. Saturates at the last representable date.
    pub fn succ(&self) -> Self {
        Self(self.0.succ_opt().unwrap_or(self.0))
    }

    /// The preceding app day. Saturates at the first representable date.
    pub fn pred(&self) -> Self {
        Self(self.0.pred_opt().unwrap_or(self.0))
    }

    /// Signed number of days from `earlier` to `self`.
    pub fn days_since(&self, earlier: AppDateKey) -> i64 {
        (self.0 - earlier.0).num_days()
    }
}

impl fmt::Display for AppDateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_KEY_FORMAT))
    }
}

impl FromStr for AppDateKey {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        // chrono accepts unpadded fields; the stored format never has them.
        if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
            return Err(ValidationError::InvalidDateKey(s.to_string()));
        }
        NaiveDate::parse_from_str(s, DATE_KEY_FORMAT)
            .map(Self)
            .map_err(|_| ValidationError::InvalidDateKey(s.to_string()))
    }
}

impl From<NaiveDate> for AppDateKey {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl Serialize for AppDateKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for AppDateKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Map a timestamp to its app day under `reset_hour`.
///
/// Uses the local wall time carried by `now`, so the result depends on the
/// offset in effect at that instant.
pub fn app_date_key<Tz: TimeZone>(now: &DateTime<Tz>, reset_hour: u32) -> AppDateKey {
    let local = now.naive_local();
    let date = local.date();
    if local.hour() < reset_hour {
        AppDateKey(date.pred_opt().unwrap_or(date))
    } else {
        AppDateKey(date)
    }
}

/// [`app_date_key`] with the default 02:00 reset.
pub fn today_key<Tz: TimeZone>(now: &DateTime<Tz>) -> AppDateKey {
    app_date_key(now, DEFAULT_RESET_HOUR)
}

/// Source of "now" for the engine.
pub trait Clock {
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Wall clock in the system's local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// Manually driven clock.
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: Cell<DateTime<FixedOffset>>,
}

impl FixedClock {
    pub fn new(now: DateTime<FixedOffset>) -> Self {
        Self {
            now: Cell::new(now),
        }
    }

    pub fn set(&self, now: DateTime<FixedOffset>) {
        self.now.set(now);
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.now.get()
    }
}
