//! The persisted tracker record.
//!
//! One record holds everything the tracker knows: the flag as of the last
//! write, the bounded completion history, and the time of day each completion
//! was logged. It is always replaced as a whole.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::clock::AppDateKey;

/// Number of distinct completed days kept in history.
pub const DEFAULT_RETENTION_DAYS: usize = 365;

/// Wall-clock time at which a day was marked complete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrinkTimestamp {
    pub date: AppDateKey,
    pub time: String,
}

/// The single persisted aggregate.
///
/// Wire format: `{"dateKey", "drank", "history", "drinkTimestamps"}`. Reading
/// is lenient field by field: a malformed `dateKey` reads as no date, `drank`
/// follows JavaScript truthiness, and history or timestamp entries that do
/// not parse are dropped on their own.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredRecord")]
pub struct TrackerRecord {
    #[serde(rename = "dateKey")]
    pub last_date_key: Option<AppDateKey>,
    #[serde(rename = "drank")]
    pub last_flag: bool,
    pub history: Vec<AppDateKey>,
    #[serde(rename = "drinkTimestamps")]
    pub completion_timestamps: Vec<DrinkTimestamp>,
}

/// Untyped view of a stored record, converted leniently.
#[derive(Deserialize)]
struct StoredRecord {
    #[serde(rename = "dateKey", default)]
    date_key: Value,
    #[serde(default)]
    drank: Value,
    #[serde(default)]
    history: Value,
    #[serde(rename = "drinkTimestamps", default)]
    drink_timestamps: Value,
}

impl From<StoredRecord> for TrackerRecord {
    fn from(stored: StoredRecord) -> Self {
        let last_date_key = stored.date_key.as_str().and_then(|s| s.parse().ok());
        if last_date_key.is_none() && !stored.date_key.is_null() && stored.date_key != "" {
            tracing::warn!(value = %stored.date_key, "ignoring malformed stored dateKey");
        }

        let history: Vec<AppDateKey> = entries(&stored.history)
            .iter()
            .filter_map(|v| v.as_str().and_then(|s| s.parse().ok()))
            .collect();
        let dropped = entries(&stored.history).len() - history.len();
        if dropped > 0 {
            tracing::warn!(dropped, "dropped malformed history entries");
        }

        let completion_timestamps: Vec<DrinkTimestamp> = entries(&stored.drink_timestamps)
            .iter()
            .filter_map(|v| {
                let date = v.get("date")?.as_str()?.parse().ok()?;
                let time = v.get("time")?.as_str()?.to_string();
                Some(DrinkTimestamp { date, time })
            })
            .collect();

        Self {
            last_date_key,
            last_flag: is_truthy(&stored.drank),
            history,
            completion_timestamps,
        }
    }
}

fn entries(value: &Value) -> &[Value] {
    value.as_array().map(Vec::as_slice).unwrap_or(&[])
}

/// JavaScript `Boolean(value)`.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

impl TrackerRecord {
    /// Parse a stored record and normalize it.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let mut record: TrackerRecord = serde_json::from_str(raw)?;
        record.normalize();
        Ok(record)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn contains(&self, key: AppDateKey) -> bool {
        self.history.contains(&key)
    }

    /// Append `key` to history unless already present. Returns true if added.
    pub fn insert_day(&mut self, key: AppDateKey) -> bool {
        if self.contains(key) {
            return false;
        }
        self.history.push(key);
        true
    }

    /// Remove `key` and its timestamp. Returns true if history changed.
    pub fn remove_day(&mut self, key: AppDateKey) -> bool {
        let before = self.history.len();
        self.history.retain(|k| *k != key);
        self.completion_timestamps.retain(|t| t.date != key);
        self.history.len() != before
    }

    /// Record the completion time for `key`, replacing any earlier one.
    pub fn set_timestamp(&mut self, key: AppDateKey, time: impl Into<String>) {
        self.completion_timestamps.retain(|t| t.date != key);
        self.completion_timestamps.push(DrinkTimestamp {
            date: key,
            time: time.into(),
        });
    }

    pub fn timestamp_for(&self, key: AppDateKey) -> Option<&str> {
        self.completion_timestamps
            .iter()
            .find(|t| t.date == key)
            .map(|t| t.time.as_str())
    }

    /// Keep only the newest `retention` history entries.
    ///
    /// Evicts the earliest dates regardless of insertion order and drops the
    /// evicted days' timestamps. Returns the evicted keys, earliest first.
    pub fn truncate_history(&mut self, retention: usize) -> Vec<AppDateKey> {
        if self.history.len() <= retention {
            return Vec::new();
        }
        let excess = self.history.len() - retention;
        let mut by_date = self.history.clone();
        by_date.sort_unstable();
        let evicted: Vec<AppDateKey> = by_date.into_iter().take(excess).collect();

        self.history.retain(|k| !evicted.contains(k));
        self.completion_timestamps
            .retain(|t| !evicted.contains(&t.date));
        evicted
    }

    /// Restore the set invariants on data that may have been edited by hand.
    ///
    /// Duplicate history keys keep their first position; timestamps for days
    /// not in history are dropped and the last timestamp per day wins.
    pub fn normalize(&mut self) {
        let mut seen = Vec::with_capacity(self.history.len());
        self.history.retain(|k| {
            if seen.contains(k) {
                false
            } else {
                seen.push(*k);
                true
            }
        });

        let mut kept: Vec<DrinkTimestamp> = Vec::with_capacity(self.completion_timestamps.len());
        for stamp in self.completion_timestamps.drain(..) {
            if !seen.contains(&stamp.date) {
                continue;
            }
            kept.retain(|t| t.date != stamp.date);
            kept.push(stamp);
        }
        self.completion_timestamps = kept;
    }
}
