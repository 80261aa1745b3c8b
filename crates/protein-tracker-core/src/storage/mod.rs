mod config;
pub mod database;
mod memory;
pub mod migrations;
pub mod preferences;

pub use config::{Config, DayConfig, DisplayConfig};
pub use database::Database;
pub use memory::MemoryStore;
pub use preferences::Theme;

use std::path::PathBuf;

use crate::error::StorageError;
use crate::record::{TrackerRecord, DEFAULT_RETENTION_DAYS};

/// Returns the data directory.
///
/// `PROTEIN_TRACKER_DATA_DIR` wins when set. Otherwise
/// `~/.config/protein-tracker[-dev]/`, where `PROTEIN_TRACKER_ENV=dev` selects
/// the development directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let dir = match std::env::var_os("PROTEIN_TRACKER_DATA_DIR") {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env =
                std::env::var("PROTEIN_TRACKER_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("protein-tracker-dev")
            } else {
                base_dir.join("protein-tracker")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// A single storage slot holding the serialized [`TrackerRecord`].
///
/// Backends only move strings in and out of the slot; parsing, retention and
/// the read fallback live in the provided methods.
pub trait RecordStore {
    fn read_slot(&self) -> Result<Option<String>, StorageError>;

    /// Replace the slot contents. Must leave the old value in place on error.
    fn write_slot(&self, value: &str) -> Result<(), StorageError>;

    /// Load the record, falling back to the empty record.
    ///
    /// Missing, unreadable and unparseable data all yield
    /// `TrackerRecord::default()`; the cause is only logged.
    fn load(&self) -> TrackerRecord {
        match self.read_slot() {
            Ok(Some(raw)) => TrackerRecord::from_json(&raw).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "stored tracker record is unreadable, starting empty");
                TrackerRecord::default()
            }),
            Ok(None) => TrackerRecord::default(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read tracker record, starting empty");
                TrackerRecord::default()
            }
        }
    }

    /// Persist with the default 365-day retention.
    fn save(&self, record: &TrackerRecord) -> Result<(), StorageError> {
        self.save_with_retention(record, DEFAULT_RETENTION_DAYS)
    }

    /// Truncate history to `retention` entries, then write the whole record.
    fn save_with_retention(
        &self,
        record: &TrackerRecord,
        retention: usize,
    ) -> Result<(), StorageError> {
        let mut bounded = record.clone();
        let evicted = bounded.truncate_history(retention);
        if !evicted.is_empty() {
            tracing::debug!(count = evicted.len(), "evicted history beyond retention window");
        }
        let json = bounded.to_json()?;
        self.write_slot(&json)
    }
}
