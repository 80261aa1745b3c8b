//! Core error types for protein-tracker-core.
//!
//! Storage failures are modelled explicitly here even though the engine
//! recovers from most of them locally: a corrupt record reads as the empty
//! record and a failed write discards the mutation.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for protein-tracker-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Errors raised by a [`RecordStore`](crate::storage::RecordStore) backend.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open the database file
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Statement execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Database is locked by another process
    #[error("Database is locked")]
    Locked,

    /// The record could not be serialized; nothing was written
    #[error("Failed to serialize record: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Backend refused the write (quota, read-only media, test switch)
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key does not exist in the configuration tree
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Validation errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// Date key is not a valid `YYYY-MM-DD` calendar date
    #[error("Invalid date key '{0}': expected YYYY-MM-DD")]
    InvalidDateKey(String),

    /// Month outside 1..=12 or year out of range
    #[error("Invalid month {year}-{month}")]
    InvalidMonth { year: i32, month: u32 },
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(e, _msg) => {
                if e.code == rusqlite::ErrorCode::DatabaseLocked
                    || e.code == rusqlite::ErrorCode::DatabaseBusy
                {
                    StorageError::Locked
                } else {
                    StorageError::QueryFailed(err.to_string())
                }
            }
            _ => StorageError::QueryFailed(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sqlite_failure(code: std::os::raw::c_int) -> rusqlite::Error {
        rusqlite::Error::SqliteFailure(rusqlite::ffi::Error::new(code), None)
    }

    #[test]
    fn busy_and_locked_map_to_locked() {
        assert!(matches!(
            StorageError::from(sqlite_failure(rusqlite::ffi::SQLITE_BUSY)),
            StorageError::Locked
        ));
        assert!(matches!(
            StorageError::from(sqlite_failure(rusqlite::ffi::SQLITE_LOCKED)),
            StorageError::Locked
        ));
        assert!(matches!(
            StorageError::from(rusqlite::Error::QueryReturnedNoRows),
            StorageError::QueryFailed(_)
        ));
    }

    #[test]
    fn storage_and_io_errors_convert_into_core_error() {
        let err: CoreError = StorageError::Locked.into();
        assert_eq!(err.to_string(), "Storage error: Database is locked");
        let err: CoreError = std::io::Error::other("disk gone").into();
        assert!(matches!(err, CoreError::Io(_)));
    }
}
