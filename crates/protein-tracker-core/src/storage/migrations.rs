//! Database schema migrations.
//!
//! Migrations are versioned and applied automatically when opening the database.
//! The `schema_version` table tracks the current migration version.

use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult};

use crate::record::TrackerRecord;

use super::database::RECORD_KEY;

/// Current schema version.
pub const SCHEMA_VERSION: i32 = 2;

/// Apply all pending migrations to bring the database to the current schema version.
///
/// # Errors
/// Returns an error if migration fails.
pub fn migrate(conn: &Connection) -> SqliteResult<()> {
    create_schema_version_table(conn)?;

    let current_version = get_schema_version(conn);

    if current_version < 1 {
        migrate_v1(conn)?;
    }
    if current_version < 2 {
        migrate_v2(conn)?;
    }

    Ok(())
}

fn create_schema_version_table(conn: &Connection) -> SqliteResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY
        );",
    )
}

/// Get the current schema version from the database.
///
/// Returns 0 if no version is set (initial database).
pub fn get_schema_version(conn: &Connection) -> i32 {
    conn.query_row("SELECT version FROM schema_version", [], |row| {
        row.get::<_, i32>(0)
    })
    .unwrap_or_else(|e| {
        if !matches!(e, rusqlite::Error::QueryReturnedNoRows) {
            tracing::warn!(error = %e, "failed to read schema_version");
        }
        0
    })
}

fn set_schema_version(conn: &Connection, version: i32) -> SqliteResult<()> {
    conn.execute("DELETE FROM schema_version", [])?;
    conn.execute(
        "INSERT INTO schema_version (version) VALUES (?1)",
        [version],
    )?;
    Ok(())
}

/// Migration v1: key-value table holding the tracker record and preferences.
fn migrate_v1(conn: &Connection) -> SqliteResult<()> {
    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(
        "CREATE TABLE IF NOT EXISTS kv (
            key   TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );",
    )?;
    set_schema_version(&tx, 1)?;
    tx.commit()
}

/// Migration v2: seed history for flag-only records.
///
/// Records written before history existed only carry `dateKey`/`drank`. A
/// completed day recorded that way is added to history so streaks include it.
/// Unreadable records are left for the loader to discard.
fn migrate_v2(conn: &Connection) -> SqliteResult<()> {
    let tx = conn.unchecked_transaction()?;

    let raw: Option<String> = tx
        .query_row(
            "SELECT value FROM kv WHERE key = ?1",
            params![RECORD_KEY],
            |row| row.get(0),
        )
        .optional()?;

    if let Some(raw) = raw {
        if let Ok(mut record) = TrackerRecord::from_json(&raw) {
            if let (Some(key), true) = (record.last_date_key, record.last_flag) {
                if record.insert_day(key) {
                    if let Ok(json) = record.to_json() {
                        tx.execute(
                            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
                            params![RECORD_KEY, json],
                        )?;
                        tracing::info!(day = %key, "seeded history from legacy record");
                    }
                }
            }
        }
    }

    set_schema_version(&tx, 2)?;
    tx.commit()
}
