//! In-memory record slot.

use std::cell::{Cell, RefCell};

use super::RecordStore;
use crate::error::StorageError;

/// Record store that keeps the serialized record in memory.
///
/// Writes can be switched off to simulate a full or read-only backend.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slot: RefCell<Option<String>>,
    fail_writes: Cell<bool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with raw slot contents, which need not be valid JSON.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            slot: RefCell::new(Some(raw.into())),
            fail_writes: Cell::new(false),
        }
    }

    pub fn raw(&self) -> Option<String> {
        self.slot.borrow().clone()
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }
}

impl RecordStore for MemoryStore {
    fn read_slot(&self) -> Result<Option<String>, StorageError> {
        Ok(self.slot.borrow().clone())
    }

    fn write_slot(&self, value: &str) -> Result<(), StorageError> {
        if self.fail_writes.get() {
            return Err(StorageError::Unavailable("writes disabled".into()));
        }
        *self.slot.borrow_mut() = Some(value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::AppDateKey;
    use crate::record::TrackerRecord;

    fn key(s: &str) -> AppDateKey {
        s.parse().unwrap()
    }

    #[test]
    fn empty_store_loads_default() {
        assert_eq!(MemoryStore::new().load(), TrackerRecord::default());
    }

    #[test]
    fn corrupt_data_loads_default() {
        let store = MemoryStore::with_raw("{\"dateKey\": 42");
        assert_eq!(store.load(), TrackerRecord::default());
        let store = MemoryStore::with_raw("[]");
        assert_eq!(store.load(), TrackerRecord::default());
    }

    #[test]
    fn failed_write_keeps_previous_value() {
        let store = MemoryStore::new();
        let mut record = TrackerRecord::default();
        record.insert_day(key("2024-01-01"));
        store.save(&record).unwrap();

        store.set_fail_writes(true);
        let mut next = record.clone();
        next.insert_day(key("2024-01-02"));
        assert!(matches!(store.save(&next), Err(StorageError::Unavailable(_))));
        assert_eq!(store.load(), record);
    }

    #[test]
    fn save_applies_retention() {
        let store = MemoryStore::new();
        let mut record = TrackerRecord::default();
        let mut day = key("2023-01-01");
        for _ in 0..366 {
            record.insert_day(day);
            day = day.succ();
        }
        store.save(&record).unwrap();

        let loaded = store.load();
        assert_eq!(loaded.history.len(), 365);
        assert_eq!(loaded.history.first(), Some(&key("2023-01-02")));
        // The caller's copy is untouched.
        assert_eq!(record.history.len(), 366);
    }
}
