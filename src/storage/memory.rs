use std::collections::HashMap;

use super::BackingStore;
use crate::error::StorageError;

/// In-process storage. Used for ephemeral sessions and tests; a failing
/// variant simulates a full disk.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, String>,
    fail_writes: bool,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `value` under `key`, as if written by an
    /// earlier session.
    pub fn with_value(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.values.insert(key.to_string(), value.to_string());
        store
    }

    /// Every `set` fails, like a browser storage quota being exceeded.
    pub fn failing() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    /// Number of successful writes so far.
    pub fn writes(&self) -> usize {
        self.writes
    }

    pub fn raw(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

impl BackingStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes {
            return Err(StorageError::Unavailable("quota exceeded".to_string()));
        }
        self.values.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_reads_as_none() {
        let store = MemoryStore::new();
        assert_eq!(store.get("nothing").unwrap(), None);
    }

    #[test]
    fn set_replaces_whole_value() {
        let mut store = MemoryStore::with_value("k", "old");
        store.set("k", "new").unwrap();
        assert_eq!(store.raw("k"), Some("new"));
        assert_eq!(store.writes(), 1);
    }

    #[test]
    fn failing_store_rejects_writes() {
        let mut store = MemoryStore::failing();
        assert!(store.set("k", "v").is_err());
        assert_eq!(store.raw("k"), None);
        assert_eq!(store.writes(), 0);
    }
}
