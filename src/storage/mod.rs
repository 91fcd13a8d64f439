//! Durable string key-value storage behind the schedule store.
//!
//! Values are opaque strings; the schedule store decides what goes in them.
//! Exactly one writer (the store) and one reader at startup.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::StorageError;

pub trait BackingStore {
    /// Returns `Ok(None)` when nothing was ever written under `key`.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replaces the whole value under `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<B: BackingStore + ?Sized> BackingStore for Box<B> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

/// Keys end up as file names, so only a conservative alphabet is allowed.
pub fn validate_key(key: &str) -> Result<(), StorageError> {
    let ok = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.')
        && !key.starts_with('.');
    if ok {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}
