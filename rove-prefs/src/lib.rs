//! Preference storage for Rove
//!
//! A small string key-value store seam with two backends:
//! - sled: on-disk embedded KV, used by the application
//! - memory: process-local map, for tests and ephemeral sessions
//!
//! Pinned folders are kept in a single key of that store (see [`pinned`]).

use rove_core::RoveResult;
use std::collections::HashMap;

pub mod pinned;
pub mod sled_backend;

pub use pinned::{PinOutcome, PinnedFolderStore};
pub use sled_backend::SledPreferences;

/// String key-value preference store
pub trait PreferenceStore {
    fn get(&self, key: &str) -> RoveResult<Option<String>>;

    /// Write `value` under `key`, durably.
    fn put(&mut self, key: &str, value: &str) -> RoveResult<()>;

    fn remove(&mut self, key: &str) -> RoveResult<()>;
}

impl<T: PreferenceStore + ?Sized> PreferenceStore for Box<T> {
    fn get(&self, key: &str) -> RoveResult<Option<String>> {
        (**self).get(key)
    }

    fn put(&mut self, key: &str, value: &str) -> RoveResult<()> {
        (**self).put(key, value)
    }

    fn remove(&mut self, key: &str) -> RoveResult<()> {
        (**self).remove(key)
    }
}

/// In-memory preference store
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferences {
    values: HashMap<String, String>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get(&self, key: &str) -> RoveResult<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: &str) -> RoveResult<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> RoveResult<()> {
        self.values.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store() {
        let mut store = MemoryPreferences::new().with("theme", "dark");
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("dark"));

        store.put("theme", "light").unwrap();
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("light"));

        store.remove("theme").unwrap();
        assert!(store.get("theme").unwrap().is_none());
    }

    #[test]
    fn test_boxed_store_delegates() {
        let mut store: Box<dyn PreferenceStore> = Box::new(MemoryPreferences::new());
        store.put("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
    }
}
