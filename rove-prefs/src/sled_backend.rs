// SPDX-License-Identifier: AGPL-3.0-or-later
//! Sled database backend for preference storage

use rove_core::{RoveError, RoveResult};
use sled::Db;
use std::path::Path;

use crate::PreferenceStore;

/// Sled-based preference store
pub struct SledPreferences {
    db: Db,
}

impl SledPreferences {
    /// Open or create a sled database at the given path
    pub fn open(path: impl AsRef<Path>) -> RoveResult<Self> {
        let db = sled::open(path).map_err(|e| RoveError::Preferences(e.to_string()))?;
        Ok(Self { db })
    }

    /// Flush to disk
    pub fn flush(&self) -> RoveResult<()> {
        self.db
            .flush()
            .map_err(|e| RoveError::Preferences(e.to_string()))?;
        Ok(())
    }
}

impl PreferenceStore for SledPreferences {
    fn get(&self, key: &str) -> RoveResult<Option<String>> {
        let value = self
            .db
            .get(key.as_bytes())
            .map_err(|e| RoveError::Preferences(e.to_string()))?;
        value
            .map(|v| {
                String::from_utf8(v.to_vec())
                    .map_err(|e| RoveError::Preferences(format!("{}: {}", key, e)))
            })
            .transpose()
    }

    fn put(&mut self, key: &str, value: &str) -> RoveResult<()> {
        self.db
            .insert(key.as_bytes(), value.as_bytes())
            .map_err(|e| RoveError::Preferences(e.to_string()))?;
        self.flush()
    }

    fn remove(&mut self, key: &str) -> RoveResult<()> {
        self.db
            .remove(key.as_bytes())
            .map_err(|e| RoveError::Preferences(e.to_string()))?;
        self.flush()
    }
}
