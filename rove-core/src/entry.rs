//! Directory entries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::catalog;
use crate::error::{RoveError, RoveResult};

/// A path inside a listed directory.
///
/// Only the path is stored. Kind, size, extension and timestamps are read from the
/// filesystem on every call, since the tree may change between reads.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DirectoryEntry {
    pub path: PathBuf,
}

impl DirectoryEntry {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn name(&self) -> String {
        catalog::file_name(&self.path)
    }

    /// Whether the entry itself is a directory. Symlinks are not followed.
    pub fn is_dir(&self) -> bool {
        fs::symlink_metadata(&self.path)
            .map(|m| m.is_dir())
            .unwrap_or(false)
    }

    pub fn size(&self) -> RoveResult<u64> {
        let meta = fs::metadata(&self.path).map_err(RoveError::at(&self.path))?;
        Ok(meta.len())
    }

    /// Lowercased extension; directories never have one.
    pub fn extension(&self) -> Option<String> {
        if self.is_dir() {
            return None;
        }
        catalog::extension(&self.name())
    }

    pub fn modified(&self) -> Option<DateTime<Utc>> {
        fs::metadata(&self.path)
            .and_then(|m| m.modified())
            .ok()
            .map(DateTime::<Utc>::from)
    }
}

impl From<PathBuf> for DirectoryEntry {
    fn from(path: PathBuf) -> Self {
        Self::new(path)
    }
}

/// Directory listing result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryListing {
    pub path: PathBuf,
    pub entries: Vec<DirectoryEntry>,
}

impl DirectoryListing {
    pub fn new(path: PathBuf, entries: Vec<DirectoryEntry>) -> Self {
        Self { path, entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.entries.iter().map(|e| e.path())
    }
}
