// SPDX-License-Identifier: AGPL-3.0-or-later
//! One-level directory listing and name search

use rove_core::{catalog, DirectoryEntry, DirectoryListing, RoveError, RoveResult};
use std::fs;
use std::path::Path;
use tracing::debug;

/// List the entries of `dir` in filesystem enumeration order.
///
/// Fails with [`RoveError::AccessDenied`] when the directory cannot be opened for reading.
pub fn list(dir: &Path) -> RoveResult<DirectoryListing> {
    scan(dir, |_| true)
}

/// List the entries of `dir` whose final component contains `query`, ignoring case.
///
/// An empty query lists everything. The filesystem is read again on every call.
pub fn search(dir: &Path, query: &str) -> RoveResult<DirectoryListing> {
    if query.is_empty() {
        return list(dir);
    }
    debug!(dir = %dir.display(), query, "searching directory");
    scan(dir, |path| catalog::name_matches(path, query))
}

fn scan(dir: &Path, keep: impl Fn(&Path) -> bool) -> RoveResult<DirectoryListing> {
    let read_dir = fs::read_dir(dir).map_err(RoveError::at(dir))?;

    let mut entries = Vec::new();
    for entry in read_dir {
        let path = entry.map_err(RoveError::at(dir))?.path();
        if keep(&path) {
            entries.push(DirectoryEntry::new(path));
        }
    }

    Ok(DirectoryListing::new(dir.to_path_buf(), entries))
}
