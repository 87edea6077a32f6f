// SPDX-License-Identifier: AGPL-3.0-or-later
//! Pinned (bookmarked) folders
//!
//! The set is stored under one preference key as a delimiter-joined list of absolute
//! paths (`/a;/b;/c` with the default delimiter). There is no escaping, so a path
//! containing the delimiter cannot be pinned.

use rove_core::{catalog, InvalidOperation, RoveError, RoveResult};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::PreferenceStore;

pub const DEFAULT_KEY: &str = "pinnedFolders";
pub const DEFAULT_DELIMITER: char = ';';

/// Split a stored list into paths, skipping blanks and repeats.
pub fn decode(raw: &str, delimiter: char) -> Vec<PathBuf> {
    let mut folders: Vec<PathBuf> = Vec::new();
    for part in raw.split(delimiter).filter(|p| !p.trim().is_empty()) {
        let path = PathBuf::from(part);
        if !folders.contains(&path) {
            folders.push(path);
        }
    }
    folders
}

pub fn encode(folders: &[PathBuf], delimiter: char) -> String {
    folders
        .iter()
        .map(|p| p.to_string_lossy())
        .collect::<Vec<_>>()
        .join(&delimiter.to_string())
}

/// Result of a pin request that did not hit a storage failure
#[derive(Debug)]
pub enum PinOutcome {
    Pinned,
    AlreadyPinned,
    /// The path cannot be pinned; nothing changed.
    Rejected(RoveError),
}

impl PinOutcome {
    pub fn is_pinned(&self) -> bool {
        matches!(self, PinOutcome::Pinned)
    }
}

/// Ordered, duplicate-free set of pinned directories, saved after every change.
pub struct PinnedFolderStore<S> {
    store: S,
    key: String,
    delimiter: char,
    folders: Vec<PathBuf>,
}

impl<S: PreferenceStore> PinnedFolderStore<S> {
    /// Read the pinned list, dropping entries that are no longer readable directories.
    ///
    /// If anything was dropped the cleaned list is written back straight away.
    pub fn load(store: S, key: impl Into<String>, delimiter: char) -> RoveResult<Self> {
        let key = key.into();
        let raw = store.get(&key)?.unwrap_or_default();

        let mut folders = Vec::new();
        for path in decode(&raw, delimiter) {
            match validate(&path) {
                Ok(()) => folders.push(path),
                Err(e) => warn!(path = %path.display(), error = %e, "dropping pinned folder"),
            }
        }

        let mut pinned = Self { store, key, delimiter, folders };
        if encode(&pinned.folders, delimiter) != raw {
            pinned.save()?;
        }
        Ok(pinned)
    }

    pub fn folders(&self) -> &[PathBuf] {
        &self.folders
    }

    /// Relative paths are taken against the working directory.
    pub fn is_pinned(&self, path: &Path) -> bool {
        catalog::absolute(path).map_or(false, |path| self.folders.contains(&path))
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Pin `path`, stored in absolute form.
    pub fn pin(&mut self, path: &Path) -> RoveResult<PinOutcome> {
        let path = catalog::absolute(path)?;
        let path = path.as_path();
        if let Err(e) = validate(path) {
            debug!(path = %path.display(), error = %e, "pin rejected");
            return Ok(PinOutcome::Rejected(e));
        }
        if path.to_string_lossy().contains(self.delimiter) {
            let e = InvalidOperation::DelimiterInPath(path.display().to_string());
            return Ok(PinOutcome::Rejected(e.into()));
        }
        if self.is_pinned(path) {
            return Ok(PinOutcome::AlreadyPinned);
        }

        self.folders.push(path.to_path_buf());
        self.save()?;
        info!(path = %path.display(), "pinned folder");
        Ok(PinOutcome::Pinned)
    }

    /// Returns whether `path` was pinned.
    pub fn unpin(&mut self, path: &Path) -> RoveResult<bool> {
        let path = catalog::absolute(path)?;
        let before = self.folders.len();
        self.folders.retain(|p| *p != path);
        if self.folders.len() == before {
            return Ok(false);
        }
        self.save()?;
        info!(path = %path.display(), "unpinned folder");
        Ok(true)
    }

    /// Unpin `path` and everything pinned beneath it. Returns how many were removed.
    pub fn forget_under(&mut self, path: &Path) -> RoveResult<usize> {
        let path = catalog::absolute(path)?;
        let before = self.folders.len();
        self.folders.retain(|p| !p.starts_with(&path));
        let removed = before - self.folders.len();
        if removed > 0 {
            self.save()?;
            info!(path = %path.display(), removed, "unpinned deleted folders");
        }
        Ok(removed)
    }

    /// Follow a rename of `from` to `to`, for the folder itself and anything pinned
    /// beneath it. Returns how many pins moved.
    pub fn repoint(&mut self, from: &Path, to: &Path) -> RoveResult<usize> {
        let (from, to) = (catalog::absolute(from)?, catalog::absolute(to)?);
        let mut moved = 0;
        for folder in self.folders.iter_mut() {
            if let Ok(rest) = folder.strip_prefix(&from) {
                *folder = catalog::rebase(&to, rest);
                moved += 1;
            }
        }
        if moved > 0 {
            self.save()?;
            debug!(from = %from.display(), to = %to.display(), moved, "re-pointed pinned folders");
        }
        Ok(moved)
    }

    fn save(&mut self) -> RoveResult<()> {
        let raw = encode(&self.folders, self.delimiter);
        self.store.put(&self.key, &raw)
    }
}

/// A pin target must exist, be a directory, and be listable.
fn validate(path: &Path) -> RoveResult<()> {
    let meta = fs::metadata(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => RoveError::NotFound(path.display().to_string()),
        _ => RoveError::at(path)(e),
    })?;
    if !meta.is_dir() {
        return Err(RoveError::NotADirectory(path.display().to_string()));
    }
    fs::read_dir(path).map_err(RoveError::at(path))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryPreferences;
    use tempfile::TempDir;

    fn raw(pins: &PinnedFolderStore<MemoryPreferences>) -> Option<String> {
        pins.store().get(DEFAULT_KEY).unwrap()
    }

    #[test]
    fn test_decode_skips_blanks_and_duplicates() {
        let folders = decode("/a;;/b;/a; ", ';');
        assert_eq!(folders, vec![PathBuf::from("/a"), PathBuf::from("/b")]);
        assert!(decode("", ';').is_empty());
    }

    #[test]
    fn test_encode() {
        let folders = vec![PathBuf::from("/a"), PathBuf::from("/b c")];
        assert_eq!(encode(&folders, ';'), "/a;/b c");
        assert_eq!(encode(&[], ';'), "");
    }

    #[test]
    fn test_load_drops_missing_and_repersists() {
        let tmp = TempDir::new().unwrap();
        let valid = tmp.path().join("valid");
        let deleted = tmp.path().join("deleted");
        fs::create_dir(&valid).unwrap();

        let stored = encode(&[valid.clone(), deleted], ';');
        let store = MemoryPreferences::new().with(DEFAULT_KEY, &stored);
        let pins = PinnedFolderStore::load(store, DEFAULT_KEY, ';').unwrap();

        assert_eq!(pins.folders(), &[valid.clone()]);
        assert_eq!(raw(&pins), Some(valid.display().to_string()));
    }

    #[test]
    fn test_load_drops_files() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("file.txt");
        fs::write(&file, b"x").unwrap();

        let store = MemoryPreferences::new().with(DEFAULT_KEY, &file.display().to_string());
        let pins = PinnedFolderStore::load(store, DEFAULT_KEY, ';').unwrap();
        assert!(pins.folders().is_empty());
        assert_eq!(raw(&pins).as_deref(), Some(""));
    }

    #[test]
    fn test_load_without_key_writes_nothing() {
        let pins = PinnedFolderStore::load(MemoryPreferences::new(), DEFAULT_KEY, ';').unwrap();
        assert!(pins.folders().is_empty());
        assert!(raw(&pins).is_none());
    }

    #[test]
    fn test_pin_and_unpin() {
        let tmp = TempDir::new().unwrap();
        let a = tmp.path().join("a");
        let b = tmp.path().join("b");
        fs::create_dir(&a).unwrap();
        fs::create_dir(&b).unwrap();

        let mut pins = PinnedFolderStore::load(MemoryPreferences::new(), DEFAULT_KEY, ';').unwrap();
        assert!(pins.pin(&a).unwrap().is_pinned());
        assert!(pins.pin(&b).unwrap().is_pinned());
        assert!(matches!(pins.pin(&a).unwrap(), PinOutcome::AlreadyPinned));
        assert_eq!(pins.folders(), &[a.clone(), b.clone()]);
        assert_eq!(raw(&pins), Some(encode(&[a.clone(), b.clone()], ';')));

        assert!(pins.unpin(&a).unwrap());
        assert!(!pins.unpin(&a).unwrap());
        assert!(!pins.is_pinned(&a));
        assert_eq!(raw(&pins), Some(b.display().to_string()));
    }

    #[test]
    fn test_pin_rejections_are_not_errors() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("file.txt");
        fs::write(&file, b"x").unwrap();
        let odd = tmp.path().join("semi;colon");
        fs::create_dir(&odd).unwrap();

        let mut pins = PinnedFolderStore::load(MemoryPreferences::new(), DEFAULT_KEY, ';').unwrap();
        assert!(matches!(
            pins.pin(&file).unwrap(),
            PinOutcome::Rejected(RoveError::NotADirectory(_))
        ));
        assert!(matches!(
            pins.pin(&tmp.path().join("missing")).unwrap(),
            PinOutcome::Rejected(RoveError::NotFound(_))
        ));
        assert!(matches!(
            pins.pin(&odd).unwrap(),
            PinOutcome::Rejected(RoveError::InvalidOperation(InvalidOperation::DelimiterInPath(_)))
        ));
        assert!(pins.folders().is_empty());
    }

    #[test]
    fn test_forget_under_and_repoint() {
        let tmp = TempDir::new().unwrap();
        let parent = tmp.path().join("parent");
        let child = parent.join("child");
        let other = tmp.path().join("other");
        fs::create_dir_all(&child).unwrap();
        fs::create_dir(&other).unwrap();

        let mut pins = PinnedFolderStore::load(MemoryPreferences::new(), DEFAULT_KEY, ';').unwrap();
        pins.pin(&parent).unwrap();
        pins.pin(&child).unwrap();
        pins.pin(&other).unwrap();

        let renamed = tmp.path().join("renamed");
        assert_eq!(pins.repoint(&other, &renamed).unwrap(), 1);
        assert!(pins.is_pinned(&renamed));

        assert_eq!(pins.forget_under(&parent).unwrap(), 2);
        assert_eq!(pins.folders(), &[renamed.clone()]);
        assert_eq!(raw(&pins), Some(renamed.display().to_string()));
    }

    #[test]
    fn test_repoint_moves_descendants() {
        let tmp = TempDir::new().unwrap();
        let parent = tmp.path().join("parent");
        let child = parent.join("child");
        let sibling = tmp.path().join("parent-sibling");
        fs::create_dir_all(&child).unwrap();
        fs::create_dir(&sibling).unwrap();

        let mut pins = PinnedFolderStore::load(MemoryPreferences::new(), DEFAULT_KEY, ';').unwrap();
        pins.pin(&child).unwrap();
        pins.pin(&sibling).unwrap();

        let moved = tmp.path().join("moved");
        assert_eq!(pins.repoint(&parent, &moved).unwrap(), 1);
        assert_eq!(pins.folders(), &[moved.join("child"), sibling.clone()]);
        assert_eq!(raw(&pins), Some(encode(&[moved.join("child"), sibling], ';')));
    }

    #[test]
    fn test_relative_pins_are_stored_absolute() {
        let cwd = std::env::current_dir().unwrap();
        let mut pins = PinnedFolderStore::load(MemoryPreferences::new(), DEFAULT_KEY, ';').unwrap();

        assert!(pins.pin(Path::new("./src/../src")).unwrap().is_pinned());
        assert_eq!(pins.folders(), &[cwd.join("src")]);
        assert_eq!(raw(&pins), Some(cwd.join("src").display().to_string()));
        assert!(pins.is_pinned(Path::new("src")));

        assert!(pins.unpin(Path::new("src")).unwrap());
        assert!(pins.folders().is_empty());
    }
}
