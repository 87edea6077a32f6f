//! Back/forward navigation history
//!
//! A linear list of visited directories plus a cursor. The cursor is `None` while the
//! drive list is shown. Every transition that loads a directory takes the loader as a
//! closure and only moves the cursor once the load has succeeded, so a refused
//! directory never becomes part of the history.

use std::path::{Path, PathBuf};

/// Where the history cursor currently points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryState {
    AtDriveRoot,
    AtDirectory(usize),
}

#[derive(Debug, Clone, Default)]
pub struct NavigationHistory {
    entries: Vec<PathBuf>,
    index: Option<usize>,
}

impl NavigationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> HistoryState {
        match self.index {
            Some(i) => HistoryState::AtDirectory(i),
            None => HistoryState::AtDriveRoot,
        }
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// Cursor as a signed position in `[-1, len - 1]`, `-1` meaning the drive list.
    pub fn position(&self) -> isize {
        self.index.map_or(-1, |i| i as isize)
    }

    pub fn entries(&self) -> &[PathBuf] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn current(&self) -> Option<&Path> {
        self.index.map(|i| self.entries[i].as_path())
    }

    pub fn can_go_forward(&self) -> bool {
        self.next_index() < self.entries.len()
    }

    /// Load `path`, then drop every forward entry and append it.
    pub fn navigate_to<T, E>(
        &mut self,
        path: PathBuf,
        load: impl FnOnce(&Path) -> Result<T, E>,
    ) -> Result<T, E> {
        let loaded = load(&path)?;
        self.entries.truncate(self.next_index());
        self.entries.push(path);
        self.index = Some(self.entries.len() - 1);
        Ok(loaded)
    }

    /// Step back one entry. From the first entry (or an empty history) the cursor
    /// falls back to the drive list and `Ok(None)` is returned.
    pub fn back<T, E>(&mut self, load: impl FnOnce(&Path) -> Result<T, E>) -> Result<Option<T>, E> {
        match self.index {
            Some(i) if i > 0 => {
                let loaded = load(&self.entries[i - 1])?;
                self.index = Some(i - 1);
                Ok(Some(loaded))
            }
            _ => {
                self.index = None;
                Ok(None)
            }
        }
    }

    /// Step forward one entry; `Ok(None)` when there is nothing ahead.
    pub fn forward<T, E>(&mut self, load: impl FnOnce(&Path) -> Result<T, E>) -> Result<Option<T>, E> {
        let next = self.next_index();
        if next >= self.entries.len() {
            return Ok(None);
        }
        let loaded = load(&self.entries[next])?;
        self.index = Some(next);
        Ok(Some(loaded))
    }

    /// Forget everything and return to the drive list.
    pub fn home(&mut self) {
        self.entries.clear();
        self.index = None;
    }

    fn next_index(&self) -> usize {
        self.index.map_or(0, |i| i + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(_: &Path) -> Result<(), ()> {
        Ok(())
    }

    fn denied(_: &Path) -> Result<(), &'static str> {
        Err("access denied")
    }

    fn visit(history: &mut NavigationHistory, path: &str) {
        history.navigate_to(PathBuf::from(path), ok).unwrap();
    }

    #[test]
    fn test_starts_at_drive_root() {
        let history = NavigationHistory::new();
        assert_eq!(history.state(), HistoryState::AtDriveRoot);
        assert_eq!(history.position(), -1);
        assert!(history.current().is_none());
    }

    #[test]
    fn test_navigate_appends_and_advances() {
        let mut history = NavigationHistory::new();
        visit(&mut history, "/a");
        visit(&mut history, "/b");
        assert_eq!(history.state(), HistoryState::AtDirectory(1));
        assert_eq!(history.current(), Some(Path::new("/b")));
    }

    #[test]
    fn test_navigate_after_back_truncates_forward_entries() {
        let mut history = NavigationHistory::new();
        visit(&mut history, "/a");
        visit(&mut history, "/b");
        visit(&mut history, "/c");
        assert_eq!(history.index(), Some(2));

        history.back(ok).unwrap();
        assert_eq!(history.index(), Some(1));

        visit(&mut history, "/d");
        let expected: Vec<PathBuf> = ["/a", "/b", "/d"].iter().map(PathBuf::from).collect();
        assert_eq!(history.entries(), expected.as_slice());
        assert_eq!(history.index(), Some(2));
    }

    #[test]
    fn test_back_from_first_entry_returns_to_drive_root() {
        let mut history = NavigationHistory::new();
        visit(&mut history, "/a");
        let loaded = history.back(ok).unwrap();
        assert!(loaded.is_none());
        assert_eq!(history.state(), HistoryState::AtDriveRoot);

        // The entry is still ahead of the cursor.
        assert!(history.can_go_forward());
        history.forward(ok).unwrap();
        assert_eq!(history.current(), Some(Path::new("/a")));
    }

    #[test]
    fn test_back_on_empty_history() {
        let mut history = NavigationHistory::new();
        assert!(history.back(ok).unwrap().is_none());
        assert_eq!(history.position(), -1);
    }

    #[test]
    fn test_forward_without_entries_is_noop() {
        let mut history = NavigationHistory::new();
        visit(&mut history, "/a");
        assert!(history.forward(ok).unwrap().is_none());
        assert_eq!(history.index(), Some(0));
    }

    #[test]
    fn test_failed_navigation_is_not_committed() {
        let mut history = NavigationHistory::new();
        visit(&mut history, "/a");
        visit(&mut history, "/b");
        history.back(ok).unwrap();

        let result = history.navigate_to(PathBuf::from("/locked"), denied);
        assert_eq!(result, Err("access denied"));
        assert_eq!(history.len(), 2);
        assert_eq!(history.index(), Some(0));
        assert!(history.can_go_forward());
    }

    #[test]
    fn test_failed_back_and_forward_keep_cursor() {
        let mut history = NavigationHistory::new();
        visit(&mut history, "/a");
        visit(&mut history, "/b");

        assert!(history.back(denied).is_err());
        assert_eq!(history.index(), Some(1));

        history.back(ok).unwrap();
        assert!(history.forward(denied).is_err());
        assert_eq!(history.index(), Some(0));
    }

    #[test]
    fn test_home_clears() {
        let mut history = NavigationHistory::new();
        visit(&mut history, "/a");
        visit(&mut history, "/b");
        history.home();
        assert!(history.is_empty());
        assert_eq!(history.state(), HistoryState::AtDriveRoot);
        assert!(!history.can_go_forward());
    }

    #[test]
    fn test_index_stays_in_bounds_over_mixed_sequences() {
        let mut history = NavigationHistory::new();
        let mut seed: u32 = 0x2545_f491;
        for step in 0..2_000 {
            seed = seed.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            match (seed >> 24) % 4 {
                0 => visit(&mut history, &format!("/dir{}", step)),
                1 => {
                    let before = history.index();
                    history.back(ok).unwrap();
                    if before == Some(0) || before.is_none() {
                        assert_eq!(history.state(), HistoryState::AtDriveRoot);
                    }
                }
                2 => {
                    history.forward(ok).unwrap();
                }
                _ => {
                    if step % 97 == 0 {
                        history.home();
                    }
                }
            }
            let position = history.position();
            assert!(position >= -1);
            assert!(position <= history.len() as isize - 1);
        }
    }
}
