//! Single-item copy/cut clipboard

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::catalog;
use crate::error::{InvalidOperation, RoveResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClipboardMode {
    Copy,
    Cut,
}

/// The pending clipboard item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipboardItem {
    pub source: PathBuf,
    pub mode: ClipboardMode,
}

/// At most one pending item. A new copy or cut replaces whatever was there.
#[derive(Debug, Clone, Default)]
pub struct ClipboardState {
    item: Option<ClipboardItem>,
}

impl ClipboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn copy(&mut self, source: impl Into<PathBuf>) {
        self.set(source.into(), ClipboardMode::Copy);
    }

    pub fn cut(&mut self, source: impl Into<PathBuf>) {
        self.set(source.into(), ClipboardMode::Cut);
    }

    pub fn item(&self) -> Option<&ClipboardItem> {
        self.item.as_ref()
    }

    pub fn mode(&self) -> Option<ClipboardMode> {
        self.item.as_ref().map(|i| i.mode)
    }

    pub fn is_empty(&self) -> bool {
        self.item.is_none()
    }

    pub fn clear(&mut self) {
        self.item = None;
    }

    /// Drop the pending item if it is `path` or lives beneath it.
    pub fn forget_under(&mut self, path: &Path) -> bool {
        let hit = self
            .item
            .as_ref()
            .map_or(false, |i| i.source.starts_with(path));
        if hit {
            self.item = None;
        }
        hit
    }

    /// Follow a rename of `from` to `to` when the pending item is `from` or lives beneath it.
    pub fn repoint(&mut self, from: &Path, to: &Path) {
        if let Some(item) = self.item.as_mut() {
            if let Ok(rest) = item.source.strip_prefix(from) {
                item.source = catalog::rebase(to, rest);
            }
        }
    }

    /// Paste the pending item into `destination`.
    ///
    /// `transfer` receives the item and the target path (`destination` joined with the
    /// source's final component) and performs the copy or move. A cut item is cleared
    /// only after `transfer` succeeds; a copied item stays for further pastes.
    pub fn paste<T>(
        &mut self,
        destination: Option<&Path>,
        transfer: impl FnOnce(&ClipboardItem, PathBuf) -> RoveResult<T>,
    ) -> RoveResult<T> {
        let item = self.item.as_ref().ok_or(InvalidOperation::NoClipboardItem)?;
        let destination = destination.ok_or(InvalidOperation::NoDestination)?;
        let name = item
            .source
            .file_name()
            .ok_or_else(|| InvalidOperation::InvalidName(item.source.display().to_string()))?;
        let target = destination.join(name);
        if target != item.source && target.starts_with(&item.source) {
            return Err(InvalidOperation::PasteIntoItself(item.source.display().to_string()).into());
        }

        let mode = item.mode;
        let pasted = transfer(item, target)?;
        if mode == ClipboardMode::Cut {
            self.item = None;
        }
        Ok(pasted)
    }

    fn set(&mut self, source: PathBuf, mode: ClipboardMode) {
        self.item = Some(ClipboardItem { source, mode });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RoveError;
    use std::io;

    fn target_of(state: &mut ClipboardState, dest: &str) -> RoveResult<PathBuf> {
        state.paste(Some(Path::new(dest)), |_, target| Ok(target))
    }

    #[test]
    fn test_last_copy_wins() {
        let mut state = ClipboardState::new();
        state.copy("/docs/x.txt");
        state.copy("/docs/y.txt");
        let target = target_of(&mut state, "/out").unwrap();
        assert_eq!(target, PathBuf::from("/out/y.txt"));
    }

    #[test]
    fn test_cut_replaces_copy() {
        let mut state = ClipboardState::new();
        state.copy("/docs/x.txt");
        state.cut("/docs/y.txt");
        assert_eq!(state.mode(), Some(ClipboardMode::Cut));
        assert_eq!(state.item().unwrap().source, PathBuf::from("/docs/y.txt"));
    }

    #[test]
    fn test_empty_clipboard() {
        let mut state = ClipboardState::new();
        let err = target_of(&mut state, "/out").unwrap_err();
        assert!(matches!(
            err,
            RoveError::InvalidOperation(InvalidOperation::NoClipboardItem)
        ));
    }

    #[test]
    fn test_no_destination() {
        let mut state = ClipboardState::new();
        state.copy("/docs/x.txt");
        let err = state.paste(None, |_, target| Ok(target)).unwrap_err();
        assert!(matches!(
            err,
            RoveError::InvalidOperation(InvalidOperation::NoDestination)
        ));
        assert!(!state.is_empty());
    }

    #[test]
    fn test_cut_clears_after_success_copy_does_not() {
        let mut state = ClipboardState::new();
        state.cut("/docs/x.txt");
        target_of(&mut state, "/out").unwrap();
        assert!(state.is_empty());

        state.copy("/docs/x.txt");
        target_of(&mut state, "/out").unwrap();
        target_of(&mut state, "/elsewhere").unwrap();
        assert_eq!(state.mode(), Some(ClipboardMode::Copy));
    }

    #[test]
    fn test_failed_transfer_keeps_item() {
        let mut state = ClipboardState::new();
        state.cut("/docs/x.txt");
        let result: RoveResult<()> = state.paste(Some(Path::new("/out")), |_, _| {
            Err(io::Error::new(io::ErrorKind::Other, "disk full").into())
        });
        assert!(result.is_err());
        assert_eq!(state.mode(), Some(ClipboardMode::Cut));
    }

    #[test]
    fn test_paste_into_own_subtree_is_refused() {
        let mut state = ClipboardState::new();
        state.copy("/docs/project");
        let err = target_of(&mut state, "/docs/project/sub").unwrap_err();
        assert!(matches!(
            err,
            RoveError::InvalidOperation(InvalidOperation::PasteIntoItself(_))
        ));
    }

    #[test]
    fn test_paste_into_own_parent_is_allowed() {
        let mut state = ClipboardState::new();
        state.copy("/docs/project");
        assert_eq!(
            target_of(&mut state, "/docs").unwrap(),
            PathBuf::from("/docs/project")
        );
    }

    #[test]
    fn test_forget_under_and_repoint() {
        let mut state = ClipboardState::new();
        state.copy("/docs/a/b.txt");
        state.repoint(Path::new("/docs/a/b.txt"), Path::new("/docs/a/c.txt"));
        assert_eq!(state.item().unwrap().source, PathBuf::from("/docs/a/c.txt"));

        assert!(!state.forget_under(Path::new("/other")));
        assert!(state.forget_under(Path::new("/docs/a")));
        assert!(state.is_empty());
    }

    #[test]
    fn test_repoint_follows_renamed_ancestor() {
        let mut state = ClipboardState::new();
        state.cut("/docs/a/b.txt");
        state.repoint(Path::new("/docs/a"), Path::new("/docs/z"));
        assert_eq!(state.item().unwrap().source, PathBuf::from("/docs/z/b.txt"));

        state.repoint(Path::new("/docs/zz"), Path::new("/elsewhere"));
        assert_eq!(state.item().unwrap().source, PathBuf::from("/docs/z/b.txt"));
        assert_eq!(state.mode(), Some(ClipboardMode::Cut));
    }
}
