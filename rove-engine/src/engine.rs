// SPDX-License-Identifier: AGPL-3.0-or-later
//! The browser engine
//!
//! One [`Engine`] owns the navigation history, the clipboard and the pinned folders.
//! Every operation runs to completion on the caller's thread; front ends call an
//! operation, then re-read whatever state they display.

use rove_core::{
    ClipboardState, DirectoryListing, DriveInfo, InvalidOperation, NavigationHistory, RoveResult,
    VolumeSource,
};
use rove_fs::{DriveEnumerator, SystemVolumes};
use rove_prefs::{PinOutcome, PinnedFolderStore, PreferenceStore, SledPreferences};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::EngineConfig;

pub struct Engine {
    drives: DriveEnumerator<Box<dyn VolumeSource>>,
    pins: PinnedFolderStore<Box<dyn PreferenceStore>>,
    history: NavigationHistory,
    clipboard: ClipboardState,
    new_folder_name: String,
}

impl Engine {
    /// Engine over the system's volumes and the on-disk preference database.
    pub fn open(config: &EngineConfig) -> RoveResult<Self> {
        let prefs = SledPreferences::open(config.preferences_dir())?;
        Self::with_parts(config, Box::new(SystemVolumes::new()), Box::new(prefs))
    }

    /// Engine over explicit volume and preference backends.
    pub fn with_parts(
        config: &EngineConfig,
        volumes: Box<dyn VolumeSource>,
        prefs: Box<dyn PreferenceStore>,
    ) -> RoveResult<Self> {
        config.validate()?;
        let pins = PinnedFolderStore::load(prefs, config.pinned_key.clone(), config.pinned_delimiter)?;
        info!(pinned = pins.folders().len(), "engine ready");

        Ok(Self {
            drives: DriveEnumerator::new(volumes),
            pins,
            history: NavigationHistory::new(),
            clipboard: ClipboardState::new(),
            new_folder_name: config.new_folder_name.clone(),
        })
    }

    /// Directory being shown, `None` while the drive list is shown.
    pub fn current_dir(&self) -> Option<&Path> {
        self.history.current()
    }

    pub fn history(&self) -> &NavigationHistory {
        &self.history
    }

    pub fn clipboard(&self) -> &ClipboardState {
        &self.clipboard
    }

    pub fn pinned(&self) -> &[PathBuf] {
        self.pins.folders()
    }

    /// Raw preference store backing the pinned folders.
    pub fn preferences(&self) -> &dyn PreferenceStore {
        &**self.pins.store()
    }

    // Navigation

    pub fn list_drives(&self) -> Vec<DriveInfo> {
        self.drives.list_drives()
    }

    /// Open `path`, dropping any forward history. A directory that cannot be listed is
    /// not recorded.
    pub fn navigate_to(&mut self, path: impl Into<PathBuf>) -> RoveResult<DirectoryListing> {
        let path = path.into();
        debug!(path = %path.display(), "navigating");
        self.history.navigate_to(path, rove_fs::list)
    }

    /// Go back one directory. `Ok(None)` means the drive list is now shown.
    pub fn back(&mut self) -> RoveResult<Option<DirectoryListing>> {
        self.history.back(rove_fs::list)
    }

    /// Go forward one directory. `Ok(None)` means there was nothing ahead.
    pub fn forward(&mut self) -> RoveResult<Option<DirectoryListing>> {
        self.history.forward(rove_fs::list)
    }

    /// Return to the drive list, forgetting history and any clipboard item.
    pub fn home(&mut self) {
        self.history.home();
        self.clipboard.clear();
        debug!("returned home");
    }

    /// Re-read the current directory.
    pub fn refresh(&self) -> RoveResult<DirectoryListing> {
        let dir = self.current_dir().ok_or(InvalidOperation::NoDestination)?;
        rove_fs::list(dir)
    }

    pub fn list(&self, dir: &Path) -> RoveResult<DirectoryListing> {
        rove_fs::list(dir)
    }

    pub fn search(&self, dir: &Path, query: &str) -> RoveResult<DirectoryListing> {
        rove_fs::search(dir, query)
    }

    pub fn search_current(&self, query: &str) -> RoveResult<DirectoryListing> {
        let dir = self.current_dir().ok_or(InvalidOperation::NoDestination)?;
        rove_fs::search(dir, query)
    }

    // Clipboard

    pub fn copy(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        debug!(path = %path.display(), "copied to clipboard");
        self.clipboard.copy(path);
    }

    pub fn cut(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        debug!(path = %path.display(), "cut to clipboard");
        self.clipboard.cut(path);
    }

    /// Paste the clipboard item into `destination`; returns the pasted path.
    ///
    /// On failure the clipboard is left as it was so the paste can be retried.
    pub fn paste(&mut self, destination: Option<&Path>) -> RoveResult<PathBuf> {
        self.clipboard.paste(destination, |item, target| {
            debug!(source = %item.source.display(), target = %target.display(), mode = ?item.mode, "pasting");
            rove_fs::paste_item(item, &target)?;
            Ok(target)
        })
    }

    /// Paste into the current directory.
    pub fn paste_here(&mut self) -> RoveResult<PathBuf> {
        let destination = self.current_dir().map(Path::to_path_buf);
        self.paste(destination.as_deref())
    }

    // File operations

    /// Delete `path` recursively, then drop pins and clipboard items that pointed into it.
    pub fn delete(&mut self, path: &Path) -> RoveResult<()> {
        rove_fs::delete(path)?;
        self.pins.forget_under(path)?;
        if self.clipboard.forget_under(path) {
            debug!(path = %path.display(), "cleared clipboard item of deleted path");
        }
        Ok(())
    }

    /// Rename `path` to `new_name` in place; returns the new path.
    pub fn rename(&mut self, path: &Path, new_name: &str) -> RoveResult<PathBuf> {
        let renamed = rove_fs::rename(path, new_name)?;
        if renamed != path {
            self.pins.repoint(path, &renamed)?;
            self.clipboard.repoint(path, &renamed);
        }
        Ok(renamed)
    }

    /// Create `New Folder`, `New Folder (1)`, ... inside `parent`.
    pub fn create_folder(&self, parent: &Path) -> RoveResult<PathBuf> {
        rove_fs::create_folder(parent, &self.new_folder_name)
    }

    pub fn open_with_default_application(&self, path: &Path) -> RoveResult<()> {
        rove_fs::open_with_default_application(path)
    }

    // Pinned folders

    pub fn pin(&mut self, path: &Path) -> RoveResult<PinOutcome> {
        self.pins.pin(path)
    }

    pub fn unpin(&mut self, path: &Path) -> RoveResult<bool> {
        self.pins.unpin(path)
    }

    pub fn is_pinned(&self, path: &Path) -> bool {
        self.pins.is_pinned(path)
    }
}
