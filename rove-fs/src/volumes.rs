// SPDX-License-Identifier: AGPL-3.0-or-later
//! Mounted volumes as reported by the operating system

use rove_core::{RoveError, RoveResult, SpaceInfo, VolumeSource};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use sysinfo::{Disk, Disks};

/// [`VolumeSource`] backed by the platform's mounted-disk table.
///
/// The table is re-read at the start of every enumeration ([`VolumeSource::roots`]);
/// name and capacity lookups during that enumeration use the same snapshot.
pub struct SystemVolumes {
    disks: RefCell<Disks>,
}

impl SystemVolumes {
    pub fn new() -> Self {
        Self {
            disks: RefCell::new(Disks::new()),
        }
    }

    fn with_disk<T>(&self, root: &Path, f: impl FnOnce(&Disk) -> T) -> RoveResult<T> {
        let disks = self.disks.borrow();
        disks
            .list()
            .iter()
            .find(|d| d.mount_point() == root)
            .map(f)
            .ok_or_else(|| RoveError::NotFound(root.display().to_string()))
    }
}

impl Default for SystemVolumes {
    fn default() -> Self {
        Self::new()
    }
}

impl VolumeSource for SystemVolumes {
    fn roots(&self) -> Vec<PathBuf> {
        let mut disks = self.disks.borrow_mut();
        *disks = Disks::new_with_refreshed_list();

        let mut roots: Vec<PathBuf> = Vec::new();
        for disk in disks.list() {
            let mount = disk.mount_point().to_path_buf();
            if !roots.contains(&mount) {
                roots.push(mount);
            }
        }

        if roots.is_empty() {
            roots = filesystem_roots();
        }
        roots
    }

    fn display_name(&self, root: &Path) -> RoveResult<String> {
        self.with_disk(root, |disk| {
            let label = disk.name().to_string_lossy();
            if label.trim().is_empty() {
                String::new()
            } else {
                format!("{} ({})", label, root.display())
            }
        })
    }

    fn space(&self, root: &Path) -> RoveResult<SpaceInfo> {
        self.with_disk(root, |disk| {
            SpaceInfo::new(disk.total_space(), disk.available_space())
        })
    }
}

/// Roots to offer when no mounted disk is reported.
#[cfg(windows)]
fn filesystem_roots() -> Vec<PathBuf> {
    ('A'..='Z')
        .map(|letter| PathBuf::from(format!("{}:\\", letter)))
        .filter(|root| root.exists())
        .collect()
}

#[cfg(not(windows))]
fn filesystem_roots() -> Vec<PathBuf> {
    vec![PathBuf::from("/")]
}
