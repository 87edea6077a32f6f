// SPDX-License-Identifier: AGPL-3.0-or-later
//! Drive enumeration with usage statistics

use rove_core::{catalog, DriveInfo, VolumeSource};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Lists the roots of a [`VolumeSource`] that can actually be browsed.
pub struct DriveEnumerator<V> {
    source: V,
}

impl<V: VolumeSource> DriveEnumerator<V> {
    pub fn new(source: V) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &V {
        &self.source
    }

    /// Enumerate drives afresh.
    ///
    /// Missing or unreadable roots are skipped, a failed name lookup falls back to
    /// `"Drive (<path>)"`, and an unknown capacity is reported as zero. None of these
    /// abort the listing.
    pub fn list_drives(&self) -> Vec<DriveInfo> {
        let mut drives = Vec::new();

        for root in self.source.roots() {
            if !is_readable_dir(&root) {
                warn!(root = %root.display(), "skipping inaccessible drive");
                continue;
            }

            let resolved = self.source.display_name(&root);
            if let Err(e) = &resolved {
                warn!(root = %root.display(), error = %e, "cannot resolve drive name");
            }
            let name = catalog::drive_display_name(&root, resolved);
            if name.trim().is_empty() {
                warn!(root = %root.display(), "skipping drive with empty name");
                continue;
            }

            let space = self.source.space(&root).unwrap_or_else(|e| {
                warn!(drive = %name, error = %e, "cannot determine drive capacity");
                Default::default()
            });

            debug!(drive = %name, root = %root.display(), "loaded drive");
            drives.push(DriveInfo::new(root, name, space));
        }

        drives
    }
}

fn is_readable_dir(path: &Path) -> bool {
    fs::read_dir(path).is_ok()
}
