// SPDX-License-Identifier: AGPL-3.0-or-later
//! Hand paths over to the desktop's default application

use rove_core::{RoveError, RoveResult};
use std::path::Path;
use tracing::info;

/// Open `path` with whatever the host registers as its default handler.
///
/// Fails with [`RoveError::NotFound`] if the path is gone and
/// [`RoveError::Unsupported`] if the host has no usable launcher.
pub fn open_with_default_application(path: &Path) -> RoveResult<()> {
    if std::fs::symlink_metadata(path).is_err() {
        return Err(RoveError::NotFound(path.display().to_string()));
    }

    open::that_detached(path).map_err(|e| {
        RoveError::Unsupported(format!("cannot open {}: {}", path.display(), e))
    })?;
    info!(path = %path.display(), "opened with default application");
    Ok(())
}
