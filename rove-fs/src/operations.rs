// SPDX-License-Identifier: AGPL-3.0-or-later
//! Mutating filesystem operations
//!
//! Every walk is fail-fast: the first error aborts the remaining work and is returned.
//! Nothing is rolled back, so a failed copy or move can leave a partial tree behind.

use rove_core::{ClipboardItem, ClipboardMode, InvalidOperation, RoveError, RoveResult};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Delete a file, or a directory with everything beneath it (children before parents).
pub fn delete(path: &Path) -> RoveResult<()> {
    let meta = fs::symlink_metadata(path).map_err(RoveError::at(path))?;
    debug!(path = %path.display(), "deleting");

    if !meta.is_dir() {
        return fs::remove_file(path).map_err(RoveError::at(path));
    }

    for entry in WalkDir::new(path).contents_first(true) {
        let entry = entry.map_err(walk_error)?;
        let p = entry.path();
        if entry.file_type().is_dir() {
            fs::remove_dir(p).map_err(RoveError::at(p))?;
        } else {
            fs::remove_file(p).map_err(RoveError::at(p))?;
        }
    }
    Ok(())
}

/// Rename `path` within its parent directory, replacing whatever holds `new_name`.
///
/// An empty name, or the current name, leaves the filesystem untouched and returns
/// `path` itself. Returns the path the item now lives at.
pub fn rename(path: &Path, new_name: &str) -> RoveResult<PathBuf> {
    if new_name.is_empty() {
        return Ok(path.to_path_buf());
    }
    if new_name == "." || new_name == ".." || new_name.contains(['/', std::path::MAIN_SEPARATOR]) {
        return Err(InvalidOperation::InvalidName(new_name.to_string()).into());
    }
    if path.file_name().map_or(false, |n| n == new_name) {
        return Ok(path.to_path_buf());
    }

    let parent = path
        .parent()
        .ok_or_else(|| InvalidOperation::InvalidName(path.display().to_string()))?;
    let target = parent.join(new_name);

    debug!(from = %path.display(), to = %target.display(), "renaming");
    fs::rename(path, &target).map_err(RoveError::at(path))?;
    Ok(target)
}

/// Create a uniquely named folder directly inside `parent`.
///
/// Tries `base`, then `base (1)`, `base (2)`, ... Parents are never created.
pub fn create_folder(parent: &Path, base: &str) -> RoveResult<PathBuf> {
    for n in 0u64.. {
        let name = if n == 0 {
            base.to_string()
        } else {
            format!("{} ({})", base, n)
        };
        let candidate = parent.join(name);
        if fs::symlink_metadata(&candidate).is_ok() {
            continue;
        }
        match fs::create_dir(&candidate) {
            Ok(()) => {
                debug!(path = %candidate.display(), "created folder");
                return Ok(candidate);
            }
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
            Err(e) => return Err(RoveError::at(parent)(e)),
        }
    }
    Err(RoveError::Io(io::Error::new(
        io::ErrorKind::AlreadyExists,
        format!("no free folder name left in {}", parent.display()),
    )))
}

/// Copy a single file, overwriting the target.
pub fn copy_file(src: &Path, dst: &Path) -> RoveResult<()> {
    fs::copy(src, dst).map_err(RoveError::at(dst))?;
    Ok(())
}

/// Move a single file, overwriting the target.
///
/// Falls back to copy-then-remove when the rename is refused, e.g. across volumes.
pub fn move_file(src: &Path, dst: &Path) -> RoveResult<()> {
    if let Err(e) = fs::rename(src, dst) {
        debug!(from = %src.display(), to = %dst.display(), error = %e, "rename refused, copying instead");
        copy_entry(src, dst)?;
        fs::remove_file(src).map_err(RoveError::at(src))?;
    }
    Ok(())
}

/// Recreate the tree under `src` beneath `dst`, overwriting same-named files.
pub fn copy_directory_recursive(src: &Path, dst: &Path) -> RoveResult<()> {
    debug!(from = %src.display(), to = %dst.display(), "copying directory");
    replicate(src, dst, copy_entry)
}

/// Move the tree under `src` beneath `dst`, merging into an existing `dst`.
///
/// The emptied source directories are removed once every file has moved.
pub fn move_directory_recursive(src: &Path, dst: &Path) -> RoveResult<()> {
    debug!(from = %src.display(), to = %dst.display(), "moving directory");
    if fs::symlink_metadata(dst).is_err() && fs::rename(src, dst).is_ok() {
        return Ok(());
    }

    replicate(src, dst, move_file)?;

    for entry in WalkDir::new(src).contents_first(true) {
        let entry = entry.map_err(walk_error)?;
        if entry.file_type().is_dir() {
            fs::remove_dir(entry.path()).map_err(RoveError::at(entry.path()))?;
        }
    }
    Ok(())
}

/// Copy or move a clipboard item to `target`.
///
/// Source and target are compared after resolving `..` and symlinks: pasting an item
/// onto itself is a no-op, and a directory is never placed inside its own subtree.
pub fn paste_item(item: &ClipboardItem, target: &Path) -> RoveResult<()> {
    let source = item.source.as_path();
    if source == target {
        return Ok(());
    }

    let is_dir = fs::symlink_metadata(source)
        .map_err(RoveError::at(source))?
        .is_dir();

    let resolved_source = fs::canonicalize(source).map_err(RoveError::at(source))?;
    let resolved_target = resolve_target(target)?;
    if resolved_target == resolved_source {
        return Ok(());
    }
    if is_dir && resolved_target.starts_with(&resolved_source) {
        return Err(InvalidOperation::PasteIntoItself(source.display().to_string()).into());
    }

    match (item.mode, is_dir) {
        (ClipboardMode::Copy, true) => copy_directory_recursive(source, target),
        (ClipboardMode::Cut, true) => move_directory_recursive(source, target),
        (ClipboardMode::Copy, false) => copy_entry(source, target),
        (ClipboardMode::Cut, false) => move_file(source, target),
    }
}

/// Canonical parent of a target that may not exist yet, joined with its final component.
fn resolve_target(target: &Path) -> RoveResult<PathBuf> {
    let (Some(parent), Some(name)) = (target.parent(), target.file_name()) else {
        return fs::canonicalize(target).map_err(RoveError::at(target));
    };
    let parent = fs::canonicalize(parent).map_err(RoveError::at(parent))?;
    Ok(parent.join(name))
}

/// Copy one non-directory entry of a tree. Links to directories are recreated as links
/// instead of being followed.
fn copy_entry(src: &Path, dst: &Path) -> RoveResult<()> {
    let meta = fs::symlink_metadata(src).map_err(RoveError::at(src))?;
    if meta.file_type().is_symlink() && src.is_dir() {
        return copy_link(src, dst);
    }
    copy_file(src, dst)
}

fn copy_link(src: &Path, dst: &Path) -> RoveResult<()> {
    let link = fs::read_link(src).map_err(RoveError::at(src))?;
    if let Ok(existing) = fs::symlink_metadata(dst) {
        if !existing.is_dir() {
            fs::remove_file(dst).map_err(RoveError::at(dst))?;
        }
    }
    debug!(link = %dst.display(), points_to = %link.display(), "recreating directory link");
    make_dir_link(&link, dst).map_err(RoveError::at(dst))
}

#[cfg(unix)]
fn make_dir_link(link: &Path, dst: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(link, dst)
}

#[cfg(windows)]
fn make_dir_link(link: &Path, dst: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_dir(link, dst)
}

#[cfg(not(any(unix, windows)))]
fn make_dir_link(_link: &Path, dst: &Path) -> io::Result<()> {
    fs::create_dir_all(dst)
}

/// Walk `src` parents-first, creating each directory under `dst` before `transfer`
/// places the files that belong in it.
fn replicate(
    src: &Path,
    dst: &Path,
    transfer: impl Fn(&Path, &Path) -> RoveResult<()>,
) -> RoveResult<()> {
    for entry in WalkDir::new(src) {
        let entry = entry.map_err(walk_error)?;
        let relative = entry
            .path()
            .strip_prefix(src)
            .map_err(|_| InvalidOperation::InvalidName(entry.path().display().to_string()))?;
        let target = dst.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(RoveError::at(&target))?;
        } else {
            transfer(entry.path(), &target)?;
        }
    }
    Ok(())
}

fn walk_error(err: walkdir::Error) -> RoveError {
    let path = err.path().map(Path::to_path_buf).unwrap_or_default();
    RoveError::at(&path)(io::Error::from(err))
}
