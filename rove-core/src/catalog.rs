//! Stateless path and size helpers shared by the engine and its front ends

use std::path::{Component, Path, PathBuf};

use crate::error::RoveResult;

const UNITS: [char; 6] = ['K', 'M', 'G', 'T', 'P', 'E'];

/// Format a byte count with binary prefixes: `"512 B"`, `"1.5 KB"`, `"3.2 GB"`.
pub fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{} B", bytes);
    }

    let mut exp = 0;
    let mut scale = 1024u64;
    while exp + 1 < UNITS.len() && bytes / scale >= 1024 {
        scale *= 1024;
        exp += 1;
    }
    format!("{:.1} {}B", bytes as f64 / scale as f64, UNITS[exp])
}

/// Final path component as a display string, falling back to the whole path for roots.
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Lowercased extension of a file name.
///
/// Dot-files (`.bashrc`) and names ending in a dot have none.
pub fn extension(name: &str) -> Option<String> {
    let dot = name.rfind('.')?;
    if dot == 0 || dot == name.len() - 1 {
        return None;
    }
    Some(name[dot + 1..].to_lowercase())
}

/// Resolve the label shown for a drive root.
///
/// A blank label falls back to the root path itself; a failed lookup falls back to
/// `"Drive (<path>)"`.
pub fn drive_display_name(root: &Path, resolved: RoveResult<String>) -> String {
    match resolved {
        Ok(name) if !name.trim().is_empty() => name,
        Ok(_) => root.display().to_string(),
        Err(_) => format!("Drive ({})", root.display()),
    }
}

/// Case-insensitive substring match against a path's final component.
pub fn name_matches(path: &Path, query: &str) -> bool {
    path.file_name()
        .map(|n| n.to_string_lossy().to_lowercase().contains(&query.to_lowercase()))
        .unwrap_or(false)
}

/// Join `path` onto `base` unless it is already absolute, folding `.` and `..` away.
///
/// The folding is lexical; symlinks are not resolved.
pub fn anchor(base: &Path, path: &Path) -> PathBuf {
    let mut anchored = if path.is_absolute() {
        PathBuf::new()
    } else {
        base.to_path_buf()
    };
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                anchored.pop();
            }
            other => anchored.push(other),
        }
    }
    anchored
}

/// `base` joined with `rest`, without the trailing separator `join("")` would add.
pub fn rebase(base: &Path, rest: &Path) -> PathBuf {
    if rest.as_os_str().is_empty() {
        base.to_path_buf()
    } else {
        base.join(rest)
    }
}

/// Absolute form of `path`, anchored at the process working directory.
pub fn absolute(path: &Path) -> RoveResult<PathBuf> {
    if path.is_absolute() {
        return Ok(anchor(path, path));
    }
    Ok(anchor(&std::env::current_dir()?, path))
}
