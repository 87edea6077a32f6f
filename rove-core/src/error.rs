//! Error types for Rove

use std::io;
use std::path::Path;
use thiserror::Error;

/// Result type alias
pub type RoveResult<T> = Result<T, RoveError>;

/// Main error type
#[derive(Error, Debug)]
pub enum RoveError {
    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Path not found: {0}")]
    NotFound(String),

    #[error("Not a directory: {0}")]
    NotADirectory(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(InvalidOperation),

    #[error("Preference store error: {0}")]
    Preferences(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unsupported operation: {0}")]
    Unsupported(String),
}

/// Requests the engine refuses before touching the filesystem
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidOperation {
    #[error("no file or folder selected")]
    NoSelection,

    #[error("no file or folder copied")]
    NoClipboardItem,

    #[error("no destination directory selected")]
    NoDestination,

    #[error("name must not be empty")]
    EmptyName,

    #[error("invalid name: {0}")]
    InvalidName(String),

    #[error("cannot paste {0} into itself")]
    PasteIntoItself(String),

    #[error("path contains the pinned-folder delimiter: {0}")]
    DelimiterInPath(String),
}

impl From<InvalidOperation> for RoveError {
    fn from(op: InvalidOperation) -> Self {
        RoveError::InvalidOperation(op)
    }
}

impl RoveError {
    /// Error adapter for a filesystem call on `path`.
    ///
    /// Permission failures become [`RoveError::AccessDenied`] so callers can show a
    /// dedicated message; everything else is carried verbatim as [`RoveError::Io`].
    pub fn at(path: &Path) -> impl FnOnce(io::Error) -> RoveError + '_ {
        move |err| match err.kind() {
            io::ErrorKind::PermissionDenied => RoveError::AccessDenied(path.display().to_string()),
            _ => RoveError::Io(err),
        }
    }

    pub fn is_access_denied(&self) -> bool {
        matches!(self, RoveError::AccessDenied(_))
    }

    pub fn is_invalid_operation(&self) -> bool {
        matches!(self, RoveError::InvalidOperation(_))
    }
}
