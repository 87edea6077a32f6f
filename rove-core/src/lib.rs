//! Rove Core
//!
//! Types, traits and state machines of the Rove file browser engine: the error model,
//! directory entries, drive summaries, navigation history and the copy/cut clipboard.

pub mod backend;
pub mod catalog;
pub mod clipboard;
pub mod entry;
pub mod error;
pub mod history;

pub use backend::{DriveInfo, SpaceInfo, VolumeSource};
pub use clipboard::{ClipboardItem, ClipboardMode, ClipboardState};
pub use entry::{DirectoryEntry, DirectoryListing};
pub use error::{InvalidOperation, RoveError, RoveResult};
pub use history::{HistoryState, NavigationHistory};
