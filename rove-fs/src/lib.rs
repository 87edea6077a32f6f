//! Local filesystem layer for Rove
//!
//! Blocking `std::fs` implementations of the engine's filesystem work: directory
//! listing and search, the mutating file operations, drive enumeration and the
//! default-application launcher.

pub mod drives;
pub mod launcher;
pub mod listing;
pub mod operations;
mod volumes;

pub use drives::DriveEnumerator;
pub use launcher::open_with_default_application;
pub use listing::{list, search};
pub use operations::{
    copy_directory_recursive, copy_file, create_folder, delete, move_directory_recursive,
    move_file, paste_item, rename,
};
pub use volumes::SystemVolumes;
