//! Volume source seam and drive summaries

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::catalog::format_size;
use crate::error::RoveResult;

/// Space information
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpaceInfo {
    pub total: u64,
    pub available: u64,
}

impl SpaceInfo {
    pub fn new(total: u64, available: u64) -> Self {
        Self { total, available }
    }

    pub fn used(&self) -> u64 {
        self.total.saturating_sub(self.available)
    }
}

/// Source of filesystem roots and their statistics.
///
/// Every method is queried afresh on each drive listing; implementations must not cache.
pub trait VolumeSource {
    /// Candidate roots, in platform order.
    fn roots(&self) -> Vec<PathBuf>;

    /// Human label for a root. May fail per root.
    fn display_name(&self, root: &Path) -> RoveResult<String>;

    /// Capacity of the volume holding `root`.
    fn space(&self, root: &Path) -> RoveResult<SpaceInfo>;
}

impl<T: VolumeSource + ?Sized> VolumeSource for Box<T> {
    fn roots(&self) -> Vec<PathBuf> {
        (**self).roots()
    }

    fn display_name(&self, root: &Path) -> RoveResult<String> {
        (**self).display_name(root)
    }

    fn space(&self, root: &Path) -> RoveResult<SpaceInfo> {
        (**self).space(root)
    }
}

/// One enumerated drive
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriveInfo {
    pub root: PathBuf,
    pub display_name: String,
    pub total_bytes: u64,
    pub used_bytes: u64,
    pub free_bytes: u64,
}

impl DriveInfo {
    pub fn new(root: PathBuf, display_name: String, space: SpaceInfo) -> Self {
        Self {
            root,
            display_name,
            total_bytes: space.total,
            used_bytes: space.used(),
            free_bytes: space.available,
        }
    }

    /// Fraction of the volume in use, `0.0` when the capacity is unknown.
    pub fn usage_fraction(&self) -> f64 {
        if self.total_bytes == 0 {
            0.0
        } else {
            self.used_bytes as f64 / self.total_bytes as f64
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "Total: {} | Free: {}",
            format_size(self.total_bytes),
            format_size(self.free_bytes)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_fraction() {
        let drive = DriveInfo::new("/".into(), "Root".into(), SpaceInfo::new(1000, 250));
        assert_eq!(drive.used_bytes, 750);
        assert!((drive.usage_fraction() - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn test_unknown_space_has_zero_usage() {
        let drive = DriveInfo::new("/".into(), "Root".into(), SpaceInfo::default());
        assert_eq!(drive.usage_fraction(), 0.0);
    }

    #[test]
    fn test_available_above_total_saturates() {
        let space = SpaceInfo::new(100, 400);
        assert_eq!(space.used(), 0);
    }

    #[test]
    fn test_summary() {
        let drive = DriveInfo::new("/".into(), "Root".into(), SpaceInfo::new(2048, 1024));
        assert_eq!(drive.summary(), "Total: 2.0 KB | Free: 1.0 KB");
    }
}
