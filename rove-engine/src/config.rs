// SPDX-License-Identifier: AGPL-3.0-or-later
//! Engine configuration

use rove_core::{RoveError, RoveResult};
use rove_prefs::pinned::{DEFAULT_DELIMITER, DEFAULT_KEY};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("dev", "rove", "rove")
}

/// Settings read from `config.toml`. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Directory of the preference database
    pub preferences_dir: Option<PathBuf>,
    /// Preference key holding the pinned folders
    pub pinned_key: String,
    /// Separator between pinned paths
    pub pinned_delimiter: char,
    /// Base name for new folders
    pub new_folder_name: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            preferences_dir: None,
            pinned_key: DEFAULT_KEY.to_string(),
            pinned_delimiter: DEFAULT_DELIMITER,
            new_folder_name: "New Folder".to_string(),
        }
    }
}

impl EngineConfig {
    /// Where `load_default` looks for the file.
    pub fn default_path() -> Option<PathBuf> {
        project_dirs().map(|d| d.config_dir().join("config.toml"))
    }

    /// Load from the default location, falling back to defaults.
    pub fn load_default() -> RoveResult<Self> {
        match Self::default_path() {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> RoveResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path)
            .map_err(|e| RoveError::Config(format!("{}: {}", path.display(), e)))?;
        Self::parse(&text).map_err(|e| match e {
            RoveError::Config(msg) => RoveError::Config(format!("{}: {}", path.display(), msg)),
            other => other,
        })
    }

    pub fn parse(text: &str) -> RoveResult<Self> {
        let config: Self = toml::from_str(text).map_err(|e| RoveError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> RoveResult<()> {
        if self.pinned_key.trim().is_empty() {
            return Err(RoveError::Config("pinned_key must not be empty".into()));
        }
        if std::path::is_separator(self.pinned_delimiter) {
            return Err(RoveError::Config(format!(
                "pinned_delimiter {:?} is a path separator",
                self.pinned_delimiter
            )));
        }
        let name = self.new_folder_name.trim();
        if name.is_empty() || name.chars().any(std::path::is_separator) {
            return Err(RoveError::Config(format!(
                "invalid new_folder_name {:?}",
                self.new_folder_name
            )));
        }
        Ok(())
    }

    /// Preference database directory, defaulting to the per-user data directory.
    pub fn preferences_dir(&self) -> PathBuf {
        self.preferences_dir.clone().unwrap_or_else(|| {
            project_dirs()
                .map(|d| d.data_dir().join("prefs"))
                .unwrap_or_else(|| std::env::temp_dir().join("rove-prefs"))
        })
    }
}
