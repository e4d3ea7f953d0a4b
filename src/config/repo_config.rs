//! Per-repository configuration
//!
//! Stored in `<root>/.vcstrack.toml`. Every field is optional in the file;
//! missing fields fall back to the defaults below.

use crate::core::error::{Result, VcsError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the configuration file at the repository root
pub const CONFIG_FILE_NAME: &str = ".vcstrack.toml";

/// Default storage directory, relative to the repository root
pub const DEFAULT_STORAGE_DIR: &str = "data/.vcs";

/// Default History record file name
pub const DEFAULT_HISTORY_FILE: &str = "file_history.json";

/// Default Content record file name
pub const DEFAULT_CONTENT_FILE: &str = "hash_map.json";

/// Repository configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepoConfig {
    /// Directory holding both records, relative to the repository root
    pub storage_dir: PathBuf,
    /// File name of the History record
    pub history_file: String,
    /// File name of the Content record
    pub content_file: String,
    /// Fail the load on malformed Base64 instead of truncating
    pub strict_decode: bool,
    /// Follow symbolic links while scanning the working tree
    pub follow_links: bool,
}

impl Default for RepoConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
            history_file: DEFAULT_HISTORY_FILE.to_string(),
            content_file: DEFAULT_CONTENT_FILE.to_string(),
            strict_decode: false,
            follow_links: false,
        }
    }
}

impl RepoConfig {
    /// Load configuration for the repository at `root`
    pub fn load(root: &Path) -> Result<Self> {
        let config_path = Self::get_config_path(root);

        if !config_path.exists() {
            // Return default configuration if file doesn't exist
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&config_path)?;
        let config: RepoConfig = toml::from_str(&content).map_err(|e| {
            VcsError::configuration(format!("Failed to parse {}: {}", config_path.display(), e))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Path of the configuration file for a repository root
    pub fn get_config_path(root: &Path) -> PathBuf {
        root.join(CONFIG_FILE_NAME)
    }

    /// Absolute storage directory for a repository root
    pub fn storage_path(&self, root: &Path) -> PathBuf {
        root.join(&self.storage_dir)
    }

    fn validate(&self) -> Result<()> {
        if self.storage_dir.as_os_str().is_empty() {
            return Err(VcsError::configuration("storage_dir must not be empty"));
        }
        if self.storage_dir.is_absolute() {
            return Err(VcsError::configuration(
                "storage_dir must be relative to the repository root",
            ));
        }
        if self.history_file.is_empty() || self.content_file.is_empty() {
            return Err(VcsError::configuration("record file names must not be empty"));
        }
        if self.history_file == self.content_file {
            return Err(VcsError::configuration(
                "history_file and content_file must differ",
            ));
        }
        Ok(())
    }
}
