//! Repository configuration management for vcstrack
//!
//! Settings live next to the tracked files in `.vcstrack.toml`.

pub mod repo_config;

// Re-export commonly used items
pub use repo_config::{RepoConfig, CONFIG_FILE_NAME};
