//! CLI command implementations

pub mod add;
pub mod cat;
pub mod init;
pub mod log;
pub mod status;

// Common utilities for commands
use crate::cli::GlobalOptions;
use crate::storage::Repository;
use anyhow::{Context, Result};

/// Open the repository named by the global options
pub fn open_repository(opts: &GlobalOptions) -> Result<Repository> {
    let repo = Repository::open(&opts.root)
        .with_context(|| format!("Failed to open repository at {}", opts.root.display()))?;

    if !repo.loaded_from_disk() && !opts.quiet {
        eprintln!("No previous repository data found.");
    }
    Ok(repo)
}
