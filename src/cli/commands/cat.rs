//! Cat command implementation

use crate::cli::commands::open_repository;
use crate::cli::GlobalOptions;
use crate::core::error::VcsError;
use crate::core::types::Digest;
use anyhow::Result;
use std::io::Write;
use std::path::PathBuf;

/// Execute the cat command
pub fn execute(opts: &GlobalOptions, path: Option<PathBuf>, digest: Option<String>) -> Result<()> {
    let repo = open_repository(opts)?;

    let bytes = match (digest, path) {
        (Some(hex), _) => {
            let digest = Digest::from_hex(&hex).map_err(VcsError::from)?;
            repo.content(&digest)?
        }
        (None, Some(path)) => repo.latest_content(&path)?,
        (None, None) => anyhow::bail!("Either a path or --digest is required"),
    };

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(bytes)?;
    stdout.flush()?;
    Ok(())
}
