//! Add command implementation

use crate::cli::commands::open_repository;
use crate::cli::GlobalOptions;
use crate::storage::RecordOutcome;
use anyhow::{bail, Result};
use colored::Colorize;
use std::path::PathBuf;

/// Execute the add command
pub fn execute(opts: &GlobalOptions, paths: Vec<PathBuf>) -> Result<()> {
    let mut repo = open_repository(opts)?;
    let mut failed = 0usize;

    for path in &paths {
        match repo.record_file(path)? {
            RecordOutcome::Recorded { digest, .. } => {
                if !opts.quiet {
                    println!(
                        "{} Added {} with hash {}",
                        "✓".green(),
                        path.display(),
                        digest.to_string().cyan()
                    );
                }
            }
            RecordOutcome::Unchanged { .. } => {
                if !opts.quiet {
                    println!("  {} has no changes.", path.display());
                }
            }
            RecordOutcome::Empty => {
                eprintln!(
                    "{} No content in the file: {}",
                    "✗".red(),
                    path.display()
                );
                failed += 1;
            }
        }
    }

    if failed > 0 {
        bail!("{} file(s) had no content and were not recorded", failed);
    }
    Ok(())
}
