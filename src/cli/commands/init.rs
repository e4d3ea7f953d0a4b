//! Initialize command implementation

use crate::cli::commands::open_repository;
use crate::cli::GlobalOptions;
use anyhow::Result;
use colored::Colorize;

/// Execute the init command
pub fn execute(opts: &GlobalOptions) -> Result<()> {
    let mut repo = open_repository(opts)?;
    let summary = repo.initialize()?;

    if !opts.quiet {
        println!(
            "{} Scanned and stored initial file versions.",
            "✓".green().bold()
        );
        println!("  • Files tracked: {}", summary.tracked);
        println!("  • Files skipped (empty or unreadable): {}", summary.skipped);
        println!("  • New content entries: {}", summary.new_blobs);
        println!("  • Stored content: {} bytes", repo.store().total_bytes());
    }
    Ok(())
}
