//! Log command implementation

use crate::cli::commands::open_repository;
use crate::cli::GlobalOptions;
use anyhow::Result;
use colored::Colorize;
use std::path::PathBuf;

/// Execute the log command
pub fn execute(opts: &GlobalOptions, path: PathBuf, limit: Option<usize>) -> Result<()> {
    let repo = open_repository(opts)?;
    let chain = repo.history(&path)?;

    println!(
        "{} {} ({} version{})",
        "History of".green().bold(),
        path.display(),
        chain.len(),
        if chain.len() == 1 { "" } else { "s" }
    );
    println!("{}", "═".repeat(50).green());

    let total = chain.len();
    let shown = limit.unwrap_or(total);
    for (offset, digest) in chain.iter().rev().take(shown).enumerate() {
        let number = total - offset;
        let size = match repo.content(digest) {
            Ok(bytes) => format!("{} bytes", bytes.len()),
            Err(_) => "content missing".yellow().to_string(),
        };
        let marker = if offset == 0 { " (latest)" } else { "" };
        println!("  {:>3}  {}  {}{}", number, digest.to_string().cyan(), size, marker);
    }
    Ok(())
}
