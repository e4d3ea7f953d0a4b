//! Status command implementation

use crate::cli::commands::open_repository;
use crate::cli::GlobalOptions;
use crate::storage::StatusReport;
use anyhow::Result;
use colored::Colorize;

/// Execute the status command
pub fn execute(opts: &GlobalOptions, porcelain: bool) -> Result<()> {
    let repo = open_repository(opts)?;
    let report = repo.status();

    if porcelain {
        print!("{}", render_porcelain(&report));
        return Ok(());
    }

    println!("{}", "Modified files:".red().bold());
    if report.modified.is_empty() {
        println!("  (none)");
    }
    for path in &report.modified {
        println!("  {}", path.red());
    }

    println!("{}", "Unmodified files:".bold());
    if report.unmodified.is_empty() {
        println!("  (none)");
    }
    for path in &report.unmodified {
        println!("  {}", path);
    }
    Ok(())
}

/// One line per tracked path: `M <path>` when modified, `  <path>` otherwise
pub fn render_porcelain(report: &StatusReport) -> String {
    let mut out = String::new();
    for path in &report.modified {
        out.push_str(&format!("M {}\n", path));
    }
    for path in &report.unmodified {
        out.push_str(&format!("  {}\n", path));
    }
    out
}
