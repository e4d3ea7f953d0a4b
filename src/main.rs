//! vcstrack CLI
//!
//! Command-line interface for the vcstrack per-file version tracker.

use anyhow::Result;
use clap::Parser;
use vcstrack::cli::{commands, Cli, Commands, GlobalOptions};

fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging; stdout is reserved for command output
    let default_filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let root = match cli.root {
        Some(root) => root,
        None => std::env::current_dir()?,
    };
    let opts = GlobalOptions {
        root,
        quiet: cli.quiet,
    };

    // Execute the command
    match cli.command {
        Commands::Init => commands::init::execute(&opts),
        Commands::Add { paths } => commands::add::execute(&opts, paths),
        Commands::Status { porcelain } => commands::status::execute(&opts, porcelain),
        Commands::Log { path, limit } => commands::log::execute(&opts, path, limit),
        Commands::Cat { path, digest } => commands::cat::execute(&opts, path, digest),
    }
}
