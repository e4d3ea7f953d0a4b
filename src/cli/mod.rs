//! Command-line interface for vcstrack

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod commands;

/// vcstrack - content-addressed per-file version tracking
#[derive(Parser)]
#[command(
    name = "vcstrack",
    version,
    about = "Track per-file version history with content-addressed storage",
    long_about = "vcstrack hashes file contents, stores each distinct content once, and keeps an append-only history of versions for every tracked file."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Repository root (default: current directory)
    #[arg(long, global = true, env = "VCSTRACK_ROOT")]
    pub root: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan the working tree and record an initial version of every file
    Init,

    /// Record the current content of files as new versions
    Add {
        /// Files to record
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// Show modified and unmodified tracked files
    Status {
        /// Machine-readable output: one `M <path>` or `  <path>` per line
        #[arg(long)]
        porcelain: bool,
    },

    /// Show the recorded versions of a file, newest first
    Log {
        /// Tracked file
        path: PathBuf,

        /// Limit number of entries
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Write stored content to stdout
    Cat {
        /// Tracked file (latest version is printed)
        #[arg(required_unless_present = "digest")]
        path: Option<PathBuf>,

        /// Print the content stored under this digest instead
        #[arg(long, conflicts_with = "path")]
        digest: Option<String>,
    },
}

/// Options shared by every command
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    pub root: PathBuf,
    pub quiet: bool,
}
