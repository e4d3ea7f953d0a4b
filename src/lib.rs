//! vcstrack - a minimal content-addressed version tracker
//!
//! vcstrack hashes file contents with SHA-256, stores each distinct content
//! once under its digest, and keeps an append-only chain of digests for every
//! tracked file. State is written to two JSON records in a repository-local
//! storage directory after every change.
//!
//! # Core Features
//!
//! - **Content-Addressable Storage**: every blob identified by its SHA-256 digest
//! - **Deduplication**: identical content across files or versions is stored once
//! - **Per-File History**: each path has an ordered chain of versions
//! - **Binary Safe**: contents are Base64-encoded in the persisted records
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use vcstrack::{RecordOutcome, Repository};
//! use std::path::Path;
//!
//! // Open (or start) a repository and scan the working tree
//! let mut repo = Repository::open(Path::new("./my-project"))?;
//! repo.initialize()?;
//!
//! // Record a new version of one file
//! if let RecordOutcome::Recorded { digest, .. } = repo.record_file("src/main.rs")? {
//!     println!("recorded {}", digest);
//! }
//!
//! // See what changed since the last recorded versions
//! let report = repo.status();
//! println!("modified: {:?}", report.modified);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod scan;
pub mod storage;

// Re-export commonly used types
pub use crate::core::{
    error::{Result, VcsError},
    types::Digest,
};

pub use config::RepoConfig;

pub use scan::{FileSource, WorkingTree};

pub use storage::{
    content_store::ContentStore,
    repository::{InitSummary, RecordOutcome, Repository, StatusReport},
    version_chain::{ChangeOutcome, FileHistoryIndex, VersionChain},
};
