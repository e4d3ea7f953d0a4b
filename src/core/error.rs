//! Error types for vcstrack

use crate::core::types::Digest;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for repository operations
#[derive(Error, Debug)]
pub enum VcsError {
    /// Content store lookups
    #[error("Content not found for digest {digest}")]
    ContentNotFound { digest: Digest },

    #[error("Invalid digest: {0}")]
    InvalidDigest(#[from] hex::FromHexError),

    /// Path-related errors
    #[error("Path is not tracked: {path}")]
    UntrackedPath { path: String },

    #[error("Path is outside the repository root: {path}")]
    PathOutsideRoot { path: PathBuf },

    /// Persisted record errors
    #[error("Record {path} is corrupted: {reason}")]
    CorruptRecord { path: PathBuf, reason: String },

    /// Codec errors
    #[error("Codec error: {reason}")]
    Codec { reason: String },

    /// Configuration errors
    #[error("Configuration error: {reason}")]
    Configuration { reason: String },

    /// File discovery errors
    #[error("Scan of {path} failed: {reason}")]
    Scan { path: PathBuf, reason: String },

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    JsonSerialization(#[from] serde_json::Error),
}

impl VcsError {
    /// Create a new content not found error
    pub fn content_not_found(digest: Digest) -> Self {
        Self::ContentNotFound { digest }
    }

    /// Create a new untracked path error
    pub fn untracked_path(path: impl Into<String>) -> Self {
        Self::UntrackedPath { path: path.into() }
    }

    /// Create a new corrupt record error
    pub fn corrupt_record(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::CorruptRecord {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a new codec error
    pub fn codec(reason: impl Into<String>) -> Self {
        Self::Codec {
            reason: reason.into(),
        }
    }

    /// Create a new configuration error
    pub fn configuration(reason: impl Into<String>) -> Self {
        Self::Configuration {
            reason: reason.into(),
        }
    }

    /// Create a new scan error
    pub fn scan(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Scan {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for vcstrack operations
pub type Result<T> = std::result::Result<T, VcsError>;
