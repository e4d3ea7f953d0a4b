//! Core types and utilities for vcstrack
//!
//! This module contains the digest type, the hasher, the binary-safe codec
//! and error handling used throughout the system.

pub mod codec;
pub mod error;
pub mod hash;
pub mod types;

// Re-export commonly used items
pub use error::{Result, VcsError};
pub use hash::sha256;
pub use types::{Digest, DIGEST_LEN};
