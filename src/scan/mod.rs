//! Working-tree file discovery and content reading
//!
//! The repository manager never touches the file system directly for tracked
//! files. It asks a [`FileSource`] which paths exist and what they contain.

pub mod working_tree;

pub use working_tree::{absolute_root, normalize_path, WorkingTree};

use crate::core::error::Result;

/// Supplier of tracked-file paths and their current bytes
pub trait FileSource {
    /// Candidate files, as `/`-separated paths relative to the repository root
    fn discover(&self) -> Result<Vec<String>>;

    /// Current content of `path`, or empty bytes if it cannot be read
    fn read_content(&self, path: &str) -> Vec<u8>;
}
