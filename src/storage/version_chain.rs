//! Per-file version history
//!
//! Each tracked path owns an append-only list of digests, oldest first.
//! Only the tail is needed by the tracking operations; the full list is kept
//! for `log` within a process.

use crate::core::types::Digest;
use std::collections::BTreeMap;

/// Ordered history of content digests for one path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionChain {
    versions: Vec<Digest>,
}

impl VersionChain {
    /// Start a chain with a single version
    pub fn new(first: Digest) -> Self {
        Self {
            versions: vec![first],
        }
    }

    /// Most recent digest
    pub fn latest(&self) -> Digest {
        // A chain is never constructed empty and never shrinks
        self.versions[self.versions.len() - 1]
    }

    /// First recorded digest
    pub fn oldest(&self) -> Digest {
        self.versions[0]
    }

    pub fn len(&self) -> usize {
        self.versions.len()
    }

    /// Always false; present for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    /// Iterate versions from oldest to newest
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Digest> {
        self.versions.iter()
    }

    fn push(&mut self, digest: Digest) {
        self.versions.push(digest);
    }
}

/// Result of recording a digest against a path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeOutcome {
    /// The path had no chain; a single-node chain was created
    Created,
    /// A new node was appended after the previous tail
    Appended,
    /// The digest equals the current tail; nothing changed
    Unchanged,
}

impl ChangeOutcome {
    pub fn is_change(self) -> bool {
        !matches!(self, ChangeOutcome::Unchanged)
    }
}

/// Mapping from tracked path to its version chain
#[derive(Debug, Default, Clone)]
pub struct FileHistoryIndex {
    chains: BTreeMap<String, VersionChain>,
}

impl FileHistoryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest digest recorded for a path
    pub fn latest(&self, path: &str) -> Option<Digest> {
        self.chains.get(path).map(VersionChain::latest)
    }

    /// Append `digest` to the chain for `path` if it differs from the tail
    pub fn record_change(&mut self, path: &str, digest: Digest) -> ChangeOutcome {
        match self.chains.get_mut(path) {
            None => {
                self.chains.insert(path.to_string(), VersionChain::new(digest));
                ChangeOutcome::Created
            }
            Some(chain) if chain.latest() == digest => ChangeOutcome::Unchanged,
            Some(chain) => {
                chain.push(digest);
                ChangeOutcome::Appended
            }
        }
    }

    /// Revert the effect of a `record_change` on `path` that returned `change`
    pub(crate) fn undo_change(&mut self, path: &str, change: ChangeOutcome) {
        match change {
            ChangeOutcome::Created => {
                self.chains.remove(path);
            }
            ChangeOutcome::Appended => {
                if let Some(chain) = self.chains.get_mut(path) {
                    chain.versions.pop();
                }
            }
            ChangeOutcome::Unchanged => {}
        }
    }

    /// Replace any existing chain for `path` with a single node
    pub fn reset(&mut self, path: &str, digest: Digest) {
        self.chains.insert(path.to_string(), VersionChain::new(digest));
    }

    /// Full chain for a path
    pub fn history(&self, path: &str) -> Option<&VersionChain> {
        self.chains.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.chains.contains_key(path)
    }

    /// Tracked paths in sorted order
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.chains.keys().map(String::as_str)
    }

    /// (path, latest digest) pairs in path order
    pub fn tails(&self) -> impl Iterator<Item = (&str, Digest)> {
        self.chains
            .iter()
            .map(|(path, chain)| (path.as_str(), chain.latest()))
    }

    pub fn len(&self) -> usize {
        self.chains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }
}
