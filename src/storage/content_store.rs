//! Deduplicated digest → content mapping

use crate::core::error::{Result, VcsError};
use crate::core::types::Digest;
use std::collections::BTreeMap;

/// Content-addressed blob store
///
/// Entries are only removed to undo an insert whose save failed. A digest
/// already present is assumed to map to identical bytes, so a second `put`
/// for it is a no-op.
#[derive(Debug, Default, Clone)]
pub struct ContentStore {
    blobs: BTreeMap<Digest, Vec<u8>>,
}

impl ContentStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert content under its digest unless the digest is already known
    ///
    /// Returns `true` when a new entry was created.
    pub fn put(&mut self, digest: Digest, content: Vec<u8>) -> bool {
        if self.blobs.contains_key(&digest) {
            return false;
        }
        self.blobs.insert(digest, content);
        true
    }

    /// Look up content by digest
    pub fn get(&self, digest: &Digest) -> Result<&[u8]> {
        self.blobs
            .get(digest)
            .map(Vec::as_slice)
            .ok_or_else(|| VcsError::content_not_found(*digest))
    }

    pub fn contains(&self, digest: &Digest) -> bool {
        self.blobs.contains_key(digest)
    }

    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }

    /// Iterate entries ordered by digest
    pub fn iter(&self) -> impl Iterator<Item = (&Digest, &[u8])> {
        self.blobs.iter().map(|(d, c)| (d, c.as_slice()))
    }

    /// Drop an entry added by a `put` whose save did not complete
    pub(crate) fn discard(&mut self, digest: &Digest) {
        self.blobs.remove(digest);
    }

    /// Sum of all stored content sizes in bytes
    pub fn total_bytes(&self) -> u64 {
        self.blobs.values().map(|c| c.len() as u64).sum()
    }
}
