//! Repository manager
//!
//! Owns the content store, the history index and the persistence layer for
//! one repository root. All mutation goes through [`Repository::initialize`]
//! and [`Repository::record_file`], and both write the records back before
//! returning. If that write fails, the in-memory state is rolled back so it
//! keeps matching what is on disk.

use crate::config::RepoConfig;
use crate::core::error::{Result, VcsError};
use crate::core::hash::sha256;
use crate::core::types::Digest;
use crate::scan::{absolute_root, normalize_path, FileSource, WorkingTree};
use crate::storage::content_store::ContentStore;
use crate::storage::persistence::{LoadOutcome, Persistence, Snapshot};
use crate::storage::version_chain::{ChangeOutcome, FileHistoryIndex, VersionChain};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Result of recording one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    /// A new version was recorded and the records were saved
    Recorded {
        digest: Digest,
        change: ChangeOutcome,
    },
    /// Content matches the latest recorded version
    Unchanged { digest: Digest },
    /// The file was empty or unreadable; nothing was recorded
    Empty,
}

/// Aggregate result of a full scan
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InitSummary {
    /// Files registered in the history index
    pub tracked: usize,
    /// Files skipped because they were empty or unreadable
    pub skipped: usize,
    /// Content entries added to the store by this scan
    pub new_blobs: usize,
}

/// Modified/unmodified partition of all tracked paths
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusReport {
    pub modified: Vec<String>,
    pub unmodified: Vec<String>,
}

/// A tracked directory with its content store and per-file history
pub struct Repository {
    root: PathBuf,
    config: RepoConfig,
    persistence: Persistence,
    store: ContentStore,
    index: FileHistoryIndex,
    source: Box<dyn FileSource>,
    loaded_from_disk: bool,
}

impl Repository {
    /// Open the repository at `root`, reading config and both records
    ///
    /// A relative `root` is resolved against the current directory.
    pub fn open(root: &Path) -> Result<Self> {
        let root = absolute_root(root)?;
        let config = RepoConfig::load(&root)?;
        let tree = WorkingTree::new(&root, &config.storage_path(&root))
            .follow_links(config.follow_links);
        Self::open_with_source(&root, config, Box::new(tree))
    }

    /// Open with an explicit configuration and file source
    pub fn open_with_source(
        root: &Path,
        config: RepoConfig,
        source: Box<dyn FileSource>,
    ) -> Result<Self> {
        let persistence = Persistence::from_config(root, &config);

        let (snapshot, loaded_from_disk) = match persistence.load()? {
            LoadOutcome::Loaded(snapshot) => (snapshot, true),
            LoadOutcome::Fresh { .. } => (Snapshot::default(), false),
        };

        Ok(Self {
            root: root.to_path_buf(),
            config,
            persistence,
            store: snapshot.store,
            index: snapshot.index,
            source,
            loaded_from_disk,
        })
    }

    /// Scan all files and register every non-empty one as a single version
    pub fn initialize(&mut self) -> Result<InitSummary> {
        let mut summary = InitSummary::default();
        let previous_index = self.index.clone();
        let mut inserted = Vec::new();

        for path in self.source.discover()? {
            let content = self.source.read_content(&path);
            if content.is_empty() {
                debug!(path = %path, "Skipping empty or unreadable file");
                summary.skipped += 1;
                continue;
            }

            let digest = sha256(&content);
            self.index.reset(&path, digest);
            if self.store.put(digest, content) {
                inserted.push(digest);
                summary.new_blobs += 1;
            }
            summary.tracked += 1;
        }

        if let Err(err) = self.save() {
            warn!(error = %err, "Save failed, discarding scan results");
            self.index = previous_index;
            for digest in &inserted {
                self.store.discard(digest);
            }
            return Err(err);
        }
        info!(
            tracked = summary.tracked,
            skipped = summary.skipped,
            new_blobs = summary.new_blobs,
            "Scanned and stored initial file versions"
        );
        Ok(summary)
    }

    /// Record the current content of one file as its newest version
    pub fn record_file(&mut self, path: impl AsRef<Path>) -> Result<RecordOutcome> {
        let key = self.key_for(path.as_ref())?;
        let content = self.source.read_content(&key);
        if content.is_empty() {
            debug!(path = %key, "No content in the file");
            return Ok(RecordOutcome::Empty);
        }

        let digest = sha256(&content);
        let change = self.index.record_change(&key, digest);
        if !change.is_change() {
            debug!(path = %key, "No changes");
            return Ok(RecordOutcome::Unchanged { digest });
        }

        let inserted = self.store.put(digest, content);
        if let Err(err) = self.save() {
            warn!(path = %key, error = %err, "Save failed, discarding recorded version");
            self.index.undo_change(&key, change);
            if inserted {
                self.store.discard(&digest);
            }
            return Err(err);
        }
        info!(path = %key, digest = %digest, ?change, "Recorded file version");
        Ok(RecordOutcome::Recorded { digest, change })
    }

    /// Whether `content` differs from the latest recorded version of `path`
    ///
    /// An untracked path has no latest digest, so any content is modified.
    pub fn is_modified(&self, path: &str, content: &[u8]) -> bool {
        self.index.latest(path) != Some(sha256(content))
    }

    /// Classify every tracked path against its current on-disk content
    pub fn status(&self) -> StatusReport {
        let mut report = StatusReport::default();
        for path in self.index.paths() {
            let content = self.source.read_content(path);
            if self.is_modified(path, &content) {
                report.modified.push(path.to_string());
            } else {
                report.unmodified.push(path.to_string());
            }
        }
        report
    }

    /// Latest recorded digest for a path
    pub fn latest(&self, path: impl AsRef<Path>) -> Result<Option<Digest>> {
        let key = self.key_for(path.as_ref())?;
        Ok(self.index.latest(&key))
    }

    /// Version chain for a tracked path, oldest first
    pub fn history(&self, path: impl AsRef<Path>) -> Result<&VersionChain> {
        let key = self.key_for(path.as_ref())?;
        self.index
            .history(&key)
            .ok_or_else(|| VcsError::untracked_path(key))
    }

    /// Stored bytes for a digest
    pub fn content(&self, digest: &Digest) -> Result<&[u8]> {
        self.store.get(digest)
    }

    /// Stored bytes of the latest version of a tracked path
    pub fn latest_content(&self, path: impl AsRef<Path>) -> Result<&[u8]> {
        let digest = self.history(path)?.latest();
        self.store.get(&digest)
    }

    /// Write both records to disk
    pub fn save(&self) -> Result<()> {
        self.persistence.save(&self.store, &self.index)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &RepoConfig {
        &self.config
    }

    pub fn store(&self) -> &ContentStore {
        &self.store
    }

    pub fn index(&self) -> &FileHistoryIndex {
        &self.index
    }

    pub fn persistence(&self) -> &Persistence {
        &self.persistence
    }

    /// Whether existing records were found when the repository was opened
    pub fn loaded_from_disk(&self) -> bool {
        self.loaded_from_disk
    }

    fn key_for(&self, path: &Path) -> Result<String> {
        normalize_path(&self.root, path)
    }
}

impl std::fmt::Debug for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository")
            .field("root", &self.root)
            .field("tracked", &self.index.len())
            .field("blobs", &self.store.len())
            .field("loaded_from_disk", &self.loaded_from_disk)
            .finish()
    }
}
