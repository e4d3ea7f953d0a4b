//! Two-record persistence for the content store and history index
//!
//! The History record maps each tracked path to its latest digest. The
//! Content record maps every stored digest to its Base64-encoded bytes. Both
//! are pretty-printed JSON objects with sorted keys.
//!
//! Only the tail of each version chain is written, so a reload yields
//! single-node chains. Each record replaces its file atomically through a
//! temporary file and rename, but the two writes are independent: a crash
//! between them can leave a History entry whose digest is missing from the
//! Content record. Such entries are reported on load and kept.

use crate::config::RepoConfig;
use crate::core::codec;
use crate::core::error::{Result, VcsError};
use crate::core::hash::sha256;
use crate::core::types::Digest;
use crate::storage::content_store::ContentStore;
use crate::storage::version_chain::FileHistoryIndex;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

/// In-memory state rebuilt from disk
#[derive(Debug, Default)]
pub struct Snapshot {
    pub store: ContentStore,
    pub index: FileHistoryIndex,
}

/// Result of reading the persisted records
#[derive(Debug)]
pub enum LoadOutcome {
    /// A record was missing or could not be opened; start empty
    Fresh { missing: PathBuf },
    /// Both records were read
    Loaded(Snapshot),
}

/// Reader/writer for the History and Content records
#[derive(Debug, Clone)]
pub struct Persistence {
    storage_dir: PathBuf,
    history_path: PathBuf,
    content_path: PathBuf,
    strict_decode: bool,
}

impl Persistence {
    /// Create a persistence layer for explicit record locations
    pub fn new(
        storage_dir: impl Into<PathBuf>,
        history_file: &str,
        content_file: &str,
        strict_decode: bool,
    ) -> Self {
        let storage_dir = storage_dir.into();
        Self {
            history_path: storage_dir.join(history_file),
            content_path: storage_dir.join(content_file),
            storage_dir,
            strict_decode,
        }
    }

    /// Create a persistence layer for a repository root and its config
    pub fn from_config(root: &Path, config: &RepoConfig) -> Self {
        Self::new(
            config.storage_path(root),
            &config.history_file,
            &config.content_file,
            config.strict_decode,
        )
    }

    pub fn storage_dir(&self) -> &Path {
        &self.storage_dir
    }

    pub fn history_path(&self) -> &Path {
        &self.history_path
    }

    pub fn content_path(&self) -> &Path {
        &self.content_path
    }

    /// Write both records, History first
    pub fn save(&self, store: &ContentStore, index: &FileHistoryIndex) -> Result<()> {
        std::fs::create_dir_all(&self.storage_dir)?;

        let history: BTreeMap<&str, Digest> = index.tails().collect();
        self.write_record(&self.history_path, &history)?;

        let content: BTreeMap<&Digest, String> = store
            .iter()
            .map(|(digest, bytes)| (digest, codec::encode(bytes)))
            .collect();
        self.write_record(&self.content_path, &content)?;

        info!(
            paths = history.len(),
            blobs = content.len(),
            dir = %self.storage_dir.display(),
            "Saved repository records"
        );
        Ok(())
    }

    /// Read both records
    pub fn load(&self) -> Result<LoadOutcome> {
        let history_raw = match std::fs::read(&self.history_path) {
            Ok(raw) => raw,
            Err(e) => return Ok(self.fresh(&self.history_path, e)),
        };
        let content_raw = match std::fs::read(&self.content_path) {
            Ok(raw) => raw,
            Err(e) => return Ok(self.fresh(&self.content_path, e)),
        };

        let store = self.parse_content(&content_raw)?;
        let index = self.parse_history(&history_raw)?;

        for (path, digest) in index.tails() {
            if !store.contains(&digest) {
                warn!(
                    path,
                    digest = %digest,
                    "History record references a digest missing from the Content record"
                );
            }
        }

        info!(
            paths = index.len(),
            blobs = store.len(),
            "Loaded repository data from disk"
        );
        Ok(LoadOutcome::Loaded(Snapshot { store, index }))
    }

    fn fresh(&self, missing: &Path, err: std::io::Error) -> LoadOutcome {
        warn!(
            record = %missing.display(),
            error = %err,
            "No previous repository data found"
        );
        LoadOutcome::Fresh {
            missing: missing.to_path_buf(),
        }
    }

    fn parse_history(&self, raw: &[u8]) -> Result<FileHistoryIndex> {
        let entries: BTreeMap<String, String> = serde_json::from_slice(raw)
            .map_err(|e| VcsError::corrupt_record(&self.history_path, e.to_string()))?;

        let mut index = FileHistoryIndex::new();
        for (path, hex) in entries {
            let digest = Digest::from_hex(&hex).map_err(|e| {
                VcsError::corrupt_record(
                    &self.history_path,
                    format!("invalid digest {:?} for {}: {}", hex, path, e),
                )
            })?;
            index.reset(&path, digest);
        }
        Ok(index)
    }

    fn parse_content(&self, raw: &[u8]) -> Result<ContentStore> {
        let entries: BTreeMap<String, String> = serde_json::from_slice(raw)
            .map_err(|e| VcsError::corrupt_record(&self.content_path, e.to_string()))?;

        let mut store = ContentStore::new();
        for (hex, encoded) in entries {
            let digest = Digest::from_hex(&hex).map_err(|e| {
                VcsError::corrupt_record(
                    &self.content_path,
                    format!("invalid digest key {:?}: {}", hex, e),
                )
            })?;

            let bytes = if self.strict_decode {
                codec::decode_strict(&encoded).map_err(|e| {
                    VcsError::corrupt_record(&self.content_path, format!("{}: {}", hex, e))
                })?
            } else {
                codec::decode(&encoded)
            };

            if sha256(&bytes) != digest {
                warn!(digest = %digest, "Stored content does not hash to its digest");
            }
            debug!(digest = %digest, size = bytes.len(), "Loaded content");
            store.put(digest, bytes);
        }
        Ok(store)
    }

    fn write_record<T: Serialize>(&self, path: &Path, value: &T) -> Result<()> {
        let mut buf = Vec::new();
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
        value.serialize(&mut serializer)?;
        buf.push(b'\n');

        let mut tmp = NamedTempFile::new_in(&self.storage_dir)?;
        tmp.write_all(&buf)?;
        tmp.as_file().sync_all()?;
        tmp.persist(path).map_err(|e| e.error)?;

        debug!(record = %path.display(), bytes = buf.len(), "Wrote record");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn persistence(dir: &Path) -> Persistence {
        Persistence::new(dir.join(".vcs"), "file_history.json", "hash_map.json", false)
    }

    fn sample() -> (ContentStore, FileHistoryIndex) {
        let mut store = ContentStore::new();
        let mut index = FileHistoryIndex::new();
        for (path, content) in [("a.txt", b"hello".to_vec()), ("bin.dat", vec![0, 159, 146, 150])] {
            let digest = sha256(&content);
            store.put(digest, content);
            index.record_change(path, digest);
        }
        (store, index)
    }

    #[test]
    fn test_missing_records_load_fresh() {
        let temp_dir = TempDir::new().unwrap();
        let p = persistence(temp_dir.path());

        match p.load().unwrap() {
            LoadOutcome::Fresh { missing } => assert_eq!(missing, p.history_path()),
            other => panic!("Expected Fresh, got {:?}", other),
        }
    }

    #[test]
    fn test_one_missing_record_loads_fresh() {
        let temp_dir = TempDir::new().unwrap();
        let p = persistence(temp_dir.path());
        let (store, index) = sample();
        p.save(&store, &index).unwrap();
        std::fs::remove_file(p.content_path()).unwrap();

        match p.load().unwrap() {
            LoadOutcome::Fresh { missing } => assert_eq!(missing, p.content_path()),
            other => panic!("Expected Fresh, got {:?}", other),
        }
    }

    #[test]
    fn test_save_then_load() {
        let temp_dir = TempDir::new().unwrap();
        let p = persistence(temp_dir.path());
        let (store, index) = sample();
        p.save(&store, &index).unwrap();

        let snapshot = match p.load().unwrap() {
            LoadOutcome::Loaded(snapshot) => snapshot,
            other => panic!("Expected Loaded, got {:?}", other),
        };

        assert_eq!(snapshot.index.len(), 2);
        for (path, digest) in index.tails() {
            assert_eq!(snapshot.index.latest(path), Some(digest));
            assert_eq!(snapshot.store.get(&digest).unwrap(), store.get(&digest).unwrap());
        }
    }

    #[test]
    fn test_record_format() {
        let temp_dir = TempDir::new().unwrap();
        let p = persistence(temp_dir.path());
        let (store, index) = sample();
        p.save(&store, &index).unwrap();

        let history = std::fs::read_to_string(p.history_path()).unwrap();
        let hello = sha256(b"hello").to_hex();
        assert!(history.contains(&format!("    \"a.txt\": \"{}\"", hello)));

        let content: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(p.content_path()).unwrap()).unwrap();
        assert_eq!(content[&hello], "aGVsbG8=");
    }

    #[test]
    fn test_corrupt_json_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let p = persistence(temp_dir.path());
        std::fs::create_dir_all(p.storage_dir()).unwrap();
        std::fs::write(p.history_path(), "{ not json").unwrap();
        std::fs::write(p.content_path(), "{}").unwrap();

        assert!(matches!(p.load(), Err(VcsError::CorruptRecord { .. })));
    }

    #[test]
    fn test_bad_digest_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let p = persistence(temp_dir.path());
        std::fs::create_dir_all(p.storage_dir()).unwrap();
        std::fs::write(p.history_path(), r#"{"a.txt": "abc"}"#).unwrap();
        std::fs::write(p.content_path(), "{}").unwrap();

        assert!(matches!(p.load(), Err(VcsError::CorruptRecord { .. })));
    }

    #[test]
    fn test_uppercase_digest_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let p = persistence(temp_dir.path());
        let upper = sha256(b"hello").to_hex().to_uppercase();
        std::fs::create_dir_all(p.storage_dir()).unwrap();
        std::fs::write(p.history_path(), format!(r#"{{"a.txt": "{}"}}"#, upper)).unwrap();
        std::fs::write(p.content_path(), format!(r#"{{"{}": "aGVsbG8="}}"#, upper)).unwrap();

        assert!(matches!(p.load(), Err(VcsError::CorruptRecord { .. })));
    }

    #[test]
    fn test_lenient_decode_truncates() {
        let temp_dir = TempDir::new().unwrap();
        let p = persistence(temp_dir.path());
        let digest = sha256(b"hello");
        std::fs::create_dir_all(p.storage_dir()).unwrap();
        std::fs::write(p.history_path(), format!(r#"{{"a.txt": "{}"}}"#, digest)).unwrap();
        std::fs::write(p.content_path(), format!(r#"{{"{}": "aGVs!bG8="}}"#, digest)).unwrap();

        let LoadOutcome::Loaded(snapshot) = p.load().unwrap() else {
            panic!("Expected Loaded");
        };
        assert_eq!(snapshot.store.get(&digest).unwrap(), b"hel");
    }

    #[test]
    fn test_strict_decode_rejects() {
        let temp_dir = TempDir::new().unwrap();
        let p = Persistence::new(temp_dir.path().join(".vcs"), "h.json", "c.json", true);
        let digest = sha256(b"hello");
        std::fs::create_dir_all(p.storage_dir()).unwrap();
        std::fs::write(p.history_path(), format!(r#"{{"a.txt": "{}"}}"#, digest)).unwrap();
        std::fs::write(p.content_path(), format!(r#"{{"{}": "aGVs!bG8="}}"#, digest)).unwrap();

        assert!(matches!(p.load(), Err(VcsError::CorruptRecord { .. })));
    }

    #[test]
    fn test_dangling_history_digest_is_kept() {
        let temp_dir = TempDir::new().unwrap();
        let p = persistence(temp_dir.path());
        let digest = sha256(b"lost");
        std::fs::create_dir_all(p.storage_dir()).unwrap();
        std::fs::write(p.history_path(), format!(r#"{{"a.txt": "{}"}}"#, digest)).unwrap();
        std::fs::write(p.content_path(), "{}").unwrap();

        let LoadOutcome::Loaded(snapshot) = p.load().unwrap() else {
            panic!("Expected Loaded");
        };
        assert_eq!(snapshot.index.latest("a.txt"), Some(digest));
        assert!(snapshot.store.get(&digest).is_err());
    }
}
