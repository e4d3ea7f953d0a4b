//! File-system backed [`FileSource`]

use crate::config::CONFIG_FILE_NAME;
use crate::core::error::{Result, VcsError};
use crate::scan::FileSource;
use path_clean::PathClean;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Files under a repository root, minus the repository's own storage
/// and configuration
#[derive(Debug, Clone)]
pub struct WorkingTree {
    /// Repository root directory
    root: PathBuf,
    /// Directory skipped during discovery (the record storage)
    exclude: PathBuf,
    /// Repository configuration file, never tracked
    config_file: PathBuf,
    /// Whether to follow symbolic links
    follow_links: bool,
}

impl WorkingTree {
    /// Create a working tree rooted at `root`, skipping `exclude`
    pub fn new(root: &Path, exclude: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            exclude: exclude.to_path_buf(),
            config_file: root.join(CONFIG_FILE_NAME),
            follow_links: false,
        }
    }

    /// Set whether to follow symbolic links
    pub fn follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl FileSource for WorkingTree {
    fn discover(&self) -> Result<Vec<String>> {
        if !self.root.is_dir() {
            return Err(VcsError::scan(&self.root, "repository root is not a directory"));
        }

        let mut files = Vec::new();
        let walker = WalkDir::new(&self.root)
            .follow_links(self.follow_links)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                !entry.path().starts_with(&self.exclude) && entry.path() != self.config_file
            });

        for entry in walker {
            match entry {
                Ok(entry) => {
                    if !entry.file_type().is_file() {
                        continue;
                    }
                    // Walk entries carry the root prefix, relative or not
                    let relative = entry.path().strip_prefix(&self.root).unwrap_or(entry.path());
                    match normalize_path(&self.root, relative) {
                        Ok(path) => files.push(path),
                        Err(e) => warn!(error = %e, "Skipping file"),
                    }
                }
                Err(e) => {
                    warn!(error = %e, "Error accessing file");
                }
            }
        }

        debug!(count = files.len(), root = %self.root.display(), "Discovered files");
        Ok(files)
    }

    fn read_content(&self, path: &str) -> Vec<u8> {
        match std::fs::read(self.root.join(path)) {
            Ok(content) => content,
            Err(e) => {
                debug!(path, error = %e, "Unreadable file treated as empty");
                Vec::new()
            }
        }
    }
}

/// Resolve a possibly relative repository root against the current directory
pub fn absolute_root(root: &Path) -> Result<PathBuf> {
    if root.is_absolute() {
        Ok(root.clean())
    } else {
        Ok(std::env::current_dir()?.join(root).clean())
    }
}

/// Convert a path into the `/`-separated form used as a history key
///
/// Relative paths are taken relative to `root`. Absolute paths must lie under
/// `root`. `.` segments are dropped and `..` segments resolved lexically.
pub fn normalize_path(root: &Path, path: &Path) -> Result<String> {
    let relative = if path.is_absolute() {
        path.strip_prefix(root)
            .map_err(|_| VcsError::PathOutsideRoot {
                path: path.to_path_buf(),
            })?
            .to_path_buf()
    } else {
        path.to_path_buf()
    };

    let cleaned = relative.clean();
    let mut parts = Vec::new();
    for component in cleaned.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_string_lossy().into_owned()),
            Component::CurDir => {}
            _ => {
                return Err(VcsError::PathOutsideRoot {
                    path: path.to_path_buf(),
                })
            }
        }
    }

    if parts.is_empty() {
        return Err(VcsError::PathOutsideRoot {
            path: path.to_path_buf(),
        });
    }
    Ok(parts.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_normalize_relative() {
        let root = Path::new("/repo");
        assert_eq!(normalize_path(root, Path::new("a.txt")).unwrap(), "a.txt");
        assert_eq!(normalize_path(root, Path::new("./a.txt")).unwrap(), "a.txt");
        assert_eq!(
            normalize_path(root, Path::new("src/../lib/x.rs")).unwrap(),
            "lib/x.rs"
        );
    }

    #[test]
    fn test_normalize_absolute() {
        let root = Path::new("/repo");
        assert_eq!(
            normalize_path(root, Path::new("/repo/dir/b.txt")).unwrap(),
            "dir/b.txt"
        );
        assert!(normalize_path(root, Path::new("/elsewhere/b.txt")).is_err());
    }

    #[test]
    fn test_normalize_rejects_escape() {
        let root = Path::new("/repo");
        assert!(normalize_path(root, Path::new("../b.txt")).is_err());
        assert!(normalize_path(root, Path::new(".")).is_err());
    }

    #[test]
    fn test_discover_skips_storage_dir() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let root = temp_dir.path();
        let storage = root.join("data/.vcs");

        fs::create_dir_all(&storage)?;
        fs::create_dir_all(root.join("src"))?;
        fs::write(storage.join("file_history.json"), "{}")?;
        fs::write(root.join("a.txt"), "hello")?;
        fs::write(root.join("src/main.rs"), "fn main() {}")?;
        fs::write(root.join("data/keep.csv"), "1,2")?;

        let tree = WorkingTree::new(root, &storage);
        let files = tree.discover()?;

        assert_eq!(files, vec!["a.txt", "data/keep.csv", "src/main.rs"]);
        Ok(())
    }

    #[test]
    fn test_discover_skips_config_file() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let root = temp_dir.path();

        fs::create_dir_all(root.join("nested"))?;
        fs::write(root.join(CONFIG_FILE_NAME), "strict_decode = true\n")?;
        fs::write(root.join("nested").join(CONFIG_FILE_NAME), "not the repo config")?;
        fs::write(root.join("a.txt"), "hello")?;

        let tree = WorkingTree::new(root, &root.join("data/.vcs"));
        let nested = format!("nested/{}", CONFIG_FILE_NAME);
        assert_eq!(tree.discover()?, vec!["a.txt".to_string(), nested]);
        Ok(())
    }

    #[test]
    fn test_discover_with_relative_root() -> Result<()> {
        // Unit tests run from the package directory; build a root relative to it
        let temp_dir = TempDir::new_in(".")?;
        let name = temp_dir.path().file_name().unwrap();
        let root = PathBuf::from(name);
        assert!(root.is_relative());

        fs::create_dir_all(root.join("sub"))?;
        fs::write(root.join("a.txt"), "hello")?;
        fs::write(root.join("sub/b.txt"), "world")?;

        let tree = WorkingTree::new(&root, &root.join("data/.vcs"));
        let files = tree.discover()?;

        assert_eq!(files, vec!["a.txt", "sub/b.txt"]);
        assert_eq!(tree.read_content(&files[0]), b"hello");
        assert_eq!(tree.read_content(&files[1]), b"world");
        Ok(())
    }

    #[test]
    fn test_absolute_root() -> Result<()> {
        let cwd = std::env::current_dir()?;
        assert_eq!(absolute_root(Path::new("sub/./x"))?, cwd.join("sub/x"));
        assert_eq!(absolute_root(Path::new("/repo/../other"))?, PathBuf::from("/other"));
        Ok(())
    }

    #[test]
    fn test_read_content_missing_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let tree = WorkingTree::new(temp_dir.path(), &temp_dir.path().join(".vcs"));
        assert!(tree.read_content("nope.txt").is_empty());
    }

    #[test]
    fn test_discover_missing_root_is_error() {
        let tree = WorkingTree::new(Path::new("/no/such/root"), Path::new("/no/such/root/.vcs"));
        assert!(matches!(tree.discover(), Err(VcsError::Scan { .. })));
    }
}
