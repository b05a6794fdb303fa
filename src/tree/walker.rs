//! Filesystem walker for snapshot traversal

use crate::error::StorageError;
use crate::ignore::IgnoreList;
use crate::tree::path::relative_slash_path;
use std::path::PathBuf;
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

/// Entries yielded by the walker. Directories are never yielded; they only
/// shape the traversal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    /// A regular file with its `/`-separated path relative to the walk root
    File { path: PathBuf, relative: String },
    /// A non-directory entry left out of the document, with the reason
    Skipped { path: PathBuf, reason: String },
}

/// Filesystem walker configuration
#[derive(Debug, Clone, Default)]
pub struct WalkerConfig {
    /// Whether to follow symbolic links (default: false, symlinks are skipped)
    pub follow_symlinks: bool,
    /// Path-prefix patterns relative to the walk root
    pub ignore: IgnoreList,
}

/// Depth-first walker with children visited in file-name order.
pub struct Walker {
    root: PathBuf,
    config: WalkerConfig,
}

impl Walker {
    /// Create a new walker for the given root path
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            config: WalkerConfig::default(),
        }
    }

    /// Create a walker with custom configuration
    pub fn with_config(root: PathBuf, config: WalkerConfig) -> Self {
        Self { root, config }
    }

    /// Iterate over the files under the root in document order.
    ///
    /// Ignored directories are pruned without descending into them. The first
    /// error (missing root, unreadable directory) is yielded and callers are
    /// expected to stop there.
    pub fn files(&self) -> impl Iterator<Item = Result<Entry, StorageError>> + '_ {
        WalkDir::new(&self.root)
            .follow_links(self.config.follow_symlinks)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(move |entry| entry.depth() == 0 || !self.should_ignore(entry))
            .filter_map(move |entry| match entry {
                Ok(entry) => self.classify(entry).map(Ok),
                Err(e) => Some(Err(walk_error(e))),
            })
    }

    /// Collect all entries, stopping at the first error.
    pub fn walk(&self) -> Result<Vec<Entry>, StorageError> {
        self.files().collect()
    }

    fn should_ignore(&self, entry: &DirEntry) -> bool {
        match relative_slash_path(&self.root, entry.path()) {
            Ok(relative) => {
                let ignored = self.config.ignore.matches(&relative);
                if ignored {
                    debug!(path = %relative, dir = entry.file_type().is_dir(), "Ignoring entry");
                }
                ignored
            }
            Err(_) => false,
        }
    }

    fn classify(&self, entry: DirEntry) -> Option<Entry> {
        let file_type = entry.file_type();
        if file_type.is_dir() {
            return None;
        }
        let path = entry.into_path();
        if file_type.is_symlink() {
            return Some(skipped(path, "symbolic link not followed"));
        }
        if !file_type.is_file() {
            return Some(skipped(path, "not a regular file"));
        }

        match relative_slash_path(&self.root, &path) {
            Ok(relative) if relative.contains(['\n', '\r']) => {
                Some(skipped(path, "file name contains a line break"))
            }
            // Headings are trimmed on parse, so these names would come back renamed.
            Ok(relative) if relative.trim() != relative => Some(skipped(
                path,
                "file name has leading or trailing whitespace",
            )),
            Ok(relative) => Some(Entry::File { path, relative }),
            Err(e) => Some(skipped(path, e.to_string())),
        }
    }
}

fn skipped(path: PathBuf, reason: impl Into<String>) -> Entry {
    Entry::Skipped {
        path,
        reason: reason.into(),
    }
}

fn walk_error(err: walkdir::Error) -> StorageError {
    let message = err.to_string();
    match err.into_io_error() {
        Some(source) => StorageError::io(format!("Failed to walk directory ({})", message), source),
        None => StorageError::Walk(message),
    }
}
