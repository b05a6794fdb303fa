//! Snapshot: flatten a directory tree into a document.
//!
//! Files are visited depth-first in file-name order and each one is written as
//! soon as it has been read, so only one source file is open at a time.

use crate::document::{write_record, Record};
use crate::error::StorageError;
use crate::ignore::IgnoreList;
use crate::tree::path::relative_slash_path;
use crate::tree::walker::{Entry, Walker, WalkerConfig};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Options controlling which files end up in a snapshot.
#[derive(Debug, Clone, Default)]
pub struct SnapshotOptions {
    pub ignore: IgnoreList,
    pub follow_symlinks: bool,
}

/// An entry left out of the document: a symlink that was not followed, a
/// special file, or a name that cannot be framed as a heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Outcome of a snapshot run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnapshotReport {
    pub files_written: usize,
    pub bytes_written: u64,
    pub skipped: Vec<SkippedFile>,
}

pub struct Snapshotter {
    root: PathBuf,
    options: SnapshotOptions,
}

impl Snapshotter {
    pub fn new(root: PathBuf, options: SnapshotOptions) -> Self {
        Self { root, options }
    }

    fn walker(&self, options: SnapshotOptions) -> Walker {
        let config = WalkerConfig {
            follow_symlinks: options.follow_symlinks,
            ignore: options.ignore,
        };
        Walker::with_config(self.root.clone(), config)
    }

    /// Stream every record into `writer`.
    ///
    /// The first walk or read error aborts the run; whatever was already
    /// written stays in the writer.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<SnapshotReport, StorageError> {
        self.write_with(self.walker(self.options.clone()), writer)
    }

    fn write_with<W: Write>(
        &self,
        walker: Walker,
        writer: &mut W,
    ) -> Result<SnapshotReport, StorageError> {
        let mut report = SnapshotReport::default();

        for entry in walker.files() {
            match entry? {
                Entry::File { path, relative } => {
                    let content = fs::read(&path).map_err(|e| {
                        StorageError::io(format!("Failed to read {}", path.display()), e)
                    })?;
                    let written = write_record(writer, &relative, &content).map_err(|e| {
                        StorageError::io(format!("Failed to write record for {}", relative), e)
                    })?;
                    debug!(path = %relative, bytes = content.len(), "Wrote record");
                    report.files_written += 1;
                    report.bytes_written += written;
                }
                Entry::Skipped { path, reason } => {
                    warn!(path = %path.display(), %reason, "Skipping file");
                    report.skipped.push(SkippedFile { path, reason });
                }
            }
        }

        Ok(report)
    }

    /// Create (or overwrite) the document at `output` and write the snapshot into it.
    ///
    /// When `output` lies inside the root it is left out of its own snapshot.
    pub fn write_document(&self, output: &Path) -> Result<SnapshotReport, StorageError> {
        fs::metadata(&self.root).map_err(|e| {
            StorageError::io(format!("Cannot access {}", self.root.display()), e)
        })?;
        let file = fs::File::create(output).map_err(|e| {
            StorageError::io(format!("Failed to create {}", output.display()), e)
        })?;
        let mut writer = BufWriter::new(file);

        let mut options = self.options.clone();
        if let Some(relative) = self.relative_to_root(output) {
            debug!(path = %relative, "Excluding output document from snapshot");
            options.ignore.extend([relative]);
        }

        let report = self.write_with(self.walker(options), &mut writer)?;
        writer
            .flush()
            .map_err(|e| StorageError::io(format!("Failed to flush {}", output.display()), e))?;

        info!(
            root = %self.root.display(),
            output = %output.display(),
            files = report.files_written,
            bytes = report.bytes_written,
            "Snapshot written"
        );
        Ok(report)
    }

    fn relative_to_root(&self, output: &Path) -> Option<String> {
        let root = fs::canonicalize(&self.root).ok()?;
        let output = fs::canonicalize(output).ok()?;
        if output == root {
            return None;
        }
        relative_slash_path(&root, &output).ok()
    }
}

/// Read every record under `root` into memory.
pub fn collect_records(root: &Path, options: SnapshotOptions) -> Result<Vec<Record>, StorageError> {
    let config = WalkerConfig {
        follow_symlinks: options.follow_symlinks,
        ignore: options.ignore,
    };
    let walker = Walker::with_config(root.to_path_buf(), config);

    let mut records = Vec::new();
    for entry in walker.files() {
        if let Entry::File { path, relative } = entry? {
            let content = fs::read(&path)
                .map_err(|e| StorageError::io(format!("Failed to read {}", path.display()), e))?;
            records.push(Record::new(relative, content));
        }
    }
    Ok(records)
}
