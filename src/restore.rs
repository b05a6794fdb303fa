//! Restore: rebuild a directory tree from a document.
//!
//! Records are written in document order on top of whatever already exists in
//! the target; the last record for a path wins. A failed write stops the run
//! but files written before it are left in place.

use crate::document::{parse_document, ParseSkip, Record, SkipReason};
use crate::error::{ApiError, StorageError};
use crate::tree::path::{is_contained, join_relative};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Options controlling how records are written out.
#[derive(Debug, Clone, Default)]
pub struct RestoreOptions {
    /// Write records whose path climbs out of the target with `..`
    pub allow_escaping_paths: bool,
}

/// Outcome of a restore run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestoreReport {
    pub files_written: Vec<PathBuf>,
    pub skipped: Vec<ParseSkip>,
}

pub struct Restorer {
    target: PathBuf,
    options: RestoreOptions,
}

impl Restorer {
    pub fn new(target: PathBuf, options: RestoreOptions) -> Self {
        Self { target, options }
    }

    /// Read the document at `document_path` and restore it.
    pub fn restore_file(&self, document_path: &Path) -> Result<RestoreReport, ApiError> {
        let document = fs::read(document_path).map_err(|source| ApiError::DocumentMissing {
            path: document_path.to_path_buf(),
            source,
        })?;
        let report = self.restore_bytes(&document)?;
        info!(
            document = %document_path.display(),
            target = %self.target.display(),
            files = report.files_written.len(),
            skipped = report.skipped.len(),
            "Restore finished"
        );
        Ok(report)
    }

    /// Restore every well-formed record of `document` under the target.
    pub fn restore_bytes(&self, document: &[u8]) -> Result<RestoreReport, StorageError> {
        fs::create_dir_all(&self.target).map_err(|e| {
            StorageError::io(
                format!("Failed to create directory {}", self.target.display()),
                e,
            )
        })?;

        let mut report = RestoreReport::default();
        for outcome in parse_document(document) {
            match outcome.and_then(|record| self.check_path(record)) {
                Ok(record) => {
                    let written = self.write_record(&record)?;
                    report.files_written.push(written);
                }
                Err(skip) => {
                    warn!(heading = %skip.heading, reason = %skip.reason, "Skipping section");
                    report.skipped.push(skip);
                }
            }
        }
        Ok(report)
    }

    fn check_path(&self, record: Record) -> Result<Record, ParseSkip> {
        if self.options.allow_escaping_paths || is_contained(&record.path) {
            Ok(record)
        } else {
            Err(ParseSkip {
                heading: record.path,
                reason: SkipReason::UnsafePath,
            })
        }
    }

    fn write_record(&self, record: &Record) -> Result<PathBuf, StorageError> {
        let full_path = join_relative(&self.target, &record.path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                StorageError::io(
                    format!("Failed to create directories for {}", record.path),
                    e,
                )
            })?;
        }
        fs::write(&full_path, &record.content)
            .map_err(|e| StorageError::io(format!("Failed to write file {}", record.path), e))?;
        debug!(path = %record.path, bytes = record.content.len(), "Restored file");
        Ok(full_path)
    }
}
