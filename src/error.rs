//! Error types for snapshot and restore.

use std::path::PathBuf;
use thiserror::Error;

/// Filesystem-level errors raised while walking, reading, or writing files.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("{context}: {source}")]
    IoError {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to walk directory: {0}")]
    Walk(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),
}

impl StorageError {
    /// Wrap an I/O error with a short description of what was being attempted.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        StorageError::IoError {
            context: context.into(),
            source,
        }
    }
}

/// Command-level errors surfaced by the CLI.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Usage(String),

    #[error("couldn't read {} - did you forget to create it? ({source})", .path.display())]
    DocumentMissing {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    StorageError(#[from] StorageError),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
