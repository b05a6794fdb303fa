//! Configuration System
//!
//! Layered configuration for snapshot and restore runs. Values come from
//! built-in defaults, then the global config file, then `.treedoc.toml` in the
//! working directory. An explicit `--config` file replaces both files. CLI
//! flags are applied on top by the caller.

use crate::error::ApiError;
use crate::ignore::IgnoreList;
use crate::logging::LoggingConfig;
use crate::restore::RestoreOptions;
use crate::snapshot::SnapshotOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

mod merge;
mod sources;

pub use sources::global_file::global_config_path;
pub use sources::workspace_file::WORKSPACE_CONFIG_FILE;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TreedocConfig {
    #[serde(default)]
    pub snapshot: SnapshotConfig,

    #[serde(default)]
    pub restore: RestoreConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Settings for `treedoc snapshot`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotConfig {
    /// Document written by snapshot
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Ignore patterns applied before the ones given on the command line
    #[serde(default)]
    pub ignore: Vec<String>,

    #[serde(default)]
    pub follow_symlinks: bool,
}

fn default_output() -> PathBuf {
    PathBuf::from("output.md")
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            output: default_output(),
            ignore: Vec::new(),
            follow_symlinks: false,
        }
    }
}

impl SnapshotConfig {
    /// Snapshot options with `extra` patterns appended to the configured ones.
    pub fn options<I, S>(&self, extra: I) -> SnapshotOptions
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut ignore = IgnoreList::from_patterns(self.ignore.iter().cloned());
        ignore.extend(extra);
        SnapshotOptions {
            ignore,
            follow_symlinks: self.follow_symlinks,
        }
    }
}

/// Settings for `treedoc outdir`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestoreConfig {
    /// Document read by outdir
    #[serde(default = "default_input")]
    pub input: PathBuf,

    /// Write records whose path leaves the output directory
    #[serde(default)]
    pub allow_escaping_paths: bool,
}

fn default_input() -> PathBuf {
    PathBuf::from("input.md")
}

impl Default for RestoreConfig {
    fn default() -> Self {
        Self {
            input: default_input(),
            allow_escaping_paths: false,
        }
    }
}

impl RestoreConfig {
    pub fn options(&self) -> RestoreOptions {
        RestoreOptions {
            allow_escaping_paths: self.allow_escaping_paths,
        }
    }
}

impl TreedocConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.snapshot.output.as_os_str().is_empty() {
            return Err(ApiError::ConfigError(
                "snapshot.output cannot be empty".to_string(),
            ));
        }
        if self.restore.input.as_os_str().is_empty() {
            return Err(ApiError::ConfigError(
                "restore.input cannot be empty".to_string(),
            ));
        }
        if self.snapshot.ignore.iter().any(|p| p.is_empty()) {
            return Err(ApiError::ConfigError(
                "snapshot.ignore cannot contain empty patterns".to_string(),
            ));
        }
        Ok(())
    }
}

/// Loads [`TreedocConfig`] from its layered sources.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load defaults, the global config file, and `.treedoc.toml` under `workspace_root`.
    pub fn load(workspace_root: &Path) -> Result<TreedocConfig, ApiError> {
        Self::load_with(workspace_root, global_config_path().as_deref())
    }

    /// Same as [`ConfigLoader::load`] with an explicit global config path.
    pub fn load_with(
        workspace_root: &Path,
        global_path: Option<&Path>,
    ) -> Result<TreedocConfig, ApiError> {
        let builder = merge::builder_with_defaults()?;
        let builder = sources::global_file::add_to_builder(builder, global_path)?;
        let builder = sources::workspace_file::add_to_builder(builder, workspace_root)?;
        let config: TreedocConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Load defaults plus a single config file, which must exist.
    pub fn load_from_file(path: &Path) -> Result<TreedocConfig, ApiError> {
        let builder = merge::builder_with_defaults()?
            .add_source(config::File::from(path).required(true));
        let config: TreedocConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }
}
