//! CLI route: run context and the command table.

use crate::cli::output::{format_restore_summary, format_snapshot_summary};
use crate::cli::parse::Commands;
use crate::config::{ConfigLoader, TreedocConfig};
use crate::error::ApiError;
use crate::restore::Restorer;
use crate::snapshot::Snapshotter;
use std::path::{Path, PathBuf};
use tracing::info;

/// Runtime context for CLI execution: working directory and loaded configuration.
pub struct RunContext {
    workspace_root: PathBuf,
    config: TreedocConfig,
}

impl RunContext {
    /// Load configuration from `config_path` if given, otherwise from the
    /// global and workspace config files.
    pub fn new(workspace_root: PathBuf, config_path: Option<&Path>) -> Result<Self, ApiError> {
        let config = match config_path {
            Some(path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load(&workspace_root)?,
        };
        Ok(Self::with_config(workspace_root, config))
    }

    pub fn with_config(workspace_root: PathBuf, config: TreedocConfig) -> Self {
        Self {
            workspace_root,
            config,
        }
    }

    pub fn config(&self) -> &TreedocConfig {
        &self.config
    }

    /// Resolve a document path against the working directory.
    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.workspace_root.join(path)
        }
    }

    /// Execute a CLI command, returning the text to print on success.
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Snapshot {
                root_path,
                ignore_patterns,
                output,
            } => {
                let output = output
                    .clone()
                    .unwrap_or_else(|| self.config.snapshot.output.clone());
                let options = self.config.snapshot.options(ignore_patterns.iter().cloned());
                info!(
                    root = %root_path.display(),
                    output = %output.display(),
                    ignore = ?options.ignore.patterns(),
                    "Creating snapshot"
                );
                let report = Snapshotter::new(self.resolve(root_path), options)
                    .write_document(&self.resolve(&output))?;
                Ok(format_snapshot_summary(&report, &output))
            }
            Commands::Outdir {
                desired_dirname,
                input,
            } => {
                let input = input
                    .clone()
                    .unwrap_or_else(|| self.config.restore.input.clone());
                info!(
                    input = %input.display(),
                    target = %desired_dirname.display(),
                    "Restoring document"
                );
                let report = Restorer::new(
                    self.resolve(desired_dirname),
                    self.config.restore.options(),
                )
                .restore_file(&self.resolve(&input))?;
                Ok(format_restore_summary(&report, desired_dirname))
            }
        }
    }
}
