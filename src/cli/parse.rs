//! CLI parse: clap types for treedoc.

use crate::error::ApiError;
use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use std::ffi::OsString;
use std::path::PathBuf;

/// Treedoc CLI - flatten a directory tree into one Markdown document and back
#[derive(Debug, Parser)]
#[command(name = "treedoc", version)]
#[command(about = "Flatten a directory tree into a single Markdown document and rebuild it")]
#[command(arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (replaces the global and workspace config files)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Write every file under ROOT_PATH into a single Markdown document
    Snapshot {
        /// Directory (or single file) to snapshot
        root_path: PathBuf,

        /// Paths relative to ROOT_PATH to leave out; a directory excludes everything below it
        ignore_patterns: Vec<String>,

        /// Document to write (default: output.md)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Rebuild the files described by the input document under DESIRED_DIRNAME
    Outdir {
        /// Directory to write files into; created if missing
        desired_dirname: PathBuf,

        /// Document to read (default: input.md)
        #[arg(long, short)]
        input: Option<PathBuf>,
    },
}

/// Result of argument parsing that did not fail.
#[derive(Debug)]
pub enum ParsedArgs {
    /// Run the parsed command
    Run(Cli),
    /// Print this text (help or version) and exit successfully
    Exit(String),
}

/// Parse arguments, turning clap failures into [`ApiError::Usage`].
pub fn parse_args<I, T>(args: I) -> Result<ParsedArgs, ApiError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => Ok(ParsedArgs::Run(cli)),
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                Ok(ParsedArgs::Exit(e.render().to_string()))
            }
            _ => Err(ApiError::Usage(e.render().to_string())),
        },
    }
}
