//! CLI command names used in log events.

use crate::cli::parse::Commands;

/// Command name string for log events (e.g. "snapshot", "outdir").
pub fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Snapshot { .. } => "snapshot",
        Commands::Outdir { .. } => "outdir",
    }
}
