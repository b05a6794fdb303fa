//! CLI domain: parse, route, help, and output only.

mod help;
mod output;
mod parse;
mod route;

pub use help::command_name;
pub use output::{format_restore_summary, format_snapshot_summary, map_error};
pub use parse::{parse_args, Cli, Commands, ParsedArgs};
pub use route::RunContext;
