//! Treedoc CLI Binary
//!
//! Command-line interface for flattening a directory tree into one document
//! and rebuilding it.

use std::path::PathBuf;
use std::process;
use tracing::{error, info};
use treedoc::cli::{command_name, map_error, parse_args, Cli, ParsedArgs, RunContext};
use treedoc::logging::{init_logging, LoggingConfig};

fn main() {
    let cli = match parse_args(std::env::args_os()) {
        Ok(ParsedArgs::Run(cli)) => cli,
        Ok(ParsedArgs::Exit(text)) => {
            print!("{}", text);
            return;
        }
        Err(e) => {
            println!("{}", map_error(&e));
            process::exit(1);
        }
    };

    let workspace = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let context = match RunContext::new(workspace, cli.config.as_deref()) {
        Ok(ctx) => ctx,
        Err(e) => {
            println!("{}", map_error(&e));
            process::exit(1);
        }
    };

    let logging_config = build_logging_config(&cli, &context.config().logging);
    if let Err(e) = init_logging(Some(&logging_config)) {
        println!("{}", map_error(&e));
        process::exit(1);
    }

    let command = command_name(&cli.command);
    info!(command, "Treedoc CLI starting");

    match context.execute(&cli.command) {
        Ok(output) => {
            info!(command, "Command completed successfully");
            println!("{}", output);
        }
        Err(e) => {
            error!(command, "Command failed: {}", e);
            println!("{}", map_error(&e));
            process::exit(1);
        }
    }
}

/// Build logging configuration from the config file and CLI flags.
/// Precedence: CLI flags override config file override defaults.
fn build_logging_config(cli: &Cli, base: &LoggingConfig) -> LoggingConfig {
    let mut config = base.clone();

    if cli.quiet {
        config.enabled = false;
    }
    if cli.verbose {
        config.level = "debug".to_string();
    }
    if let Some(ref level) = cli.log_level {
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        config.output = output.clone();
    }
    if let Some(ref file) = cli.log_file {
        config.file = file.clone();
    }

    config
}
