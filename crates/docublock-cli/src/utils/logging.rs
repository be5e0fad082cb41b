//! Logging initialization and configuration.
//!
//! This module handles setting up the tracing subscriber and color control
//! based on CLI flags and environment variables.

use anyhow::Result;
use colored::control as color_control;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use crate::cli::{Cli, Commands};
use crate::output::OutputFormat;

/// Pick the log level for the parsed command line.
///
/// JSON summaries keep stderr quiet unless `--verbose` was given.
pub fn level_for(cli: &Cli) -> Level {
    if cli.verbose {
        return Level::DEBUG;
    }
    if cli.quiet || machine_output(cli) {
        return Level::ERROR;
    }
    Level::WARN
}

fn machine_output(cli: &Cli) -> bool {
    let format = match &cli.command {
        Commands::Extract(args) | Commands::Check(args) => Some(args.format),
        Commands::Blocks { format, .. } => Some(*format),
        Commands::Render { .. } => None,
    };
    format == Some(OutputFormat::Json)
}

/// Initialize the logging subsystem based on CLI flags.
///
/// # Errors
///
/// Returns an error if the global tracing subscriber cannot be set.
pub fn initialize_logging(cli: &Cli) -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level_for(cli))
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    // Color control: disable when requested, NO_COLOR is set, or when emitting machine output
    let env_no_color = std::env::var_os("NO_COLOR").is_some();
    if cli.no_color || env_no_color || machine_output(cli) {
        color_control::set_override(false);
    }
    Ok(())
}
