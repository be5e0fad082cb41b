//! docublock CLI - doc-block extraction and example transcript rendering
//!
//! This is the main entry point for the docublock command-line interface.
//! Command implementations live in [`commands`]; this file only wires
//! parsing, logging and the exit status together.

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;
mod output;
mod utils;

use cli::{Cli, Commands};
use utils::logging::initialize_logging;

const EXIT_MISSING: u8 = 1;
const EXIT_FATAL: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = initialize_logging(&cli) {
        eprintln!("error: {e:#}");
        return ExitCode::from(EXIT_FATAL);
    }

    match execute_command(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(EXIT_MISSING),
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(EXIT_FATAL)
        },
    }
}

fn execute_command(cli: Cli) -> Result<bool> {
    let cwd = std::env::current_dir()?;
    let config = cli.config.as_deref();

    match cli.command {
        Commands::Extract(args) => commands::extract(config, &cwd, &args),
        Commands::Check(args) => commands::check(config, &cwd, &args),
        Commands::Blocks {
            files,
            draft,
            format,
        } => commands::list_blocks(&files, draft, format),
        Commands::Render {
            tag,
            kind,
            transcripts,
        } => commands::render(config, &cwd, &tag, kind.into(), transcripts.as_ref()),
    }
}
