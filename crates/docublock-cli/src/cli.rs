//! # CLI Structure and Argument Parsing
//!
//! Command-line interface for `docublock`, built with `clap` derive macros.
//!
//! ```bash
//! # Full run using ./docublock.toml (or the stock layout)
//! docublock extract
//!
//! # Validate sources and example references without writing output
//! docublock check --format json
//!
//! # Inspect the doc-blocks of individual files
//! docublock blocks arangod/RestServer/*.cpp
//!
//! # Render one transcript fragment
//! docublock render collectionCount --kind session
//! ```
//!
//! ## Exit Status
//!
//! - `0`: every referenced example was found
//! - `1`: the run completed but some example transcripts are missing
//! - `2`: a fatal error aborted the run

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use docublock_core::ExampleKind;

use crate::output::OutputFormat;

/// Main CLI structure for the `docublock` command
#[derive(Parser, Clone, Debug)]
#[command(name = "docublock")]
#[command(version)]
#[command(about = "docublock - extract doc-blocks and render example transcripts", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Suppress informational messages (only show errors)
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable all ANSI colors in output (also respects `NO_COLOR` env)
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    /// Path to configuration file (defaults to ./docublock.toml). Also via `DOCUBLOCK_CONFIG`.
    #[arg(long, global = true, value_name = "FILE", env = "DOCUBLOCK_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Extract all doc-blocks into the consolidated output file
    Extract(RunArgs),

    /// Scan sources and resolve example references without writing output
    Check(RunArgs),

    /// List the doc-blocks contained in files
    Blocks {
        /// Files to scan
        #[arg(required = true, value_name = "FILE")]
        files: Vec<PathBuf>,

        /// Tolerate unterminated blocks, as for draft sources
        #[arg(long)]
        draft: bool,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Render a single example transcript fragment to stdout
    Render {
        /// Example tag (transcript file is `<TAG>.generated`)
        tag: String,

        /// Transcript grammar
        #[arg(long, value_enum)]
        kind: KindArg,

        /// Transcript directory (overrides configuration)
        #[arg(long, value_name = "DIR")]
        transcripts: Option<PathBuf>,
    },
}

/// Overrides shared by `extract` and `check`.
#[derive(Args, Clone, Debug, Default)]
pub struct RunArgs {
    /// Output file (overrides configuration)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Transcript directory (overrides configuration)
    #[arg(long, value_name = "DIR")]
    pub transcripts: Option<PathBuf>,

    /// Error-code catalog seeded into the output (overrides configuration)
    #[arg(long, value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    /// Search root with strict block pairing; replaces configured roots
    #[arg(long = "root", value_name = "DIR")]
    pub roots: Vec<PathBuf>,

    /// Search root tolerating unterminated blocks; replaces configured roots
    #[arg(long = "draft-root", value_name = "DIR")]
    pub draft_roots: Vec<PathBuf>,

    /// Summary format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Transcript grammar accepted on the command line.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum KindArg {
    /// Interactive shell session (`@EXAMPLE_ARANGOSH_OUTPUT`)
    #[value(alias = "arangosh")]
    Session,
    /// HTTP call and response (`@EXAMPLE_ARANGOSH_RUN`)
    #[value(alias = "curl")]
    Http,
    /// Query, bind values and result (`@EXAMPLE_AQL`)
    #[value(alias = "aql")]
    Query,
}

impl From<KindArg> for ExampleKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Session => Self::Session,
            KindArg::Http => Self::Http,
            KindArg::Query => Self::Query,
        }
    }
}
