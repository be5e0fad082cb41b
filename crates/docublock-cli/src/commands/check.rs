//! `docublock check` - validate sources and example references.
//!
//! Runs the same scan as `extract` but discards the stream, so structural
//! errors and missing transcripts surface without touching the output file.

use std::path::Path;

use anyhow::Result;

use crate::cli::RunArgs;
use crate::output::print_report;

/// Scan all roots without writing and print the summary.
pub fn execute(config_path: Option<&Path>, cwd: &Path, args: &RunArgs) -> Result<bool> {
    let config = super::load_config(config_path, cwd, args)?;
    let report = docublock_core::check(&config)?;
    print_report("check", &report, None, args.format)?;
    Ok(report.is_success())
}
