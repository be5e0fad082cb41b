//! `docublock extract` - write the consolidated doc-block stream.

use std::path::Path;

use anyhow::Result;
use tracing::debug;

use crate::cli::RunArgs;
use crate::output::print_report;

/// Run a full extraction and print its summary.
pub fn execute(config_path: Option<&Path>, cwd: &Path, args: &RunArgs) -> Result<bool> {
    let config = super::load_config(config_path, cwd, args)?;
    debug!(output = %config.output.display(), roots = config.roots.len(), "starting extraction");

    let report = docublock_core::run(&config)?;
    print_report("extract", &report, Some(&config.output), args.format)?;
    Ok(report.is_success())
}
