//! `docublock blocks` - list the doc-blocks of individual files.

use std::path::PathBuf;

use anyhow::Result;
use docublock_core::scan_file;

use crate::output::{OutputFormat, print_blocks};

/// Scan `files` in order and print every block found.
pub fn execute(files: &[PathBuf], draft: bool, format: OutputFormat) -> Result<bool> {
    let mut blocks = Vec::new();
    for file in files {
        blocks.extend(scan_file(file, draft)?);
    }
    print_blocks(&blocks, format)?;
    Ok(true)
}
