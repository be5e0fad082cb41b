//! Command implementations for the docublock CLI
//!
//! Each command returns `Ok(true)` when it completed without content gaps,
//! `Ok(false)` when it completed but something referenced was missing.

mod blocks;
mod check;
mod extract;
mod render;

use std::path::Path;

use anyhow::{Context, Result};
use docublock_core::{Config, SearchRoot};

use crate::cli::RunArgs;

pub use blocks::execute as list_blocks;
pub use check::execute as check;
pub use extract::execute as extract;
pub use render::execute as render;

/// Load the configuration and apply command-line overrides on top of it.
///
/// Override paths are taken relative to the working directory `cwd`.
pub fn load_config(explicit: Option<&Path>, cwd: &Path, args: &RunArgs) -> Result<Config> {
    let mut config = Config::discover(explicit, cwd).context("failed to load configuration")?;

    if let Some(output) = &args.output {
        config.output = cwd.join(output);
    }
    if let Some(transcripts) = &args.transcripts {
        config.transcripts = cwd.join(transcripts);
    }
    if let Some(catalog) = &args.catalog {
        config.catalog = Some(cwd.join(catalog));
    }
    if !args.roots.is_empty() || !args.draft_roots.is_empty() {
        config.roots = args
            .draft_roots
            .iter()
            .map(|path| SearchRoot::draft(cwd.join(path)))
            .chain(args.roots.iter().map(|path| SearchRoot::strict(cwd.join(path))))
            .collect();
    }

    config.validate()?;
    Ok(config)
}
