//! `docublock render` - render one example transcript to stdout.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use docublock_core::{Config, ExampleKind, TranscriptStore, render_example};
use tracing::warn;

/// Render the transcript for `tag`.
///
/// The transcript directory comes from `transcripts` if given, else from the
/// configuration. A missing transcript is reported and yields `Ok(false)`.
pub fn execute(
    config_path: Option<&Path>,
    cwd: &Path,
    tag: &str,
    kind: ExampleKind,
    transcripts: Option<&PathBuf>,
) -> Result<bool> {
    let store = match transcripts {
        Some(dir) => TranscriptStore::new(cwd.join(dir)),
        None => Config::discover(config_path, cwd)
            .context("failed to load configuration")?
            .transcript_store(),
    };

    let Some(path) = store.resolve(tag) else {
        warn!(
            tag,
            kind = kind.name(),
            expected = %store.path_for(tag).display(),
            "could not find the generated example for {tag}"
        );
        return Ok(false);
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    render_example(&mut out, &path, tag, kind, Path::new("<command line>"))?;
    out.flush()?;
    Ok(true)
}
