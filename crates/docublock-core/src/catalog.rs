//! Error-code catalog seeding.
//!
//! The catalog is a line-oriented file (`errors.dat`) that is copied verbatim
//! into an implicit doc-block at the very top of the output artifact, so the
//! later rendering stage can look error codes up like any other block.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::line::{END_MARKER, START_MARKER};
use crate::{Error, Result};

/// Write `catalog` wrapped in a doc-block named `block_name`.
///
/// Every catalog line is followed by an empty line. Returns the number of
/// catalog lines written.
pub fn write_catalog<W: Write>(out: &mut W, block_name: &str, catalog: &str) -> std::io::Result<usize> {
    writeln!(out, "{START_MARKER} {block_name} ")?;
    let mut count = 0;
    for line in catalog.split_inclusive('\n') {
        writeln!(out, "{line}")?;
        count += 1;
    }
    writeln!(out, "{END_MARKER} ")?;
    Ok(count)
}

/// Truncate `output` and seed it with the catalog, if one is configured.
///
/// Runs once at the start of an extraction; everything else appends.
pub fn seed_output(output: &Path, catalog: Option<&Path>, block_name: &str) -> Result<usize> {
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut writer = BufWriter::new(File::create(output)?);

    let Some(catalog) = catalog else {
        writer.flush()?;
        return Ok(0);
    };

    let text = fs::read_to_string(catalog).map_err(|e| {
        Error::Config(format!("failed to read catalog {}: {e}", catalog.display()))
    })?;
    let count = write_catalog(&mut writer, block_name, &text)?;
    writer.flush()?;

    info!(catalog = %catalog.display(), entries = count, "seeded output with catalog");
    Ok(count)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_catalog_block_shape() {
        let mut out = Vec::new();
        let count = write_catalog(
            &mut out,
            "errorCodes",
            "0,ERROR_NO_ERROR,\"no error\"\n1,ERROR_FAILED,\"failed\"\n",
        )
        .unwrap();

        assert_eq!(count, 2);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "@startDocuBlock errorCodes \n\
             0,ERROR_NO_ERROR,\"no error\"\n\n\
             1,ERROR_FAILED,\"failed\"\n\n\
             @endDocuBlock \n"
        );
    }

    #[test]
    fn test_seed_truncates_existing_output() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("nested/all.txt");
        fs::create_dir_all(output.parent().unwrap()).unwrap();
        fs::write(&output, "stale content").unwrap();

        assert_eq!(seed_output(&output, None, "errorCodes").unwrap(), 0);
        assert_eq!(fs::read_to_string(&output).unwrap(), "");

        let catalog = dir.path().join("errors.dat");
        fs::write(&catalog, "3,ERROR_X,\"x\"\n").unwrap();
        assert_eq!(seed_output(&output, Some(&catalog), "errorCodes").unwrap(), 1);
        assert!(fs::read_to_string(&output).unwrap().starts_with("@startDocuBlock errorCodes"));
    }

    #[test]
    fn test_missing_catalog_is_fatal() {
        let dir = TempDir::new().unwrap();
        let err = seed_output(
            &dir.path().join("all.txt"),
            Some(&dir.path().join("nope.dat")),
            "errorCodes",
        )
        .unwrap_err();
        assert_eq!(err.category(), "config");
    }
}
