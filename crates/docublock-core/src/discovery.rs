//! Source file discovery below the configured search roots.

use std::path::{Path, PathBuf};

use tracing::warn;
use walkdir::WalkDir;

use crate::Result;

/// Name-based filter for files that may carry doc-blocks.
#[derive(Debug, Clone)]
pub struct FileFilter {
    extensions: Vec<String>,
    skip_marker: String,
}

impl FileFilter {
    /// Accept names ending in one of `extensions` that do not contain
    /// `skip_marker`.
    pub fn new(extensions: Vec<String>, skip_marker: impl Into<String>) -> Self {
        Self {
            extensions,
            skip_marker: skip_marker.into(),
        }
    }

    /// Whether a file called `name` should be scanned.
    pub fn accepts(&self, name: &str) -> bool {
        if !self.skip_marker.is_empty() && name.contains(self.skip_marker.as_str()) {
            return false;
        }
        self.extensions.iter().any(|ext| name.ends_with(ext.as_str()))
    }
}

/// Files below `root` accepted by `filter`, in a stable order.
///
/// Entries are visited depth-first, sorted by file name within a directory.
/// A missing root yields no files.
pub fn collect_files(root: &Path, filter: &FileFilter) -> Result<Vec<PathBuf>> {
    if !root.exists() {
        warn!(root = %root.display(), "search root does not exist, skipping");
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(std::io::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }
        let accepted = entry.file_name().to_str().is_some_and(|name| filter.accepts(name));
        if accepted {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}
