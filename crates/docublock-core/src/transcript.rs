//! Lookup of generated example transcripts by tag.

use std::path::{Path, PathBuf};

/// File extension of generated transcripts.
pub const TRANSCRIPT_EXTENSION: &str = "generated";

/// Read-only directory of `<tag>.generated` files.
#[derive(Debug, Clone)]
pub struct TranscriptStore {
    dir: PathBuf,
}

impl TranscriptStore {
    /// Create a store rooted at `dir`. The directory does not need to exist.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the transcripts.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path the transcript for `tag` would live at.
    pub fn path_for(&self, tag: &str) -> PathBuf {
        self.dir.join(format!("{tag}.{TRANSCRIPT_EXTENSION}"))
    }

    /// Path of the transcript for `tag`, if it exists as a regular file.
    pub fn resolve(&self, tag: &str) -> Option<PathBuf> {
        let path = self.path_for(tag);
        path.is_file().then_some(path)
    }
}
