//! Configuration for extraction runs.
//!
//! Settings live in a `docublock.toml` file. Every field has a default, so an
//! empty file (or no file at all) describes the stock documentation layout.
//!
//! ## Example Configuration File
//!
//! ```toml
//! output = "allComments.txt"
//! transcripts = "Documentation/Examples"
//! catalog = "lib/Basics/errors.dat"
//! catalog_block = "errorCodes"
//! extensions = [".cpp", ".h", ".js", ".md"]
//! skip_marker = "#"
//! lenient_paths = ["Documentation/Books/Drafts"]
//!
//! [[roots]]
//! path = "Documentation/Books/Manual"
//! draft = true
//!
//! [[roots]]
//! path = "Documentation/DocuBlocks"
//! ```
//!
//! Relative paths are resolved against the directory containing the config
//! file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::scanner::DraftPolicy;
use crate::transcript::TranscriptStore;
use crate::{Error, Result};

/// File name looked up in the working directory when no config is given.
pub const CONFIG_FILE_NAME: &str = "docublock.toml";

/// Settings of one extraction run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Consolidated output artifact. Truncated at the start of every run.
    pub output: PathBuf,

    /// Directory holding the `<tag>.generated` transcripts.
    pub transcripts: PathBuf,

    /// Line-oriented error-code catalog prepended to the output.
    pub catalog: Option<PathBuf>,

    /// Name of the doc-block wrapping the catalog.
    pub catalog_block: String,

    /// File name suffixes considered for scanning.
    pub extensions: Vec<String>,

    /// Files whose name contains this marker are skipped (scratch copies).
    /// An empty marker disables skipping.
    pub skip_marker: String,

    /// Extra path prefixes where unterminated doc-blocks are tolerated.
    pub lenient_paths: Vec<PathBuf>,

    /// Directories searched for doc-blocks, in order.
    pub roots: Vec<SearchRoot>,
}

/// One directory searched for doc-blocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SearchRoot {
    /// Directory to walk.
    pub path: PathBuf,

    /// Whether files below this root are drafts, tolerating unterminated blocks.
    #[serde(default)]
    pub draft: bool,
}

impl SearchRoot {
    /// Root with strict block pairing.
    pub fn strict(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            draft: false,
        }
    }

    /// Root tolerating unterminated blocks.
    pub fn draft(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            draft: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output: PathBuf::from("allComments.txt"),
            transcripts: PathBuf::from("Documentation/Examples"),
            catalog: Some(PathBuf::from("lib/Basics/errors.dat")),
            catalog_block: "errorCodes".to_string(),
            extensions: [".cpp", ".h", ".js", ".md"]
                .into_iter()
                .map(String::from)
                .collect(),
            skip_marker: "#".to_string(),
            lenient_paths: Vec::new(),
            roots: vec![
                SearchRoot::draft("Documentation/Books/Manual"),
                SearchRoot::draft("Documentation/Books/AQL"),
                SearchRoot::draft("Documentation/Books/HTTP"),
                SearchRoot::draft("Documentation/Books/Cookbook"),
                SearchRoot::draft("Documentation/Books/Drivers"),
                SearchRoot::strict("Documentation/DocuBlocks"),
            ],
        }
    }
}

impl Config {
    /// Load configuration from `path`, resolving relative paths against its
    /// directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid TOML, or
    /// fails [`Config::validate`].
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        let mut config: Self = toml::from_str(&text)?;

        let base = path.parent().unwrap_or_else(|| Path::new(""));
        config.resolve_paths(base);
        config.validate()?;

        debug!(config = %path.display(), roots = config.roots.len(), "loaded configuration");
        Ok(config)
    }

    /// Load `explicit` if given, else `docublock.toml` from `dir` if present,
    /// else the defaults resolved against `dir`.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let candidate = dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            return Self::load(&candidate);
        }

        debug!(dir = %dir.display(), "no configuration file, using defaults");
        let mut config = Self::default();
        config.resolve_paths(dir);
        Ok(config)
    }

    /// Make every relative path absolute with respect to `base`.
    pub fn resolve_paths(&mut self, base: &Path) {
        let join = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        };

        join(&mut self.output);
        join(&mut self.transcripts);
        if let Some(catalog) = self.catalog.as_mut() {
            join(catalog);
        }
        self.lenient_paths.iter_mut().for_each(join);
        self.roots.iter_mut().for_each(|root| join(&mut root.path));
    }

    /// Check invariants serde cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.roots.is_empty() {
            return Err(Error::Config("no search roots configured".into()));
        }
        if self.extensions.is_empty() {
            return Err(Error::Config("no file extensions configured".into()));
        }
        if self.catalog_block.trim().is_empty() {
            return Err(Error::Config("catalog_block must not be empty".into()));
        }
        if self.catalog_block.contains(char::is_whitespace) {
            return Err(Error::Config(format!(
                "catalog_block '{}' must be a single word",
                self.catalog_block
            )));
        }
        Ok(())
    }

    /// Lenient prefixes: the configured ones plus every draft root.
    pub fn draft_policy(&self) -> DraftPolicy {
        let mut policy = DraftPolicy::new(self.lenient_paths.iter().cloned());
        for root in self.roots.iter().filter(|root| root.draft) {
            policy.add(root.path.clone());
        }
        policy
    }

    /// Transcript lookup for this configuration.
    pub fn transcript_store(&self) -> TranscriptStore {
        TranscriptStore::new(self.transcripts.clone())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_layout() {
        let config = Config::default();

        assert_eq!(config.roots.len(), 6);
        assert_eq!(config.roots.iter().filter(|r| r.draft).count(), 5);
        assert_eq!(config.catalog_block, "errorCodes");
        assert_eq!(config.catalog, Some(PathBuf::from("lib/Basics/errors.dat")));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_resolves_relative_paths() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(
            &path,
            r#"
output = "out/all.txt"
catalog = "errors.dat"
lenient_paths = ["drafts"]

[[roots]]
path = "src"

[[roots]]
path = "/abs/books"
draft = true
"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();

        assert_eq!(config.output, dir.path().join("out/all.txt"));
        assert_eq!(config.catalog, Some(dir.path().join("errors.dat")));
        assert_eq!(config.transcripts, dir.path().join("Documentation/Examples"));
        assert_eq!(config.roots[0], SearchRoot::strict(dir.path().join("src")));
        assert_eq!(config.roots[1], SearchRoot::draft("/abs/books"));

        let policy = config.draft_policy();
        assert!(policy.is_draft(&dir.path().join("drafts/page.md")));
        assert!(policy.is_draft(Path::new("/abs/books/intro.md")));
        assert!(!policy.is_draft(&dir.path().join("src/lib.cpp")));
        assert_eq!(
            policy.prefixes(),
            &[dir.path().join("drafts"), PathBuf::from("/abs/books")]
        );
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "outptu = \"typo.txt\"\n").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert_eq!(err.category(), "config");
    }

    #[test]
    fn test_validate_rejects_empty_roots() {
        let config = Config {
            roots: Vec::new(),
            ..Config::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            catalog_block: "error codes".into(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_discover_prefers_explicit_then_local_file() {
        let dir = TempDir::new().unwrap();

        let config = Config::discover(None, dir.path()).unwrap();
        assert_eq!(config.output, dir.path().join("allComments.txt"));
        assert_eq!(config.catalog, Some(dir.path().join("lib/Basics/errors.dat")));

        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "output = \"local.txt\"\n",
        )
        .unwrap();
        let config = Config::discover(None, dir.path()).unwrap();
        assert_eq!(config.output, dir.path().join("local.txt"));

        let other = dir.path().join("other.toml");
        fs::write(&other, "output = \"explicit.txt\"\n").unwrap();
        let config = Config::discover(Some(&other), dir.path()).unwrap();
        assert_eq!(config.output, dir.path().join("explicit.txt"));
    }
}
