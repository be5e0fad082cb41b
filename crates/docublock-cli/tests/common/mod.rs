#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;

#[allow(dead_code)]
pub const CMD_TIMEOUT: Duration = Duration::from_secs(15);

/// Create a configured `docublock` command suitable for integration tests.
#[allow(dead_code)]
pub fn docublock_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("docublock"));
    cmd.timeout(CMD_TIMEOUT);
    cmd.env_remove("DOCUBLOCK_CONFIG");
    cmd.env("NO_COLOR", "1");
    cmd
}

/// `docublock_cmd` running inside `dir`.
#[allow(dead_code)]
pub fn docublock_in(dir: &Path) -> Command {
    let mut cmd = docublock_cmd();
    cmd.current_dir(dir);
    cmd
}

#[allow(dead_code)]
pub fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().expect("relative path has a parent")).unwrap();
    fs::write(path, content).unwrap();
}

/// A small documentation tree with a `docublock.toml`, one strict source root,
/// one draft book root and a transcript for the single example.
#[allow(dead_code)]
pub fn layout() -> TempDir {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let root = dir.path();

    write(
        root,
        "docublock.toml",
        r#"
output = "out/allComments.txt"
transcripts = "Examples"
catalog = "errors.dat"

[[roots]]
path = "books"
draft = true

[[roots]]
path = "src"
"#,
    );
    write(root, "errors.dat", "0,ERROR_NO_ERROR,\"no error\"\n");
    write(
        root,
        "src/collection.cpp",
        "/// @startDocuBlock collectionCount\n\
         /// Counts documents.\n\
         /// @EXAMPLE_ARANGOSH_OUTPUT{collectionCount}\n\
         ///   db.demo.count();\n\
         /// @END_EXAMPLE_ARANGOSH_OUTPUT\n\
         /// @endDocuBlock\n",
    );
    write(root, "books/intro.md", "# Intro\n@startDocuBlock collectionCount\n");
    write(
        root,
        "Examples/collectionCount.generated",
        "arangosh&gt; db.demo.count();\n42\n",
    );
    dir
}
