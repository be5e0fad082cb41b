#![allow(missing_docs, clippy::unwrap_used)]

mod common;

use std::fs;

use common::{docublock_in, layout, write};
use predicates::prelude::*;

#[test]
fn extract_writes_output_and_succeeds() {
    let dir = layout();

    docublock_in(dir.path())
        .arg("extract")
        .assert()
        .success()
        .stdout(predicate::str::contains("extract: 2 files, 2 doc-blocks, 1 examples"));

    let output = fs::read_to_string(dir.path().join("out/allComments.txt")).unwrap();
    assert!(output.starts_with("@startDocuBlock errorCodes \n"));
    assert!(output.contains("<!-- filename: "));
    assert!(output.contains("<div id=\"collectionCount_container\">"));
}

#[test]
fn missing_transcript_exits_with_one() {
    let dir = layout();
    fs::remove_file(dir.path().join("Examples/collectionCount.generated")).unwrap();

    docublock_in(dir.path())
        .arg("extract")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("1 example transcript(s) missing"))
        .stderr(predicate::str::contains("could not find the generated example for collectionCount"));

    assert!(dir.path().join("out/allComments.txt").exists());
}

#[test]
fn unterminated_strict_block_exits_with_two() {
    let dir = layout();
    write(dir.path(), "src/zz.cpp", "/// @startDocuBlock dangling\n");

    docublock_in(dir.path())
        .arg("extract")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("error:").and(predicate::str::contains("zz.cpp")));
}

#[test]
fn output_override_is_relative_to_working_directory() {
    let dir = layout();

    docublock_in(dir.path())
        .args(["extract", "--output", "elsewhere.txt"])
        .assert()
        .success();

    assert!(dir.path().join("elsewhere.txt").exists());
    assert!(!dir.path().join("out/allComments.txt").exists());
}

#[test]
fn check_json_reports_gap_without_writing() {
    let dir = layout();
    fs::remove_file(dir.path().join("Examples/collectionCount.generated")).unwrap();

    let assert = docublock_in(dir.path())
        .args(["check", "--format", "json"])
        .assert()
        .code(1);

    let value: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(value["command"], "check");
    assert_eq!(value["success"], false);
    assert_eq!(value["missing"][0]["tag"], "collectionCount");
    assert!(!dir.path().join("out/allComments.txt").exists());
}

#[test]
fn invalid_config_is_fatal() {
    let dir = layout();
    write(dir.path(), "docublock.toml", "roots = []\n");

    docublock_in(dir.path())
        .arg("check")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("no search roots configured"));
}

#[test]
fn stock_layout_seeds_error_catalog_without_config() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "lib/Basics/errors.dat", "1,ERROR_FAILED,\"failed\"\n");
    write(
        dir.path(),
        "Documentation/DocuBlocks/intro.md",
        "@startDocuBlock intro\nhello\n@endDocuBlock\n",
    );

    docublock_in(dir.path())
        .arg("extract")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 files, 1 doc-blocks"));

    let output = fs::read_to_string(dir.path().join("allComments.txt")).unwrap();
    assert!(output.starts_with("@startDocuBlock errorCodes \n1,ERROR_FAILED"));
    assert!(output.contains("hello\n"));
}
