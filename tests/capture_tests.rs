//! Integration tests for the capture command

#![allow(deprecated)]

use predicates::prelude::*;

mod common;
use common::Workspace;

const TARGET_DOC: &str = "* Target\n** Child 1\n* Other\n";

#[test]
fn test_capture_under_heading_appends() {
    let ws = Workspace::new();
    ws.write_config("[capture]\nformat = \"* %c\"\nheading = \"Target\"\n");
    ws.write_org("inbox.org", TARGET_DOC);

    ws.cmd()
        .args(["capture", "Entry"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Captured to"));

    assert_eq!(
        ws.read_org("inbox.org"),
        "* Target\n** Child 1\n** Entry\n* Other\n"
    );
}

#[test]
fn test_capture_under_heading_prepends() {
    let ws = Workspace::new();
    ws.write_config("[capture]\nformat = \"* %c\"\n");
    ws.write_org("inbox.org", TARGET_DOC);

    ws.cmd()
        .args(["capture", "Entry", "--heading", "Target", "--prepend"])
        .assert()
        .success();

    assert_eq!(
        ws.read_org("inbox.org"),
        "* Target\n** Entry\n** Child 1\n* Other\n"
    );
}

#[test]
fn test_capture_along_outline_path() {
    let ws = Workspace::new();
    ws.write_config("[capture]\nformat = \"* %c\"\nolp = [\"Level 1\", \"Level 2\"]\n");
    ws.write_org(
        "inbox.org",
        "* Level 1\n** Level 2\n*** Level 3\n** Other Level 2\n",
    );

    ws.cmd().args(["capture", "Entry"]).assert().success();

    assert_eq!(
        ws.read_org("inbox.org"),
        "* Level 1\n** Level 2\n*** Level 3\n*** Entry\n** Other Level 2\n"
    );
}

#[test]
fn test_capture_default_template_and_joined_words() {
    let ws = Workspace::new();
    ws.write_config("");
    ws.write_org("inbox.org", "* Existing\n");

    ws.cmd()
        .args(["capture", "call", "the", "bank"])
        .assert()
        .success();

    let contents = ws.read_org("inbox.org");
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "* Existing");
    assert!(lines[1].starts_with("* ["));
    assert!(lines[1].ends_with(']'));
    assert_eq!(lines[2], "  call the bank");
}

#[test]
fn test_capture_missing_heading_leaves_file_alone() {
    let ws = Workspace::new();
    ws.write_config("");
    ws.write_org("inbox.org", TARGET_DOC);

    ws.cmd()
        .args(["capture", "Entry", "--olp", "Target", "--olp", "Missing"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Target / Missing"));

    assert_eq!(ws.read_org("inbox.org"), TARGET_DOC);
}

#[test]
fn test_capture_creates_dated_file() {
    let ws = Workspace::new();
    let pattern = ws.org_dir().join("journal-%Y.org");
    ws.write_config(&format!(
        "[capture]\nformat = \"* %c\"\ndefault_file = {}\n",
        common::toml_string(&pattern)
    ));

    ws.cmd().args(["capture", "Entry"]).assert().success();

    let created: Vec<String> = std::fs::read_dir(ws.org_dir())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(created.len(), 1);
    assert!(created[0].starts_with("journal-2"));
    assert_eq!(ws.read_org(&created[0]), "* Entry\n");
}
