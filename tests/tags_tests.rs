//! Integration tests for the tags command

#![allow(deprecated)]

use predicates::prelude::*;

mod common;
use common::Workspace;

#[test]
fn test_tags_across_files() {
    let ws = Workspace::new();
    ws.write_config("");
    ws.write_org("a.org", "* TODO One :work:urgent:\n* Two :home:\n");
    ws.write_org("b.org", "* Three :work:\nbody with :nottag:\n");

    ws.cmd()
        .arg("tags")
        .assert()
        .success()
        .stdout("home\nurgent\nwork\n");
}

#[test]
fn test_tags_ignores_non_org_files() {
    let ws = Workspace::new();
    ws.write_config("");
    ws.write_org("notes.txt", "* One :hidden:\n");

    ws.cmd()
        .arg("tags")
        .assert()
        .success()
        .stdout(predicate::str::contains("No tags found"));
}

#[test]
fn test_missing_configured_path_is_skipped() {
    let ws = Workspace::new();
    ws.write_config("");
    ws.write_org("a.org", "* One :work:\n");
    std::fs::write(
        ws.config_path(),
        format!(
            "org_files = [{}, {}]\n",
            common::toml_string(&ws.org_dir().join("missing.org")),
            common::toml_string(&ws.org_dir())
        ),
    )
    .unwrap();

    ws.cmd().arg("tags").assert().success().stdout("work\n");
}
