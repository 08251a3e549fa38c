//! CLI end-to-end tests
//!
//! Tests for the sceneseek command-line interface.

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

/// Get a command for the sceneseek binary
#[allow(deprecated)]
fn sceneseek_cmd() -> Command {
    Command::cargo_bin("sceneseek").unwrap()
}

const CONFIG: &str = r#"
[[indexers]]
name = "rss-only"
url = "http://127.0.0.1:9/newznab"
enable_interactive_search = false

[[indexers]]
name = "manual-only"
kind = "torznab"
url = "http://127.0.0.1:9/torznab"
enable_automatic_search = false

[[indexers]]
name = "parked"
enable_automatic_search = false
enable_interactive_search = false

[[profiles]]
id = 1
name = "Any"
cutoff = "sdtv"
items = [{ quality = "sdtv", allowed = true }]

[[movies]]
id = 5
title = "Quiet Movie"
profile_id = 1
"#;

#[test]
fn test_cli_no_args_shows_help() {
    let mut cmd = sceneseek_cmd();
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_cli_version_command() {
    let mut cmd = sceneseek_cmd();
    cmd.arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("sceneseek"));
}

#[test]
fn test_cli_config_validation() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, CONFIG).unwrap();

    let mut cmd = sceneseek_cmd();
    cmd.arg("validate")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"))
        .stdout(predicate::str::contains("Indexers: 3"));
}

#[test]
fn test_cli_config_validation_rejects_duplicate_indexers() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        "[[indexers]]\nname = \"x\"\nurl = \"http://a\"\n[[indexers]]\nname = \"x\"\nurl = \"http://b\"\n",
    )
    .unwrap();

    let mut cmd = sceneseek_cmd();
    cmd.arg("validate")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Duplicate indexer name"));
}

#[test]
fn test_cli_indexers_by_mode() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, CONFIG).unwrap();

    let mut cmd = sceneseek_cmd();
    cmd.arg("--config")
        .arg(&path)
        .arg("indexers")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 indexers enabled for Automatic search"))
        .stdout(predicate::str::contains("rss-only (newznab) http://127.0.0.1:9/newznab"))
        .stdout(predicate::str::contains("manual-only").not())
        .stdout(predicate::str::contains("parked").not());

    let mut cmd = sceneseek_cmd();
    cmd.arg("--config")
        .arg(&path)
        .arg("indexers")
        .arg("--interactive")
        .assert()
        .success()
        .stdout(predicate::str::contains("manual-only (torznab)"))
        .stdout(predicate::str::contains("rss-only").not())
        .stdout(predicate::str::contains("parked").not());
}

#[test]
fn test_cli_search_unknown_movie_fails() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, CONFIG).unwrap();

    let mut cmd = sceneseek_cmd();
    cmd.arg("--config")
        .arg(&path)
        .arg("search")
        .arg("999")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_cli_search_with_unreachable_indexer_prints_nothing_found() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, CONFIG).unwrap();

    let mut cmd = sceneseek_cmd();
    cmd.arg("--config")
        .arg(&path)
        .arg("search")
        .arg("5")
        .assert()
        .success()
        .stdout(predicate::str::contains("No releases found"));
}
