#![allow(deprecated)] // TODO: move from Command::cargo_bin to the cargo_bin_cmd! macro

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

const TOKEN_VAR: &str = "DIGITALOCEAN_ACCESS_TOKEN";
const CONFIG_VAR: &str = "SNAPSHOOTER_CONFIG_PATH";

fn snapshooter() -> Command {
    Command::cargo_bin("snapshooter").unwrap()
}

/// Help lists both command groups
#[test]
fn test_cli_help() {
    snapshooter()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("DigitalOcean"))
        .stdout(predicate::str::contains("droplet"))
        .stdout(predicate::str::contains("snapshot"));
}

#[test]
fn test_cli_version() {
    snapshooter()
        .arg("--version")
        .env_remove(TOKEN_VAR)
        .assert()
        .success()
        .stdout(predicate::str::contains("snapshooter"));
}

#[test]
fn test_snapshot_help() {
    snapshooter()
        .args(["snapshot", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("take"))
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("restore"))
        .stdout(predicate::str::contains("rebuild"))
        .stdout(predicate::str::contains("list"));
}

#[test]
fn test_restore_help() {
    snapshooter()
        .args(["snapshot", "restore", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("<DROPLET_ID>"))
        .stdout(predicate::str::contains("<SNAPSHOT_ID>"));
}

#[test]
fn test_check_help_shows_region() {
    snapshooter()
        .args(["snapshot", "check", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--region"));
}

#[test]
fn test_invalid_command() {
    snapshooter()
        .arg("invalid-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_missing_droplet_id() {
    snapshooter()
        .args(["droplet", "destroy"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("<DROPLET_ID>"));
}

/// Without a token nothing reaches the API
#[test]
fn test_missing_token() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config_path = temp_dir.path().join("snapshooter.yaml");
    fs::write(&config_path, "").unwrap();

    snapshooter()
        .args(["droplet", "list"])
        .env_remove(TOKEN_VAR)
        .env(CONFIG_VAR, &config_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains(TOKEN_VAR));
}

#[test]
fn test_empty_token() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config_path = temp_dir.path().join("snapshooter.yaml");
    fs::write(&config_path, "").unwrap();

    snapshooter()
        .args(["snapshot", "list", "42"])
        .env(TOKEN_VAR, "")
        .env(CONFIG_VAR, &config_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains(TOKEN_VAR));
}

#[test]
fn test_invalid_settings_file() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config_path = temp_dir.path().join("snapshooter.yaml");
    fs::write(&config_path, "poll:\n  action_secs: 0\n").unwrap();

    snapshooter()
        .args(["droplet", "list"])
        .env(TOKEN_VAR, "test-token")
        .env(CONFIG_VAR, &config_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid setting poll"));
}

#[test]
fn test_missing_settings_file() {
    let temp_dir = tempfile::tempdir().unwrap();

    snapshooter()
        .args(["droplet", "list"])
        .env(TOKEN_VAR, "test-token")
        .env(CONFIG_VAR, temp_dir.path().join("absent.yaml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}
