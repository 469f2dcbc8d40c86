//! End-to-end CLI tests for the pgn-downloader binary.
//!
//! None of these reach the network: every case fails or exits before the
//! first request is sent.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Binary with an isolated (empty) config directory.
fn pgn_downloader(config_home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("pgn-downloader").unwrap();
    cmd.env("XDG_CONFIG_HOME", config_home.path())
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_binary_help_displays_usage() {
    let config = TempDir::new().unwrap();
    pgn_downloader(&config)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Download a player's chess games as PGN"))
        .stdout(predicate::str::contains("--since"));
}

#[test]
fn test_binary_version_displays_version() {
    let config = TempDir::new().unwrap();
    pgn_downloader(&config)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("pgn-downloader"));
}

#[test]
fn test_binary_missing_username_returns_error() {
    let config = TempDir::new().unwrap();
    pgn_downloader(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("USERNAME"));
}

#[test]
fn test_binary_invalid_server_returns_error() {
    let config = TempDir::new().unwrap();
    pgn_downloader(&config)
        .args(["--server", "fics", "alice"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("fics"));
}

#[test]
fn test_binary_bad_date_fails_before_creating_output() {
    let config = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("alice.pgn");

    pgn_downloader(&config)
        .args(["--since", "last-tuesday", "-o"])
        .arg(&output)
        .arg("alice")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--since"))
        .stderr(predicate::str::contains("last-tuesday"));

    assert!(!output.exists());
}

#[test]
fn test_binary_impossible_calendar_date_is_rejected() {
    let config = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("alice.pgn");

    pgn_downloader(&config)
        .args(["--until", "2023-02-30", "-o"])
        .arg(&output)
        .arg("alice")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--until"));

    assert!(!output.exists());
}

#[test]
fn test_binary_refuses_existing_output() {
    let config = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("alice.pgn");
    std::fs::write(&output, "previous run").unwrap();

    pgn_downloader(&config)
        .args(["--no-progress", "-o"])
        .arg(&output)
        .arg("alice")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    assert_eq!(std::fs::read_to_string(&output).unwrap(), "previous run");
}

#[test]
fn test_binary_invalid_config_file_is_reported() {
    let config = TempDir::new().unwrap();
    let app_dir = config.path().join("pgn-downloader");
    std::fs::create_dir_all(&app_dir).unwrap();
    std::fs::write(app_dir.join("config.toml"), "concurrency = 4\n").unwrap();

    pgn_downloader(&config)
        .arg("alice")
        .assert()
        .failure()
        .stderr(predicate::str::contains("config"));
}
