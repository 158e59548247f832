//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary against an isolated data directory and
//! verify outputs.

use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(data_dir: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_chillflow"))
        .args(args)
        .env("CHILLFLOW_DATA_DIR", data_dir)
        .env_remove("CHILLFLOW_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

/// Run a CLI command, expect success and parse stdout as JSON.
fn run_json(data_dir: &Path, args: &[&str]) -> serde_json::Value {
    let (stdout, stderr, code) = run_cli(data_dir, args);
    assert_eq!(code, 0, "{args:?} failed: {stderr}");
    serde_json::from_str(&stdout).expect("Failed to parse JSON output")
}

#[test]
fn test_timer_status_starts_idle() {
    let dir = TempDir::new().unwrap();
    let status = run_json(dir.path(), &["timer", "status"]);
    assert_eq!(status["phase"], "idle");
    assert_eq!(status["focus_index"], 0);
    assert_eq!(status["remaining_secs"], 0);
}

#[test]
fn test_timer_lifecycle() {
    let dir = TempDir::new().unwrap();

    let started = run_json(dir.path(), &["timer", "start"]);
    assert_eq!(started["phase"]["focus"], 1);
    assert_eq!(started["session_label"], "1/3");
    assert_eq!(started["total_secs"], 1500);

    // State survives between invocations.
    let status = run_json(dir.path(), &["timer", "status"]);
    assert_eq!(status["phase"]["focus"], 1);

    let paused = run_json(dir.path(), &["timer", "pause"]);
    assert_eq!(paused["phase"]["paused"]["focus"], 1);

    let (_, stderr, code) = run_cli(dir.path(), &["timer", "skip"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error: cannot skip while paused"));

    let resumed = run_json(dir.path(), &["timer", "resume"]);
    assert_eq!(resumed["phase"]["focus"], 1);

    let skipped = run_json(dir.path(), &["timer", "skip"]);
    assert_eq!(skipped["phase"]["rest"], 1);

    let reset = run_json(dir.path(), &["timer", "reset"]);
    assert_eq!(reset["phase"], "idle");
}

#[test]
fn test_skipped_focus_not_in_stats() {
    let dir = TempDir::new().unwrap();
    run_json(dir.path(), &["timer", "start"]);
    run_json(dir.path(), &["timer", "skip"]);

    let week = run_json(dir.path(), &["stats", "week", "--json"]);
    assert_eq!(week["total_secs"], 0);
}

#[test]
fn test_stats_week_json_shape() {
    let dir = TempDir::new().unwrap();
    let week = run_json(dir.path(), &["stats", "week", "--offset", "-1", "--json"]);
    assert_eq!(week["total_secs"], 0);
    assert!(week["label"].as_str().unwrap().contains(" - "));
    assert_eq!(week["heatmap"]["cells"].as_array().unwrap().len(), 7);
}

#[test]
fn test_stats_week_table() {
    let dir = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli(dir.path(), &["stats", "week"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("(total 0m)"));
    assert!(stdout.contains("Mon"));
    assert!(stdout.contains("Sun"));
}

#[test]
fn test_stats_slot() {
    let dir = TempDir::new().unwrap();
    let slot = run_json(
        dir.path(),
        &["stats", "slot", "--date", "2026-03-02", "--slot", "1"],
    );
    assert_eq!(slot["total_secs"], 0);
    assert_eq!(slot["label"], "08:00-15:59");

    let (_, _, code) = run_cli(
        dir.path(),
        &["stats", "slot", "--date", "March 2nd", "--slot", "1"],
    );
    assert_ne!(code, 0);
}

#[test]
fn test_stats_clear() {
    let dir = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli(dir.path(), &["stats", "clear"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("focus log cleared"));
}

#[test]
fn test_config_get_set() {
    let dir = TempDir::new().unwrap();

    let (stdout, _, code) = run_cli(dir.path(), &["config", "get", "cycle.max_sessions"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "3");

    let (_, _, code) = run_cli(dir.path(), &["config", "set", "cycle.max_sessions", "4"]);
    assert_eq!(code, 0);

    let (stdout, _, _) = run_cli(dir.path(), &["config", "get", "cycle.max_sessions"]);
    assert_eq!(stdout.trim(), "4");

    let started = run_json(dir.path(), &["timer", "start"]);
    assert_eq!(started["session_label"], "1/4");
}

#[test]
fn test_config_rejects_bad_values() {
    let dir = TempDir::new().unwrap();

    let (_, stderr, code) = run_cli(dir.path(), &["config", "set", "cycle.max_sessions", "0"]);
    assert_eq!(code, 1);
    assert!(stderr.starts_with("error:"));

    let (_, stderr, code) = run_cli(dir.path(), &["config", "get", "cycle.nope"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("unknown key"));
}

#[test]
fn test_config_show_and_path() {
    let dir = TempDir::new().unwrap();

    let config = run_json(dir.path(), &["config", "show"]);
    assert_eq!(config["cycle"]["focus_duration_secs"], 1500);
    assert_eq!(config["timer"]["tick_interval_ms"], 1000);

    let (stdout, _, code) = run_cli(dir.path(), &["config", "path"]);
    assert_eq!(code, 0);
    assert!(Path::new(stdout.trim()).starts_with(dir.path()));
    assert!(dir.path().join("config.toml").exists());
}
