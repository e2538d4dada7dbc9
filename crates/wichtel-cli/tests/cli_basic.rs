//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run against the dev data directory.

use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "wichtel-cli", "--"])
        .args(args)
        .env("WICHTEL_ENV", "dev")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_help() {
    let (_, _, code) = run_cli(&["--help"]);
    assert_eq!(code, 0, "help failed");
}

#[test]
fn test_group_list() {
    let (stdout, _, code) = run_cli(&["group", "list"]);
    assert_eq!(code, 0, "group list failed");
    assert!(serde_json::from_str::<serde_json::Value>(&stdout).is_ok());
}

#[test]
fn test_reset_requires_confirmation() {
    let (_, stderr, code) = run_cli(&["admin", "reset"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("--yes"));
}
