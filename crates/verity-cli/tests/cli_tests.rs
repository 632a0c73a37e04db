//! End-to-end tests for the `verity` binary
//!
//! These tests verify:
//! - `verity test` - run, filter, report, exit codes
//! - `verity list` - discovery output
//! - configuration from verity.toml and the environment

use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

// ============================================================================
// Test Helpers
// ============================================================================

/// A temporary project directory, optionally with a verity.toml
fn project(config: Option<&str>) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    if let Some(content) = config {
        fs::write(temp_dir.path().join("verity.toml"), content).unwrap();
    }
    temp_dir
}

fn verity_cmd(subcommand: &str, dir: &TempDir) -> assert_cmd::Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("verity");
    cmd.env_remove("VERITY_FORMAT")
        .env_remove("VERITY_PARALLEL")
        .env_remove("VERITY_THREADS")
        .env_remove("VERITY_VERBOSE")
        .env("NO_COLOR", "1")
        .arg(subcommand)
        .arg("--dir")
        .arg(dir.path());
    cmd
}

// ============================================================================
// verity test
// ============================================================================

#[test]
fn test_run_all_builtin_tests() {
    let dir = project(None);

    verity_cmd("test", &dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Running 4 tests"))
        .stdout(predicate::str::contains(
            "Test result: PASSED | 4 total, 4 passed, 0 failed, 0 errored",
        ));
}

#[test]
fn test_reference_scope_two_passed() {
    let dir = project(None);

    verity_cmd("test", &dir)
        .args(["--scope", "app", "--verbose"])
        .assert()
        .success()
        .stdout(predicate::str::contains("PASS app::sample_test"))
        .stdout(predicate::str::contains("PASS app::slice_contains"))
        .stdout(predicate::str::contains("2 total, 2 passed, 0 failed, 0 errored"));
}

#[test]
fn test_pattern_filter() {
    let dir = project(None);

    verity_cmd("test", &dir)
        .args(["arrays", "-v"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Running 1 test\n"))
        .stdout(predicate::str::contains("should work with arrays"));
}

#[test]
fn test_no_tests_found_is_success() {
    let dir = project(None);

    verity_cmd("test", &dir)
        .arg("nothing-matches-this")
        .assert()
        .success()
        .stdout(predicate::str::contains("No tests found."));
}

#[test]
fn test_json_report() {
    let dir = project(None);

    let output = verity_cmd("test", &dir)
        .args(["--json", "--sequential"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["tests"], 4);
    assert_eq!(report["passed"], 4);
    assert_eq!(report["failed"], 0);
    assert_eq!(report["errored"], 0);
    assert_eq!(report["results"][0]["name"], "sample_test");
    assert_eq!(report["results"][0]["scope"], "app");
    assert_eq!(report["results"][0]["status"], "passed");
}

#[test]
fn test_zero_threads_rejected() {
    let dir = project(None);

    verity_cmd("test", &dir)
        .args(["--threads", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--threads must be at least 1"));
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_config_file_selects_json_and_scope() {
    let dir = project(Some("[test]\nformat = \"json\"\nscope = \"frontend\"\n"));

    let output = verity_cmd("test", &dir).output().unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["tests"], 2);
}

#[test]
fn test_env_overrides_config_file() {
    let dir = project(Some("[test]\nformat = \"json\"\n"));

    verity_cmd("test", &dir)
        .env("VERITY_FORMAT", "pretty")
        .assert()
        .success()
        .stdout(predicate::str::contains("Test result: PASSED"));
}

#[test]
fn test_invalid_config_fails() {
    let dir = project(Some("[test]\nretries = 3\n"));

    verity_cmd("test", &dir)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load configuration"));
}

// ============================================================================
// verity list
// ============================================================================

#[test]
fn test_list_names() {
    let dir = project(None);

    verity_cmd("list", &dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("app::sample_test\napp::slice_contains\n"))
        .stdout(predicate::str::contains(
            "frontend::sample test::should pass a basic test",
        ));
}

#[test]
fn test_list_json_with_scope() {
    let dir = project(None);

    let output = verity_cmd("list", &dir)
        .args(["--scope", "app", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let listing: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        listing["tests"],
        serde_json::json!(["app::sample_test", "app::slice_contains"])
    );
}
