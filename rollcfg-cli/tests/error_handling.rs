//! Integration tests for error handling and exit codes.
//!
//! - Exit code 0: Success
//! - Exit code 1: Validation failure, or differences with `diff --exit-code`
//! - Exit code 2: Argument parsing rejected by clap
//! - Exit code 4: Invalid arguments
//! - Exit code 5: I/O error
//! - Exit code 6: Other library errors (diff failures)
//! - Exit code 7: YAML parse error

mod common;

use common::TestEnv;
use predicates::prelude::*;

#[test]
fn test_success_exit_code() {
    let env = TestEnv::with_fixtures(&["input.yaml"]);
    env.command().arg("validate").assert().code(0);
    env.command().arg("compile").assert().code(0);
    env.command().arg("list").assert().code(0);
}

#[test]
fn test_validation_failure_exit_code() {
    let env = TestEnv::new();
    env.write(
        "input.yaml",
        "services:\n  - name: svc1\n    uri: /\n    default_upstream: missing\n    matches: []\n    rules: []\n    upstreams:\n      - { id: u1, target: 10.0.0.1, port: 80 }\n",
    );
    env.command()
        .arg("validate")
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("Error: configuration validation failed"));
}

#[test]
fn test_missing_services_section() {
    let env = TestEnv::new();
    env.write("input.yaml", "routes: []\n");
    env.command()
        .arg("validate")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Missing 'services' section"));
}

#[test]
fn test_parse_error_exit_code() {
    let env = TestEnv::with_fixtures(&["malformed.yaml"]);
    env.command()
        .args(["validate", "malformed.yaml"])
        .assert()
        .code(7)
        .stderr(predicate::str::contains("YAML parsing error"));
}

#[test]
fn test_diff_with_malformed_document() {
    let env = TestEnv::with_fixtures(&["input.yaml", "malformed.yaml"]);
    env.command()
        .args(["diff", "input.yaml", "malformed.yaml"])
        .assert()
        .code(6)
        .stderr(predicate::str::contains("Error diffing files"));
}

#[test]
fn test_missing_file_exit_code() {
    let env = TestEnv::new();
    env.command()
        .args(["validate", "absent.yaml"])
        .assert()
        .code(5)
        .stderr(predicate::str::contains("absent.yaml"));
}

#[test]
fn test_validate_all_on_empty_directory() {
    let env = TestEnv::new();
    env.command()
        .args(["validate", "--all"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("no YAML documents found"));
}

#[test]
fn test_edit_match_without_changes() {
    let env = TestEnv::with_fixtures(&["input.yaml"]);
    env.command()
        .args(["edit-match", "--service", "checkout", "--match", "m1"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("nothing to change"));
}

#[test]
fn test_edit_match_rejects_unknown_operator() {
    let env = TestEnv::with_fixtures(&["input.yaml"]);
    let before = env.read("input.yaml");
    env.command()
        .args([
            "edit-match",
            "--service",
            "checkout",
            "--match",
            "m1",
            "--operator",
            "!=",
        ])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("unsupported operator '!='"));
    assert_eq!(env.read("input.yaml"), before);
}

#[test]
fn test_unknown_format_rejected_by_parser() {
    let env = TestEnv::with_fixtures(&["input.yaml"]);
    env.command()
        .args(["compile", "--format", "toml"])
        .assert()
        .code(2);
}

#[test]
fn test_missing_subcommand() {
    let env = TestEnv::new();
    env.command().assert().failure();
}
