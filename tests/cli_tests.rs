//! Integration tests for the flowgrade CLI surface: help, exit codes,
//! error envelopes, configuration and logging.

mod common;

use common::{flowgrade, write_file, LINEAR_CHAIN};
use predicates::prelude::*;
use tempfile::tempdir;

// ============================================================================
// Help and version
// ============================================================================

#[test]
fn test_help_flag() {
    flowgrade()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: flowgrade"))
        .stdout(predicate::str::contains("grade"))
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("order"))
        .stdout(predicate::str::contains("prompt"));
}

#[test]
fn test_version_flag() {
    flowgrade()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("flowgrade"));
}

#[test]
fn test_no_command_prints_banner() {
    flowgrade()
        .assert()
        .success()
        .stdout(predicate::str::contains("Run `flowgrade --help`"));
}

// ============================================================================
// Exit codes and error envelopes
// ============================================================================

#[test]
fn test_unknown_format_exit_code_2() {
    let dir = tempdir().unwrap();
    let path = write_file(dir.path(), "chain.json", LINEAR_CHAIN);

    flowgrade()
        .args(["--format", "records", "check"])
        .arg(&path)
        .assert()
        .code(2);
}

#[test]
fn test_unknown_argument_json_usage_error() {
    flowgrade()
        .args(["--format", "json", "check", "--bogus-flag"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("\"type\":\"usage_error\""));
}

#[test]
fn test_conflicting_evaluator_flags() {
    let dir = tempdir().unwrap();
    let path = write_file(dir.path(), "chain.json", LINEAR_CHAIN);

    flowgrade()
        .current_dir(dir.path())
        .args(["grade", "--offline", "--response-file", "response.txt"])
        .arg(&path)
        .assert()
        .code(2);
}

#[test]
fn test_missing_diagram_file_exit_code_3() {
    let dir = tempdir().unwrap();

    flowgrade()
        .current_dir(dir.path())
        .args(["check", "missing.json"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("failed to read missing.json"));
}

#[test]
fn test_duplicate_node_json_envelope() {
    let dir = tempdir().unwrap();
    let path = write_file(
        dir.path(),
        "dup.json",
        r#"{
  "nodes": [
    {"id": "s", "type": "start", "text": "Start"},
    {"id": "s", "type": "end", "text": "End"}
  ],
  "edges": []
}"#,
    );

    flowgrade()
        .current_dir(dir.path())
        .args(["--format", "json", "check"])
        .arg(&path)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("\"type\":\"duplicate_node\""))
        .stderr(predicate::str::contains("duplicate node id: s"));
}

#[test]
fn test_malformed_diagram_names_missing_field() {
    let dir = tempdir().unwrap();
    let path = write_file(
        dir.path(),
        "malformed.json",
        r#"{"nodes": [{"id": "s", "type": "start"}], "edges": []}"#,
    );

    flowgrade()
        .current_dir(dir.path())
        .arg("grade")
        .arg("--offline")
        .arg(&path)
        .assert()
        .code(3)
        .stderr(predicate::str::contains(
            "malformed diagram: node #0 is missing required field 'text'",
        ));
}

#[test]
fn test_invalid_json_is_data_error() {
    let dir = tempdir().unwrap();
    let path = write_file(dir.path(), "broken.json", "{ not json");

    flowgrade()
        .current_dir(dir.path())
        .args(["--format", "json", "order"])
        .arg(&path)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("\"type\":\"json_error\""));
}

#[test]
fn test_quiet_suppresses_error_text() {
    let dir = tempdir().unwrap();

    flowgrade()
        .current_dir(dir.path())
        .args(["--quiet", "check", "missing.json"])
        .assert()
        .code(3)
        .stderr(predicate::str::is_empty());
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_config_defaults_as_toml() {
    let dir = tempdir().unwrap();

    flowgrade()
        .current_dir(dir.path())
        .env_remove("FLOWGRADE_EVALUATOR_MODEL")
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("structural_weight = 0.6"))
        .stdout(predicate::str::contains("[evaluator]"))
        .stdout(predicate::str::contains("model = \"gpt-4o-mini\""));
}

#[test]
fn test_config_file_discovered_in_cwd() {
    let dir = tempdir().unwrap();
    write_file(
        dir.path(),
        "flowgrade.toml",
        "expected_algorithm = \"sum the numbers from 1 to 10\"\n",
    );

    flowgrade()
        .current_dir(dir.path())
        .args(["--format", "json", "config"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "\"expected_algorithm\": \"sum the numbers from 1 to 10\"",
        ));
}

#[test]
fn test_environment_overrides_model() {
    let dir = tempdir().unwrap();

    flowgrade()
        .current_dir(dir.path())
        .env("FLOWGRADE_EVALUATOR_MODEL", "gpt-4o")
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("model = \"gpt-4o\""));
}

#[test]
fn test_invalid_weights_exit_code_2() {
    let dir = tempdir().unwrap();
    let config = write_file(
        dir.path(),
        "weights.toml",
        "structural_weight = 0.5\nsemantic_weight = 0.4\n",
    );
    let diagram = write_file(dir.path(), "chain.json", LINEAR_CHAIN);

    flowgrade()
        .current_dir(dir.path())
        .arg("--config")
        .arg(&config)
        .arg("check")
        .arg(&diagram)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("must sum to 1.0"));
}

#[test]
fn test_custom_weights_change_final_score() {
    let dir = tempdir().unwrap();
    write_file(
        dir.path(),
        "flowgrade.toml",
        "structural_weight = 0.5\nsemantic_weight = 0.5\n",
    );
    let diagram = write_file(dir.path(), "chain.json", LINEAR_CHAIN);

    flowgrade()
        .current_dir(dir.path())
        .args(["grade", "--offline"])
        .arg(&diagram)
        .assert()
        .success()
        .stdout(predicate::str::contains("Final score: 75.0"));
}

// ============================================================================
// Logging
// ============================================================================

#[test]
fn test_log_level_debug_writes_to_stderr() {
    let dir = tempdir().unwrap();
    let diagram = write_file(dir.path(), "chain.json", LINEAR_CHAIN);

    flowgrade()
        .current_dir(dir.path())
        .env_remove("RUST_LOG")
        .env_remove("FLOWGRADE_LOG")
        .args(["--log-level", "debug", "check"])
        .arg(&diagram)
        .assert()
        .success()
        .stderr(predicate::str::contains("parse_args"))
        .stdout(predicate::str::contains("parse_args").not());
}

#[test]
fn test_default_log_level_is_quiet() {
    let dir = tempdir().unwrap();
    let diagram = write_file(dir.path(), "chain.json", LINEAR_CHAIN);

    flowgrade()
        .current_dir(dir.path())
        .env_remove("RUST_LOG")
        .env_remove("FLOWGRADE_LOG")
        .arg("check")
        .arg(&diagram)
        .assert()
        .success()
        .stderr(predicate::str::contains("parse_args").not());
}
