//! CLI Integration Tests
//!
//! Tests for `pgwhere` CLI commands using `assert_cmd`.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Get the CLI binary command, isolated from any local config
#[allow(deprecated)]
fn pgwhere_cmd(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("pgwhere").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("PGWHERE_CONFIG")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

// =============================================================================
// Help & Version Tests
// =============================================================================

#[test]
fn test_help_displays_usage() {
    let dir = TempDir::new().unwrap();
    pgwhere_cmd(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("pgwhere CLI"))
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn test_version_displays_version() {
    let dir = TempDir::new().unwrap();
    pgwhere_cmd(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("pgwhere"));
}

#[test]
fn test_invalid_command_shows_error() {
    let dir = TempDir::new().unwrap();
    pgwhere_cmd(&dir)
        .arg("invalid_command_xyz")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

// =============================================================================
// Compile Command Tests
// =============================================================================

#[test]
fn test_compile_argument() {
    let dir = TempDir::new().unwrap();
    pgwhere_cmd(&dir)
        .args(["compile", r#"{"name": {"eq": "Alice"}}"#])
        .assert()
        .success()
        .stdout(predicate::str::contains("(data ->> 'name') = %s"))
        .stdout(predicate::str::contains("Alice"));
}

#[test]
fn test_compile_stdin_json_output() {
    let dir = TempDir::new().unwrap();
    let output = pgwhere_cmd(&dir)
        .args(["compile", "-", "--format", "json", "--placeholder", "numbered"])
        .write_stdin(r#"{"age": {"gte": 18, "lt": 65}}"#)
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        json["sql"],
        "(data ->> 'age')::numeric >= $1::numeric AND (data ->> 'age')::numeric < $2::numeric"
    );
    assert_eq!(json["params"], serde_json::json!([18, 65]));
    assert_eq!(json["is_predicate"], true);
}

#[test]
fn test_compile_from_file() {
    let dir = TempDir::new().unwrap();
    let filter = dir.path().join("filter.json");
    fs::write(
        &filter,
        r#"{"OR": [{"status": {"eq": "active"}}, {"status": {"eq": "pending"}}]}"#,
    )
    .unwrap();

    pgwhere_cmd(&dir)
        .args(["compile", "--file"])
        .arg(&filter)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "((data ->> 'status') = %s OR (data ->> 'status') = %s)",
        ));
}

#[test]
fn test_compile_empty_filter() {
    let dir = TempDir::new().unwrap();
    pgwhere_cmd(&dir)
        .args(["compile", "{}", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("null"));
}

#[test]
fn test_compile_error_exits_with_code() {
    let dir = TempDir::new().unwrap();
    pgwhere_cmd(&dir)
        .args(["compile", r#"{"tags": {"in": []}}"#])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("PGW-002"))
        .stderr(predicate::str::contains("tags"));
}

#[test]
fn test_compile_invalid_json() {
    let dir = TempDir::new().unwrap();
    pgwhere_cmd(&dir)
        .args(["compile", "{not json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("PGW-007"));
}

#[test]
fn test_compile_with_hint_and_column() {
    let dir = TempDir::new().unwrap();
    pgwhere_cmd(&dir)
        .args([
            "compile",
            r#"{"addr": {"eq": "10.0.0.1"}}"#,
            "--hint",
            "addr=inet",
            "--column",
            "payload",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "(payload ->> 'addr')::inet = %s::inet",
        ));
}

#[test]
fn test_compile_rejects_bad_hint() {
    let dir = TempDir::new().unwrap();
    pgwhere_cmd(&dir)
        .args(["compile", "{}", "--hint", "addr"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("FIELD=TYPE"));
}

// =============================================================================
// Expression & Detect Command Tests
// =============================================================================

#[test]
fn test_expression_vector_distance() {
    let dir = TempDir::new().unwrap();
    pgwhere_cmd(&dir)
        .args(["expression", "embedding", "cosine_distance", "[0.5, 0.25]"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "((data ->> 'embedding')::vector <=> %s::vector)",
        ))
        .stdout(predicate::str::contains("scalar distance"));
}

#[test]
fn test_detect_by_name_and_value() {
    let dir = TempDir::new().unwrap();
    pgwhere_cmd(&dir)
        .args(["detect", "created_at"])
        .assert()
        .success()
        .stdout(predicate::str::contains("date_time"));

    pgwhere_cmd(&dir)
        .args(["detect", "value", "--value", "aa:bb:cc:dd:ee:ff"])
        .assert()
        .success()
        .stdout(predicate::str::contains("mac_address"));
}

#[test]
fn test_detect_json_with_hint() {
    let dir = TempDir::new().unwrap();
    let output = pgwhere_cmd(&dir)
        .args(["detect", "code", "--value", "42", "--hint", "string", "--format", "json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["family"], "text");
    assert_eq!(json["hint"], "string");
}

// =============================================================================
// Operators & Config Command Tests
// =============================================================================

#[test]
fn test_operators_lists_strategies() {
    let dir = TempDir::new().unwrap();
    pgwhere_cmd(&dir)
        .arg("operators")
        .assert()
        .success()
        .stdout(predicate::str::contains("NullCheck"))
        .stdout(predicate::str::contains("GenericComparison"))
        .stdout(predicate::str::contains("insubnet"));
}

#[test]
fn test_operators_filtered_by_family() {
    let dir = TempDir::new().unwrap();
    pgwhere_cmd(&dir)
        .args(["operators", "--family", "mac_address"])
        .assert()
        .success()
        .stdout(predicate::str::contains("MacAddress"))
        .stdout(predicate::str::contains("PatternMatching").not());
}

#[test]
fn test_config_file_is_applied() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("pgwhere.toml"),
        "[document]\ncolumn = \"doc\"\n\n[sql]\nplaceholder = \"numbered\"\n",
    )
    .unwrap();

    pgwhere_cmd(&dir)
        .args(["compile", r#"{"name": {"eq": "a"}}"#])
        .assert()
        .success()
        .stdout(predicate::str::contains("(doc ->> 'name') = $1"));

    pgwhere_cmd(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("column = \"doc\""));
}

#[test]
fn test_invalid_config_fails() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("custom.toml");
    fs::write(&config, "[limits]\nmax_depth = 0\n").unwrap();

    pgwhere_cmd(&dir)
        .arg("--config")
        .arg(&config)
        .arg("operators")
        .assert()
        .failure()
        .stderr(predicate::str::contains("limits.max_depth"));
}
