//! End-to-end tests for the transformer_test binary
//!
//! Uses the demo catalog with the external runner replaced by `sh` so the
//! tests run without ksql installed. Unix only.

#![cfg(unix)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn demo_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos/polkadot")
}

/// Write a config pointing at the demo catalogs, with fixtures in `dir` and
/// a shell stub as runner
fn write_config(dir: &Path, runner_script: &str) -> PathBuf {
    let yaml = format!(
        r#"root_dir: {root}
fixture_dir: {fixtures}
runner:
  program: sh
  args: ["-c", '{script}', "stub"]
"#,
        root = demo_dir().display(),
        fixtures = dir.join("fixtures").display(),
        script = runner_script,
    );
    let path = dir.join("harness.yaml");
    std::fs::write(&path, yaml).unwrap();
    path
}

fn transformer_test(config: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_transformer_test"))
        .arg("--config")
        .arg(config)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to launch transformer_test")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_run_all_passes() {
    let temp = tempfile::tempdir().unwrap();
    let config = write_config(temp.path(), "echo \"Test passed!\"");

    let output = transformer_test(&config, &["run"]);
    let text = stdout(&output);

    assert!(output.status.success(), "stdout: {text}");
    assert!(text.contains("[PASSED] transformer_blocks_test"));
    assert!(text.contains("there are 5 passed and 0 failed tests"));
    assert!(temp.path().join("fixtures/statements.sql").exists());
}

#[test]
fn test_run_failure_exits_non_zero() {
    let temp = tempfile::tempdir().unwrap();
    let config = write_config(temp.path(), "echo \"Test failed: mismatch at row 2\"");

    let output = transformer_test(&config, &["run", "transformer_blocks_test"]);
    let text = stdout(&output);

    assert!(!output.status.success());
    assert!(text.contains("[FAILED] transformer_blocks_test"));
    assert!(text.contains("TEST FAILED!!"));
    assert!(text.contains("Test failed: mismatch at row 2"));
    assert!(text.contains("there are 0 passed and 1 failed tests"));
}

#[test]
fn test_run_json_output() {
    let temp = tempfile::tempdir().unwrap();
    let config = write_config(temp.path(), "echo \"Test passed!\"");

    let output = transformer_test(
        &config,
        &["run", "transformer_events_test", "--output", "json"],
    );
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["summary"]["passed"], 1);
    assert_eq!(report["cases"][0]["name"], "transformer_events_test");
}

#[test]
fn test_resolve_prints_script_and_writes_fixtures() {
    let temp = tempfile::tempdir().unwrap();
    let config = write_config(temp.path(), "true");

    let output = transformer_test(&config, &["resolve", "transformer_blocks_test", "--write"]);
    assert!(output.status.success());

    let script = std::fs::read_to_string(temp.path().join("fixtures/statements.sql")).unwrap();
    assert!(script.starts_with("CREATE STREAM BLOCK_DATA"));
    assert!(script.contains("CREATE STREAM BLOCKS"));
    assert_eq!(stdout(&output).trim_end(), script.trim_end());
}

#[test]
fn test_unknown_test_case_reports_error() {
    let temp = tempfile::tempdir().unwrap();
    let config = write_config(temp.path(), "echo \"Test passed!\"");

    let output = transformer_test(&config, &["resolve", "transformer_ghost_test"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr)
        .contains("Test case 'transformer_ghost_test' not found"));
}

#[test]
fn test_check_and_list() {
    let temp = tempfile::tempdir().unwrap();
    let config = write_config(temp.path(), "true");

    let check = transformer_test(&config, &["check"]);
    assert!(check.status.success());
    assert!(stdout(&check).contains("catalog ok: 6 queries, 5 test cases"));

    let list = transformer_test(&config, &["list"]);
    assert!(stdout(&list)
        .contains("transformer_balances_test: create_blocks_stream, create_events_stream, create_balances_stream"));
}

#[test]
fn test_check_reports_broken_catalog() {
    let temp = tempfile::tempdir().unwrap();
    std::fs::write(temp.path().join("queries.json"), r#"{"q1": "SELECT 1;"}"#).unwrap();
    std::fs::write(
        temp.path().join("cases.json"),
        r#"[
  {"name": "t1", "sql_queries": ["q1"], "input": "[]", "output": "[]"},
  {"name": "t1", "sql_queries": ["q1"], "input": "[]", "output": "[]"},
  {"name": "t2", "sql_queries": ["q1", "q_missing"], "input": "[]", "output": "[]"}
]"#,
    )
    .unwrap();
    let config = temp.path().join("harness.yaml");
    std::fs::write(
        &config,
        "queries_file: queries.json\ntest_data_file: cases.json\n",
    )
    .unwrap();

    let check = transformer_test(&config, &["check"]);
    let text = stdout(&check);

    assert_eq!(check.status.code(), Some(1), "stdout: {text}");
    assert!(text.contains("Duplicate test case name: t1"));
    assert!(text.contains("Test case 't2': references unknown query 'q_missing'"));
    assert!(!text.contains("catalog ok"));
}
