//! CLI integration tests for the ab-core binary.

use assert_cmd::Command;
use predicates::prelude::*;

fn ab_core() -> Command {
    let mut cmd = Command::cargo_bin("ab-core").expect("binary built");
    cmd.env_remove("RUST_LOG")
        .env_remove("AB_CONFIG")
        .env_remove("AB_SEED")
        .env_remove("AB_SIMULATION_SIZE")
        .env_remove("AB_SIGNIFICANCE_THRESHOLD")
        .env("XDG_CONFIG_HOME", "/nonexistent-bayes-ab-config");
    cmd
}

#[test]
fn evaluate_summary_reports_leader() {
    ab_core()
        .args([
            "evaluate",
            "--model",
            "conversion",
            "--variant",
            "A:1000:100",
            "--variant",
            "B:1000:150",
        ])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("probability to be best (%)"))
        .stdout(predicate::str::contains("Leader: B"))
        .stdout(predicate::str::contains("binomial distribution"));
}

#[test]
fn evaluate_json_document() {
    let output = ab_core()
        .args([
            "--format",
            "json",
            "evaluate",
            "--model",
            "numeric, discrete",
            "--variant",
            "A:100:100:250",
            "--variant",
            "B:100:100:245",
            "--simulation-size",
            "2000",
            "--bins",
            "0",
        ])
        .output()
        .unwrap();
    assert!(output.status.code() == Some(0) || output.status.code() == Some(1));

    let doc: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(doc["model"], "numeric, discrete");
    assert_eq!(doc["simulation_size"], 2000);
    assert_eq!(doc["seed"], 9);
    assert_eq!(doc["summary"].as_array().unwrap().len(), 2);
    assert!(doc.get("plot").is_none());
    let total: f64 = doc["summary"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["probability_to_be_best"].as_f64().unwrap())
        .sum();
    assert!((total - 100.0).abs() <= 0.5);
}

#[test]
fn close_race_has_no_leader() {
    ab_core()
        .args([
            "evaluate",
            "--model",
            "conversion",
            "--variant",
            "A:1000:100",
            "--variant",
            "B:1000:101",
        ])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("No leader found"));
}

#[test]
fn unsupported_model_exits_with_input_error() {
    ab_core()
        .args(["evaluate", "--model", "revenue", "--variant", "A:10:1"])
        .assert()
        .code(12)
        .stderr(predicate::str::contains("unsupported model"));
}

#[test]
fn zero_numeric_totals_are_rejected_as_json_error() {
    let output = ab_core()
        .args([
            "--format",
            "json",
            "evaluate",
            "--model",
            "numeric, continuous",
            "--variant",
            "A:10:5:0",
            "--variant",
            "B:10:5:0",
        ])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(12));
    let doc: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(doc["error"]["code"], 20);
}

#[test]
fn malformed_input_file_exits_with_input_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("input.json");
    std::fs::write(&path, "{\"model\": \"conversion\", \"variants\": [").unwrap();

    let output = ab_core()
        .args(["--format", "json", "evaluate", "--input"])
        .arg(&path)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(12));
    let doc: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(doc["error"]["code"], 22);
}

#[test]
fn config_file_sets_seed_and_size() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ab.toml");
    std::fs::write(&path, "seed = 123\nsimulation_size = 321\n").unwrap();

    let output = ab_core()
        .args(["--format", "json", "--config"])
        .arg(&path)
        .args(["evaluate", "--model", "conversion", "--variant", "A:10:3"])
        .output()
        .unwrap();
    let doc: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(doc["seed"], 123);
    assert_eq!(doc["simulation_size"], 321);
}

#[test]
fn invalid_config_exits_with_config_error() {
    ab_core()
        .args([
            "evaluate",
            "--model",
            "conversion",
            "--variant",
            "A:10:3",
            "--simulation-size",
            "0",
        ])
        .assert()
        .code(10);
}

#[test]
fn models_lists_all_three() {
    ab_core()
        .arg("models")
        .assert()
        .success()
        .stdout(predicate::str::contains("conversion"))
        .stdout(predicate::str::contains("numeric, continuous"))
        .stdout(predicate::str::contains("numeric, discrete"));
}

#[test]
fn schema_describes_input_file() {
    let output = ab_core().arg("schema").output().unwrap();
    assert!(output.status.success());
    let schema: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(schema["properties"]["variants"].is_object());
}

#[test]
fn schema_describes_config_file() {
    let output = ab_core().args(["schema", "config"]).output().unwrap();
    assert!(output.status.success());
    let schema: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(schema["properties"]["simulation_size"].is_object());
}
