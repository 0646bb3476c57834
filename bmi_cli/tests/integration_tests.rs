//! Integration tests for the bmi binary.
//!
//! These tests verify end-to-end behavior including:
//! - Computing and storing results
//! - Listing and deleting history entries
//! - CSV export

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Helper to create a test data directory
fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Helper to get the path to the CLI binary
fn cli() -> Command {
    Command::cargo_bin("bmi").expect("Failed to find bmi binary")
}

fn calc(data_dir: &Path, weight: &str, height: &str, gender: &str) {
    cli()
        .arg("calc")
        .arg("--data-dir")
        .arg(data_dir)
        .args(["--weight", weight, "--height", height, "--gender", gender])
        .assert()
        .success();
}

fn stored_history(data_dir: &Path) -> Vec<serde_json::Value> {
    let content =
        fs::read_to_string(data_dir.join("bmiHistory.json")).expect("Failed to read history");
    serde_json::from_str(&content).expect("History is not a JSON array")
}

#[test]
fn test_cli_help() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Body mass index calculator"));
}

#[test]
fn test_calc_prints_result_card() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("calc")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .args(["--weight", "60", "--height", "170", "--age", "25", "--gender", "female"])
        .arg("--name")
        .arg("Ayu")
        .assert()
        .success()
        .stdout(predicate::str::contains("20.8"))
        .stdout(predicate::str::contains("Normal weight"))
        .stdout(predicate::str::contains("61.4 kg"))
        .stdout(predicate::str::contains("Ayu | 25th | Female | 170cm"));
}

#[test]
fn test_calc_writes_history_blob() {
    let temp_dir = setup_test_dir();
    calc(temp_dir.path(), "60", "170", "male");

    let history = stored_history(temp_dir.path());
    assert_eq!(history.len(), 1);

    let record = &history[0];
    assert_eq!(record["bmi"], 20.8);
    assert_eq!(record["category"], "Normal");
    assert_eq!(record["idealWeightLabel"], "65.9 kg");
    assert_eq!(record["gender"], "male");
    assert_eq!(record["weightKg"], 60.0);
    assert_eq!(record["heightCm"], 170.0);
    assert!(record["id"].as_str().unwrap().ends_with('Z'));
    assert!(record["displayDate"].is_string());
}

#[test]
fn test_history_is_newest_first() {
    let temp_dir = setup_test_dir();
    calc(temp_dir.path(), "50", "170", "female");
    calc(temp_dir.path(), "95", "170", "female");

    let history = stored_history(temp_dir.path());
    assert_eq!(history.len(), 2);
    assert_eq!(history[0]["category"], "Obese");
    assert_eq!(history[1]["category"], "Underweight");
    assert!(history[0]["id"].as_str().unwrap() > history[1]["id"].as_str().unwrap());

    let output = cli()
        .arg("history")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let stdout = String::from_utf8_lossy(&output);

    let obese = stdout.find("Obese").expect("missing newest entry");
    let under = stdout.find("Underweight").expect("missing oldest entry");
    assert!(obese < under);
}

#[test]
fn test_default_command_lists_history() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No history yet"));
}

#[test]
fn test_delete_entry() {
    let temp_dir = setup_test_dir();
    calc(temp_dir.path(), "60", "170", "female");
    calc(temp_dir.path(), "80", "170", "female");

    let history = stored_history(temp_dir.path());
    let oldest_id = history[1]["id"].as_str().unwrap().to_string();
    let newest_id = history[0]["id"].as_str().unwrap().to_string();

    cli()
        .arg("delete")
        .arg(&oldest_id)
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted"));

    let history = stored_history(temp_dir.path());
    assert_eq!(history.len(), 1);
    assert_eq!(history[0]["id"], newest_id.as_str());

    // Deleting again is a no-op
    cli()
        .arg("delete")
        .arg(&oldest_id)
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing deleted"));

    assert_eq!(stored_history(temp_dir.path()).len(), 1);
}

#[test]
fn test_degenerate_input_uses_sentinels() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("calc")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .args(["--weight", "0", "--height", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("N/A"));

    let history = stored_history(temp_dir.path());
    assert_eq!(history[0]["bmi"], 0.0);
    assert_eq!(history[0]["category"], "NotApplicable");
    assert_eq!(history[0]["idealWeightLabel"], "N/A");
}

#[test]
fn test_export_csv() {
    let temp_dir = setup_test_dir();
    for weight in ["55", "65", "75"] {
        calc(temp_dir.path(), weight, "175", "male");
    }

    let csv_path = temp_dir.path().join("export").join("history.csv");
    cli()
        .arg("export")
        .arg(&csv_path)
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 3 records"));

    let csv_content = fs::read_to_string(&csv_path).expect("Failed to read CSV");
    assert!(csv_content.starts_with("id,created_at"));
    assert_eq!(csv_content.lines().count(), 4);
}

#[test]
fn test_invalid_gender_rejected() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("calc")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .args(["--weight", "60", "--height", "170", "--gender", "other"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));

    assert!(!temp_dir.path().join("bmiHistory.json").exists());
}
