mod common;

use assert_cmd::Command;
use common::TestWorkspace;
use predicates::prelude::*;
use predicates::str::contains;

fn quick_eda() -> Command {
    Command::cargo_bin("quick-eda").expect("binary exists")
}

#[test]
fn summary_prints_shape_and_duplicates() {
    let workspace = TestWorkspace::new();
    let path = workspace.write("dups.csv", "a,b\n1,2\n1,2\n3,4\n");
    quick_eda()
        .args(["summary", "-i", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(
            contains("Number of observations (rows):")
                .and(contains("Number of duplicates:"))
                .and(contains("33.33 %")),
        );
}

#[test]
fn summary_json_is_machine_readable() {
    let workspace = TestWorkspace::new();
    let path = workspace.write("dups.csv", "a;b\n1;2\n1;2\n3;4\n");
    let assert = quick_eda()
        .args(["summary", "-i", path.to_str().unwrap(), "--format", "json"])
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("stdout utf8");
    let json: serde_json::Value = serde_json::from_str(&stdout).expect("valid json");
    assert_eq!(json["row_count"], 3);
    assert_eq!(json["duplicate_count"], 1);
}

#[test]
fn unsupported_extension_fails_with_message() {
    let workspace = TestWorkspace::new();
    let path = workspace.write("data.json", "{}");
    quick_eda()
        .args(["summary", "-i", path.to_str().unwrap()])
        .assert()
        .failure()
        .code(1)
        .stderr(contains("error: .json is currently unsupported."));
}

#[test]
fn ragged_csv_reports_tried_separators() {
    let workspace = TestWorkspace::new();
    let path = workspace.write("ragged.csv", "a,b;c|d\te\n1\n");
    quick_eda()
        .args(["preview", "-i", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(contains("Couldn't match the separator"));
}

#[test]
fn preview_limits_rows() {
    let workspace = TestWorkspace::new();
    let path = workspace.write("orders.csv", common::ORDERS_CSV);
    let assert = quick_eda()
        .args(["preview", "-i", path.to_str().unwrap(), "--rows", "2"])
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("stdout utf8");
    let lines = stdout.lines().collect::<Vec<_>>();
    assert_eq!(lines.len(), 4, "header, separator and two rows: {stdout}");
    assert!(lines[0].starts_with("id"));
    assert!(stdout.contains("processing"));
    assert!(!stdout.contains("cancelled"));
}

#[test]
fn profile_reports_missing_rare_categories() {
    let workspace = TestWorkspace::new();
    let path = workspace.write("orders.csv", common::ORDERS_CSV);
    quick_eda()
        .args([
            "profile",
            "-i",
            path.to_str().unwrap(),
            "-C",
            "status",
            "--rare-threshold",
            "1",
        ])
        .assert()
        .success()
        .stdout(contains("status").and(contains("No rare categories found")));
}

#[test]
fn profile_config_file_is_overridden_by_flags() {
    let workspace = TestWorkspace::new();
    let path = workspace.write("orders.csv", common::ORDERS_CSV);
    let config = workspace.write("profile.yaml", "top_n: 1\nhistogram_bins: 4\n");
    let assert = quick_eda()
        .args([
            "profile",
            "-i",
            path.to_str().unwrap(),
            "-C",
            "status,amount",
            "--config",
            config.to_str().unwrap(),
            "--top-n",
            "2",
            "--format",
            "json",
        ])
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("stdout utf8");
    let json: serde_json::Value = serde_json::from_str(&stdout).expect("valid json");
    assert_eq!(json[0]["kind"], "categorical");
    assert_eq!(json[0]["top_values"].as_array().map(Vec::len), Some(2));
    assert_eq!(json[1]["kind"], "numeric");
    assert_eq!(json[1]["histogram"].as_array().map(Vec::len), Some(4));
}

#[test]
fn profile_unknown_column_is_an_error() {
    let workspace = TestWorkspace::new();
    let path = workspace.write("orders.csv", common::ORDERS_CSV);
    quick_eda()
        .args(["profile", "-i", path.to_str().unwrap(), "-C", "nope"])
        .assert()
        .failure()
        .stderr(contains("Column 'nope' not found"));
}

#[test]
fn profile_rejects_zero_histogram_bins() {
    let workspace = TestWorkspace::new();
    let path = workspace.write("orders.csv", common::ORDERS_CSV);
    quick_eda()
        .args(["profile", "-i", path.to_str().unwrap(), "--histogram-bins", "0"])
        .assert()
        .failure()
        .stderr(contains("histogram_bins must be at least 1"));
}

#[test]
fn correlate_defaults_to_every_other_column() {
    let workspace = TestWorkspace::new();
    let path = workspace.write("orders.csv", common::ORDERS_CSV);
    let assert = quick_eda()
        .args([
            "correlate",
            "-i",
            path.to_str().unwrap(),
            "--target",
            "returned",
            "--format",
            "json",
        ])
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("stdout utf8");
    let json: serde_json::Value = serde_json::from_str(&stdout).expect("valid json");
    assert_eq!(json["columns"], serde_json::json!(["id", "amount", "quantity"]));
}

#[test]
fn correlate_table_output_shows_coefficients() {
    let workspace = TestWorkspace::new();
    let path = workspace.write("orders.csv", common::ORDERS_CSV);
    quick_eda()
        .args([
            "correlate",
            "-i",
            path.to_str().unwrap(),
            "--target",
            "returned",
            "-C",
            "amount,quantity",
        ])
        .assert()
        .success()
        .stdout(contains("amount").and(contains("1.00")));
}
