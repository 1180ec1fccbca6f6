//! CLI Integration Tests
//!
//! Runs the `sheetfeed` binary with assert_cmd against grid-file fixtures.

#![allow(deprecated)] // Command::cargo_bin deprecation - no stable replacement yet

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const UNITS_JSON: &str = r#"{
  "sheets": [
    {
      "name": "Buford - GA",
      "rows": [
        ["id", "status", "price"],
        ["A1", "Available", 1200],
        ["A2", "RESERVED", 950.5],
        ["", "Sold", 700],
        ["A4", "leased", null]
      ]
    },
    {
      "name": "Concord - NC",
      "rows": [["id", "status"], ["C1", "Sold"], ["C2", "Sold"]]
    }
  ]
}"#;

fn fixture(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("units.json");
    fs::write(&path, UNITS_JSON).unwrap();
    path
}

fn sheetfeed() -> Command {
    let mut cmd = Command::cargo_bin("sheetfeed").unwrap();
    cmd.env_remove("SHEETFEED_CONFIG");
    cmd
}

// ═══════════════════════════════════════════════════════════════════════════
// HELP AND VERSION TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_cli_help() {
    sheetfeed()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("sheetfeed"))
        .stdout(predicate::str::contains("COMMANDS"));
}

#[test]
fn test_cli_version() {
    sheetfeed()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_snapshot_help() {
    sheetfeed()
        .args(["snapshot", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("snapshot envelope"));
}

// ═══════════════════════════════════════════════════════════════════════════
// SNAPSHOT
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_snapshot_default_sheet() {
    let dir = TempDir::new().unwrap();
    let path = fixture(&dir);

    let output = sheetfeed().arg("snapshot").arg(&path).output().unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["success"], true);
    assert_eq!(json["sheet"], "Buford - GA");
    assert_eq!(json["totalUnits"], 3);
    assert_eq!(json["data"][0]["price"], 1200);
    assert_eq!(json["data"][1]["price"], 950.5);
    assert!(json["data"][2]["price"].is_null());
}

#[test]
fn test_snapshot_with_location() {
    let dir = TempDir::new().unwrap();
    let path = fixture(&dir);

    sheetfeed()
        .arg("snapshot")
        .arg(&path)
        .args(["--location", "Concord"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"sheet\":\"Concord - NC\""))
        .stdout(predicate::str::contains("\"totalUnits\":2"));
}

#[test]
fn test_snapshot_unknown_location_prints_failure() {
    let dir = TempDir::new().unwrap();
    let path = fixture(&dir);

    sheetfeed()
        .arg("snapshot")
        .arg(&path)
        .args(["-l", "UnknownTab"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"success\":false"))
        .stdout(predicate::str::contains("Failed to fetch data from Google Sheet"));
}

#[test]
fn test_snapshot_missing_file_prints_failure() {
    sheetfeed()
        .args(["snapshot", "/nonexistent/units.xlsx"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"success\":false"));
}

#[test]
fn test_snapshot_uses_config_source_and_mode() {
    let dir = TempDir::new().unwrap();
    fixture(&dir);
    let config = dir.path().join("sheetfeed.yaml");
    fs::write(&config, "source: units.json\nmode: single\n").unwrap();

    let output = sheetfeed()
        .args(["snapshot", "--location", "Concord", "--config"])
        .arg(&config)
        .output()
        .unwrap();

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["success"], true);
    assert!(json.get("sheet").is_none());
    assert_eq!(json["totalUnits"], 3);
}

// ═══════════════════════════════════════════════════════════════════════════
// STATS, CATALOG, MENU
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_stats_json() {
    let dir = TempDir::new().unwrap();
    let path = fixture(&dir);

    sheetfeed()
        .arg("stats")
        .arg(&path)
        .arg("--json")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            r#"{"available":1,"sold":0,"reserved":1,"leased":1}"#,
        ));
}

#[test]
fn test_stats_table() {
    let dir = TempDir::new().unwrap();
    let path = fixture(&dir);

    sheetfeed()
        .arg("stats")
        .arg(&path)
        .args(["-l", "Concord"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Concord - NC"))
        .stdout(predicate::str::contains("sold"));
}

#[test]
fn test_stats_without_source_fails() {
    sheetfeed()
        .arg("stats")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no data source given"));
}

#[test]
fn test_catalog_json() {
    sheetfeed()
        .args(["catalog", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"defaultLocation\":\"Buford - GA\""));
}

#[test]
fn test_catalog_from_config() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("sheetfeed.yaml");
    fs::write(
        &config,
        "locations:\n  - key: Austin\n    sheet: Austin - TX\n",
    )
    .unwrap();

    sheetfeed()
        .args(["catalog", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Austin - TX"))
        .stdout(predicate::str::contains("Buford").not());
}

#[test]
fn test_menu() {
    sheetfeed()
        .arg("menu")
        .assert()
        .success()
        .stdout(predicate::str::contains("Storage Caves Map"))
        .stdout(predicate::str::contains("open-large-dialog"));
}
