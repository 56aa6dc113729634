//! Integration tests for the `shipyard` binary.
//!
//! Each test runs against its own temporary data directory.

use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn cli(data_dir: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("shipyard");
    cmd.env("RUST_LOG", "error")
        .env_remove("SHIPYARD_DATA_DIR")
        .arg("--data-dir")
        .arg(data_dir.path());
    cmd
}

fn new_design(data_dir: &TempDir, name: &str, extra: &[&str]) {
    cli(data_dir)
        .arg("new")
        .arg(name)
        .args(extra)
        .assert()
        .success();
}

#[test]
fn new_design_is_saved_and_shown() {
    let dir = TempDir::new().expect("temp dir");
    cli(&dir)
        .args(["new", "Scout"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Design: Scout"))
        .stdout(predicate::str::contains("Mass: 41.00 / 100.00 t"));

    assert!(dir.path().join("designs.json").exists());

    cli(&dir)
        .args(["show", "scout"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[0] Power Plant A (P-2)"))
        .stdout(predicate::str::contains("Cost: 10.50 MCr"));
}

#[test]
fn duplicate_names_are_rejected() {
    let dir = TempDir::new().expect("temp dir");
    new_design(&dir, "Scout", &[]);
    cli(&dir)
        .args(["new", "SCOUT"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn validate_exits_nonzero_until_design_is_complete() {
    let dir = TempDir::new().expect("temp dir");
    new_design(&dir, "Courier", &["--hull", "200"]);

    cli(&dir)
        .args(["validate", "Courier"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("design has no bridge"))
        .stdout(predicate::str::contains("design has no commissary"));

    cli(&dir)
        .args(["fitting", "Courier", "bridge"])
        .assert()
        .success();
    cli(&dir)
        .args(["set", "Courier", "facility", "commissary", "1"])
        .assert()
        .success();

    cli(&dir)
        .args(["validate", "Courier"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Status: valid"));
}

#[test]
fn validate_json_lists_rules() {
    let dir = TempDir::new().expect("temp dir");
    new_design(&dir, "Courier", &[]);

    let output = cli(&dir)
        .args(["--format", "json", "validate", "Courier"])
        .output()
        .expect("run validate");
    assert_eq!(output.status.code(), Some(1));
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json output");
    assert_eq!(report["valid"], serde_json::Value::Bool(false));
    assert_eq!(report["violations"][0]["rule"], "missing_bridge");
}

#[test]
fn removing_last_power_plant_fails() {
    let dir = TempDir::new().expect("temp dir");
    new_design(&dir, "Scout", &[]);
    cli(&dir)
        .args(["remove-engine", "Scout", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot remove the last Power Plant"));

    // Maneuver drives are optional.
    cli(&dir)
        .args(["remove-engine", "Scout", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Maneuver Drive").not());
}

#[test]
fn unavailable_engine_id_is_rejected() {
    let dir = TempDir::new().expect("temp dir");
    new_design(&dir, "Scout", &[]);
    cli(&dir)
        .args(["add-engine", "Scout", "jump", "Z"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not available for a 100-ton hull"));
}

#[test]
fn power_plant_removal_derates_drives() {
    let dir = TempDir::new().expect("temp dir");
    new_design(&dir, "Cruiser", &["--hull", "D"]);
    cli(&dir)
        .args(["set-engine-id", "Cruiser", "0", "H"])
        .assert()
        .success();
    cli(&dir)
        .args(["set-engine-id", "Cruiser", "1", "H"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Jump Drive H (J-4)"));
    cli(&dir)
        .args(["add-engine", "Cruiser", "power-plant", "D"])
        .assert()
        .success();
    cli(&dir)
        .args(["remove-engine", "Cruiser", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Jump Drive D (J-2)"));
}

#[test]
fn export_writes_csv_with_total() {
    let dir = TempDir::new().expect("temp dir");
    new_design(&dir, "Scout", &[]);

    cli(&dir)
        .args(["export", "Scout"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("category,item,mass,cost"))
        .stdout(predicate::str::contains("Total,Scout,41.0,10.5"));

    let target = dir.path().join("scout.csv");
    cli(&dir)
        .args(["export", "Scout", "--output"])
        .arg(&target)
        .assert()
        .success();
    let csv = fs::read_to_string(&target).expect("csv written");
    assert!(csv.contains("Engines,Jump Drive A (J-2),4.0,4.0"));
}

#[test]
fn unknown_design_suggests_names() {
    let dir = TempDir::new().expect("temp dir");
    new_design(&dir, "Far Trader", &[]);
    cli(&dir)
        .args(["show", "Far Trade"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Did you mean 'Far Trader'?"));
}

#[test]
fn list_and_delete() {
    let dir = TempDir::new().expect("temp dir");
    new_design(&dir, "Scout", &[]);
    new_design(&dir, "Courier", &["--hull", "300"]);

    let output = cli(&dir)
        .args(["--format", "json", "list"])
        .output()
        .expect("run list");
    assert!(output.status.success());
    let listed: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json output");
    assert_eq!(listed.as_array().map(Vec::len), Some(2));

    cli(&dir)
        .args(["delete", "courier"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted design 'Courier'"));
    cli(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved designs (1)"))
        .stdout(predicate::str::contains("Courier").not());
}

#[test]
fn fuel_and_reloads_change_mass() {
    let dir = TempDir::new().expect("temp dir");
    new_design(&dir, "Scout", &[]);
    // 4 extra weeks of maneuver fuel (8 t) plus 2 missile reloads (2 t).
    cli(&dir)
        .args(["fuel", "Scout", "--weeks", "8", "--missile-reloads", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Mass: 51.00 / 100.00 t"));

    cli(&dir)
        .args(["fuel", "Scout", "--weeks", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("fuel_weeks must be at least 1"));
}

#[test]
fn fuel_tank_rejects_bad_tonnage_and_keeps_store_readable() {
    let dir = TempDir::new().expect("temp dir");
    new_design(&dir, "Other", &[]);
    new_design(&dir, "Tanker", &[]);
    for tons in ["NaN", "inf", "0"] {
        cli(&dir)
            .args(["fitting", "Tanker", "fuel-tank", tons])
            .assert()
            .failure()
            .stderr(predicate::str::contains("fuel tank tonnage must be a positive number"));
    }

    cli(&dir)
        .args(["fitting", "Tanker", "fuel-tank", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Fuel Tank (10 tons)"));
    cli(&dir)
        .args(["show", "Other"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Design: Other"));
}

#[test]
fn vehicles_respect_tech_level() {
    let dir = TempDir::new().expect("temp dir");
    cli(&dir)
        .args(["vehicles", "--tech-level", "A"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Air/Raft"))
        .stdout(predicate::str::contains("Fighter").not());

    new_design(&dir, "Carrier", &["--hull", "1000"]);
    cli(&dir)
        .args(["set", "Carrier", "vehicle", "fighter", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("requires a higher tech level"));
}

#[test]
fn engines_lists_table_for_hull() {
    let dir = TempDir::new().expect("temp dir");
    cli(&dir)
        .args(["engines", "400"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Drives available for 400 tons (D)"))
        .stdout(predicate::str::contains("\nA ").not());
}

#[test]
fn data_dir_can_come_from_environment() {
    let dir = TempDir::new().expect("temp dir");
    let mut cmd = cargo_bin_cmd!("shipyard");
    cmd.env("RUST_LOG", "error")
        .env("SHIPYARD_DATA_DIR", dir.path())
        .args(["new", "Scout"])
        .assert()
        .success();
    assert!(dir.path().join("designs.json").exists());
}
