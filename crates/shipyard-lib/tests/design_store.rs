use std::fs;

use tempfile::tempdir;

use shipyard_lib::design::{Fitting, Item};
use shipyard_lib::reference::Cargo;
use shipyard_lib::store::DESIGNS_FILENAME;
use shipyard_lib::{DesignStore, Error, JsonFileStore, SaveOutcome, ShipDesign};

#[test]
fn json_store_round_trips_designs() {
    let dir = tempdir().expect("temp dir");
    let mut store = JsonFileStore::open(dir.path());
    assert!(store.load_all_designs().expect("empty load").is_empty());

    let mut design = ShipDesign::new("Far Trader");
    design.cargo.push(Item::new(Cargo::Standard, 30));
    design.description = Some("A dependable hauler".to_string());
    assert_eq!(store.save_design(&design).unwrap(), SaveOutcome::Saved);

    let reopened = JsonFileStore::open(dir.path());
    let found = reopened
        .find_by_name("far trader")
        .unwrap()
        .expect("saved design");
    assert_eq!(found, design);
    assert!(dir.path().join(DESIGNS_FILENAME).exists());
}

#[test]
fn json_store_refuses_duplicate_names() {
    let dir = tempdir().expect("temp dir");
    let mut store = JsonFileStore::open(dir.path());
    store.save_design(&ShipDesign::new("Scout")).unwrap();
    assert_eq!(
        store.save_design(&ShipDesign::new("SCOUT")).unwrap(),
        SaveOutcome::Conflict
    );
    assert_eq!(store.load_all_designs().unwrap().len(), 1);
}

#[test]
fn json_store_deletes_by_name() {
    let dir = tempdir().expect("temp dir");
    let mut store = JsonFileStore::open(dir.path());
    store.save_design(&ShipDesign::new("Scout")).unwrap();
    store.save_design(&ShipDesign::new("Courier")).unwrap();

    assert!(store.delete_by_name(" scout ").unwrap());
    assert!(!store.delete_by_name("scout").unwrap());
    let names: Vec<String> = store
        .load_all_designs()
        .unwrap()
        .into_iter()
        .map(|d| d.name)
        .collect();
    assert_eq!(names, vec!["Courier".to_string()]);
}

#[test]
fn missing_design_error_suggests_alternatives() {
    let dir = tempdir().expect("temp dir");
    let mut store = JsonFileStore::open(dir.path());
    store.save_design(&ShipDesign::new("Courier")).unwrap();

    let err = store.require("Couirer").expect_err("no such design");
    let message = err.to_string();
    assert!(message.contains("design not found"), "{message}");
    assert!(message.contains("Did you mean 'Courier'?"), "{message}");
}

#[test]
fn corrupt_file_reports_its_path() {
    let dir = tempdir().expect("temp dir");
    fs::write(dir.path().join(DESIGNS_FILENAME), "{not json").unwrap();
    let store = JsonFileStore::open(dir.path());
    match store.load_all_designs() {
        Err(Error::DesignFile { path, .. }) => assert!(path.ends_with(DESIGNS_FILENAME)),
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn unreadable_fuel_tank_never_reaches_disk() {
    let dir = tempdir().expect("temp dir");
    let mut store = JsonFileStore::open(dir.path());
    store.save_design(&ShipDesign::new("Other")).unwrap();

    let mut tank = ShipDesign::new("Tank");
    tank.fittings.push(Fitting::FuelTank { tons: f64::NAN });
    assert!(matches!(
        store.save_design(&tank),
        Err(Error::InvalidDesign { .. })
    ));

    let designs = JsonFileStore::open(dir.path())
        .load_all_designs()
        .expect("file still parses");
    let names: Vec<_> = designs.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["Other"]);
}

#[test]
fn json_store_replaces_in_one_write() {
    let dir = tempdir().expect("temp dir");
    let mut store = JsonFileStore::open(dir.path());
    store.save_design(&ShipDesign::new("Courier")).unwrap();
    store.save_design(&ShipDesign::new("Scout")).unwrap();

    let mut edited = ShipDesign::new("scout");
    edited.fuel_weeks = 6;
    store.replace_design(&edited).unwrap();

    let designs = JsonFileStore::open(dir.path()).load_all_designs().unwrap();
    assert_eq!(designs.len(), 2);
    assert_eq!(store.require("SCOUT").unwrap().fuel_weeks, 6);

    // A rejected replacement leaves the saved copy alone.
    let mut broken = edited.clone();
    broken.fuel_weeks = 0;
    assert!(store.replace_design(&broken).is_err());
    assert_eq!(store.require("Scout").unwrap().fuel_weeks, 6);
}
