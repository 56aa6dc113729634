//! Handlers that load a saved design, apply one edit, and save the result.
//!
//! Every edit goes through `shipyard_lib::policy`, so rejected edits leave
//! the saved design untouched.

use anyhow::{Context, Result};
use clap::Subcommand;
use tracing::debug;

use shipyard_cli::output::OutputFormat;
use shipyard_lib::design::Fitting;
use shipyard_lib::policy;
use shipyard_lib::reference::{
    Berth, Cargo, Category, CommsTier, Defense, Drone, Facility, Vehicle, Weapon,
};
use shipyard_lib::{
    DesignStore, EngineId, EngineType, Hull, JsonFileStore, Result as LibResult, ShipDesign,
    TechLevel,
};

use super::design::print_design;

/// Fittings installable with `shipyard fitting`.
#[derive(Subcommand, Debug, Clone)]
pub enum FittingArg {
    /// Install a full bridge, replacing any existing bridge.
    Bridge,
    /// Install a half bridge, replacing any existing bridge.
    HalfBridge,
    /// Install a comms/sensor suite, replacing any existing suite.
    Comms {
        /// basic, standard, military, advanced, or very-advanced.
        tier: CommsTier,
    },
    /// Add extra fuel tankage.
    FuelTank {
        /// Tank size in tons.
        tons: f64,
    },
    /// Add a launch tube sized for a vehicle.
    LaunchTube {
        /// Vehicle the tube launches, e.g. `launch` or `ships-boat`.
        vehicle: Vehicle,
    },
}

/// Load `name`, apply `edit`, save, and print the new state.
fn apply_edit<F>(
    store: &mut JsonFileStore,
    name: &str,
    format: OutputFormat,
    edit: F,
) -> Result<()>
where
    F: FnOnce(&ShipDesign) -> LibResult<ShipDesign>,
{
    let design = store.require(name)?;
    let next = edit(&design).with_context(|| format!("cannot edit design '{}'", design.name))?;
    store
        .replace_design(&next)
        .with_context(|| format!("failed to save design '{}'", next.name))?;
    debug!(name = %next.name, "design updated");
    print_design(&next, format)
}

pub fn handle_set_hull(
    store: &mut JsonFileStore,
    name: &str,
    hull: Hull,
    format: OutputFormat,
) -> Result<()> {
    apply_edit(store, name, format, |design| {
        Ok(policy::with_hull(design, hull))
    })
}

pub fn handle_set_tech_level(
    store: &mut JsonFileStore,
    name: &str,
    tech_level: TechLevel,
    format: OutputFormat,
) -> Result<()> {
    apply_edit(store, name, format, |design| {
        Ok(policy::with_tech_level(design, tech_level))
    })
}

pub fn handle_add_engine(
    store: &mut JsonFileStore,
    name: &str,
    engine_type: EngineType,
    engine_id: EngineId,
    format: OutputFormat,
) -> Result<()> {
    apply_edit(store, name, format, |design| {
        policy::add_engine(design, engine_type, engine_id)
    })
}

pub fn handle_remove_engine(
    store: &mut JsonFileStore,
    name: &str,
    index: usize,
    format: OutputFormat,
) -> Result<()> {
    apply_edit(store, name, format, |design| {
        policy::remove_engine(design, index)
    })
}

pub fn handle_set_engine_id(
    store: &mut JsonFileStore,
    name: &str,
    index: usize,
    engine_id: EngineId,
    format: OutputFormat,
) -> Result<()> {
    apply_edit(store, name, format, |design| {
        policy::change_engine_id(design, index, engine_id)
    })
}

pub fn handle_fitting(
    store: &mut JsonFileStore,
    name: &str,
    fitting: FittingArg,
    format: OutputFormat,
) -> Result<()> {
    apply_edit(store, name, format, |design| match fitting {
        FittingArg::Bridge => Ok(policy::upsert_fitting(design, Fitting::Bridge { half: false })),
        FittingArg::HalfBridge => Ok(policy::upsert_fitting(design, Fitting::Bridge { half: true })),
        FittingArg::Comms { tier } => {
            Ok(policy::upsert_fitting(design, Fitting::CommsSensors { tier }))
        }
        FittingArg::FuelTank { tons } => policy::add_fuel_tank(design, tons),
        FittingArg::LaunchTube { vehicle } => policy::add_launch_tube(design, vehicle),
    })
}

pub fn handle_remove_fitting(
    store: &mut JsonFileStore,
    name: &str,
    index: usize,
    format: OutputFormat,
) -> Result<()> {
    apply_edit(store, name, format, |design| {
        policy::remove_fitting(design, index)
    })
}

/// Set the quantity of one catalog entry; zero removes it.
pub fn handle_set_quantity(
    store: &mut JsonFileStore,
    name: &str,
    category: Category,
    kind: &str,
    quantity: u32,
    format: OutputFormat,
) -> Result<()> {
    apply_edit(store, name, format, |design| match category {
        Category::Weapon => Ok(policy::set_quantity(design, kind.parse::<Weapon>()?, quantity)),
        Category::Defense => Ok(policy::set_quantity(design, kind.parse::<Defense>()?, quantity)),
        Category::Berth => Ok(policy::set_quantity(design, kind.parse::<Berth>()?, quantity)),
        Category::Facility => Ok(policy::set_quantity(
            design,
            kind.parse::<Facility>()?,
            quantity,
        )),
        Category::Cargo => Ok(policy::set_quantity(design, kind.parse::<Cargo>()?, quantity)),
        Category::Vehicle => policy::set_vehicle_quantity(design, kind.parse::<Vehicle>()?, quantity),
        Category::Drone => Ok(policy::set_quantity(design, kind.parse::<Drone>()?, quantity)),
    })
}

/// Fuel endurance and reload stock. Unset options keep their saved values.
pub fn handle_fuel(
    store: &mut JsonFileStore,
    name: &str,
    weeks: Option<u32>,
    missile_reloads: Option<u32>,
    sand_reloads: Option<u32>,
    format: OutputFormat,
) -> Result<()> {
    apply_edit(store, name, format, |design| {
        let next = match weeks {
            Some(weeks) => policy::with_fuel_weeks(design, weeks)?,
            None => design.clone(),
        };
        Ok(policy::with_reloads(
            &next,
            missile_reloads.unwrap_or(next.missile_reloads),
            sand_reloads.unwrap_or(next.sand_reloads),
        ))
    })
}
