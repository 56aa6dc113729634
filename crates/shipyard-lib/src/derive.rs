//! Pure derivation functions over the reference tables.
//!
//! Everything here is total over domain values: no function in this module
//! returns an error or panics. Products like `tonnage × rating × 0.02` are
//! computed as whole-number products divided by the reciprocal of the rate,
//! so whole-ton results do not pick up floating-point residue. Crew counts
//! saturate at `u32::MAX` instead of overflowing.

use serde::Serialize;

use crate::design::Item;
use crate::reference::{
    CatalogItem, Drone, EngineType, Facility, Vehicle, BRIDGE_BANDS, HALF_BRIDGE_COST_FACTOR,
};

/// Tonnage of heavy drones one service crewman can look after.
pub const HEAVY_DRONE_TONS_PER_STAFF: f64 = 100.0;

/// Tonnage of light drones one service crewman can look after.
pub const LIGHT_DRONE_TONS_PER_STAFF: f64 = 20.0;

/// Staterooms one steward can look after.
pub const STATEROOMS_PER_STEWARD: u32 = 8;

/// Engine mass above which extra engineers are required, per engine.
pub const ENGINEER_MASS_STEP: f64 = 100.0;

/// A (mass, cost) pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MassCost {
    pub mass: f64,
    pub cost: f64,
}

impl MassCost {
    pub fn new(mass: f64, cost: f64) -> Self {
        Self { mass, cost }
    }
}

/// Mass of an engine: `tonnage × performance × 0.02`.
pub fn engine_mass(tonnage: u32, performance: u8) -> f64 {
    f64::from(tonnage * u32::from(performance)) / 50.0
}

/// Cost of an engine: `tonnage × performance × 0.02`, or `× 0.01` for maneuver drives.
pub fn engine_cost(engine_type: EngineType, tonnage: u32, performance: u8) -> f64 {
    f64::from(tonnage * u32::from(performance)) / engine_type.cost_divisor()
}

/// Fuel mass for one jump at the given rating: `tonnage × jump × 0.1`.
pub fn jump_fuel_mass(tonnage: u32, jump_performance: u8) -> f64 {
    f64::from(tonnage * u32::from(jump_performance)) / 10.0
}

/// Maneuver fuel mass: `tonnage × maneuver × 0.01 × weeks`.
pub fn maneuver_fuel_mass(tonnage: u32, maneuver_performance: u8, weeks: u32) -> f64 {
    f64::from(tonnage) * f64::from(maneuver_performance) * f64::from(weeks) / 100.0
}

/// Combined jump and maneuver fuel mass.
pub fn total_fuel_mass(
    tonnage: u32,
    jump_performance: u8,
    maneuver_performance: u8,
    weeks: u32,
) -> f64 {
    jump_fuel_mass(tonnage, jump_performance)
        + maneuver_fuel_mass(tonnage, maneuver_performance, weeks)
}

/// Bridge mass and cost for a hull of `tonnage`.
///
/// A half bridge uses half the full-bridge mass but is priced at
/// [`HALF_BRIDGE_COST_FACTOR`] of the full cost, so it costs more per ton.
pub fn bridge_mass_cost(tonnage: u32, half: bool) -> MassCost {
    let (_, mass, cost) = BRIDGE_BANDS
        .iter()
        .copied()
        .find(|&(upper, _, _)| tonnage <= upper)
        .unwrap_or(BRIDGE_BANDS[BRIDGE_BANDS.len() - 1]);

    if half {
        MassCost::new(mass / 2.0, cost * HALF_BRIDGE_COST_FACTOR)
    } else {
        MassCost::new(mass, cost)
    }
}

/// Mounts shared by weapons and defenses: one per full 100 tons.
pub fn mount_limit(tonnage: u32) -> u32 {
    tonnage / 100
}

/// Service crew for carried vehicles.
///
/// Fractional crew shares round up within each vehicle group before the
/// groups are summed.
pub fn vehicle_service_staff(vehicles: &[Item<Vehicle>]) -> u32 {
    vehicles
        .iter()
        .map(|item| (f64::from(item.quantity) * item.kind.service_staff_per_unit()).ceil() as u32)
        .fold(0, u32::saturating_add)
}

/// Service crew for drones.
///
/// Heavy and light drone tonnage are pooled separately and each pool is
/// rounded up on its own.
pub fn drone_service_staff(drones: &[Item<Drone>]) -> u32 {
    let (heavy, light) = drones.iter().fold((0.0, 0.0), |(heavy, light), item| {
        let tons = f64::from(item.quantity) * item.kind.unit_mass();
        if item.kind.is_heavy() {
            (heavy + tons, light)
        } else {
            (heavy, light + tons)
        }
    });

    let heavy_staff = (heavy / HEAVY_DRONE_TONS_PER_STAFF).ceil() as u32;
    let light_staff = (light / LIGHT_DRONE_TONS_PER_STAFF).ceil() as u32;
    heavy_staff.saturating_add(light_staff)
}

/// Medical crew demanded by installed facilities.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MedicalStaff {
    pub techs: u32,
    pub nurses: u32,
    pub surgeons: u32,
}

/// Autodocs need a tech, medical bays a nurse, surgical bays a surgeon and a nurse.
pub fn medical_staff(facilities: &[Item<Facility>]) -> MedicalStaff {
    facilities
        .iter()
        .fold(MedicalStaff::default(), |mut staff, item| {
            match item.kind {
                Facility::Autodoc => staff.techs = staff.techs.saturating_add(item.quantity),
                Facility::MedicalBay => staff.nurses = staff.nurses.saturating_add(item.quantity),
                Facility::SurgicalBay => {
                    staff.surgeons = staff.surgeons.saturating_add(item.quantity);
                    staff.nurses = staff.nurses.saturating_add(item.quantity);
                }
                _ => {}
            }
            staff
        })
}

/// Engineers required to run the installed engines.
///
/// - 100-ton hulls: one engineer.
/// - 200 and 300-ton hulls: two engineers.
/// - 400 tons and up: one per engine, plus one for every further started
///   100 tons of that engine's mass beyond the first 100.
/// - Any other tonnage: total engine mass over 100, rounded up.
pub fn engineers(tonnage: u32, engine_masses: &[f64]) -> u32 {
    match tonnage {
        100 => 1,
        200..=300 => 2,
        t if t >= 400 => engine_masses
            .iter()
            .map(|&mass| {
                let steps = (mass / ENGINEER_MASS_STEP).ceil() as u32;
                1 + steps.saturating_sub(1)
            })
            .fold(0, u32::saturating_add),
        _ => {
            let total: f64 = engine_masses.iter().sum();
            (total / ENGINEER_MASS_STEP).ceil() as u32
        }
    }
}

/// One steward per eight staterooms, rounded up.
pub fn stewards(staterooms: u32) -> u32 {
    staterooms.div_ceil(STATEROOMS_PER_STEWARD)
}
