//! Static reference tables.
//!
//! - [`hull`] - hull sizes, tech levels, and hull configurations
//! - [`engines`] - engine performance and engine specification tables
//! - [`catalog`] - weapon, defense, berth, facility, cargo, vehicle, and drone catalogs
//! - [`fittings`] - bridge breakpoints and comms/sensor tiers
//!
//! Nothing in here has behavior beyond keyed lookup.

pub mod catalog;
pub mod engines;
pub mod fittings;
pub mod hull;

pub use catalog::{
    vehicles_available, Berth, Cargo, CatalogItem, Category, Defense, Drone, Facility, Vehicle,
    Weapon, HEAVY_DRONE_MASS,
};
pub use engines::{
    available_engine_ids, engine_spec, find_engine_id, performance, EngineId, EngineSpec,
    EngineType, MAX_PERFORMANCE, MIN_PERFORMANCE,
};
pub use fittings::{
    CommsTier, BRIDGE_BANDS, FUEL_TANK_COST_PER_TON, HALF_BRIDGE_COST_FACTOR,
    LAUNCH_TUBE_COST_PER_TON,
};
pub use hull::{Configuration, Hull, TechLevel};
