//! The `ShipDesign` snapshot and its component types.
//!
//! - [`engine`] - installed drives and the re-derivation of their mass/cost
//! - [`fitting`] - bridge, fuel tank, comms/sensors, and launch tube fittings
//! - [`item`] - quantity-based catalog lines
//!
//! A `ShipDesign` is a plain value. Edits never mutate a design in place;
//! the functions in [`crate::policy`] return a new snapshot.

pub mod engine;
pub mod fitting;
pub mod item;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::reference::{
    Berth, Cargo, Configuration, Defense, Drone, EngineType, Facility, Hull, TechLevel, Vehicle,
    Weapon,
};

pub use engine::Engine;
pub use fitting::{Fitting, FittingKind};
pub use item::{saturating_sum, total_quantity, Item, Stocked};

/// Longest design name accepted, in characters.
pub const MAX_NAME_LEN: usize = 32;

/// Longest description accepted, in characters.
pub const MAX_DESCRIPTION_LEN: usize = 250;

/// Fuel endurance given to new designs.
pub const DEFAULT_FUEL_WEEKS: u32 = 4;

/// A complete starship design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipDesign {
    pub name: String,
    pub tech_level: TechLevel,
    pub hull: Hull,
    pub configuration: Configuration,
    pub fuel_weeks: u32,
    #[serde(default)]
    pub missile_reloads: u32,
    #[serde(default)]
    pub sand_reloads: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub engines: Vec<Engine>,
    #[serde(default)]
    pub fittings: Vec<Fitting>,
    #[serde(default)]
    pub weapons: Vec<Item<Weapon>>,
    #[serde(default)]
    pub defenses: Vec<Item<Defense>>,
    #[serde(default)]
    pub berths: Vec<Item<Berth>>,
    #[serde(default)]
    pub facilities: Vec<Item<Facility>>,
    #[serde(default)]
    pub cargo: Vec<Item<Cargo>>,
    #[serde(default)]
    pub vehicles: Vec<Item<Vehicle>>,
    #[serde(default)]
    pub drones: Vec<Item<Drone>>,
}

impl ShipDesign {
    /// A fresh design on the smallest hull with minimal drives and a
    /// standard comms suite.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_hull(name, Hull::SMALLEST)
    }

    /// A fresh design on `hull`.
    pub fn with_hull(name: impl Into<String>, hull: Hull) -> Self {
        Self {
            name: name.into(),
            tech_level: TechLevel::default(),
            hull,
            configuration: Configuration::default(),
            fuel_weeks: DEFAULT_FUEL_WEEKS,
            missile_reloads: 0,
            sand_reloads: 0,
            description: None,
            engines: default_engines(hull),
            fittings: vec![Fitting::CommsSensors {
                tier: Default::default(),
            }],
            weapons: Vec::new(),
            defenses: Vec::new(),
            berths: Vec::new(),
            facilities: Vec::new(),
            cargo: Vec::new(),
            vehicles: Vec::new(),
            drones: Vec::new(),
        }
    }

    /// Check the stored fields: name and description length, fuel endurance,
    /// and fitting payloads.
    pub fn validate_fields(&self) -> Result<()> {
        let name_len = self.name.trim().chars().count();
        if name_len == 0 {
            return Err(Error::InvalidDesign {
                message: "design name must not be empty".to_string(),
            });
        }
        if name_len > MAX_NAME_LEN {
            return Err(Error::InvalidDesign {
                message: format!("design name must be at most {MAX_NAME_LEN} characters"),
            });
        }
        if let Some(description) = &self.description {
            if description.chars().count() > MAX_DESCRIPTION_LEN {
                return Err(Error::InvalidDesign {
                    message: format!(
                        "description must be at most {MAX_DESCRIPTION_LEN} characters"
                    ),
                });
            }
        }
        if self.fuel_weeks == 0 {
            return Err(Error::InvalidDesign {
                message: "fuel_weeks must be at least 1".to_string(),
            });
        }
        for fitting in &self.fittings {
            fitting.validate()?;
        }
        Ok(())
    }

    /// Installed engines of one type.
    pub fn engines_of(&self, engine_type: EngineType) -> impl Iterator<Item = &Engine> {
        self.engines
            .iter()
            .filter(move |engine| engine.engine_type == engine_type)
    }

    /// Highest rating among engines of `engine_type`, if any are installed.
    pub fn max_performance(&self, engine_type: EngineType) -> Option<u8> {
        self.engines_of(engine_type)
            .map(|engine| engine.performance)
            .max()
    }

    pub fn has_fitting(&self, kind: FittingKind) -> bool {
        self.fittings.iter().any(|fitting| fitting.kind() == kind)
    }

    /// Catalog lines of one kind.
    pub fn items<K: Stocked>(&self) -> &[Item<K>] {
        K::items(self)
    }

    /// Units installed of one catalog entry.
    pub fn quantity_of<K: Stocked>(&self, kind: K) -> u32 {
        self.items::<K>()
            .iter()
            .filter(|item| item.kind == kind)
            .map(|item| item.quantity)
            .fold(0, u32::saturating_add)
    }
}

/// One power plant, one jump drive, and one maneuver drive at the lowest
/// rating the hull allows.
pub fn default_engines(hull: Hull) -> Vec<Engine> {
    EngineType::ALL
        .iter()
        .map(|&engine_type| Engine::minimal(engine_type, hull))
        .collect()
}
