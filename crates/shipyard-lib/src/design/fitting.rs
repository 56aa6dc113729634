//! Hull fittings: bridge, fuel tankage, comms/sensors, and launch tubes.

use serde::{Deserialize, Serialize};

use crate::derive::{bridge_mass_cost, MassCost};
use crate::error::{Error, Result};
use crate::reference::{
    CatalogItem, CommsTier, Hull, Vehicle, FUEL_TANK_COST_PER_TON, LAUNCH_TUBE_COST_PER_TON,
};

/// A fitting installed in the hull.
///
/// Bridges and comms suites are singletons: a design holds at most one of
/// each, enforced by [`crate::policy::upsert_fitting`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Fitting {
    Bridge { half: bool },
    FuelTank { tons: f64 },
    CommsSensors { tier: CommsTier },
    LaunchTube { vehicle: Vehicle },
}

/// Discriminant of a [`Fitting`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FittingKind {
    Bridge,
    FuelTank,
    CommsSensors,
    LaunchTube,
}

impl FittingKind {
    /// Whether a design may hold more than one fitting of this kind.
    pub fn is_singleton(self) -> bool {
        matches!(self, FittingKind::Bridge | FittingKind::CommsSensors)
    }
}

impl Fitting {
    pub fn kind(&self) -> FittingKind {
        match self {
            Fitting::Bridge { .. } => FittingKind::Bridge,
            Fitting::FuelTank { .. } => FittingKind::FuelTank,
            Fitting::CommsSensors { .. } => FittingKind::CommsSensors,
            Fitting::LaunchTube { .. } => FittingKind::LaunchTube,
        }
    }

    /// Check the fitting's payload. Fuel tanks need a finite, positive tonnage.
    pub fn validate(&self) -> Result<()> {
        match *self {
            Fitting::FuelTank { tons } if !tons.is_finite() || tons <= 0.0 => {
                Err(Error::InvalidDesign {
                    message: format!("fuel tank tonnage must be a positive number, got {tons}"),
                })
            }
            _ => Ok(()),
        }
    }

    /// Mass and cost for this fitting on `hull`.
    pub fn mass_cost(&self, hull: Hull) -> MassCost {
        match *self {
            Fitting::Bridge { half } => bridge_mass_cost(hull.tonnage(), half),
            Fitting::FuelTank { tons } => MassCost::new(tons, tons * FUEL_TANK_COST_PER_TON),
            Fitting::CommsSensors { tier } => MassCost::new(tier.mass(), tier.cost()),
            Fitting::LaunchTube { vehicle } => {
                let mass = vehicle.unit_mass();
                MassCost::new(mass, mass * LAUNCH_TUBE_COST_PER_TON)
            }
        }
    }

    pub fn label(&self) -> String {
        match self {
            Fitting::Bridge { half: false } => "Bridge".to_string(),
            Fitting::Bridge { half: true } => "Half Bridge".to_string(),
            Fitting::FuelTank { tons } => format!("Fuel Tank ({tons} tons)"),
            Fitting::CommsSensors { tier } => format!("Comms/Sensors ({tier})"),
            Fitting::LaunchTube { vehicle } => format!("Launch Tube ({vehicle})"),
        }
    }
}
