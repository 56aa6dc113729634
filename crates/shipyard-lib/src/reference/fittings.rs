//! Bridge breakpoints and comms/sensor tiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Full-bridge (upper tonnage bound, mass, cost) bands. The last band is open-ended.
pub const BRIDGE_BANDS: [(u32, f64, f64); 3] = [
    (200, 10.0, 0.5),
    (1000, 20.0, 1.0),
    (u32::MAX, 40.0, 2.0),
];

/// Half bridges take half the mass but keep this share of the full-bridge cost.
pub const HALF_BRIDGE_COST_FACTOR: f64 = 0.75;

/// Fuel tank fittings are priced per ton of tankage.
pub const FUEL_TANK_COST_PER_TON: f64 = 0.05;

/// Launch tubes are priced per ton of tube.
pub const LAUNCH_TUBE_COST_PER_TON: f64 = 0.5;

/// Comms and sensor suites, cheapest first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CommsTier {
    Basic,
    #[default]
    Standard,
    Military,
    Advanced,
    VeryAdvanced,
}

impl CommsTier {
    pub const ALL: [CommsTier; 5] = [
        CommsTier::Basic,
        CommsTier::Standard,
        CommsTier::Military,
        CommsTier::Advanced,
        CommsTier::VeryAdvanced,
    ];

    pub fn label(self) -> &'static str {
        match self {
            CommsTier::Basic => "Basic",
            CommsTier::Standard => "Standard",
            CommsTier::Military => "Military",
            CommsTier::Advanced => "Advanced",
            CommsTier::VeryAdvanced => "Very Advanced",
        }
    }

    pub fn mass(self) -> f64 {
        match self {
            CommsTier::Basic => 0.0,
            CommsTier::Standard => 1.0,
            CommsTier::Military => 2.0,
            CommsTier::Advanced => 3.0,
            CommsTier::VeryAdvanced => 5.0,
        }
    }

    pub fn cost(self) -> f64 {
        match self {
            CommsTier::Basic => 0.0,
            CommsTier::Standard => 0.5,
            CommsTier::Military => 2.0,
            CommsTier::Advanced => 4.0,
            CommsTier::VeryAdvanced => 8.0,
        }
    }
}

impl FromStr for CommsTier {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let needle = s.trim().replace(' ', "-");
        CommsTier::ALL
            .iter()
            .copied()
            .find(|tier| tier.label().replace(' ', "-").eq_ignore_ascii_case(&needle))
            .ok_or_else(|| Error::UnknownCatalogEntry {
                category: "Comms".to_string(),
                value: s.trim().to_string(),
            })
    }
}

impl fmt::Display for CommsTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
