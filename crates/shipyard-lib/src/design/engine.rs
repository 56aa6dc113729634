//! Installed engines.

use serde::{Deserialize, Serialize};

use crate::derive::{engine_cost, engine_mass, MassCost};
use crate::error::{Error, Result};
use crate::reference::{find_engine_id, performance, EngineId, EngineType, Hull, MIN_PERFORMANCE};

/// An installed drive.
///
/// `performance` comes from the engine performance table. `mass` and `cost`
/// are a cache of values derived from the hull tonnage and `performance`;
/// they are refreshed by [`Engine::rederive`] whenever either input changes
/// and are never trusted by the aggregation path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Engine {
    pub engine_type: EngineType,
    pub engine_id: EngineId,
    pub performance: u8,
    pub mass: f64,
    pub cost: f64,
}

impl Engine {
    /// Build an engine for `hull`, rejecting ids the table marks unavailable.
    pub fn new(engine_type: EngineType, engine_id: EngineId, hull: Hull) -> Result<Self> {
        let rating = performance(engine_id, hull).ok_or(Error::EngineUnavailable {
            id: engine_id,
            tonnage: hull.tonnage(),
        })?;
        Ok(Self::rated(engine_type, engine_id, rating, hull))
    }

    /// Build an engine at an explicit rating.
    pub fn rated(
        engine_type: EngineType,
        engine_id: EngineId,
        performance: u8,
        hull: Hull,
    ) -> Self {
        Self {
            engine_type,
            engine_id,
            performance,
            mass: 0.0,
            cost: 0.0,
        }
        .rederive(hull)
    }

    /// The smallest-id engine of `engine_type` for `hull`, rated at least 1.
    pub fn minimal(engine_type: EngineType, hull: Hull) -> Self {
        let engine_id = find_engine_id(hull, MIN_PERFORMANCE).unwrap_or(EngineId::FIRST);
        let rating = performance(engine_id, hull)
            .unwrap_or(MIN_PERFORMANCE)
            .max(MIN_PERFORMANCE);
        Self::rated(engine_type, engine_id, rating, hull)
    }

    /// Recompute the cached mass and cost from `hull` and the current rating.
    #[must_use]
    pub fn rederive(mut self, hull: Hull) -> Self {
        let derived = self.derived(hull);
        self.mass = derived.mass;
        self.cost = derived.cost;
        self
    }

    /// Mass and cost at `hull`, ignoring the cached fields.
    pub fn derived(&self, hull: Hull) -> MassCost {
        MassCost::new(
            engine_mass(hull.tonnage(), self.performance),
            engine_cost(self.engine_type, hull.tonnage(), self.performance),
        )
    }

    /// Label like `Jump Drive B (J-2)`.
    pub fn label(&self) -> String {
        let code = match self.engine_type {
            EngineType::PowerPlant => 'P',
            EngineType::Jump => 'J',
            EngineType::Maneuver => 'M',
        };
        format!(
            "{} {} ({}-{})",
            self.engine_type.label(),
            self.engine_id,
            code,
            self.performance
        )
    }
}
