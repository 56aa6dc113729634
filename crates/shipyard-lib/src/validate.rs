//! Cross-component engineering rules.
//!
//! Validation never mutates the design and never short-circuits: callers get
//! every violation present in the snapshot so they can show them together.

use serde::Serialize;
use thiserror::Error;

use crate::calc::mount_usage;
use crate::design::{FittingKind, ShipDesign};
use crate::reference::{EngineId, EngineType, Facility};

/// A rule the design currently breaks.
///
/// Violations are soft: a design may be saved and edited in this state, but
/// should not be treated as complete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum Violation {
    #[error("design has no power plant")]
    MissingPowerPlant,

    #[error("design has no jump drive")]
    MissingJumpDrive,

    #[error(
        "{engine_type} {engine_id} is rated {performance}, above the power plant maximum of {max_power_plant}"
    )]
    ExceedsPowerPlant {
        engine_type: EngineType,
        engine_id: EngineId,
        performance: u8,
        max_power_plant: u8,
    },

    #[error("design has no bridge")]
    MissingBridge,

    #[error("design has no commissary")]
    MissingCommissary,

    #[error("weapons and defenses occupy {used} mounts but the hull supports {limit}")]
    MountsOverAllocated { used: u32, limit: u32 },
}

/// Engine rules only: a power plant and a jump drive are present, and no
/// jump or maneuver drive outperforms the best power plant.
pub fn engine_violations(design: &ShipDesign) -> Vec<Violation> {
    let mut violations = Vec::new();

    let max_power_plant = design.max_performance(EngineType::PowerPlant);
    if max_power_plant.is_none() {
        violations.push(Violation::MissingPowerPlant);
    }
    if design.max_performance(EngineType::Jump).is_none() {
        violations.push(Violation::MissingJumpDrive);
    }

    if let Some(max_power_plant) = max_power_plant {
        violations.extend(
            design
                .engines
                .iter()
                .filter(|engine| engine.engine_type != EngineType::PowerPlant)
                .filter(|engine| engine.performance > max_power_plant)
                .map(|engine| Violation::ExceedsPowerPlant {
                    engine_type: engine.engine_type,
                    engine_id: engine.engine_id,
                    performance: engine.performance,
                    max_power_plant,
                }),
        );
    }

    violations
}

/// Whether the engine rules pass.
pub fn validate_engine_requirements(design: &ShipDesign) -> bool {
    engine_violations(design).is_empty()
}

/// Every rule: engines, bridge, commissary, and mount allocation.
pub fn validate_design(design: &ShipDesign) -> Vec<Violation> {
    let mut violations = engine_violations(design);

    if !design.has_fitting(FittingKind::Bridge) {
        violations.push(Violation::MissingBridge);
    }
    if design.quantity_of(Facility::Commissary) == 0 {
        violations.push(Violation::MissingCommissary);
    }

    let mounts = mount_usage(design);
    if mounts.is_over_allocated() {
        violations.push(Violation::MountsOverAllocated {
            used: mounts.used,
            limit: mounts.limit,
        });
    }

    violations
}
