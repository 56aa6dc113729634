//! Shipyard library entry points.
//!
//! This crate holds the starship design model, the reference tables it is
//! priced against, and the pure calculations over a design snapshot: mass,
//! cost, crew, mount usage, and engineering-rule validation. Edits go through
//! [`policy`], which returns new snapshots instead of mutating in place.
//! Front ends (the CLI) should only depend on the functions exported here
//! instead of reimplementing behavior.

pub mod calc;
pub mod derive;
pub mod design;
pub mod error;
pub mod export;
pub mod policy;
pub mod reference;
pub mod store;
pub mod validate;

pub use calc::{
    calculate_cost, calculate_mass, calculate_staff_requirements, component_lines, mount_usage,
    design_summary, ComponentLine, CostCalculation, DesignSummary, MassCalculation, MountUsage,
    StaffRequirements,
};
pub use design::{Engine, Fitting, FittingKind, Item, ShipDesign};
pub use error::{Error, Result};
pub use export::{export_rows, write_csv, ExportRow};
pub use reference::{EngineId, EngineType, Hull, TechLevel};
pub use store::{resolve_data_dir, DesignStore, JsonFileStore, MemoryStore, SaveOutcome};
pub use validate::{validate_design, validate_engine_requirements, Violation};
