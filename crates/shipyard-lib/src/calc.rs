//! Mass, cost, and crew aggregation over a `ShipDesign` snapshot.
//!
//! Every function here is a pure read of the snapshot. Engine mass and cost
//! are re-derived from the current hull and rating rather than read from the
//! cached fields on [`Engine`](crate::design::Engine).

use serde::Serialize;

use crate::derive::{
    drone_service_staff, engineers, medical_staff, mount_limit, stewards, total_fuel_mass,
    vehicle_service_staff, MassCost,
};
use crate::design::{saturating_sum, total_quantity, Item, ShipDesign};
use crate::reference::{Berth, CatalogItem, EngineType};
use crate::validate::{validate_design, Violation};

/// Tons taken by one missile reload.
pub const MISSILE_RELOAD_MASS: f64 = 1.0;
/// Price of one missile reload ton.
pub const MISSILE_RELOAD_COST: f64 = 1.0;
/// Tons taken by one sand reload.
pub const SAND_RELOAD_MASS: f64 = 1.0;
/// Price of one sand reload ton.
pub const SAND_RELOAD_COST: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MassCalculation {
    /// Hull tonnage available.
    pub total: f64,
    /// Tonnage consumed by components, fuel, and reloads.
    pub used: f64,
    /// `total - used`; negative when overweight.
    pub remaining: f64,
    pub is_overweight: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CostCalculation {
    pub total: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StaffRequirements {
    pub pilot: u32,
    pub navigator: u32,
    pub engineers: u32,
    pub gunners: u32,
    pub service: u32,
    pub stewards: u32,
    pub nurses: u32,
    pub surgeons: u32,
    pub techs: u32,
    pub total: u32,
}

/// Mount occupancy for weapons and defenses combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MountUsage {
    pub limit: u32,
    pub used: u32,
    pub available: u32,
}

impl MountUsage {
    pub fn is_over_allocated(&self) -> bool {
        self.used > self.limit
    }
}

/// One priced line of a design: a component group, fuel, or reloads.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentLine {
    pub category: &'static str,
    pub item: String,
    pub mass: f64,
    pub cost: f64,
}

/// Every mass/cost contribution of `design`, in display order.
///
/// [`calculate_mass`] and [`calculate_cost`] are sums over this list, so any
/// projection built from it reports the same totals.
pub fn component_lines(design: &ShipDesign) -> Vec<ComponentLine> {
    let hull = design.hull;
    let mut lines = Vec::new();

    for engine in &design.engines {
        let derived = engine.derived(hull);
        lines.push(line("Engines", engine.label(), derived));
    }

    for fitting in &design.fittings {
        lines.push(line("Fittings", fitting.label(), fitting.mass_cost(hull)));
    }

    let fuel = design_fuel_mass(design);
    if fuel > 0.0 {
        lines.push(line(
            "Fuel",
            format!("Fuel ({} weeks)", design.fuel_weeks),
            MassCost::new(fuel, 0.0),
        ));
    }

    push_items(&mut lines, &design.weapons);
    push_items(&mut lines, &design.defenses);
    push_items(&mut lines, &design.berths);
    push_items(&mut lines, &design.facilities);
    push_items(&mut lines, &design.cargo);
    push_items(&mut lines, &design.vehicles);
    push_items(&mut lines, &design.drones);

    if design.missile_reloads > 0 {
        let units = f64::from(design.missile_reloads);
        lines.push(line(
            "Reloads",
            "Missile Reloads".to_string(),
            MassCost::new(units * MISSILE_RELOAD_MASS, units * MISSILE_RELOAD_COST),
        ));
    }
    if design.sand_reloads > 0 {
        let units = f64::from(design.sand_reloads);
        lines.push(line(
            "Reloads",
            "Sand Reloads".to_string(),
            MassCost::new(units * SAND_RELOAD_MASS, units * SAND_RELOAD_COST),
        ));
    }

    lines
}

fn line(category: &'static str, item: String, mass_cost: MassCost) -> ComponentLine {
    ComponentLine {
        category,
        item,
        mass: mass_cost.mass,
        cost: mass_cost.cost,
    }
}

fn push_items<K: CatalogItem>(lines: &mut Vec<ComponentLine>, items: &[Item<K>]) {
    for item in items.iter().filter(|item| item.quantity > 0) {
        lines.push(line(
            K::CATEGORY.label(),
            format!("{} x{}", item.kind.label(), item.quantity),
            item.mass_cost(),
        ));
    }
}

/// Fuel mass at the design's highest jump and maneuver ratings.
pub fn design_fuel_mass(design: &ShipDesign) -> f64 {
    total_fuel_mass(
        design.hull.tonnage(),
        design.max_performance(EngineType::Jump).unwrap_or(0),
        design.max_performance(EngineType::Maneuver).unwrap_or(0),
        design.fuel_weeks,
    )
}

pub fn calculate_mass(design: &ShipDesign) -> MassCalculation {
    let total = f64::from(design.hull.tonnage());
    let used: f64 = component_lines(design).iter().map(|line| line.mass).sum();
    let remaining = total - used;
    MassCalculation {
        total,
        used,
        remaining,
        is_overweight: remaining < 0.0,
    }
}

pub fn calculate_cost(design: &ShipDesign) -> CostCalculation {
    CostCalculation {
        total: component_lines(design).iter().map(|line| line.cost).sum(),
    }
}

/// Weapons and defenses against the hull's shared mount limit.
pub fn mount_usage(design: &ShipDesign) -> MountUsage {
    let limit = mount_limit(design.hull.tonnage());
    let used = total_quantity(&design.weapons).saturating_add(total_quantity(&design.defenses));
    MountUsage {
        limit,
        used,
        available: limit.saturating_sub(used),
    }
}

pub fn calculate_staff_requirements(design: &ShipDesign) -> StaffRequirements {
    let hull = design.hull;
    let engine_masses: Vec<f64> = design
        .engines
        .iter()
        .map(|engine| engine.derived(hull).mass)
        .collect();

    let gunners = saturating_sum(
        design
            .weapons
            .iter()
            .filter(|item| item.kind.is_crewed())
            .map(|item| item.quantity),
    )
    .saturating_add(total_quantity(&design.defenses));

    let staterooms = saturating_sum(
        design
            .berths
            .iter()
            .filter(|item| Berth::is_stateroom(item.kind))
            .map(|item| item.quantity),
    );

    let medical = medical_staff(&design.facilities);

    let mut staff = StaffRequirements {
        pilot: 1,
        navigator: 1,
        engineers: engineers(hull.tonnage(), &engine_masses),
        gunners,
        service: vehicle_service_staff(&design.vehicles)
            .saturating_add(drone_service_staff(&design.drones)),
        stewards: stewards(staterooms),
        nurses: medical.nurses,
        surgeons: medical.surgeons,
        techs: medical.techs,
        total: 0,
    };
    staff.total = saturating_sum([
        staff.pilot,
        staff.navigator,
        staff.engineers,
        staff.gunners,
        staff.service,
        staff.stewards,
        staff.nurses,
        staff.surgeons,
        staff.techs,
    ]);
    staff
}

/// Everything a front end shows for one design.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DesignSummary {
    pub name: String,
    pub tonnage: u32,
    pub hull_code: char,
    pub mass: MassCalculation,
    pub cost: CostCalculation,
    pub staff: StaffRequirements,
    pub mounts: MountUsage,
    pub violations: Vec<Violation>,
}

pub fn design_summary(design: &ShipDesign) -> DesignSummary {
    DesignSummary {
        name: design.name.clone(),
        tonnage: design.hull.tonnage(),
        hull_code: design.hull.code(),
        mass: calculate_mass(design),
        cost: calculate_cost(design),
        staff: calculate_staff_requirements(design),
        mounts: mount_usage(design),
        violations: validate_design(design),
    }
}
