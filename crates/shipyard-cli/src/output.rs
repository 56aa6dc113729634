//! Output formatting for design reports.
//!
//! Text renderers return `String`s so handlers decide where they go; JSON
//! output is written straight to stdout.

use std::fmt::Write as _;
use std::io::{self, Write};

use clap::ValueEnum;
use serde::Serialize;

use shipyard_lib::derive::{engine_cost, engine_mass};
use shipyard_lib::reference::{
    available_engine_ids, engine_spec, performance, vehicles_available, CatalogItem, EngineSpec,
    TechLevel,
};
use shipyard_lib::{
    component_lines, DesignSummary, EngineType, Hull, ShipDesign, StaffRequirements, Violation,
};

/// How reporting commands print their results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Write `value` to stdout as pretty JSON followed by a newline.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> io::Result<()> {
    let mut stdout = io::stdout();
    serde_json::to_writer_pretty(&mut stdout, value).map_err(io::Error::other)?;
    stdout.write_all(b"\n")?;
    Ok(())
}

/// Full human-readable report for one design.
pub fn format_design(design: &ShipDesign, summary: &DesignSummary) -> String {
    let hull = design.hull;
    let mut out = String::new();

    let _ = writeln!(out, "Design: {}", design.name);
    if let Some(description) = &design.description {
        let _ = writeln!(out, "  {description}");
    }
    let _ = writeln!(out, "Hull: {}, {}", hull, design.configuration);
    let _ = writeln!(out, "Tech level: {}", design.tech_level);
    let _ = writeln!(out, "Fuel endurance: {} weeks", design.fuel_weeks);

    let _ = writeln!(out, "\nEngines:");
    for (index, engine) in design.engines.iter().enumerate() {
        let derived = engine.derived(hull);
        let _ = writeln!(
            out,
            "  [{index}] {:<28} {:>8.2} t {:>9.2} MCr",
            engine.label(),
            derived.mass,
            derived.cost
        );
    }

    let _ = writeln!(out, "\nFittings:");
    if design.fittings.is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    for (index, fitting) in design.fittings.iter().enumerate() {
        let derived = fitting.mass_cost(hull);
        let _ = writeln!(
            out,
            "  [{index}] {:<28} {:>8.2} t {:>9.2} MCr",
            fitting.label(),
            derived.mass,
            derived.cost
        );
    }

    let others: Vec<_> = component_lines(design)
        .into_iter()
        .filter(|line| line.category != "Engines" && line.category != "Fittings")
        .collect();
    if !others.is_empty() {
        let _ = writeln!(out, "\nComponents:");
        for line in others {
            let _ = writeln!(
                out,
                "  {:<10} {:<23} {:>8.2} t {:>9.2} MCr",
                line.category, line.item, line.mass, line.cost
            );
        }
    }

    out.push('\n');
    out.push_str(&format_totals(summary));
    out
}

/// Mass, cost, mounts, crew, and violations.
pub fn format_totals(summary: &DesignSummary) -> String {
    let mut out = String::new();
    let mass = &summary.mass;
    let _ = writeln!(
        out,
        "Mass: {:.2} / {:.2} t ({:.2} remaining){}",
        mass.used,
        mass.total,
        mass.remaining,
        if mass.is_overweight { " OVERWEIGHT" } else { "" }
    );
    let _ = writeln!(out, "Cost: {:.2} MCr", summary.cost.total);
    let _ = writeln!(
        out,
        "Mounts: {} of {} used ({} available)",
        summary.mounts.used, summary.mounts.limit, summary.mounts.available
    );
    let _ = writeln!(out, "Crew: {}", format_staff(&summary.staff));
    out.push_str(&format_violations(&summary.violations));
    out
}

fn format_staff(staff: &StaffRequirements) -> String {
    let parts = [
        ("pilot", staff.pilot),
        ("navigator", staff.navigator),
        ("engineers", staff.engineers),
        ("gunners", staff.gunners),
        ("service", staff.service),
        ("stewards", staff.stewards),
        ("nurses", staff.nurses),
        ("surgeons", staff.surgeons),
        ("techs", staff.techs),
    ];
    let listed: Vec<String> = parts
        .iter()
        .filter(|(_, count)| *count > 0)
        .map(|(role, count)| format!("{role} {count}"))
        .collect();
    format!("{} (total {})", listed.join(", "), staff.total)
}

/// Either `Status: valid` or one line per violation.
pub fn format_violations(violations: &[Violation]) -> String {
    if violations.is_empty() {
        return "Status: valid\n".to_string();
    }
    let mut out = format!("Violations ({}):\n", violations.len());
    for violation in violations {
        let _ = writeln!(out, "  - {violation}");
    }
    out
}

/// One line per saved design.
pub fn format_design_list(summaries: &[DesignSummary]) -> String {
    if summaries.is_empty() {
        return "No saved designs.\n".to_string();
    }
    let mut out = format!("Saved designs ({}):\n", summaries.len());
    let _ = writeln!(
        out,
        "{:<32} {:>6} {:>10} {:>10}  {}",
        "Name", "Tons", "Used", "Cost", "Status"
    );
    for summary in summaries {
        let status = match summary.violations.len() {
            0 => "valid".to_string(),
            1 => "1 violation".to_string(),
            n => format!("{n} violations"),
        };
        let _ = writeln!(
            out,
            "{:<32} {:>6} {:>10.2} {:>10.2}  {}",
            summary.name, summary.tonnage, summary.mass.used, summary.cost.total, status
        );
    }
    out
}

/// A drive id available at a hull, with its rating and derived figures.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngineOption {
    pub id: char,
    pub performance: u8,
    /// Derived mass at this hull; identical for every drive type.
    pub mass: f64,
    pub power_plant_cost: f64,
    pub jump_cost: f64,
    pub maneuver_cost: f64,
    pub baseline_power_plant: EngineSpec,
    pub baseline_jump: EngineSpec,
    pub baseline_maneuver: EngineSpec,
}

/// Every drive id with a rating at `hull`, in catalog order.
pub fn engine_options(hull: Hull) -> Vec<EngineOption> {
    let tonnage = hull.tonnage();
    available_engine_ids(hull)
        .into_iter()
        .filter_map(|id| {
            let rating = performance(id, hull)?;
            Some(EngineOption {
                id: id.letter(),
                performance: rating,
                mass: engine_mass(tonnage, rating),
                power_plant_cost: engine_cost(EngineType::PowerPlant, tonnage, rating),
                jump_cost: engine_cost(EngineType::Jump, tonnage, rating),
                maneuver_cost: engine_cost(EngineType::Maneuver, tonnage, rating),
                baseline_power_plant: engine_spec(id, EngineType::PowerPlant),
                baseline_jump: engine_spec(id, EngineType::Jump),
                baseline_maneuver: engine_spec(id, EngineType::Maneuver),
            })
        })
        .collect()
}

pub fn format_engine_table(hull: Hull, options: &[EngineOption]) -> String {
    let mut out = format!("Drives available for {hull}:\n");
    let _ = writeln!(
        out,
        "{:<3} {:>6} {:>8} {:>9} {:>9} {:>9}  {}",
        "ID", "Rating", "Mass", "PP Cost", "J Cost", "M Cost", "Spec PP/J/M (t)"
    );
    for option in options {
        let _ = writeln!(
            out,
            "{:<3} {:>6} {:>8.2} {:>9.2} {:>9.2} {:>9.2}  {}/{}/{}",
            option.id,
            option.performance,
            option.mass,
            option.power_plant_cost,
            option.jump_cost,
            option.maneuver_cost,
            option.baseline_power_plant.mass,
            option.baseline_jump.mass,
            option.baseline_maneuver.mass
        );
    }
    out
}

/// Vehicle catalog rows open to `tech_level`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleOption {
    pub slug: &'static str,
    pub name: &'static str,
    pub mass: f64,
    pub cost: f64,
    pub min_tech_rank: u8,
    pub service_staff: f64,
}

pub fn vehicle_options(tech_level: TechLevel) -> Vec<VehicleOption> {
    vehicles_available(tech_level)
        .into_iter()
        .map(|vehicle| VehicleOption {
            slug: vehicle.slug(),
            name: vehicle.label(),
            mass: vehicle.unit_mass(),
            cost: vehicle.unit_cost(),
            min_tech_rank: vehicle.min_tech_rank(),
            service_staff: vehicle.service_staff_per_unit(),
        })
        .collect()
}

pub fn format_vehicle_table(tech_level: TechLevel, options: &[VehicleOption]) -> String {
    let mut out = format!("Vehicles available at tech level {tech_level}:\n");
    let _ = writeln!(
        out,
        "{:<14} {:>8} {:>8} {:>5} {:>6}",
        "Vehicle", "Mass", "Cost", "TL", "Staff"
    );
    for option in options {
        let _ = writeln!(
            out,
            "{:<14} {:>8.2} {:>8.2} {:>5} {:>6.2}",
            option.name, option.mass, option.cost, option.min_tech_rank, option.service_staff
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use shipyard_lib::design_summary;

    #[test]
    fn fresh_design_report_lists_indices_and_violations() {
        let design = ShipDesign::new("Scout");
        let text = format_design(&design, &design_summary(&design));
        assert!(text.contains("Design: Scout"));
        assert!(text.contains("[0] Power Plant A (P-2)"));
        assert!(text.contains("[0] Comms/Sensors"), "{text}");
        assert!(text.contains("Mass: 41.00 / 100.00 t (59.00 remaining)"));
        assert!(text.contains("Violations (2):"));
        assert!(text.contains("design has no bridge"));
    }

    #[test]
    fn staff_line_skips_empty_roles() {
        let staff = StaffRequirements {
            pilot: 1,
            navigator: 1,
            engineers: 2,
            total: 4,
            ..Default::default()
        };
        assert_eq!(
            format_staff(&staff),
            "pilot 1, navigator 1, engineers 2 (total 4)"
        );
    }

    #[test]
    fn engine_options_match_performance_table() {
        let hull = Hull::from_tonnage(100).unwrap();
        let options = engine_options(hull);
        let ids: Vec<char> = options.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec!['A', 'B', 'C']);
        assert_eq!(options[0].performance, 2);
        assert!((options[0].mass - 4.0).abs() < 1e-9);
        assert!((options[0].maneuver_cost - 2.0).abs() < 1e-9);
        assert!((options[1].baseline_jump.mass - 15.0).abs() < 1e-9);
    }

    #[test]
    fn vehicle_table_grows_with_tech_level() {
        let low = vehicle_options(TechLevel::A);
        let high = vehicle_options(TechLevel::H);
        assert!(low.len() < high.len());
        assert!(low.iter().all(|v| v.min_tech_rank <= 10));
        assert!(format_vehicle_table(TechLevel::H, &high).contains("Shuttle"));
    }

    #[test]
    fn empty_list_is_reported() {
        assert_eq!(format_design_list(&[]), "No saved designs.\n");
    }
}
