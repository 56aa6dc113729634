//! Read-only reference listings.

use anyhow::Result;

use shipyard_cli::output::{
    engine_options, format_engine_table, format_vehicle_table, print_json, vehicle_options,
    OutputFormat,
};
use shipyard_lib::{Hull, TechLevel};

/// List every drive id rated at `hull`.
pub fn handle_engines(hull: Hull, format: OutputFormat) -> Result<()> {
    let options = engine_options(hull);
    match format {
        OutputFormat::Json => print_json(&options)?,
        OutputFormat::Text => print!("{}", format_engine_table(hull, &options)),
    }
    Ok(())
}

/// List vehicles a ship of `tech_level` may carry.
pub fn handle_vehicles(tech_level: TechLevel, format: OutputFormat) -> Result<()> {
    let options = vehicle_options(tech_level);
    match format {
        OutputFormat::Json => print_json(&options)?,
        OutputFormat::Text => print!("{}", format_vehicle_table(tech_level, &options)),
    }
    Ok(())
}
