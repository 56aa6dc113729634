//! Handlers for creating, listing, showing, validating, deleting, and
//! exporting saved designs.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use shipyard_cli::output::{
    format_design, format_design_list, format_violations, print_json, OutputFormat,
};
use shipyard_lib::reference::Configuration;
use shipyard_lib::{
    design_summary, write_csv, DesignStore, DesignSummary, Error as LibError, Hull,
    JsonFileStore, SaveOutcome, ShipDesign, TechLevel, Violation,
};

/// Exit status of `validate` when the design breaks a rule.
pub const EXIT_INVALID: i32 = 1;

/// Options for a fresh design.
#[derive(Debug, Clone)]
pub struct NewDesign {
    pub name: String,
    pub hull: Hull,
    pub tech_level: TechLevel,
    pub configuration: Configuration,
    pub description: Option<String>,
}

#[derive(Serialize)]
struct DesignReport<'a> {
    design: &'a ShipDesign,
    summary: DesignSummary,
}

#[derive(Serialize)]
struct ValidationReport<'a> {
    name: &'a str,
    valid: bool,
    violations: &'a [Violation],
}

pub fn handle_new(store: &mut JsonFileStore, args: NewDesign, format: OutputFormat) -> Result<()> {
    let mut design = ShipDesign::with_hull(args.name.trim(), args.hull);
    design.tech_level = args.tech_level;
    design.configuration = args.configuration;
    design.description = args.description;

    match store
        .save_design(&design)
        .with_context(|| format!("failed to save design '{}'", design.name))?
    {
        SaveOutcome::Saved => print_design(&design, format),
        SaveOutcome::Conflict => Err(LibError::DesignNameConflict {
            name: design.name.clone(),
        }
        .into()),
    }
}

pub fn handle_list(store: &JsonFileStore, format: OutputFormat) -> Result<()> {
    let summaries: Vec<DesignSummary> = store
        .load_all_designs()
        .context("failed to load saved designs")?
        .iter()
        .map(design_summary)
        .collect();

    match format {
        OutputFormat::Json => print_json(&summaries)?,
        OutputFormat::Text => print!("{}", format_design_list(&summaries)),
    }
    Ok(())
}

pub fn handle_show(store: &JsonFileStore, name: &str, format: OutputFormat) -> Result<()> {
    let design = store.require(name)?;
    print_design(&design, format)
}

/// Print the violations of a saved design, exiting with status 1 if any.
pub fn handle_validate(store: &JsonFileStore, name: &str, format: OutputFormat) -> Result<()> {
    let design = store.require(name)?;
    let violations = design_summary(&design).violations;

    match format {
        OutputFormat::Json => print_json(&ValidationReport {
            name: &design.name,
            valid: violations.is_empty(),
            violations: &violations,
        })?,
        OutputFormat::Text => print!("{}", format_violations(&violations)),
    }

    if !violations.is_empty() {
        io::stdout().flush()?;
        std::process::exit(EXIT_INVALID);
    }
    Ok(())
}

pub fn handle_delete(store: &mut JsonFileStore, name: &str) -> Result<()> {
    let design = store.require(name)?;
    store
        .delete_by_name(&design.name)
        .with_context(|| format!("failed to delete design '{}'", design.name))?;
    println!("Deleted design '{}'", design.name);
    Ok(())
}

/// Write the CSV export to `output`, or stdout when absent.
pub fn handle_export(store: &JsonFileStore, name: &str, output: Option<&Path>) -> Result<()> {
    let design = store.require(name)?;
    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            write_csv(&design, BufWriter::new(file))
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!("Exported '{}' to {}", design.name, path.display());
        }
        None => {
            let stdout = io::stdout();
            write_csv(&design, stdout.lock()).context("failed to write CSV to stdout")?;
        }
    }
    Ok(())
}

/// Render a design and its summary in the requested format.
pub fn print_design(design: &ShipDesign, format: OutputFormat) -> Result<()> {
    let summary = design_summary(design);
    match format {
        OutputFormat::Json => print_json(&DesignReport { design, summary })?,
        OutputFormat::Text => print!("{}", format_design(design, &summary)),
    }
    Ok(())
}
