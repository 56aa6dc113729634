mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use shipyard_cli::output::OutputFormat;
use shipyard_lib::reference::{Category, Configuration};
use shipyard_lib::{EngineId, EngineType, Hull, TechLevel};

use commands::design::NewDesign;
use commands::edit::FittingArg;

#[derive(Parser, Debug)]
#[command(author, version, about = "Starship design calculator and validator")]
struct Cli {
    /// Directory holding saved designs (overrides SHIPYARD_DATA_DIR).
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Output format for reports.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create and save a new design with default drives and comms.
    New {
        name: String,
        /// Hull tonnage (e.g. 400) or code (e.g. D).
        #[arg(long, default_value = "100")]
        hull: Hull,
        /// Tech level letter (A-H) or rank (10-17).
        #[arg(long, default_value = "A")]
        tech_level: TechLevel,
        #[arg(long, default_value = "cylinder")]
        configuration: Configuration,
        #[arg(long)]
        description: Option<String>,
    },
    /// List saved designs with their totals.
    List,
    /// Show a design's components, totals, crew, and violations.
    Show { name: String },
    /// Check a design against the engineering rules; exits 1 on violations.
    Validate { name: String },
    /// Delete a saved design.
    Delete { name: String },
    /// Export a design's components as CSV.
    Export {
        name: String,
        /// Write to this file instead of stdout.
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Move a design to another hull size, re-rating its drives.
    SetHull { name: String, hull: Hull },
    /// Change a design's tech level.
    SetTechLevel { name: String, tech_level: TechLevel },
    /// Install a drive (power-plant, jump, or maneuver).
    AddEngine {
        name: String,
        engine_type: EngineType,
        engine_id: EngineId,
    },
    /// Remove the drive at INDEX (as listed by `show`).
    RemoveEngine { name: String, index: usize },
    /// Swap the drive id of the engine at INDEX.
    SetEngineId {
        name: String,
        index: usize,
        engine_id: EngineId,
    },
    /// Install a fitting.
    Fitting {
        name: String,
        #[command(subcommand)]
        fitting: FittingArg,
    },
    /// Remove the fitting at INDEX (as listed by `show`).
    RemoveFitting { name: String, index: usize },
    /// Set how many units of a catalog entry are installed; 0 removes it.
    Set {
        name: String,
        /// weapon, defense, berth, facility, cargo, vehicle, or drone.
        category: Category,
        kind: String,
        quantity: u32,
    },
    /// Change fuel endurance and reload stock.
    Fuel {
        name: String,
        #[arg(long)]
        weeks: Option<u32>,
        #[arg(long)]
        missile_reloads: Option<u32>,
        #[arg(long)]
        sand_reloads: Option<u32>,
    },
    /// List drive ids available at a hull size.
    Engines { hull: Hull },
    /// List vehicles available at a tech level.
    Vehicles {
        #[arg(long, default_value = "H")]
        tech_level: TechLevel,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let format = cli.format;
    let data_dir = cli.data_dir.as_deref();

    match cli.command {
        Command::New {
            name,
            hull,
            tech_level,
            configuration,
            description,
        } => commands::design::handle_new(
            &mut commands::open_store(data_dir)?,
            NewDesign {
                name,
                hull,
                tech_level,
                configuration,
                description,
            },
            format,
        ),
        Command::List => commands::design::handle_list(&commands::open_store(data_dir)?, format),
        Command::Show { name } => {
            commands::design::handle_show(&commands::open_store(data_dir)?, &name, format)
        }
        Command::Validate { name } => {
            commands::design::handle_validate(&commands::open_store(data_dir)?, &name, format)
        }
        Command::Delete { name } => {
            commands::design::handle_delete(&mut commands::open_store(data_dir)?, &name)
        }
        Command::Export { name, output } => commands::design::handle_export(
            &commands::open_store(data_dir)?,
            &name,
            output.as_deref(),
        ),
        Command::SetHull { name, hull } => {
            commands::edit::handle_set_hull(&mut commands::open_store(data_dir)?, &name, hull, format)
        }
        Command::SetTechLevel { name, tech_level } => commands::edit::handle_set_tech_level(
            &mut commands::open_store(data_dir)?,
            &name,
            tech_level,
            format,
        ),
        Command::AddEngine {
            name,
            engine_type,
            engine_id,
        } => commands::edit::handle_add_engine(
            &mut commands::open_store(data_dir)?,
            &name,
            engine_type,
            engine_id,
            format,
        ),
        Command::RemoveEngine { name, index } => commands::edit::handle_remove_engine(
            &mut commands::open_store(data_dir)?,
            &name,
            index,
            format,
        ),
        Command::SetEngineId {
            name,
            index,
            engine_id,
        } => commands::edit::handle_set_engine_id(
            &mut commands::open_store(data_dir)?,
            &name,
            index,
            engine_id,
            format,
        ),
        Command::Fitting { name, fitting } => commands::edit::handle_fitting(
            &mut commands::open_store(data_dir)?,
            &name,
            fitting,
            format,
        ),
        Command::RemoveFitting { name, index } => commands::edit::handle_remove_fitting(
            &mut commands::open_store(data_dir)?,
            &name,
            index,
            format,
        ),
        Command::Set {
            name,
            category,
            kind,
            quantity,
        } => commands::edit::handle_set_quantity(
            &mut commands::open_store(data_dir)?,
            &name,
            category,
            &kind,
            quantity,
            format,
        ),
        Command::Fuel {
            name,
            weeks,
            missile_reloads,
            sand_reloads,
        } => commands::edit::handle_fuel(
            &mut commands::open_store(data_dir)?,
            &name,
            weeks,
            missile_reloads,
            sand_reloads,
            format,
        ),
        Command::Engines { hull } => commands::catalog::handle_engines(hull, format),
        Command::Vehicles { tech_level } => commands::catalog::handle_vehicles(tech_level, format),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
