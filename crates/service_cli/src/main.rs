//! whatif CLI - Income Statement Scenarios from the Command Line
//!
//! Operational entry point for the what-if scenario model.
//!
//! # Commands
//!
//! - `whatif calculate --method <id> --demand <id> --lever <id>...` - Income statement
//!   for one scenario
//! - `whatif catalog` - List methods, demand scenarios and levers
//! - `whatif sweep --lever <id>...` - Every method x demand pair for one lever selection
//! - `whatif check` - Validate settings and catalog
//!
//! # Architecture
//!
//! As part of the **S**ervice layer, this crate wires `infra_config`
//! (settings, catalog files) to `model_core` (scenario state and engine).

use std::path::Path;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use infra_config::AppConfig;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod error;
mod render;

pub use error::{CliError, Result};

/// What-if income statement model CLI
#[derive(Parser)]
#[command(name = "whatif")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "config/whatif.toml")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate the income statement for one scenario
    Calculate {
        /// Production method id (catalog default if omitted)
        #[arg(short, long)]
        method: Option<String>,

        /// Demand scenario id (catalog default if omitted)
        #[arg(short, long)]
        demand: Option<String>,

        /// Lever to activate; repeat for several
        #[arg(short, long = "lever")]
        levers: Vec<String>,

        /// View mode (basic, growth, defensive, combined)
        #[arg(long)]
        mode: Option<String>,

        /// Output format (table, json, csv)
        #[arg(short, long)]
        format: Option<String>,
    },

    /// List the catalog
    Catalog {
        /// Output format (table, json)
        #[arg(short, long)]
        format: Option<String>,
    },

    /// Calculate every method x demand pair for one lever selection
    Sweep {
        /// Lever to activate; repeat for several
        #[arg(short, long = "lever")]
        levers: Vec<String>,

        /// View mode (basic, growth, defensive, combined)
        #[arg(long)]
        mode: Option<String>,

        /// Output format (table, json, csv)
        #[arg(short, long)]
        format: Option<String>,
    },

    /// Check configuration and catalog
    Check,
}

fn init_tracing(config: &AppConfig, verbose: bool) {
    let level = if verbose { "debug" } else { config.log_level.as_str() };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load_with_env_and_validate(Path::new(&cli.config))?;
    init_tracing(&config, cli.verbose);

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    match cli.command {
        Commands::Calculate {
            method,
            demand,
            levers,
            mode,
            format,
        } => {
            let format = commands::resolve_format(format.as_deref(), &config)?;
            let mode = commands::resolve_view_mode(mode.as_deref(), &config)?;
            let catalog = Arc::new(commands::load_catalog(&config)?);
            commands::calculate::run(
                catalog,
                method.as_deref(),
                demand.as_deref(),
                &levers,
                mode,
                format,
            )
        }
        Commands::Catalog { format } => {
            let format = commands::resolve_format(format.as_deref(), &config)?;
            let catalog = commands::load_catalog(&config)?;
            commands::catalog::run(&catalog, format)
        }
        Commands::Sweep {
            levers,
            mode,
            format,
        } => {
            let format = commands::resolve_format(format.as_deref(), &config)?;
            let mode = commands::resolve_view_mode(mode.as_deref(), &config)?;
            let catalog = commands::load_catalog(&config)?;
            commands::sweep::run(&catalog, &levers, mode, format)
        }
        Commands::Check => commands::check::run(&config),
    }
}
