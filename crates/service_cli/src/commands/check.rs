//! Check command implementation
//!
//! Validates the settings and catalog and reports methods for which no
//! break-even volume exists.

use std::io::Write;

use infra_config::AppConfig;
use model_core::types::ReferenceData;
use tracing::{info, warn};

use super::load_catalog;
use crate::Result;

/// Writes a summary of the loaded settings and catalog.
pub fn write_report(
    out: &mut impl Write,
    config: &AppConfig,
    catalog: &ReferenceData,
) -> Result<()> {
    let source = match &config.catalog_path {
        Some(path) => path.display().to_string(),
        None => "built-in standard catalog".to_string(),
    };
    writeln!(out, "Catalog:       {}", source)?;
    writeln!(out, "Log level:     {}", config.log_level)?;
    writeln!(out, "Output format: {}", config.output_format)?;
    writeln!(out, "View mode:     {}", config.view_mode)?;
    writeln!(
        out,
        "Entries:       {} methods, {} demand scenarios, {} levers",
        catalog.methods().len(),
        catalog.demands().len(),
        catalog.levers().len()
    )?;

    let degenerate: Vec<_> = catalog.degenerate_methods().collect();
    if degenerate.is_empty() {
        writeln!(out, "All methods have a positive contribution margin")?;
    } else {
        for method in degenerate {
            writeln!(
                out,
                "Warning: {} has no break-even (variable cost ${:.2} >= unit price ${:.2})",
                method.id(),
                method.variable_cost_per_unit(),
                catalog.unit_price()
            )?;
        }
    }
    writeln!(out, "Configuration OK")?;
    Ok(())
}

/// Run the check command
pub fn run(config: &AppConfig) -> Result<()> {
    info!("Checking configuration...");

    let catalog = load_catalog(config)?;
    let degenerate = catalog.degenerate_methods().count();
    if degenerate > 0 {
        warn!("{} method(s) without a break-even volume", degenerate);
    }

    write_report(&mut std::io::stdout().lock(), config, &catalog)?;
    info!("Check complete");
    Ok(())
}
