//! Catalog command implementation
//!
//! Lists the production methods, demand scenarios and levers available to
//! `calculate` and `sweep`.

use std::io::Write;

use infra_config::OutputFormat;
use model_core::types::{LeverKind, ReferenceData};
use tracing::info;

use crate::render::{format_delta, format_number, format_statement_value, write_json};
use crate::{CliError, Result};

fn write_table(out: &mut impl Write, catalog: &ReferenceData) -> Result<()> {
    let base = catalog.base_costs();
    writeln!(out, "Unit price: ${:.2}", catalog.unit_price())?;
    writeln!(
        out,
        "Base costs: Selling & Marketing {}, Brand / R&D {}",
        format_statement_value(base.selling_marketing),
        format_statement_value(base.brand_rd)
    )?;
    writeln!(out)?;

    writeln!(out, "Production methods")?;
    for method in catalog.methods() {
        let margin = catalog.unit_price() - method.variable_cost_per_unit();
        let margin = if margin > 0.0 {
            format!("CM ${:.2}", margin)
        } else {
            "CM undefined".to_string()
        };
        writeln!(
            out,
            "  {:<18}{:<24}variable ${:<8.2}plant {:<14}{}",
            method.id(),
            method.name(),
            method.variable_cost_per_unit(),
            format_statement_value(method.fixed_plant_operating_cost()),
            margin
        )?;
    }
    writeln!(out)?;

    writeln!(out, "Demand scenarios")?;
    for demand in catalog.demands() {
        writeln!(
            out,
            "  {:<18}{:<24}{} pints",
            demand.id(),
            demand.name(),
            format_number(demand.base_volume() as f64)
        )?;
    }

    for (kind, title) in [
        (LeverKind::Growth, "Growth levers"),
        (LeverKind::Defensive, "Defensive levers"),
    ] {
        writeln!(out)?;
        writeln!(out, "{}", title)?;
        for lever in catalog.levers_of(kind) {
            writeln!(
                out,
                "  {:<18}{:<24}x{:<7.2}{} {}",
                lever.id(),
                lever.name(),
                lever.volume_multiplier(),
                format_delta(lever.cost_delta()),
                lever.cost_category().label()
            )?;
        }
    }
    writeln!(out)?;

    writeln!(
        out,
        "Defaults: {} / {}",
        catalog.default_method(),
        catalog.default_demand()
    )?;
    Ok(())
}

/// Writes the catalog in the requested format.
pub fn write_catalog(
    out: &mut impl Write,
    catalog: &ReferenceData,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Table => write_table(out, catalog),
        OutputFormat::Json => write_json(out, catalog),
        OutputFormat::Csv => Err(CliError::InvalidArgument(
            "csv output is not available for catalog. Supported: table, json".to_string(),
        )),
    }
}

/// Run the catalog command
pub fn run(catalog: &ReferenceData, format: OutputFormat) -> Result<()> {
    info!("Listing catalog...");
    write_catalog(&mut std::io::stdout().lock(), catalog, format)
}
