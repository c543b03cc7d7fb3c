//! Sweep command implementation
//!
//! Evaluates one lever selection across every production method and demand
//! scenario.

use std::collections::BTreeSet;
use std::io::Write;

use infra_config::OutputFormat;
use model_core::engine::{most_profitable, sweep, BreakEvenStatus, SweepPoint};
use model_core::scenario::ViewMode;
use model_core::types::{LeverId, ModelError, ReferenceData};
use tracing::info;

use crate::render::{format_number, format_statement_value, write_csv, write_json};
use crate::Result;

fn write_table(
    out: &mut impl Write,
    points: &[SweepPoint],
    catalog: &ReferenceData,
) -> Result<()> {
    writeln!(out, "┌──────────────┬──────────┬────────────┬──────────────┬────────────┐")?;
    writeln!(out, "│ Method       │ Demand   │ Volume     │ Op. Income   │ Break-even │")?;
    writeln!(out, "├──────────────┼──────────┼────────────┼──────────────┼────────────┤")?;
    for point in points {
        let method = catalog.method(point.method.as_str())?;
        let demand = catalog.demand(point.demand.as_str())?;
        let break_even = match &point.result.break_even {
            BreakEvenStatus::Defined(be) => format_number(be.volume as f64),
            BreakEvenStatus::Undefined { .. } => "n/a".to_string(),
        };
        writeln!(
            out,
            "│ {:<12} │ {:<8} │ {:>10} │ {:>12} │ {:>10} │",
            method.name(),
            demand.name(),
            format_number(point.result.volume as f64),
            format_statement_value(point.result.income.operating_income),
            break_even
        )?;
    }
    writeln!(out, "└──────────────┴──────────┴────────────┴──────────────┴────────────┘")?;

    if let Some(best) = most_profitable(points) {
        writeln!(
            out,
            "Most profitable: {} / {} ({})",
            catalog.method(best.method.as_str())?.name(),
            catalog.demand(best.demand.as_str())?.name(),
            format_statement_value(best.result.income.operating_income)
        )?;
    }
    Ok(())
}

/// Writes sweep points in the requested format.
pub fn write_points(
    out: &mut impl Write,
    points: &[SweepPoint],
    catalog: &ReferenceData,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Table => write_table(out, points, catalog),
        OutputFormat::Json => write_json(out, points),
        OutputFormat::Csv => write_csv(out, points.iter().map(|p| &p.result)),
    }
}

/// Resolves lever ids, rejecting any the view mode does not permit.
pub fn permitted_levers(
    catalog: &ReferenceData,
    levers: &[String],
    mode: ViewMode,
) -> Result<BTreeSet<LeverId>> {
    let mut permitted = BTreeSet::new();
    for id in levers {
        let lever = catalog.lever(id)?;
        if !mode.permits(lever.kind()) {
            return Err(ModelError::LeverNotPermitted {
                lever: id.clone(),
                mode,
            }
            .into());
        }
        permitted.insert(lever.id().clone());
    }
    Ok(permitted)
}

/// Run the sweep command
pub fn run(
    catalog: &ReferenceData,
    levers: &[String],
    mode: ViewMode,
    format: OutputFormat,
) -> Result<()> {
    info!("Sweeping method x demand grid...");
    info!("  View mode: {}", mode);
    info!("  Levers: {}", levers.len());

    let levers = permitted_levers(catalog, levers, mode)?;
    let points = sweep(catalog, &levers)?;
    write_points(&mut std::io::stdout().lock(), &points, catalog, format)?;

    info!("Sweep complete: {} points", points.len());
    Ok(())
}
