//! Calculate command implementation
//!
//! Builds a scenario session, applies the requested selections and renders
//! the resulting income statement.

use std::collections::BTreeSet;
use std::io::Write;
use std::sync::Arc;

use infra_config::OutputFormat;
use model_core::engine::CalculationResult;
use model_core::scenario::{ScenarioSession, ViewMode};
use model_core::types::ReferenceData;
use tracing::info;

use crate::render;
use crate::Result;

/// Applies the selections to a fresh session and returns its result.
///
/// Repeated lever ids count once. Levers the view mode hides are rejected.
pub fn execute(
    catalog: Arc<ReferenceData>,
    method: Option<&str>,
    demand: Option<&str>,
    levers: &[String],
    mode: ViewMode,
) -> Result<CalculationResult> {
    let mut session = ScenarioSession::with_view_mode(catalog, mode);

    if let Some(method) = method {
        session.select_method(method)?;
    }
    if let Some(demand) = demand {
        session.select_demand(demand)?;
    }

    let levers: BTreeSet<&str> = levers.iter().map(String::as_str).collect();
    for lever in levers {
        session.toggle_lever(lever)?;
    }

    Ok(session.calculate()?)
}

/// Writes one result in the requested format.
pub fn write_result(
    out: &mut impl Write,
    result: &CalculationResult,
    catalog: &ReferenceData,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Table => render::write_statement(out, result, catalog),
        OutputFormat::Json => render::write_json(out, result),
        OutputFormat::Csv => render::write_csv(out, [result]),
    }
}

/// Run the calculate command
pub fn run(
    catalog: Arc<ReferenceData>,
    method: Option<&str>,
    demand: Option<&str>,
    levers: &[String],
    mode: ViewMode,
    format: OutputFormat,
) -> Result<()> {
    info!("Calculating scenario...");
    info!("  View mode: {}", mode);
    info!("  Levers: {}", levers.len());

    let result = execute(Arc::clone(&catalog), method, demand, levers, mode)?;
    write_result(&mut std::io::stdout().lock(), &result, &catalog, format)?;

    info!("Calculation complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CliError;
    use model_core::types::ModelError;

    fn catalog() -> Arc<ReferenceData> {
        Arc::new(ReferenceData::standard())
    }

    fn levers(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_defaults_when_nothing_selected() {
        let result = execute(catalog(), None, None, &[], ViewMode::Combined).unwrap();
        assert_eq!(result.method.as_str(), "coPacker");
        assert_eq!(result.demand.as_str(), "medium");
        assert_eq!(result.volume, 500_000);
    }

    #[test]
    fn test_full_selection() {
        let result = execute(
            catalog(),
            Some("newPlant"),
            Some("low"),
            &levers(&["cutSeniorSales"]),
            ViewMode::Combined,
        )
        .unwrap();
        assert_eq!(result.volume, 329_000);
        assert_eq!(result.income.operating_expenses.selling_marketing, 200_000.0);
    }

    #[test]
    fn test_repeated_lever_counts_once() {
        let result = execute(
            catalog(),
            None,
            None,
            &levers(&["hireSalesperson", "hireSalesperson"]),
            ViewMode::Combined,
        )
        .unwrap();
        assert_eq!(result.volume, 575_000);
    }

    #[test]
    fn test_hidden_lever_rejected() {
        let err = execute(
            catalog(),
            None,
            None,
            &levers(&["pauseRD"]),
            ViewMode::Growth,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            CliError::Model(ModelError::LeverNotPermitted { .. })
        ));
    }

    #[test]
    fn test_unknown_method_rejected() {
        let err = execute(catalog(), Some("barn"), None, &[], ViewMode::Combined).unwrap_err();
        assert!(matches!(
            err,
            CliError::Model(ModelError::InvalidReference { .. })
        ));
    }

    #[test]
    fn test_render_csv_single_row() {
        let catalog = catalog();
        let result = execute(Arc::clone(&catalog), None, None, &[], ViewMode::Combined).unwrap();
        let mut out = Vec::new();
        write_result(&mut out, &result, &catalog, OutputFormat::Csv).unwrap();
        assert_eq!(String::from_utf8(out).unwrap().lines().count(), 2);
    }
}
