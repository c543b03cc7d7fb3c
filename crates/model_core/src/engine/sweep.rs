//! Scenario grid sweep.
//!
//! Evaluates one lever selection against every production method × demand
//! scenario pair. Grid points are independent, so they are computed in
//! parallel with rayon; each point owns its own state snapshot and calls the
//! same pure [`calculate`].

use std::cmp::Ordering;
use std::collections::BTreeSet;

use rayon::prelude::*;

use crate::scenario::ScenarioState;
use crate::types::{DemandId, LeverId, MethodId, ModelError, ReferenceData};

use super::calculate::calculate;
use super::result::CalculationResult;

/// One method × demand combination and its result.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SweepPoint {
    /// Production method
    pub method: MethodId,
    /// Demand scenario
    pub demand: DemandId,
    /// Calculation for this pair
    pub result: CalculationResult,
}

/// Calculates every method × demand pair for the given levers.
///
/// Points are returned method-major in catalog order. Unknown lever ids fail
/// the whole sweep with `InvalidReference`.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeSet;
/// use model_core::engine::sweep;
/// use model_core::types::ReferenceData;
///
/// let catalog = ReferenceData::standard();
/// let points = sweep(&catalog, &BTreeSet::new()).unwrap();
/// assert_eq!(points.len(), 9);
/// assert_eq!(points[0].method.as_str(), "coPacker");
/// assert_eq!(points[0].demand.as_str(), "low");
/// ```
pub fn sweep(
    catalog: &ReferenceData,
    levers: &BTreeSet<LeverId>,
) -> Result<Vec<SweepPoint>, ModelError> {
    for id in levers {
        catalog.lever(id.as_str())?;
    }

    let grid: Vec<(&MethodId, &DemandId)> = catalog
        .methods()
        .iter()
        .flat_map(|m| catalog.demands().iter().map(move |d| (m.id(), d.id())))
        .collect();

    grid.par_iter()
        .map(|&(method, demand)| {
            let state = ScenarioState::with_selection(
                method.clone(),
                demand.clone(),
                levers.iter().cloned(),
            );
            calculate(&state, catalog).map(|result| SweepPoint {
                method: method.clone(),
                demand: demand.clone(),
                result,
            })
        })
        .collect()
}

/// Point with the highest operating income.
pub fn most_profitable(points: &[SweepPoint]) -> Option<&SweepPoint> {
    points.iter().max_by(|a, b| {
        a.result
            .income
            .operating_income
            .partial_cmp(&b.result.income.operating_income)
            .unwrap_or(Ordering::Equal)
    })
}
