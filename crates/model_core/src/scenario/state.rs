//! Scenario selection: production method, demand level and active levers.

use std::collections::BTreeSet;

use crate::types::{DemandId, LeverId, MethodId, ModelError, ReferenceData};

/// The mutable selection driving a calculation.
///
/// Every mutation validates identifiers against the catalog before touching
/// the state, so a failed call leaves the state unchanged. Active levers are
/// kept sorted, which fixes the order in which multipliers are applied.
///
/// # Examples
///
/// ```
/// use model_core::scenario::ScenarioState;
/// use model_core::types::ReferenceData;
///
/// let catalog = ReferenceData::standard();
/// let mut state = ScenarioState::new(&catalog);
/// assert_eq!(state.method().as_str(), "coPacker");
/// assert_eq!(state.demand().as_str(), "medium");
///
/// assert!(state.toggle_lever(&catalog, "hireSalesperson").unwrap());
/// assert!(!state.toggle_lever(&catalog, "hireSalesperson").unwrap());
/// assert!(state.active_levers().is_empty());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScenarioState {
    method: MethodId,
    demand: DemandId,
    active_levers: BTreeSet<LeverId>,
}

impl ScenarioState {
    /// Fresh state with the catalog's default method and demand, no levers.
    pub fn new(catalog: &ReferenceData) -> Self {
        Self {
            method: catalog.default_method().clone(),
            demand: catalog.default_demand().clone(),
            active_levers: BTreeSet::new(),
        }
    }

    /// State with explicit selections.
    ///
    /// Identifiers are not checked here; [`crate::engine::calculate`]
    /// validates them before computing anything.
    pub fn with_selection(
        method: impl Into<MethodId>,
        demand: impl Into<DemandId>,
        levers: impl IntoIterator<Item = LeverId>,
    ) -> Self {
        Self {
            method: method.into(),
            demand: demand.into(),
            active_levers: levers.into_iter().collect(),
        }
    }

    /// Selected production method.
    pub fn method(&self) -> &MethodId {
        &self.method
    }

    /// Selected demand scenario.
    pub fn demand(&self) -> &DemandId {
        &self.demand
    }

    /// Active levers in sorted order.
    pub fn active_levers(&self) -> &BTreeSet<LeverId> {
        &self.active_levers
    }

    /// Whether a lever is active.
    pub fn is_active(&self, id: &str) -> bool {
        self.active_levers.contains(id)
    }

    /// Replaces the selected method.
    pub fn select_method(&mut self, catalog: &ReferenceData, id: &str) -> Result<(), ModelError> {
        self.method = catalog.method(id)?.id().clone();
        Ok(())
    }

    /// Replaces the selected demand scenario.
    pub fn select_demand(&mut self, catalog: &ReferenceData, id: &str) -> Result<(), ModelError> {
        self.demand = catalog.demand(id)?.id().clone();
        Ok(())
    }

    /// Flips a lever on or off, returning whether it is now active.
    pub fn toggle_lever(&mut self, catalog: &ReferenceData, id: &str) -> Result<bool, ModelError> {
        let lever = catalog.lever(id)?;
        if self.active_levers.remove(id) {
            Ok(false)
        } else {
            self.active_levers.insert(lever.id().clone());
            Ok(true)
        }
    }

    /// Deactivates every lever; method and demand are kept.
    pub fn reset_all(&mut self) {
        self.active_levers.clear();
    }

    /// Keeps only the levers for which `keep` returns true.
    pub fn retain_levers(&mut self, keep: impl FnMut(&LeverId) -> bool) {
        self.active_levers.retain(keep);
    }
}
