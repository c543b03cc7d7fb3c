//! Session façade: mutate the scenario, get a fresh result back.
//!
//! A [`ScenarioSession`] owns one [`ScenarioState`] and an [`Arc`] of the
//! shared catalog. Each mutating call validates, applies the view-mode
//! policy, updates the state and returns a freshly computed
//! [`CalculationResult`]. Sessions are independent of each other; the catalog
//! is the only thing they share and it is never mutated.

use std::sync::Arc;

use tracing::debug;

use crate::engine::{calculate, CalculationResult};
use crate::types::{ModelError, ReferenceData};

use super::policy::ViewMode;
use super::state::ScenarioState;

/// One user's scenario selection bound to a catalog.
#[derive(Clone, Debug)]
pub struct ScenarioSession {
    catalog: Arc<ReferenceData>,
    state: ScenarioState,
    view_mode: ViewMode,
}

impl ScenarioSession {
    /// New session with default selections and no lever restriction.
    pub fn new(catalog: Arc<ReferenceData>) -> Self {
        Self::with_view_mode(catalog, ViewMode::default())
    }

    /// New session starting in `view_mode`.
    pub fn with_view_mode(catalog: Arc<ReferenceData>, view_mode: ViewMode) -> Self {
        let state = ScenarioState::new(&catalog);
        Self {
            catalog,
            state,
            view_mode,
        }
    }

    /// Shared catalog.
    pub fn catalog(&self) -> &ReferenceData {
        &self.catalog
    }

    /// Current selection.
    pub fn state(&self) -> &ScenarioState {
        &self.state
    }

    /// Current view mode.
    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    /// Result for the current selection.
    pub fn calculate(&self) -> Result<CalculationResult, ModelError> {
        calculate(&self.state, &self.catalog)
    }

    /// Selects a production method and recalculates.
    pub fn select_method(&mut self, id: &str) -> Result<CalculationResult, ModelError> {
        self.state.select_method(&self.catalog, id)?;
        debug!(method = id, "Selected production method");
        self.calculate()
    }

    /// Selects a demand scenario and recalculates.
    pub fn select_demand(&mut self, id: &str) -> Result<CalculationResult, ModelError> {
        self.state.select_demand(&self.catalog, id)?;
        debug!(demand = id, "Selected demand scenario");
        self.calculate()
    }

    /// Toggles a lever and recalculates.
    ///
    /// Fails with `LeverNotPermitted`, leaving the state untouched, when the
    /// current view mode does not allow levers of that kind to be switched on.
    /// Switching a lever off is always allowed.
    pub fn toggle_lever(&mut self, id: &str) -> Result<CalculationResult, ModelError> {
        let kind = self.catalog.lever(id)?.kind();
        if !self.state.is_active(id) && !self.view_mode.permits(kind) {
            return Err(ModelError::LeverNotPermitted {
                lever: id.to_string(),
                mode: self.view_mode,
            });
        }

        let active = self.state.toggle_lever(&self.catalog, id)?;
        debug!(lever = id, active, "Toggled lever");
        self.calculate()
    }

    /// Deactivates every lever and recalculates.
    pub fn reset_all(&mut self) -> Result<CalculationResult, ModelError> {
        self.state.reset_all();
        debug!("Reset all levers");
        self.calculate()
    }

    /// Switches view mode, drops levers the new mode hides, and recalculates.
    pub fn select_view_mode(&mut self, mode: ViewMode) -> Result<CalculationResult, ModelError> {
        let before = self.state.active_levers().len();
        self.view_mode = mode;
        mode.enforce(&mut self.state, &self.catalog);
        debug!(
            mode = %mode,
            dropped = before - self.state.active_levers().len(),
            "Selected view mode"
        );
        self.calculate()
    }
}
