//! View-mode lever policy.
//!
//! The engine accepts any lever combination. Callers that present a
//! restricted view (only growth levers, only defensive levers, or none) use
//! [`ViewMode`] to decide which levers may be toggled and which must be
//! dropped when the view changes.

use std::fmt;
use std::str::FromStr;

use crate::types::{LeverKind, ModelError, ReferenceData};

use super::state::ScenarioState;

/// Which levers a caller exposes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ViewMode {
    /// No levers; the plain income statement
    Basic,
    /// Growth levers only
    Growth,
    /// Defensive levers only
    Defensive,
    /// Any lever, no restriction
    #[default]
    Combined,
}

impl ViewMode {
    /// All modes.
    pub fn all() -> [Self; 4] {
        [Self::Basic, Self::Growth, Self::Defensive, Self::Combined]
    }

    /// Mode name as used on the command line and in config files.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Growth => "growth",
            Self::Defensive => "defensive",
            Self::Combined => "combined",
        }
    }

    /// Whether levers of `kind` may be active in this mode.
    pub fn permits(&self, kind: LeverKind) -> bool {
        match self {
            Self::Basic => false,
            Self::Growth => kind == LeverKind::Growth,
            Self::Defensive => kind == LeverKind::Defensive,
            Self::Combined => true,
        }
    }

    /// Drops every active lever this mode does not permit.
    ///
    /// Lever ids that are not in the catalog are dropped as well.
    pub fn enforce(&self, state: &mut ScenarioState, catalog: &ReferenceData) {
        state.retain_levers(|id| {
            catalog
                .lever(id.as_str())
                .map(|lever| self.permits(lever.kind()))
                .unwrap_or(false)
        });
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ViewMode {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "basic" => Ok(Self::Basic),
            "growth" => Ok(Self::Growth),
            "defensive" => Ok(Self::Defensive),
            "combined" => Ok(Self::Combined),
            _ => Err(ModelError::UnknownViewMode(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with_all_levers(catalog: &ReferenceData) -> ScenarioState {
        let mut state = ScenarioState::new(catalog);
        for lever in catalog.levers() {
            state.toggle_lever(catalog, lever.id().as_str()).unwrap();
        }
        state
    }

    #[test]
    fn test_permits_matrix() {
        assert!(!ViewMode::Basic.permits(LeverKind::Growth));
        assert!(!ViewMode::Basic.permits(LeverKind::Defensive));
        assert!(ViewMode::Growth.permits(LeverKind::Growth));
        assert!(!ViewMode::Growth.permits(LeverKind::Defensive));
        assert!(!ViewMode::Defensive.permits(LeverKind::Growth));
        assert!(ViewMode::Defensive.permits(LeverKind::Defensive));
        assert!(ViewMode::Combined.permits(LeverKind::Growth));
        assert!(ViewMode::Combined.permits(LeverKind::Defensive));
    }

    #[test]
    fn test_enforce_basic_clears_everything() {
        let catalog = ReferenceData::standard();
        let mut state = state_with_all_levers(&catalog);
        ViewMode::Basic.enforce(&mut state, &catalog);
        assert!(state.active_levers().is_empty());
    }

    #[test]
    fn test_enforce_growth_drops_defensive() {
        let catalog = ReferenceData::standard();
        let mut state = state_with_all_levers(&catalog);
        ViewMode::Growth.enforce(&mut state, &catalog);
        assert_eq!(state.active_levers().len(), 4);
        assert!(state.is_active("hireSalesperson"));
        assert!(!state.is_active("cutSeniorSales"));
    }

    #[test]
    fn test_enforce_defensive_drops_growth() {
        let catalog = ReferenceData::standard();
        let mut state = state_with_all_levers(&catalog);
        ViewMode::Defensive.enforce(&mut state, &catalog);
        assert_eq!(state.active_levers().len(), 4);
        assert!(state.is_active("pauseRD"));
        assert!(!state.is_active("secondFlavor"));
    }

    #[test]
    fn test_enforce_combined_keeps_everything() {
        let catalog = ReferenceData::standard();
        let mut state = state_with_all_levers(&catalog);
        ViewMode::Combined.enforce(&mut state, &catalog);
        assert_eq!(state.active_levers().len(), catalog.levers().len());
    }

    #[test]
    fn test_parse_round_trips_names() {
        for mode in ViewMode::all() {
            assert_eq!(mode.name().parse::<ViewMode>().unwrap(), mode);
        }
        assert_eq!("GROWTH".parse::<ViewMode>().unwrap(), ViewMode::Growth);
        assert_eq!(
            "expert".parse::<ViewMode>().unwrap_err(),
            ModelError::UnknownViewMode("expert".to_string())
        );
    }
}
