//! Scenario selection and the policy layer above the engine.
//!
//! - `state`: [`ScenarioState`], the explicit selection value
//! - `policy`: [`ViewMode`], which lever kinds a caller exposes
//! - `session`: [`ScenarioSession`], mutate-then-recalculate façade

mod policy;
mod session;
mod state;

pub use policy::ViewMode;
pub use session::ScenarioSession;
pub use state::ScenarioState;
