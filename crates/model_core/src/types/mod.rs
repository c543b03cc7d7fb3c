//! Reference data, identifier and error types.
//!
//! This module provides:
//! - `ids`: Strongly-typed identifiers for methods, demand scenarios and levers
//! - `catalog`: Production options, demand scenarios, levers and the
//!   validated [`ReferenceData`] bundle
//! - `error`: Structured error types for catalog, state and engine operations
//!
//! # Re-exports
//!
//! Commonly used types are re-exported at this module level.

pub mod catalog;
pub mod error;
pub mod ids;

pub use catalog::{
    BaseCosts, CostCategory, DemandScenario, Lever, LeverKind, ProductionOption, ReferenceData,
    ReferenceDataBuilder,
};
pub use error::{ModelError, ReferenceKind};
pub use ids::{DemandId, LeverId, MethodId};
