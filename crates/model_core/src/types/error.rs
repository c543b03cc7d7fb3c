//! Error types for structured error handling.
//!
//! This module provides:
//! - `ModelError`: Errors from catalog construction, scenario state mutation
//!   and the calculation engine
//! - `ReferenceKind`: Which catalog an unknown identifier was looked up in

use std::fmt;
use thiserror::Error;

use crate::scenario::ViewMode;

/// The catalog an identifier refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ReferenceKind {
    /// Production option catalog
    Method,
    /// Demand scenario catalog
    Demand,
    /// Lever catalog (growth and defensive)
    Lever,
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReferenceKind::Method => write!(f, "production method"),
            ReferenceKind::Demand => write!(f, "demand scenario"),
            ReferenceKind::Lever => write!(f, "lever"),
        }
    }
}

/// Errors raised by the scenario model.
///
/// # Variants
/// - `InvalidReference`: An identifier is not present in the reference catalogs
/// - `DegenerateContributionMargin`: Unit price does not exceed the unit variable cost
/// - `LeverNotPermitted`: The active view mode forbids the requested lever
/// - `UnknownViewMode`: A view mode name could not be parsed
/// - `InvalidCatalog`: Reference data failed validation at construction
///
/// # Examples
/// ```
/// use model_core::types::{ModelError, ReferenceKind};
///
/// let err = ModelError::invalid_reference(ReferenceKind::Lever, "buyBillboard");
/// assert_eq!(format!("{}", err), "Invalid reference: unknown lever 'buyBillboard'");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// Identifier not present in the reference catalogs.
    #[error("Invalid reference: unknown {kind} '{id}'")]
    InvalidReference {
        /// Catalog that was searched
        kind: ReferenceKind,
        /// The identifier that was not found
        id: String,
    },

    /// Break-even is undefined because each unit loses money or breaks even.
    #[error(
        "Degenerate contribution margin: unit price {unit_price} \
         does not exceed variable cost {variable_cost}"
    )]
    DegenerateContributionMargin {
        /// Selling price per unit
        unit_price: f64,
        /// Variable cost per unit of the selected method
        variable_cost: f64,
    },

    /// Lever rejected by the view-mode policy.
    #[error("Lever '{lever}' is not permitted in {mode} view")]
    LeverNotPermitted {
        /// The lever that was toggled
        lever: String,
        /// The view mode in force
        mode: ViewMode,
    },

    /// View mode name not recognised.
    #[error("Unknown view mode '{0}'; expected one of basic, growth, defensive, combined")]
    UnknownViewMode(String),

    /// Reference data failed validation.
    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),
}

impl ModelError {
    /// Create an invalid reference error
    pub fn invalid_reference(kind: ReferenceKind, id: impl Into<String>) -> Self {
        Self::InvalidReference {
            kind,
            id: id.into(),
        }
    }

    /// Create an invalid catalog error
    pub fn invalid_catalog(msg: impl Into<String>) -> Self {
        Self::InvalidCatalog(msg.into())
    }
}
