//! # model_core: What-If Income Statement Engine
//!
//! ## Kernel Role
//!
//! model_core is the bottom layer of the workspace. It derives a complete
//! income statement and break-even analysis from a scenario selection:
//! - Reference catalogs: production options, demand scenarios, levers (`types`)
//! - Explicit scenario state, view-mode policy and sessions (`scenario`)
//! - The pure calculation engine and the method × demand sweep (`engine`)
//!
//! ## No Hidden State
//!
//! The engine is a plain function of `(ScenarioState, ReferenceData)`. There
//! are no process-wide variables; every session owns its own state and the
//! catalog is shared read-only.
//!
//! ## Usage Examples
//!
//! ```rust
//! use std::sync::Arc;
//! use model_core::scenario::ScenarioSession;
//! use model_core::types::ReferenceData;
//!
//! let mut session = ScenarioSession::new(Arc::new(ReferenceData::standard()));
//!
//! let result = session.toggle_lever("hireSalesperson").unwrap();
//! assert_eq!(result.volume, 575_000);
//! assert_eq!(result.income.operating_expenses.selling_marketing, 360_000.0);
//!
//! let result = session.select_method("newPlant").unwrap();
//! assert!(result.break_even().is_ok());
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Serialisation for identifiers, catalog types and results

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod engine;
pub mod scenario;
pub mod types;
