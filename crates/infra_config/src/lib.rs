//! # infra_config: Settings and Catalog Loading
//!
//! Sits between the model kernel and the CLI:
//! - `settings`: [`AppConfig`], TOML settings with `WHATIF_*` environment overrides
//! - `catalog`: [`CatalogFile`], the TOML schema for reference data, and
//!   [`load_catalog`] which falls back to the built-in standard catalog
//! - `error`: [`ConfigError`]
//!
//! Catalogs are loaded once at start-up and handed to the model as an
//! immutable `ReferenceData`.

pub mod catalog;
pub mod error;
pub mod settings;

pub use catalog::{load_catalog, CatalogFile};
pub use error::ConfigError;
pub use settings::{AppConfig, OutputFormat};
