//! CLI command implementations
//!
//! Each submodule implements a specific CLI command.

pub mod calculate;
pub mod catalog;
pub mod check;
pub mod sweep;

use infra_config::{AppConfig, OutputFormat};
use model_core::scenario::ViewMode;
use model_core::types::ReferenceData;

use crate::{CliError, Result};

/// Loads the configured catalog, or the built-in one when none is set.
pub fn load_catalog(config: &AppConfig) -> Result<ReferenceData> {
    if let Some(path) = &config.catalog_path {
        if !path.exists() {
            return Err(CliError::FileNotFound(path.display().to_string()));
        }
    }
    Ok(infra_config::load_catalog(config.catalog_path.as_deref())?)
}

/// Output format from the command line, falling back to the configured one.
pub fn resolve_format(arg: Option<&str>, config: &AppConfig) -> Result<OutputFormat> {
    match arg {
        Some(format) => Ok(format.parse()?),
        None => Ok(config.output_format),
    }
}

/// View mode from the command line, falling back to the configured one.
pub fn resolve_view_mode(arg: Option<&str>, config: &AppConfig) -> Result<ViewMode> {
    match arg {
        Some(mode) => Ok(mode.parse()?),
        None => Ok(config.view_mode),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_falls_back_to_config() {
        let mut config = AppConfig::default();
        config.output_format = OutputFormat::Csv;
        config.view_mode = ViewMode::Growth;

        assert_eq!(resolve_format(None, &config).unwrap(), OutputFormat::Csv);
        assert_eq!(resolve_format(Some("json"), &config).unwrap(), OutputFormat::Json);
        assert_eq!(resolve_view_mode(None, &config).unwrap(), ViewMode::Growth);
        assert_eq!(
            resolve_view_mode(Some("basic"), &config).unwrap(),
            ViewMode::Basic
        );
    }

    #[test]
    fn test_resolve_rejects_unknown_values() {
        let config = AppConfig::default();
        assert!(matches!(
            resolve_format(Some("xml"), &config),
            Err(CliError::Config(_))
        ));
        assert!(matches!(
            resolve_view_mode(Some("expert"), &config),
            Err(CliError::Model(_))
        ));
    }

    #[test]
    fn test_load_catalog_default_and_missing() {
        let config = AppConfig::default();
        assert_eq!(load_catalog(&config).unwrap(), ReferenceData::standard());

        let mut config = AppConfig::default();
        config.catalog_path = Some("/nonexistent/catalog.toml".into());
        assert!(matches!(
            load_catalog(&config),
            Err(CliError::FileNotFound(_))
        ));
    }
}
