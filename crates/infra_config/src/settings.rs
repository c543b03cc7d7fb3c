//! Application settings.
//!
//! Loaded from a TOML file (`whatif.toml` by default) with environment
//! variable overrides:
//!
//! | Variable | Field |
//! |----------|-------|
//! | `WHATIF_CATALOG` | `catalog_path` |
//! | `WHATIF_LOG_LEVEL` | `log_level` |
//! | `WHATIF_FORMAT` | `output_format` |
//! | `WHATIF_VIEW_MODE` | `view_mode` |

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use model_core::scenario::ViewMode;
use serde::Deserialize;
use tracing::debug;

use crate::error::ConfigError;

const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// How the CLI renders results.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable income statement
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
    /// One CSV row per result
    Csv,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Table => write!(f, "table"),
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            other => Err(ConfigError::Validation(vec![format!(
                "Unknown output format '{}'. Supported: table, json, csv",
                other
            )])),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct AppConfig {
    /// Catalog file; the built-in standard catalog is used when absent
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Output format
    #[serde(default)]
    pub output_format: OutputFormat,

    /// Lever view mode applied by the CLI
    #[serde(default)]
    pub view_mode: ViewMode,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalog_path: None,
            log_level: default_log_level(),
            output_format: OutputFormat::default(),
            view_mode: ViewMode::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load configuration from `path`, or defaults if the file does not exist
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            debug!(path = %path.display(), "Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Apply environment variable overrides
    pub fn with_env_override(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup.
    ///
    /// Unparseable format or view mode values are ignored and the current
    /// setting is kept.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(path) = lookup("WHATIF_CATALOG") {
            self.catalog_path = if path.is_empty() {
                None
            } else {
                Some(PathBuf::from(path))
            };
        }

        if let Some(log_level) = lookup("WHATIF_LOG_LEVEL") {
            self.log_level = log_level;
        }

        if let Some(format) = lookup("WHATIF_FORMAT") {
            self.output_format = format.parse().unwrap_or(self.output_format);
        }

        if let Some(mode) = lookup("WHATIF_VIEW_MODE") {
            self.view_mode = mode.parse().unwrap_or(self.view_mode);
        }

        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if !VALID_LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            errors.push(format!(
                "Invalid log_level '{}'. Valid values: {:?}",
                self.log_level, VALID_LOG_LEVELS
            ));
        }

        if let Some(path) = &self.catalog_path {
            if path.as_os_str().is_empty() {
                errors.push("catalog_path cannot be empty".to_string());
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Load from file (or defaults), apply environment overrides and validate
    pub fn load_with_env_and_validate(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::load_or_default(path)?.with_env_override();
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.catalog_path, None);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.output_format, OutputFormat::Table);
        assert_eq!(config.view_mode, ViewMode::Combined);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_file() {
        let config = AppConfig::from_toml(
            r#"
            catalog_path = "config/catalog.toml"
            log_level = "debug"
            output_format = "json"
            view_mode = "growth"
            "#,
        )
        .unwrap();
        assert_eq!(config.catalog_path, Some(PathBuf::from("config/catalog.toml")));
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.output_format, OutputFormat::Json);
        assert_eq!(config.view_mode, ViewMode::Growth);
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        assert_eq!(AppConfig::from_toml("").unwrap(), AppConfig::default());
    }

    #[test]
    fn test_unknown_format_is_parse_error() {
        let result = AppConfig::from_toml(r#"output_format = "xml""#);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::default().with_overrides(lookup(&[
            ("WHATIF_CATALOG", "/tmp/catalog.toml"),
            ("WHATIF_LOG_LEVEL", "warn"),
            ("WHATIF_FORMAT", "CSV"),
            ("WHATIF_VIEW_MODE", "defensive"),
        ]));
        assert_eq!(config.catalog_path, Some(PathBuf::from("/tmp/catalog.toml")));
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.output_format, OutputFormat::Csv);
        assert_eq!(config.view_mode, ViewMode::Defensive);
    }

    #[test]
    fn test_empty_catalog_override_clears_path() {
        let mut config = AppConfig::default();
        config.catalog_path = Some(PathBuf::from("catalog.toml"));
        let config = config.with_overrides(lookup(&[("WHATIF_CATALOG", "")]));
        assert_eq!(config.catalog_path, None);
    }

    #[test]
    fn test_bad_override_values_are_ignored() {
        let config = AppConfig::default().with_overrides(lookup(&[
            ("WHATIF_FORMAT", "yaml"),
            ("WHATIF_VIEW_MODE", "expert"),
        ]));
        assert_eq!(config.output_format, OutputFormat::Table);
        assert_eq!(config.view_mode, ViewMode::Combined);
    }

    #[test]
    fn test_validate_invalid_log_level() {
        let mut config = AppConfig::default();
        config.log_level = "verbose".to_string();

        match config.validate() {
            Err(ConfigError::Validation(errors)) => {
                assert!(errors.iter().any(|e| e.contains("log_level")));
            }
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_valid_log_levels() {
        for level in &["trace", "debug", "info", "warn", "error", "INFO", "DEBUG"] {
            let mut config = AppConfig::default();
            config.log_level = level.to_string();
            assert!(config.validate().is_ok(), "Log level '{}' should be valid", level);
        }
    }

    #[test]
    fn test_validate_multiple_errors() {
        let mut config = AppConfig::default();
        config.log_level = "loud".to_string();
        config.catalog_path = Some(PathBuf::new());

        match config.validate() {
            Err(ConfigError::Validation(errors)) => assert_eq!(errors.len(), 2),
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("Table".parse::<OutputFormat>().unwrap(), OutputFormat::Table);
        assert!("xml".parse::<OutputFormat>().is_err());
    }
}
