//! Catalog files.
//!
//! A catalog file describes the reference data the engine runs against:
//!
//! ```toml
//! unit_price = 4.00
//!
//! [base_costs]
//! selling_marketing = 280000
//! brand_rd = 170000
//!
//! [defaults]
//! method = "coPacker"
//! demand = "medium"
//!
//! [[methods]]
//! id = "coPacker"
//! name = "Co-Packer"
//! variable_cost = 2.80
//! plant_operating_cost = 0
//!
//! [[demands]]
//! id = "medium"
//! name = "Medium"
//! base_volume = 500000
//!
//! [[levers]]
//! id = "hireSalesperson"
//! name = "Hire Salesperson"
//! kind = "growth"
//! volume_multiplier = 1.15
//! cost_category = "selling_marketing"
//! cost_amount = 80000
//! ```
//!
//! `cost_amount` is always a non-negative magnitude; whether it adds or saves
//! cost follows from `kind`.

use std::path::Path;

use model_core::types::{
    BaseCosts, CostCategory, DemandScenario, Lever, LeverKind, ModelError, ProductionOption,
    ReferenceData,
};
use serde::Deserialize;
use tracing::{info, warn};

use crate::error::ConfigError;

/// Production method entry.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct MethodEntry {
    /// Identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Cost per unit produced
    pub variable_cost: f64,
    /// Fixed plant operating cost
    #[serde(default)]
    pub plant_operating_cost: f64,
}

/// Demand scenario entry.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DemandEntry {
    /// Identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Units demanded before lever effects
    pub base_volume: u64,
}

/// Lever entry.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LeverEntry {
    /// Identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Growth or defensive
    pub kind: LeverKind,
    /// Volume factor while active
    pub volume_multiplier: f64,
    /// Opex bucket affected
    pub cost_category: CostCategory,
    /// Cost added (growth) or saved (defensive)
    pub cost_amount: f64,
}

/// Default selections for new scenarios.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct DefaultsEntry {
    /// Default method id
    pub method: Option<String>,
    /// Default demand id
    pub demand: Option<String>,
}

/// On-disk catalog schema.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CatalogFile {
    /// Selling price per unit
    pub unit_price: f64,
    /// Base opex buckets
    pub base_costs: BaseCosts,
    /// Default selections
    #[serde(default)]
    pub defaults: DefaultsEntry,
    /// Production methods
    #[serde(default)]
    pub methods: Vec<MethodEntry>,
    /// Demand scenarios
    #[serde(default)]
    pub demands: Vec<DemandEntry>,
    /// Growth and defensive levers
    #[serde(default)]
    pub levers: Vec<LeverEntry>,
}

impl CatalogFile {
    /// Load a catalog file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;
        Self::from_toml(&content)
    }

    /// Parse catalog TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Validate and convert into reference data.
    ///
    /// Negative lever amounts are reported together with any problems the
    /// catalog builder finds.
    pub fn into_reference_data(self) -> Result<ReferenceData, ConfigError> {
        let mut builder = ReferenceData::builder(self.unit_price, self.base_costs);
        let mut errors = Vec::new();

        for m in self.methods {
            builder = builder.method(ProductionOption::new(
                m.id,
                m.name,
                m.variable_cost,
                m.plant_operating_cost,
            ));
        }
        for d in self.demands {
            builder = builder.demand(DemandScenario::new(d.id, d.name, d.base_volume));
        }
        for l in self.levers {
            if l.cost_amount < 0.0 {
                errors.push(format!(
                    "lever '{}' has negative cost_amount {}; use kind to choose the sign",
                    l.id, l.cost_amount
                ));
            }
            builder = builder.lever(Lever::new(
                l.id,
                l.name,
                l.kind,
                l.volume_multiplier,
                l.cost_category,
                l.cost_amount,
            ));
        }
        if let Some(method) = self.defaults.method {
            builder = builder.default_method(method);
        }
        if let Some(demand) = self.defaults.demand {
            builder = builder.default_demand(demand);
        }

        match builder.build() {
            Ok(catalog) if errors.is_empty() => Ok(catalog),
            Ok(_) => Err(ConfigError::Validation(errors)),
            Err(err) if errors.is_empty() => Err(err.into()),
            Err(ModelError::InvalidCatalog(message)) => {
                errors.push(message);
                Err(ConfigError::Validation(errors))
            }
            Err(err) => {
                errors.push(err.to_string());
                Err(ConfigError::Validation(errors))
            }
        }
    }
}

/// Load reference data from `path`, or the built-in standard catalog.
///
/// Methods whose variable cost is not below the unit price are accepted but
/// logged, since break-even is undefined for them.
pub fn load_catalog(path: Option<&Path>) -> Result<ReferenceData, ConfigError> {
    let catalog = match path {
        Some(path) => {
            let catalog = CatalogFile::load(path)?.into_reference_data()?;
            info!(
                path = %path.display(),
                methods = catalog.methods().len(),
                demands = catalog.demands().len(),
                levers = catalog.levers().len(),
                "Loaded catalog file"
            );
            catalog
        }
        None => {
            info!("Using built-in standard catalog");
            ReferenceData::standard()
        }
    };

    for method in catalog.degenerate_methods() {
        warn!(
            method = %method.id(),
            variable_cost = method.variable_cost_per_unit(),
            unit_price = catalog.unit_price(),
            "Variable cost is not below unit price; break-even is undefined"
        );
    }

    Ok(catalog)
}
