//! Static reference data: production options, demand scenarios and levers.
//!
//! A [`ReferenceData`] bundle is assembled once (from the built-in
//! [`ReferenceData::standard`] dataset or a catalog file) through
//! [`ReferenceDataBuilder`], validated, and treated as immutable afterwards.
//!
//! # Examples
//!
//! ```
//! use model_core::types::{CostCategory, LeverKind, ReferenceData};
//!
//! let catalog = ReferenceData::standard();
//! let lever = catalog.lever("hireSalesperson").unwrap();
//! assert_eq!(lever.kind(), LeverKind::Growth);
//! assert_eq!(lever.cost_category(), CostCategory::SellingMarketing);
//! assert_eq!(lever.cost_delta(), 80_000.0);
//! ```

use std::collections::HashSet;
use std::fmt;

use super::error::{ModelError, ReferenceKind};
use super::ids::{DemandId, LeverId, MethodId};

/// Lever classification, fixed when the lever is defined.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum LeverKind {
    /// Spends money to grow volume
    Growth,
    /// Saves money, usually at the cost of some volume
    Defensive,
}

impl fmt::Display for LeverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeverKind::Growth => write!(f, "growth"),
            LeverKind::Defensive => write!(f, "defensive"),
        }
    }
}

/// Operating expense bucket a lever moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CostCategory {
    /// Selling & marketing
    SellingMarketing,
    /// Brand building and R&D
    BrandRd,
}

impl CostCategory {
    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            CostCategory::SellingMarketing => "Selling & Marketing",
            CostCategory::BrandRd => "Brand / R&D",
        }
    }
}

impl fmt::Display for CostCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A manufacturing strategy.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ProductionOption {
    id: MethodId,
    name: String,
    variable_cost_per_unit: f64,
    fixed_plant_operating_cost: f64,
}

impl ProductionOption {
    /// Creates a production option.
    pub fn new(
        id: impl Into<MethodId>,
        name: impl Into<String>,
        variable_cost_per_unit: f64,
        fixed_plant_operating_cost: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            variable_cost_per_unit,
            fixed_plant_operating_cost,
        }
    }

    /// Identifier.
    pub fn id(&self) -> &MethodId {
        &self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Cost incurred per unit produced.
    pub fn variable_cost_per_unit(&self) -> f64 {
        self.variable_cost_per_unit
    }

    /// Plant operating cost incurred regardless of volume.
    pub fn fixed_plant_operating_cost(&self) -> f64 {
        self.fixed_plant_operating_cost
    }
}

/// A baseline market size.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DemandScenario {
    id: DemandId,
    name: String,
    base_volume: u64,
}

impl DemandScenario {
    /// Creates a demand scenario.
    pub fn new(id: impl Into<DemandId>, name: impl Into<String>, base_volume: u64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            base_volume,
        }
    }

    /// Identifier.
    pub fn id(&self) -> &DemandId {
        &self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Units demanded before any lever effects.
    pub fn base_volume(&self) -> u64 {
        self.base_volume
    }
}

/// A toggle-able business action.
///
/// Growth and defensive levers share one representation: the cost effect is a
/// signed delta whose sign follows from the kind (growth adds cost, defensive
/// saves it).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Lever {
    id: LeverId,
    name: String,
    kind: LeverKind,
    volume_multiplier: f64,
    cost_category: CostCategory,
    cost_delta: f64,
}

impl Lever {
    /// Creates a lever from the magnitude of its cost effect.
    ///
    /// `cost_amount` is the cost added (growth) or saved (defensive); its
    /// absolute value is used, and the sign of [`Lever::cost_delta`] is
    /// derived from `kind`.
    pub fn new(
        id: impl Into<LeverId>,
        name: impl Into<String>,
        kind: LeverKind,
        volume_multiplier: f64,
        cost_category: CostCategory,
        cost_amount: f64,
    ) -> Self {
        let cost_delta = match kind {
            LeverKind::Growth => cost_amount.abs(),
            LeverKind::Defensive => -cost_amount.abs(),
        };
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            volume_multiplier,
            cost_category,
            cost_delta,
        }
    }

    /// Creates a growth lever.
    pub fn growth(
        id: impl Into<LeverId>,
        name: impl Into<String>,
        volume_multiplier: f64,
        cost_category: CostCategory,
        cost_amount: f64,
    ) -> Self {
        Self::new(
            id,
            name,
            LeverKind::Growth,
            volume_multiplier,
            cost_category,
            cost_amount,
        )
    }

    /// Creates a defensive lever.
    pub fn defensive(
        id: impl Into<LeverId>,
        name: impl Into<String>,
        volume_multiplier: f64,
        cost_category: CostCategory,
        cost_savings: f64,
    ) -> Self {
        Self::new(
            id,
            name,
            LeverKind::Defensive,
            volume_multiplier,
            cost_category,
            cost_savings,
        )
    }

    /// Identifier.
    pub fn id(&self) -> &LeverId {
        &self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Growth or defensive.
    pub fn kind(&self) -> LeverKind {
        self.kind
    }

    /// Factor applied to volume while the lever is active.
    pub fn volume_multiplier(&self) -> f64 {
        self.volume_multiplier
    }

    /// Bucket the cost delta applies to.
    pub fn cost_category(&self) -> CostCategory {
        self.cost_category
    }

    /// Signed change to the bucket: positive adds cost, negative saves it.
    pub fn cost_delta(&self) -> f64 {
        self.cost_delta
    }
}

/// Base amount of each operating expense bucket before lever effects.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BaseCosts {
    /// Selling & marketing
    pub selling_marketing: f64,
    /// Brand building and R&D
    pub brand_rd: f64,
}

impl BaseCosts {
    /// Base amount of one bucket.
    pub fn get(&self, category: CostCategory) -> f64 {
        match category {
            CostCategory::SellingMarketing => self.selling_marketing,
            CostCategory::BrandRd => self.brand_rd,
        }
    }

    /// Sum of both buckets.
    pub fn total(&self) -> f64 {
        self.selling_marketing + self.brand_rd
    }
}

/// Immutable catalog bundle consumed by the engine.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ReferenceData {
    unit_price: f64,
    base_costs: BaseCosts,
    methods: Vec<ProductionOption>,
    demands: Vec<DemandScenario>,
    levers: Vec<Lever>,
    default_method: MethodId,
    default_demand: DemandId,
}

impl ReferenceData {
    /// Starts building a catalog.
    pub fn builder(unit_price: f64, base_costs: BaseCosts) -> ReferenceDataBuilder {
        ReferenceDataBuilder::new(unit_price, base_costs)
    }

    /// The built-in Gelat-oat dataset.
    pub fn standard() -> Self {
        use CostCategory::{BrandRd, SellingMarketing};

        Self {
            unit_price: 4.00,
            base_costs: BaseCosts {
                selling_marketing: 280_000.0,
                brand_rd: 170_000.0,
            },
            methods: vec![
                ProductionOption::new("coPacker", "Co-Packer", 2.80, 0.0),
                ProductionOption::new("retrofit", "Retrofit", 1.80, 438_000.0),
                ProductionOption::new("newPlant", "New Plant", 0.80, 824_000.0),
            ],
            demands: vec![
                DemandScenario::new("low", "Low", 350_000),
                DemandScenario::new("medium", "Medium", 500_000),
                DemandScenario::new("high", "High", 650_000),
            ],
            levers: vec![
                Lever::growth(
                    "hireSalesperson",
                    "Hire Salesperson",
                    1.15,
                    SellingMarketing,
                    80_000.0,
                ),
                Lever::growth("brandBuilding", "Brand Building", 1.10, BrandRd, 100_000.0),
                Lever::growth(
                    "samplingProgram",
                    "Sampling Program",
                    1.08,
                    SellingMarketing,
                    50_000.0,
                ),
                Lever::growth("secondFlavor", "Second Flavor", 1.20, BrandRd, 60_000.0),
                Lever::defensive(
                    "cutSeniorSales",
                    "Cut Senior Sales",
                    0.94,
                    SellingMarketing,
                    80_000.0,
                ),
                Lever::defensive(
                    "reduceBrandMktg",
                    "Reduce Brand Marketing",
                    1.00,
                    BrandRd,
                    80_000.0,
                ),
                Lever::defensive("pauseRD", "Pause R&D", 1.00, BrandRd, 60_000.0),
                Lever::defensive(
                    "cutJuniorSales",
                    "Cut Junior Sales",
                    0.97,
                    SellingMarketing,
                    60_000.0,
                ),
            ],
            default_method: MethodId::new("coPacker"),
            default_demand: DemandId::new("medium"),
        }
    }

    /// Selling price per unit.
    pub fn unit_price(&self) -> f64 {
        self.unit_price
    }

    /// Base opex bucket amounts.
    pub fn base_costs(&self) -> &BaseCosts {
        &self.base_costs
    }

    /// Production options in catalog order.
    pub fn methods(&self) -> &[ProductionOption] {
        &self.methods
    }

    /// Demand scenarios in catalog order.
    pub fn demands(&self) -> &[DemandScenario] {
        &self.demands
    }

    /// All levers in catalog order.
    pub fn levers(&self) -> &[Lever] {
        &self.levers
    }

    /// Levers of one kind, in catalog order.
    pub fn levers_of(&self, kind: LeverKind) -> impl Iterator<Item = &Lever> {
        self.levers.iter().filter(move |l| l.kind() == kind)
    }

    /// Method selected in a fresh scenario.
    pub fn default_method(&self) -> &MethodId {
        &self.default_method
    }

    /// Demand selected in a fresh scenario.
    pub fn default_demand(&self) -> &DemandId {
        &self.default_demand
    }

    /// Looks up a production option.
    pub fn method(&self, id: &str) -> Result<&ProductionOption, ModelError> {
        self.methods
            .iter()
            .find(|m| m.id().as_str() == id)
            .ok_or_else(|| ModelError::invalid_reference(ReferenceKind::Method, id))
    }

    /// Looks up a demand scenario.
    pub fn demand(&self, id: &str) -> Result<&DemandScenario, ModelError> {
        self.demands
            .iter()
            .find(|d| d.id().as_str() == id)
            .ok_or_else(|| ModelError::invalid_reference(ReferenceKind::Demand, id))
    }

    /// Looks up a lever of either kind.
    pub fn lever(&self, id: &str) -> Result<&Lever, ModelError> {
        self.levers
            .iter()
            .find(|l| l.id().as_str() == id)
            .ok_or_else(|| ModelError::invalid_reference(ReferenceKind::Lever, id))
    }

    /// Methods whose variable cost is not below the unit price.
    ///
    /// Break-even is undefined for these; the engine reports it as such.
    pub fn degenerate_methods(&self) -> impl Iterator<Item = &ProductionOption> {
        let price = self.unit_price;
        self.methods
            .iter()
            .filter(move |m| m.variable_cost_per_unit() >= price)
    }
}

/// Validating builder for [`ReferenceData`].
#[derive(Clone, Debug)]
pub struct ReferenceDataBuilder {
    unit_price: f64,
    base_costs: BaseCosts,
    methods: Vec<ProductionOption>,
    demands: Vec<DemandScenario>,
    levers: Vec<Lever>,
    default_method: Option<MethodId>,
    default_demand: Option<DemandId>,
}

impl ReferenceDataBuilder {
    /// Creates an empty builder.
    pub fn new(unit_price: f64, base_costs: BaseCosts) -> Self {
        Self {
            unit_price,
            base_costs,
            methods: Vec::new(),
            demands: Vec::new(),
            levers: Vec::new(),
            default_method: None,
            default_demand: None,
        }
    }

    /// Adds a production option.
    pub fn method(mut self, method: ProductionOption) -> Self {
        self.methods.push(method);
        self
    }

    /// Adds a demand scenario.
    pub fn demand(mut self, demand: DemandScenario) -> Self {
        self.demands.push(demand);
        self
    }

    /// Adds a lever.
    pub fn lever(mut self, lever: Lever) -> Self {
        self.levers.push(lever);
        self
    }

    /// Overrides the default method (first method otherwise).
    pub fn default_method(mut self, id: impl Into<MethodId>) -> Self {
        self.default_method = Some(id.into());
        self
    }

    /// Overrides the default demand (`medium` if present, else the first).
    pub fn default_demand(mut self, id: impl Into<DemandId>) -> Self {
        self.default_demand = Some(id.into());
        self
    }

    /// Validates and builds the catalog.
    ///
    /// All problems are collected and reported together.
    pub fn build(self) -> Result<ReferenceData, ModelError> {
        let mut errors = Vec::new();

        if !(self.unit_price.is_finite() && self.unit_price > 0.0) {
            errors.push(format!("unit price must be positive, got {}", self.unit_price));
        }
        for (label, amount) in [
            ("selling_marketing", self.base_costs.selling_marketing),
            ("brand_rd", self.base_costs.brand_rd),
        ] {
            if !(amount.is_finite() && amount >= 0.0) {
                errors.push(format!("base cost {} must be non-negative, got {}", label, amount));
            }
        }

        if self.methods.is_empty() {
            errors.push("at least one production method is required".to_string());
        }
        let mut seen = HashSet::new();
        for m in &self.methods {
            if !seen.insert(m.id().as_str()) {
                errors.push(format!("duplicate method id '{}'", m.id()));
            }
            if !(m.variable_cost_per_unit().is_finite() && m.variable_cost_per_unit() >= 0.0) {
                errors.push(format!("method '{}' has invalid variable cost", m.id()));
            }
            if !(m.fixed_plant_operating_cost().is_finite()
                && m.fixed_plant_operating_cost() >= 0.0)
            {
                errors.push(format!("method '{}' has invalid plant operating cost", m.id()));
            }
        }

        if self.demands.is_empty() {
            errors.push("at least one demand scenario is required".to_string());
        }
        let mut seen = HashSet::new();
        for d in &self.demands {
            if !seen.insert(d.id().as_str()) {
                errors.push(format!("duplicate demand id '{}'", d.id()));
            }
            if d.base_volume() == 0 {
                errors.push(format!("demand '{}' must have a positive base volume", d.id()));
            }
        }

        let mut seen = HashSet::new();
        for l in &self.levers {
            if !seen.insert(l.id().as_str()) {
                errors.push(format!("duplicate lever id '{}'", l.id()));
            }
            if !(l.volume_multiplier().is_finite() && l.volume_multiplier() > 0.0) {
                errors.push(format!("lever '{}' must have a positive volume multiplier", l.id()));
            }
            if !l.cost_delta().is_finite() {
                errors.push(format!("lever '{}' has invalid cost amount", l.id()));
            }
        }

        let default_method = self
            .default_method
            .or_else(|| self.methods.first().map(|m| m.id().clone()));
        let default_demand = self.default_demand.or_else(|| {
            self.demands
                .iter()
                .find(|d| d.id().as_str() == "medium")
                .or_else(|| self.demands.first())
                .map(|d| d.id().clone())
        });

        if let Some(id) = &default_method {
            if !self.methods.iter().any(|m| m.id() == id) {
                errors.push(format!("default method '{}' is not in the catalog", id));
            }
        }
        if let Some(id) = &default_demand {
            if !self.demands.iter().any(|d| d.id() == id) {
                errors.push(format!("default demand '{}' is not in the catalog", id));
            }
        }

        match (default_method, default_demand) {
            (Some(default_method), Some(default_demand)) if errors.is_empty() => {
                Ok(ReferenceData {
                    unit_price: self.unit_price,
                    base_costs: self.base_costs,
                    methods: self.methods,
                    demands: self.demands,
                    levers: self.levers,
                    default_method,
                    default_demand,
                })
            }
            _ => Err(ModelError::InvalidCatalog(errors.join("; "))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_builder() -> ReferenceDataBuilder {
        ReferenceData::builder(
            10.0,
            BaseCosts {
                selling_marketing: 100.0,
                brand_rd: 50.0,
            },
        )
        .method(ProductionOption::new("inHouse", "In House", 4.0, 20.0))
        .demand(DemandScenario::new("only", "Only", 1_000))
    }

    #[test]
    fn test_standard_catalog_contents() {
        let catalog = ReferenceData::standard();
        assert_eq!(catalog.unit_price(), 4.0);
        assert_eq!(catalog.methods().len(), 3);
        assert_eq!(catalog.demands().len(), 3);
        assert_eq!(catalog.levers_of(LeverKind::Growth).count(), 4);
        assert_eq!(catalog.levers_of(LeverKind::Defensive).count(), 4);
        assert_eq!(catalog.default_method().as_str(), "coPacker");
        assert_eq!(catalog.default_demand().as_str(), "medium");
        assert_eq!(catalog.degenerate_methods().count(), 0);
    }

    #[test]
    fn test_standard_catalog_passes_validation() {
        let standard = ReferenceData::standard();
        let rebuilt = standard
            .methods()
            .iter()
            .cloned()
            .fold(
                ReferenceData::builder(standard.unit_price(), *standard.base_costs()),
                |b, m| b.method(m),
            );
        let rebuilt = standard.demands().iter().cloned().fold(rebuilt, |b, d| b.demand(d));
        let rebuilt = standard.levers().iter().cloned().fold(rebuilt, |b, l| b.lever(l));
        assert_eq!(rebuilt.build().unwrap(), standard);
    }

    #[test]
    fn test_defensive_lever_delta_is_negative() {
        let catalog = ReferenceData::standard();
        let lever = catalog.lever("cutSeniorSales").unwrap();
        assert_eq!(lever.kind(), LeverKind::Defensive);
        assert_eq!(lever.cost_delta(), -80_000.0);
        assert_eq!(lever.volume_multiplier(), 0.94);
    }

    #[test]
    fn test_sign_follows_kind_not_input() {
        let growth = Lever::growth("a", "A", 1.0, CostCategory::BrandRd, -500.0);
        let defensive = Lever::defensive("b", "B", 1.0, CostCategory::BrandRd, -500.0);
        assert_eq!(growth.cost_delta(), 500.0);
        assert_eq!(defensive.cost_delta(), -500.0);
    }

    #[test]
    fn test_unknown_lookups_fail_with_kind() {
        let catalog = ReferenceData::standard();
        assert_eq!(
            catalog.method("offshore").unwrap_err(),
            ModelError::invalid_reference(ReferenceKind::Method, "offshore")
        );
        assert!(matches!(
            catalog.demand("extreme"),
            Err(ModelError::InvalidReference {
                kind: ReferenceKind::Demand,
                ..
            })
        ));
        assert!(matches!(
            catalog.lever("medium"),
            Err(ModelError::InvalidReference {
                kind: ReferenceKind::Lever,
                ..
            })
        ));
    }

    #[test]
    fn test_defaults_fall_back_to_first_entries() {
        let catalog = minimal_builder().build().unwrap();
        assert_eq!(catalog.default_method().as_str(), "inHouse");
        assert_eq!(catalog.default_demand().as_str(), "only");
    }

    #[test]
    fn test_default_must_exist() {
        let err = minimal_builder().default_demand("medium").build().unwrap_err();
        assert!(err.to_string().contains("default demand 'medium'"));
    }

    #[test]
    fn test_duplicate_lever_ids_across_kinds_rejected() {
        let err = minimal_builder()
            .lever(Lever::growth("x", "X", 1.1, CostCategory::BrandRd, 1.0))
            .lever(Lever::defensive("x", "X", 0.9, CostCategory::BrandRd, 1.0))
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("duplicate lever id 'x'"));
    }

    #[test]
    fn test_collects_multiple_errors() {
        let result = ReferenceData::builder(
            0.0,
            BaseCosts {
                selling_marketing: -1.0,
                brand_rd: 0.0,
            },
        )
        .lever(Lever::growth("zero", "Zero", 0.0, CostCategory::BrandRd, 1.0))
        .build();

        match result {
            Err(ModelError::InvalidCatalog(msg)) => {
                assert!(msg.contains("unit price"));
                assert!(msg.contains("selling_marketing"));
                assert!(msg.contains("production method"));
                assert!(msg.contains("demand scenario"));
                assert!(msg.contains("volume multiplier"));
            }
            other => panic!("Expected InvalidCatalog, got {:?}", other),
        }
    }

    #[test]
    fn test_degenerate_method_is_accepted_but_reported() {
        let catalog = minimal_builder()
            .method(ProductionOption::new("artisan", "Artisan", 10.0, 0.0))
            .build()
            .unwrap();
        let degenerate: Vec<_> = catalog.degenerate_methods().map(|m| m.id().as_str()).collect();
        assert_eq!(degenerate, vec!["artisan"]);
    }
}
