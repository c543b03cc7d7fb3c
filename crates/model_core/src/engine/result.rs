//! Calculation output records.

use crate::types::{CostCategory, DemandId, LeverKind, MethodId, ModelError};

/// Operating expense breakdown after lever effects.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct OperatingExpenses {
    /// Selling & marketing bucket, floored at zero
    pub selling_marketing: f64,
    /// Brand / R&D bucket, floored at zero
    pub brand_rd: f64,
    /// Plant operating cost of the selected method
    pub plant_operations: f64,
    /// Sum of the three lines above
    pub total: f64,
    /// Selling & marketing minus its base amount (positive = cost grew)
    pub selling_marketing_delta: f64,
    /// Brand / R&D minus its base amount (positive = cost grew)
    pub brand_rd_delta: f64,
}

impl OperatingExpenses {
    /// Final amount of one bucket.
    pub fn bucket(&self, category: CostCategory) -> f64 {
        match category {
            CostCategory::SellingMarketing => self.selling_marketing,
            CostCategory::BrandRd => self.brand_rd,
        }
    }

    /// Change of one bucket against its base amount.
    pub fn delta(&self, category: CostCategory) -> f64 {
        match category {
            CostCategory::SellingMarketing => self.selling_marketing_delta,
            CostCategory::BrandRd => self.brand_rd_delta,
        }
    }
}

/// Income statement lines.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct IncomeStatement {
    /// Volume × unit price
    pub revenue: f64,
    /// Volume × variable cost per unit
    pub cost_of_goods: f64,
    /// Revenue − cost of goods
    pub gross_profit: f64,
    /// Gross profit as a percentage of revenue (0 when revenue is 0)
    pub gross_margin_pct: f64,
    /// Operating expense breakdown
    pub operating_expenses: OperatingExpenses,
    /// Gross profit − total operating expense; may be negative
    pub operating_income: f64,
    /// Operating income as a percentage of revenue (0 when revenue is 0)
    pub operating_margin_pct: f64,
}

/// Break-even analysis when the contribution margin is positive.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BreakEven {
    /// Unit price − variable cost per unit
    pub contribution_margin: f64,
    /// Units needed to cover total operating expense, rounded up
    pub volume: u64,
    /// Volume − break-even volume; negative below break-even
    pub margin_of_safety: i64,
    /// Margin of safety as a percentage of break-even volume
    pub margin_of_safety_pct: f64,
}

/// Break-even outcome of a calculation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "status", rename_all = "snake_case"))]
pub enum BreakEvenStatus {
    /// Contribution margin is positive.
    Defined(BreakEven),
    /// Unit price does not exceed the variable cost; no volume breaks even.
    Undefined {
        /// Selling price per unit
        unit_price: f64,
        /// Variable cost per unit
        variable_cost: f64,
    },
}

impl BreakEvenStatus {
    /// Whether a break-even volume exists.
    pub fn is_defined(&self) -> bool {
        matches!(self, Self::Defined(_))
    }
}

/// Decomposition of one lever kind's contribution.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LeverImpact {
    /// Which subset this summarises
    pub kind: LeverKind,
    /// Number of active levers of this kind
    pub lever_count: usize,
    /// Product of the subset's volume multipliers
    pub volume_multiplier: f64,
    /// (multiplier − 1) × 100
    pub volume_change_pct: f64,
    /// Cost added (growth) or saved (defensive), before bucket flooring
    pub cost_impact: f64,
}

/// Fully derived output of one calculation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CalculationResult {
    /// Method the result was computed for
    pub method: MethodId,
    /// Demand scenario the result was computed for
    pub demand: DemandId,
    /// Units demanded before lever effects
    pub base_volume: u64,
    /// Units after lever effects, rounded once
    pub volume: u64,
    /// Income statement
    pub income: IncomeStatement,
    /// Break-even and margin of safety
    pub break_even: BreakEvenStatus,
    /// Growth lever summary
    pub growth: LeverImpact,
    /// Defensive lever summary
    pub defensive: LeverImpact,
}

impl CalculationResult {
    /// The break-even analysis, or `DegenerateContributionMargin` when none exists.
    pub fn break_even(&self) -> Result<&BreakEven, ModelError> {
        match &self.break_even {
            BreakEvenStatus::Defined(analysis) => Ok(analysis),
            BreakEvenStatus::Undefined {
                unit_price,
                variable_cost,
            } => Err(ModelError::DegenerateContributionMargin {
                unit_price: *unit_price,
                variable_cost: *variable_cost,
            }),
        }
    }

    /// Summary for one lever kind.
    pub fn impact(&self, kind: LeverKind) -> &LeverImpact {
        match kind {
            LeverKind::Growth => &self.growth,
            LeverKind::Defensive => &self.defensive,
        }
    }

    /// Whether the scenario makes an operating profit.
    pub fn is_profitable(&self) -> bool {
        self.income.operating_income >= 0.0
    }
}
