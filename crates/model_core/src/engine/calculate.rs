//! The scenario calculation engine.
//!
//! [`calculate`] maps a [`ScenarioState`] and its [`ReferenceData`] to a
//! complete [`CalculationResult`]. It holds no state between calls and
//! performs no I/O; identical inputs give bit-for-bit identical outputs.
//!
//! Order of derivation:
//!
//! 1. Volume: base volume times every active multiplier, rounded once
//! 2. Revenue, cost of goods, gross profit and gross margin
//! 3. Opex buckets with signed lever deltas, each floored at zero, plus plant operations
//! 4. Operating income and margin
//! 5. Break-even volume and margin of safety
//! 6. Growth / defensive lever summaries
//! 7. Bucket deltas against base costs

use crate::scenario::ScenarioState;
use crate::types::{
    BaseCosts, CostCategory, Lever, LeverKind, ModelError, ProductionOption, ReferenceData,
};

use super::result::{
    BreakEven, BreakEvenStatus, CalculationResult, IncomeStatement, LeverImpact,
    OperatingExpenses,
};

/// Derives the full income statement and break-even analysis for `state`.
///
/// Every identifier in `state` is resolved against `catalog` before any
/// arithmetic, so an unknown id fails with `InvalidReference` and no partial
/// result is produced. A non-positive contribution margin is not an error
/// here: the result carries [`BreakEvenStatus::Undefined`] and
/// [`CalculationResult::break_even`] reports `DegenerateContributionMargin`.
///
/// # Examples
///
/// ```
/// use model_core::engine::calculate;
/// use model_core::scenario::ScenarioState;
/// use model_core::types::ReferenceData;
///
/// let catalog = ReferenceData::standard();
/// let state = ScenarioState::new(&catalog);
/// let result = calculate(&state, &catalog).unwrap();
///
/// assert_eq!(result.volume, 500_000);
/// assert_eq!(result.break_even().unwrap().volume, 375_000);
/// assert_eq!(result.break_even().unwrap().margin_of_safety, 125_000);
/// ```
pub fn calculate(
    state: &ScenarioState,
    catalog: &ReferenceData,
) -> Result<CalculationResult, ModelError> {
    let method = catalog.method(state.method().as_str())?;
    let demand = catalog.demand(state.demand().as_str())?;
    let levers = state
        .active_levers()
        .iter()
        .map(|id| catalog.lever(id.as_str()))
        .collect::<Result<Vec<_>, _>>()?;

    let volume = adjusted_volume(demand.base_volume(), &levers);
    let units = volume as f64;
    let unit_price = catalog.unit_price();

    let revenue = units * unit_price;
    let cost_of_goods = units * method.variable_cost_per_unit();
    let gross_profit = revenue - cost_of_goods;

    let operating_expenses = operating_expenses(catalog.base_costs(), method, &levers);
    let operating_income = gross_profit - operating_expenses.total;

    let break_even = break_even(
        unit_price,
        method.variable_cost_per_unit(),
        operating_expenses.total,
        volume,
    );

    Ok(CalculationResult {
        method: method.id().clone(),
        demand: demand.id().clone(),
        base_volume: demand.base_volume(),
        volume,
        income: IncomeStatement {
            revenue,
            cost_of_goods,
            gross_profit,
            gross_margin_pct: percentage_of(gross_profit, revenue),
            operating_expenses,
            operating_income,
            operating_margin_pct: percentage_of(operating_income, revenue),
        },
        break_even,
        growth: lever_impact(LeverKind::Growth, &levers),
        defensive: lever_impact(LeverKind::Defensive, &levers),
    })
}

/// Applies every multiplier to a running volume and rounds once at the end.
///
/// Rounding is half away from zero; volumes are never negative, so this is
/// the same as half-up.
fn adjusted_volume(base_volume: u64, levers: &[&Lever]) -> u64 {
    let scaled = levers
        .iter()
        .fold(base_volume as f64, |volume, lever| {
            volume * lever.volume_multiplier()
        });
    scaled.round() as u64
}

fn operating_expenses(
    base: &BaseCosts,
    method: &ProductionOption,
    levers: &[&Lever],
) -> OperatingExpenses {
    let mut selling_marketing = base.selling_marketing;
    let mut brand_rd = base.brand_rd;

    for lever in levers {
        match lever.cost_category() {
            CostCategory::SellingMarketing => selling_marketing += lever.cost_delta(),
            CostCategory::BrandRd => brand_rd += lever.cost_delta(),
        }
    }

    // Floor after all deltas, not per lever.
    let selling_marketing = selling_marketing.max(0.0);
    let brand_rd = brand_rd.max(0.0);
    let plant_operations = method.fixed_plant_operating_cost();

    OperatingExpenses {
        selling_marketing,
        brand_rd,
        plant_operations,
        total: selling_marketing + brand_rd + plant_operations,
        selling_marketing_delta: selling_marketing - base.selling_marketing,
        brand_rd_delta: brand_rd - base.brand_rd,
    }
}

fn break_even(
    unit_price: f64,
    variable_cost: f64,
    total_operating_expense: f64,
    volume: u64,
) -> BreakEvenStatus {
    let contribution_margin = unit_price - variable_cost;
    if contribution_margin <= 0.0 || contribution_margin.is_nan() {
        return BreakEvenStatus::Undefined {
            unit_price,
            variable_cost,
        };
    }

    let breakeven_volume = (total_operating_expense / contribution_margin).ceil() as u64;
    let margin_of_safety = i64::try_from(volume)
        .unwrap_or(i64::MAX)
        .saturating_sub(i64::try_from(breakeven_volume).unwrap_or(i64::MAX));
    let margin_of_safety_pct = if breakeven_volume > 0 {
        margin_of_safety as f64 / breakeven_volume as f64 * 100.0
    } else {
        0.0
    };

    BreakEvenStatus::Defined(BreakEven {
        contribution_margin,
        volume: breakeven_volume,
        margin_of_safety,
        margin_of_safety_pct,
    })
}

fn lever_impact(kind: LeverKind, levers: &[&Lever]) -> LeverImpact {
    let subset: Vec<&Lever> = levers.iter().copied().filter(|l| l.kind() == kind).collect();
    let volume_multiplier = subset.iter().fold(1.0, |acc, l| acc * l.volume_multiplier());
    let cost_impact: f64 = subset.iter().map(|l| l.cost_delta().abs()).sum();

    LeverImpact {
        kind,
        lever_count: subset.len(),
        volume_multiplier,
        volume_change_pct: (volume_multiplier - 1.0) * 100.0,
        cost_impact,
    }
}

#[inline]
fn percentage_of(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        part / whole * 100.0
    } else {
        0.0
    }
}
