//! Property-based tests over randomly generated catalogs.
//!
//! Lever multipliers, cost amounts and base costs are drawn at random so the
//! floor-at-zero and round-once rules are exercised well beyond the standard
//! dataset.

use std::collections::BTreeSet;

use model_core::engine::{calculate, BreakEvenStatus};
use model_core::scenario::ScenarioState;
use model_core::types::{
    BaseCosts, CostCategory, DemandScenario, Lever, LeverId, LeverKind, ModelError,
    ProductionOption, ReferenceData,
};
use proptest::prelude::*;

#[derive(Clone, Debug)]
struct LeverSpec {
    kind: LeverKind,
    multiplier: f64,
    category: CostCategory,
    amount: f64,
    active: bool,
}

fn lever_strategy() -> impl Strategy<Value = LeverSpec> {
    (
        prop_oneof![Just(LeverKind::Growth), Just(LeverKind::Defensive)],
        0.5f64..1.5,
        prop_oneof![
            Just(CostCategory::SellingMarketing),
            Just(CostCategory::BrandRd)
        ],
        0u32..200_000,
        any::<bool>(),
    )
        .prop_map(|(kind, multiplier, category, amount, active)| LeverSpec {
            kind,
            multiplier,
            category,
            amount: amount as f64,
            active,
        })
}

fn build_catalog(
    unit_price: f64,
    variable_cost: f64,
    base_volume: u64,
    base_sm: u32,
    base_brd: u32,
    specs: &[LeverSpec],
) -> ReferenceData {
    let builder = ReferenceData::builder(
        unit_price,
        BaseCosts {
            selling_marketing: base_sm as f64,
            brand_rd: base_brd as f64,
        },
    )
    .method(ProductionOption::new("m", "Method", variable_cost, 100_000.0))
    .demand(DemandScenario::new("d", "Demand", base_volume));

    specs
        .iter()
        .enumerate()
        .fold(builder, |b, (i, s)| {
            b.lever(Lever::new(
                format!("lever{:02}", i),
                format!("Lever {}", i),
                s.kind,
                s.multiplier,
                s.category,
                s.amount,
            ))
        })
        .build()
        .unwrap()
}

fn active_ids(specs: &[LeverSpec]) -> BTreeSet<LeverId> {
    specs
        .iter()
        .enumerate()
        .filter(|(_, s)| s.active)
        .map(|(i, _)| LeverId::new(format!("lever{:02}", i)))
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_buckets_never_negative(
        base_sm in 0u32..300_000,
        base_brd in 0u32..300_000,
        specs in prop::collection::vec(lever_strategy(), 0..8),
    ) {
        let catalog = build_catalog(4.0, 2.0, 100_000, base_sm, base_brd, &specs);
        let state = ScenarioState::with_selection("m", "d", active_ids(&specs));
        let result = calculate(&state, &catalog).unwrap();
        let opex = &result.income.operating_expenses;

        prop_assert!(opex.selling_marketing >= 0.0);
        prop_assert!(opex.brand_rd >= 0.0);

        let mut sm = base_sm as f64;
        let mut brd = base_brd as f64;
        for s in specs.iter().filter(|s| s.active) {
            let signed = match s.kind {
                LeverKind::Growth => s.amount,
                LeverKind::Defensive => -s.amount,
            };
            match s.category {
                CostCategory::SellingMarketing => sm += signed,
                CostCategory::BrandRd => brd += signed,
            }
        }
        prop_assert_eq!(opex.selling_marketing, sm.max(0.0));
        prop_assert_eq!(opex.brand_rd, brd.max(0.0));
        prop_assert_eq!(
            opex.total,
            opex.selling_marketing + opex.brand_rd + opex.plant_operations
        );
    }

    #[test]
    fn prop_volume_rounded_once(
        base_volume in 1u64..2_000_000,
        specs in prop::collection::vec(lever_strategy(), 0..8),
    ) {
        let catalog = build_catalog(4.0, 2.0, base_volume, 0, 0, &specs);
        let state = ScenarioState::with_selection("m", "d", active_ids(&specs));
        let result = calculate(&state, &catalog).unwrap();

        // Ids are zero-padded, so sorted order is index order.
        let scaled = specs
            .iter()
            .filter(|s| s.active)
            .fold(base_volume as f64, |v, s| v * s.multiplier);
        prop_assert_eq!(result.volume, scaled.round() as u64);
    }

    #[test]
    fn prop_toggle_is_an_involution(
        specs in prop::collection::vec(lever_strategy(), 1..8),
        pick in any::<prop::sample::Index>(),
    ) {
        let catalog = build_catalog(4.0, 2.0, 500_000, 280_000, 170_000, &specs);
        let mut state = ScenarioState::with_selection("m", "d", active_ids(&specs));
        let before_state = state.clone();
        let before = calculate(&state, &catalog).unwrap();

        let id = format!("lever{:02}", pick.index(specs.len()));
        state.toggle_lever(&catalog, &id).unwrap();
        state.toggle_lever(&catalog, &id).unwrap();

        prop_assert_eq!(&state, &before_state);
        prop_assert_eq!(calculate(&state, &catalog).unwrap(), before);
    }

    #[test]
    fn prop_margin_of_safety_identity(
        unit_price in 0.5f64..10.0,
        variable_cost in 0.0f64..10.0,
        specs in prop::collection::vec(lever_strategy(), 0..6),
    ) {
        // Keep break-even volumes inside the integer range.
        prop_assume!(unit_price <= variable_cost || unit_price - variable_cost > 0.01);
        let catalog = build_catalog(unit_price, variable_cost, 400_000, 280_000, 170_000, &specs);
        let state = ScenarioState::with_selection("m", "d", active_ids(&specs));
        let result = calculate(&state, &catalog).unwrap();

        match &result.break_even {
            BreakEvenStatus::Defined(be) => {
                prop_assert!(unit_price > variable_cost);
                prop_assert_eq!(be.margin_of_safety, result.volume as i64 - be.volume as i64);
                let needed = result.income.operating_expenses.total / be.contribution_margin;
                prop_assert!(be.volume as f64 >= needed);
                prop_assert!((be.volume as f64) < needed + 1.0);
            }
            BreakEvenStatus::Undefined { .. } => {
                prop_assert!(unit_price <= variable_cost);
                let is_degenerate = matches!(
                    result.break_even(),
                    Err(ModelError::DegenerateContributionMargin { .. })
                );
                prop_assert!(is_degenerate);
            }
        }
    }

    #[test]
    fn prop_calculation_is_deterministic(
        specs in prop::collection::vec(lever_strategy(), 0..8),
    ) {
        let catalog = build_catalog(4.0, 1.8, 650_000, 280_000, 170_000, &specs);
        let state = ScenarioState::with_selection("m", "d", active_ids(&specs));
        let a = calculate(&state, &catalog).unwrap();
        let b = calculate(&state.clone(), &catalog).unwrap();
        prop_assert_eq!(a.income.operating_income.to_bits(), b.income.operating_income.to_bits());
        prop_assert_eq!(a, b);
    }
}
