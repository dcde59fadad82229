//! Propriétés vérifiées par proptest

use super::*;
use ethsupply_core::{
    issuance_apr, project, solve, staked_amount_from_apr, EquilibriumConfig,
    EquilibriumParameters, EquilibriumSolver, ProjectionParameters,
};
use proptest::prelude::*;

/// Historique journalier arbitraire mais valide
fn arb_history() -> impl Strategy<Value = HistoricalInputs> {
    (
        2usize..150,
        90_000_000.0f64..130_000_000.0,
        -5_000.0f64..20_000.0,
        0.0f64..0.5,
        0.0f64..1.0,
    )
        .prop_map(|(days, initial, growth, staked_ratio, fraction)| {
            synthetic_history(date(2021, 1, 1), days, initial, growth, staked_ratio, fraction)
        })
}

fn arb_params() -> impl Strategy<Value = ProjectionParameters> {
    (0.0f64..60_000_000.0, 0.0f64..200.0, 0i64..1_000).prop_map(|(target, base_fee, offset)| {
        ProjectionParameters::new(target, base_fee, date(2021, 1, 1) + Duration::days(offset))
            .unwrap()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_projected_supply_covers_staked(inputs in arb_history(), params in arb_params()) {
        let projected = project(&inputs, &params).unwrap();

        for (supply, staked) in projected.supply.iter().zip(projected.staked.iter()) {
            prop_assert_eq!(supply.timestamp, staked.timestamp);
            prop_assert!(supply.value >= 0.0);
            prop_assert!(supply.value >= staked.value);
        }
    }

    #[test]
    fn prop_buckets_sum_to_non_staked(inputs in arb_history(), params in arb_params()) {
        let projected = project(&inputs, &params).unwrap();

        let buckets = projected
            .supply
            .iter()
            .zip(projected.staked.iter())
            .zip(projected.in_contract.iter().zip(projected.in_addresses.iter()));
        for ((supply, staked), (contract, addresses)) in buckets {
            prop_assert!(contract.value >= 0.0);
            prop_assert!(addresses.value >= 0.0);
            let non_staked = supply.value - staked.value;
            prop_assert!((contract.value + addresses.value - non_staked).abs() < 1e-6);
        }
    }

    #[test]
    fn prop_staking_flat_when_target_is_current(inputs in arb_history(), base_fee in 0.0f64..200.0) {
        let current = inputs.last_staked().unwrap().value;
        let params = ProjectionParameters::new(current, base_fee, date(2022, 9, 15)).unwrap();
        let projected = project(&inputs, &params).unwrap();

        prop_assert!(projected.staked.iter().all(|p| p.value == current));
    }

    #[test]
    fn prop_projection_timestamps_follow_history(inputs in arb_history(), params in arb_params()) {
        let projected = project(&inputs, &params).unwrap();
        let last = inputs.last_supply().unwrap();

        prop_assert_eq!(projected.supply.first().unwrap().timestamp, last.timestamp);
        prop_assert!(projected.supply.len() >= 2);
        for point in projected.supply.iter() {
            prop_assert_eq!(projected.supply_at(point.timestamp), Some(point.value));
        }
    }

    #[test]
    fn prop_apr_inverse_roundtrip(apr in 0.01f64..0.10) {
        let staked = staked_amount_from_apr(apr).unwrap();
        let recovered = issuance_apr(staked).unwrap();
        prop_assert!(((recovered - apr) / apr).abs() < 1e-6);
    }

    #[test]
    fn prop_equilibrium_without_burn_grows(
        apr in 0.02f64..0.10,
        seed in 50_000_000.0f64..150_000_000.0,
    ) {
        let params = EquilibriumParameters::new(apr, 0.0).unwrap();
        let solver = EquilibriumSolver::new(EquilibriumConfig { iterations: 20 });
        let history = daily_series("total_supply", date(2023, 1, 1), &[seed, seed]);
        let result = solver.solve(&history, &params).unwrap();

        let values: Vec<f64> = result.series.iter().map(|p| p.value).collect();
        prop_assert!(values.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn prop_equilibrium_balances_cash_flows(apr in 0.03f64..0.06, burn in 0.02f64..0.05) {
        let params = EquilibriumParameters::new(apr, burn).unwrap();
        let history = daily_series("total_supply", date(2023, 1, 1), &[120_000_000.0, 120_000_000.0]);
        let result = solve(&history, &params).unwrap();

        let burned = burn * result.non_staked_supply_equilibrium;
        let issued = result.cash_flows_equilibrium_issuance;
        prop_assert!(((issued - burned) / issued).abs() < 0.02);
    }
}
