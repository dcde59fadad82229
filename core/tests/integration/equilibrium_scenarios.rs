//! Scénarios d'équilibre long terme

use super::*;
use ethsupply_core::{
    burn_from_fraction, issuance_apr, issuance_per_year, solve, EquilibriumConfig,
    EquilibriumParameters, EquilibriumSolver, SimulationConfig, SupplyError,
};
use ethsupply_core::model::{WEI_PER_ETH, YEAR_IN_MINUTES};

fn flat_history(value: f64) -> Series {
    daily_series("total_supply", date(2023, 1, 1), &[value, value])
}

#[test]
fn test_issuance_and_burn_balance_at_equilibrium() {
    let params = EquilibriumParameters::new(0.05, 0.02).unwrap();
    let result = solve(&flat_history(120_000_000.0), &params).unwrap();

    let issuance = issuance_per_year(result.staked_equilibrium).unwrap();
    let burn = burn_from_fraction(0.02, result.non_staked_supply_equilibrium);
    assert!(
        ((issuance - burn) / issuance).abs() < 0.01,
        "émission {} vs burn {}",
        issuance,
        burn
    );
    assert_close(result.cash_flows_equilibrium_issuance, issuance, 1e-9);
}

#[test]
fn test_equilibrium_is_independent_of_seed_direction() {
    let params = EquilibriumParameters::new(0.05, 0.02).unwrap();
    let from_below = solve(&flat_history(20_000_000.0), &params).unwrap();
    let from_above = solve(&flat_history(120_000_000.0), &params).unwrap();

    // Approche par le bas : croissance monotone
    let below: Vec<f64> = from_below.series.iter().map(|p| p.value).collect();
    assert!(below.windows(2).all(|w| w[1] >= w[0]));

    // Approche par le haut : décroissance monotone
    let above: Vec<f64> = from_above.series.iter().map(|p| p.value).collect();
    assert!(above.windows(2).all(|w| w[1] <= w[0]));

    assert!(from_below.supply_equilibrium < from_above.supply_equilibrium);
    let relative_gap = (from_above.supply_equilibrium - from_below.supply_equilibrium)
        / from_above.supply_equilibrium;
    assert!(relative_gap < 0.05);
}

#[test]
fn test_no_burn_grows_strictly() {
    let params = EquilibriumParameters::new(0.05, 0.0).unwrap();
    let solver = EquilibriumSolver::new(EquilibriumConfig { iterations: 25 });
    let result = solver.solve(&flat_history(120_000_000.0), &params).unwrap();

    let values: Vec<f64> = result.series.iter().map(|p| p.value).collect();
    assert_eq!(values.len(), 1 + 25);
    assert!(values.windows(2).all(|w| w[1] > w[0]));

    let expected = 120_000_000.0 + 25.0 * result.cash_flows_equilibrium_issuance;
    assert_close(result.supply_equilibrium, expected, 1e-3);
}

#[test]
fn test_lookup_matches_series() {
    let params = EquilibriumParameters::new(0.04, 0.015).unwrap();
    let result = solve(&flat_history(118_000_000.0), &params).unwrap();

    for point in result.series.iter() {
        assert_eq!(result.supply_by_timestamp.get(&point.timestamp), Some(&point.value));
    }
    assert_eq!(
        result.series.last().unwrap().timestamp,
        date(2023 + 300, 1, 1)
    );
}

#[test]
fn test_parameters_from_observed_data() {
    let inputs = synthetic_history(date(2023, 1, 1), 30, 120_000_000.0, 0.0, 0.15, 0.3);
    let staked = inputs.last_staked().unwrap().value;
    let non_staked = 120_000_000.0 - staked;

    // 2 % par an de l'offre non stakée, exprimé en wei par minute
    let wei_per_minute = 0.02 * non_staked * WEI_PER_ETH / YEAR_IN_MINUTES;
    let params = EquilibriumParameters::from_observed(&inputs, wei_per_minute).unwrap();

    assert_close(params.staking_apr_fraction, issuance_apr(staked).unwrap(), 1e-12);
    assert_close(params.non_staked_burn_fraction, 0.02, 1e-9);

    let result = solve(inputs.total_supply(), &params).unwrap();
    assert!((result.staked_equilibrium - staked).abs() / staked < 1e-6);
}

#[test]
fn test_config_driven_solver() {
    let config = SimulationConfig::from_json_str(r#"{ "equilibrium": { "iterations": 5 } }"#).unwrap();
    let params = EquilibriumParameters::new(0.05, 0.02).unwrap();
    let result = config.solver().solve(&flat_history(120_000_000.0), &params).unwrap();
    assert_eq!(result.series.len(), 1 + 5);
}

#[test]
fn test_rejects_non_positive_apr() {
    assert!(matches!(
        EquilibriumParameters::new(0.0, 0.02),
        Err(SupplyError::Validation { .. })
    ));
    assert!(EquilibriumParameters::new(-0.01, 0.02).is_err());
}
