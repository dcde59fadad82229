//! Tests d'intégration pour EthSupply Core
//!
//! Scénarios complets de projection et d'équilibre, plus les propriétés
//! vérifiées par proptest.

mod equilibrium_scenarios;
mod properties;

use chrono::{DateTime, Duration, TimeZone, Utc};
use ethsupply_core::{HistoricalInputs, Series, TimePoint};

/// Minuit UTC à la date donnée
pub fn date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
}

/// Série journalière à partir de `start`
pub fn daily_series(name: &'static str, start: DateTime<Utc>, values: &[f64]) -> Series {
    let points = values
        .iter()
        .enumerate()
        .map(|(i, v)| TimePoint::new(start + Duration::days(i as i64), *v))
        .collect();
    Series::new(name, points).unwrap()
}

/// Historique synthétique : offre croissante, staking et contrats proportionnels
pub fn synthetic_history(
    start: DateTime<Utc>,
    days: usize,
    initial_supply: f64,
    daily_growth: f64,
    staked_ratio: f64,
    contract_fraction: f64,
) -> HistoricalInputs {
    let supply: Vec<f64> = (0..days)
        .map(|i| initial_supply + daily_growth * i as f64)
        .collect();
    let staked: Vec<f64> = supply.iter().map(|s| s * staked_ratio).collect();
    let fraction = vec![contract_fraction; days];

    HistoricalInputs::new(
        daily_series("total_supply", start, &supply),
        daily_series("staked_supply", start, &staked),
        daily_series("in_contract_fraction", start, &fraction),
    )
    .unwrap()
}

/// Vérifie l'égalité à `epsilon` près
pub fn assert_close(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() <= epsilon,
        "{} != {} (epsilon {})",
        actual,
        expected,
        epsilon
    );
}
