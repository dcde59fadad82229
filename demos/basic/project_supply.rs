//! # Exemple de Projection de l'Offre ETH
//!
//! Cet exemple construit un historique synthétique, projette l'offre jour par
//! jour, décompose l'historique puis calcule l'équilibre long terme à partir
//! des dernières données observées.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --example project_supply
//! RUST_LOG=debug cargo run --example project_supply
//! ```

use chrono::{Duration, TimeZone, Utc};
use ethsupply_core::{
    projection_cache_key, solve, EquilibriumParameters, HistoricalInputs, ProjectionParameters,
    Series, Serializable, SerializationFormat, SimulationConfig, TimePoint,
};
use tracing_subscriber::EnvFilter;

/// Burn observé, environ 1.6 ETH par minute
const OBSERVED_BURN_WEI_PER_MINUTE: f64 = 1.6e18;

fn synthetic_history() -> anyhow::Result<HistoricalInputs> {
    let start = Utc
        .with_ymd_and_hms(2022, 1, 1, 0, 0, 0)
        .single()
        .ok_or_else(|| anyhow::anyhow!("date de départ invalide"))?;

    let mut supply = Vec::new();
    let mut staked = Vec::new();
    let mut fraction = Vec::new();
    for day in 0..365 {
        let timestamp = start + Duration::days(day);
        let total = 118_000_000.0 + 5_000.0 * day as f64;
        supply.push(TimePoint::new(timestamp, total));
        staked.push(TimePoint::new(timestamp, 10_000_000.0 + 15_000.0 * day as f64));
        if day % 7 == 0 {
            fraction.push(TimePoint::new(timestamp, 0.35));
        }
    }

    Ok(HistoricalInputs::new(
        Series::new("total_supply", supply)?,
        Series::new("staked_supply", staked)?,
        Series::new("in_contract_fraction", fraction)?,
    )?)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("📈 EthSupply v{}", ethsupply_core::VERSION);

    let config = SimulationConfig::from_json_str(r#"{ "projection": { "sampling_stride_days": 14 } }"#)?;
    let inputs = synthetic_history()?;
    let projector = config.projector();

    // Décomposition de l'historique
    let history = projector.breakdown_history(&inputs)?;
    println!("\n🗂️  Historique: {} points échantillonnés", history.supply.len());
    match history.peak_supply {
        Some(peak) => println!("   Pic d'offre: {:.0} ETH le {}", peak.value, peak.timestamp.date_naive()),
        None => println!("   Aucun pic d'offre: croissance continue"),
    }

    // Projection journalière
    let params = ProjectionParameters::new(
        20_000_000.0,
        15.0,
        Utc.with_ymd_and_hms(2022, 9, 15, 0, 0, 0)
            .single()
            .ok_or_else(|| anyhow::anyhow!("date de transition invalide"))?,
    )?;
    println!("\n🔑 Clé de cache: {}", projection_cache_key(&inputs, &params)?);

    let projected = projector.project(&inputs, &params)?;
    println!("\n🔮 Projection ({} jours):", projector.horizon_days(&inputs));
    for ((supply, staked), (contract, addresses)) in projected
        .supply
        .iter()
        .zip(projected.staked.iter())
        .zip(projected.in_contract.iter().zip(projected.in_addresses.iter()))
    {
        println!(
            "   {} | offre {:>12.0} | staké {:>11.0} | contrats {:>11.0} | adresses {:>11.0}",
            supply.timestamp.date_naive(),
            supply.value,
            staked.value,
            contract.value,
            addresses.value
        );
    }

    // Équilibre long terme
    let equilibrium_params = EquilibriumParameters::from_observed(&inputs, OBSERVED_BURN_WEI_PER_MINUTE)?;
    println!(
        "\n⚖️  Hypothèses observées: APR {:.2}%, burn {:.2}%/an",
        equilibrium_params.staking_apr_fraction * 100.0,
        equilibrium_params.non_staked_burn_fraction * 100.0
    );

    let equilibrium = solve(inputs.total_supply(), &equilibrium_params)?;
    println!("   Offre d'équilibre: {:.1}M ETH", equilibrium.supply_equilibrium / 1e6);
    println!("   Dont staké: {:.1}M ETH", equilibrium.staked_equilibrium / 1e6);
    println!(
        "   Émission annuelle: {:.0} ETH ({:.2}% du staké)",
        equilibrium.cash_flows_equilibrium_issuance,
        equilibrium.yearly_issuance_fraction * 100.0
    );

    let json = Serializable::serialize(&equilibrium_params, SerializationFormat::Json)?;
    println!("\n📄 Paramètres JSON: {}", String::from_utf8(json)?);

    Ok(())
}
