//! Équilibre long terme de l'offre
//!
//! Pour un APR de staking et une fraction de burn fixés, l'offre est simulée
//! année par année jusqu'à ce que l'émission et le burn se compensent
//! approximativement. Il s'agit d'une approximation de point fixe par
//! simulation : 300 itérations suffisent pour les plages de paramètres
//! réalistes, sans garantie mathématique de convergence.

use chrono::Months;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{Result, SupplyError};
use crate::model::{burn, issuance};
use crate::series::{HistoricalInputs, Series, SupplyLookup, TimePoint};
use crate::validation::InputValidator;

/// Hypothèses d'équilibre, ajustables indépendamment de la projection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquilibriumParameters {
    /// APR d'émission des validateurs (fraction annuelle)
    pub staking_apr_fraction: f64,
    /// Burn annuel en fraction de l'offre non stakée
    pub non_staked_burn_fraction: f64,
}

impl EquilibriumParameters {
    pub fn new(staking_apr_fraction: f64, non_staked_burn_fraction: f64) -> Result<Self> {
        let params = Self {
            staking_apr_fraction,
            non_staked_burn_fraction,
        };
        InputValidator::default()
            .validate_equilibrium_parameters(&params)
            .into_result()?;
        Ok(params)
    }

    /// Hypothèses initiales déduites des dernières données observées
    ///
    /// L'APR est celui du staking actuel, la fraction de burn celle du burn
    /// observé (wei par minute) rapporté à l'offre non stakée actuelle.
    pub fn from_observed(inputs: &HistoricalInputs, burn_rate_wei_per_minute: f64) -> Result<Self> {
        let supply = inputs.last_supply()?.value;
        let staked = inputs.last_staked()?.value;

        let staking_apr_fraction = issuance::issuance_apr(staked)?;
        let non_staked_burn_fraction =
            burn::fraction_from_burn_rate(supply - staked, burn_rate_wei_per_minute)?;

        Self::new(staking_apr_fraction, non_staked_burn_fraction)
    }
}

/// Configuration du solveur
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EquilibriumConfig {
    /// Nombre de pas annuels simulés
    pub iterations: usize,
}

impl Default for EquilibriumConfig {
    fn default() -> Self {
        Self { iterations: 300 }
    }
}

/// Résultat de l'équilibre
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquilibriumResult {
    /// Historique mensuel suivi de l'horizon annuel
    pub series: Series,
    pub supply_by_timestamp: SupplyLookup,
    pub supply_equilibrium: f64,
    pub non_staked_supply_equilibrium: f64,
    pub staked_equilibrium: f64,
    /// Émission annuelle pour laquelle émission et burn se compensent
    pub cash_flows_equilibrium_issuance: f64,
    /// Émission annuelle en fraction du staké
    pub yearly_issuance_fraction: f64,
}

/// Solveur d'équilibre par simulation annuelle
#[derive(Debug, Clone, Default)]
pub struct EquilibriumSolver {
    config: EquilibriumConfig,
}

impl EquilibriumSolver {
    pub fn new(config: EquilibriumConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EquilibriumConfig {
        &self.config
    }

    /// Simule l'offre sur l'horizon et retourne l'équilibre atteint
    pub fn solve(
        &self,
        historical_supply: &Series,
        params: &EquilibriumParameters,
    ) -> Result<EquilibriumResult> {
        InputValidator::default()
            .validate_equilibrium_parameters(params)
            .into_result()?;

        let mut series = historical_supply.monthly();
        let seed = *series.last().ok_or(SupplyError::InsufficientHistory {
            series: "total_supply",
            required: 1,
            actual: 0,
        })?;

        // Le staké est fixé sur tout l'horizon
        let staked = issuance::staked_amount_from_apr(params.staking_apr_fraction)?;
        let yearly_issuance = issuance::issuance_per_year(staked)?;

        if staked > seed.value {
            warn!(
                "Staké impliqué par l'APR ({:.0} ETH) supérieur à l'offre ({:.0} ETH)",
                staked, seed.value
            );
        }
        debug!(
            "Équilibre: staké {:.0} ETH, émission {:.0} ETH/an, {} itérations",
            staked, yearly_issuance, self.config.iterations
        );

        let mut supply = seed;
        let mut non_staked = seed.value - staked;

        for _ in 0..self.config.iterations {
            let next_year = supply
                .timestamp
                .checked_add_months(Months::new(12))
                .ok_or_else(|| SupplyError::DateOutOfRange {
                    message: format!("impossible d'avancer d'un an depuis {}", supply.timestamp),
                })?;
            let yearly_burn = burn::burn_from_fraction(params.non_staked_burn_fraction, non_staked);

            supply = TimePoint::new(next_year, supply.value + yearly_issuance - yearly_burn);
            series.push(supply)?;
            non_staked = supply.value - staked;
        }

        if !supply.value.is_finite() {
            return Err(SupplyError::degenerate(format!(
                "offre d'équilibre non finie: {}",
                supply.value
            )));
        }

        let result = EquilibriumResult {
            supply_by_timestamp: series.to_lookup(),
            series,
            supply_equilibrium: supply.value,
            non_staked_supply_equilibrium: non_staked,
            staked_equilibrium: staked,
            cash_flows_equilibrium_issuance: yearly_issuance,
            yearly_issuance_fraction: issuance::issuance_apr(staked)?,
        };

        info!(
            "Équilibre atteint: offre {:.0} ETH, non staké {:.0} ETH",
            result.supply_equilibrium, result.non_staked_supply_equilibrium
        );

        Ok(result)
    }
}

/// Résout l'équilibre avec la configuration par défaut
pub fn solve(historical_supply: &Series, params: &EquilibriumParameters) -> Result<EquilibriumResult> {
    EquilibriumSolver::default().solve(historical_supply, params)
}
