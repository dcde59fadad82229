//! Modèle de burn des frais
//!
//! Deux formes d'hypothèse coexistent :
//! - une base fee supposée, convertie en ETH brûlé par jour par un estimateur
//! - une fraction annuelle de l'offre non stakée, utilisée par l'équilibre

use serde::{Deserialize, Serialize};

use super::{GWEI_PER_ETH, WEI_PER_ETH, YEAR_IN_MINUTES};
use crate::error::{Result, SupplyError};

/// Estimateur du burn journalier pour une base fee soutenue
pub trait FeeBurnEstimator {
    /// ETH brûlés par jour à `base_fee_gwei`
    fn daily_fee_burn(&self, base_fee_gwei: f64) -> Result<f64>;
}

/// Estimateur par défaut : blocs remplis à la cible de gas EIP-1559
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GasTargetFeeBurn {
    /// Gas consommé par bloc
    pub gas_per_block: f64,
    /// Blocs produits par jour
    pub blocks_per_day: f64,
}

impl Default for GasTargetFeeBurn {
    fn default() -> Self {
        Self {
            gas_per_block: 15_000_000.0, // cible EIP-1559
            blocks_per_day: 7_200.0,     // un bloc par slot de 12s
        }
    }
}

impl FeeBurnEstimator for GasTargetFeeBurn {
    fn daily_fee_burn(&self, base_fee_gwei: f64) -> Result<f64> {
        if !base_fee_gwei.is_finite() || base_fee_gwei < 0.0 {
            return Err(SupplyError::invalid_parameter(
                "assumed_base_fee",
                format!("doit être fini et positif, reçu {}", base_fee_gwei),
            ));
        }
        Ok(base_fee_gwei * self.gas_per_block * self.blocks_per_day / GWEI_PER_ETH)
    }
}

/// Burn journalier avec l'estimateur par défaut
pub fn daily_fee_burn(base_fee_gwei: f64) -> Result<f64> {
    GasTargetFeeBurn::default().daily_fee_burn(base_fee_gwei)
}

/// Burn annuel pour une fraction de l'offre non stakée
pub fn burn_from_fraction(yearly_fraction: f64, non_staked_supply: f64) -> f64 {
    yearly_fraction * non_staked_supply
}

/// Convertit un burn observé (wei par minute) en fraction annuelle de l'offre non stakée
pub fn fraction_from_burn_rate(non_staked_supply: f64, wei_per_minute: f64) -> Result<f64> {
    if !wei_per_minute.is_finite() || wei_per_minute < 0.0 {
        return Err(SupplyError::invalid_parameter(
            "wei_per_minute",
            format!("doit être fini et positif, reçu {}", wei_per_minute),
        ));
    }
    if !non_staked_supply.is_finite() || non_staked_supply == 0.0 {
        return Err(SupplyError::degenerate(format!(
            "offre non stakée inutilisable pour une fraction: {}",
            non_staked_supply
        )));
    }

    Ok((wei_per_minute / WEI_PER_ETH) * YEAR_IN_MINUTES / non_staked_supply)
}
