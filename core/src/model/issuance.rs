//! Modèle d'émission proof-of-stake
//!
//! L'émission maximum par epoch suit la courbe du protocole :
//! `trunc(64 · balance / floor(√balance))`, balance en gwei. Les étapes
//! floor/trunc sont reproduites à l'identique : les écarts flottants
//! s'accumulent sur les longs horizons.

use super::{
    BASE_REWARDS_PER_EPOCH, BASE_REWARD_FACTOR, EPOCHS_PER_DAY, EPOCHS_PER_YEAR, GWEI_PER_ETH,
    MAX_EFFECTIVE_BALANCE, MAX_EFFECTIVE_BALANCE_ETH,
};
use crate::error::{Result, SupplyError};

fn ensure_stake(staked_amount: f64) -> Result<()> {
    if !staked_amount.is_finite() || staked_amount < 0.0 {
        return Err(SupplyError::invalid_parameter(
            "staked_amount",
            format!("doit être fini et positif, reçu {}", staked_amount),
        ));
    }
    Ok(())
}

/// Émission maximum par epoch, en gwei
fn issuance_per_epoch_gwei(staked_amount: f64) -> Result<f64> {
    ensure_stake(staked_amount)?;

    let balance_sum_gwei = staked_amount * GWEI_PER_ETH;
    let sqrt_floor = balance_sum_gwei.sqrt().floor();
    if sqrt_floor == 0.0 {
        // Aucun validateur actif
        return Ok(0.0);
    }
    Ok(((BASE_REWARD_FACTOR * balance_sum_gwei) / sqrt_floor).trunc())
}

/// Émission annuelle (ETH) pour un montant staké (ETH)
pub fn issuance_per_year(staked_amount: f64) -> Result<f64> {
    Ok(issuance_per_epoch_gwei(staked_amount)? * EPOCHS_PER_YEAR / GWEI_PER_ETH)
}

/// Émission journalière (ETH), égale à `issuance_per_year / 365.25`
pub fn issuance_per_day(staked_amount: f64) -> Result<f64> {
    Ok(issuance_per_epoch_gwei(staked_amount)? * EPOCHS_PER_DAY / GWEI_PER_ETH)
}

/// APR d'émission (fraction annuelle) pour un montant staké
pub fn issuance_apr(staked_amount: f64) -> Result<f64> {
    ensure_stake(staked_amount)?;
    if staked_amount == 0.0 {
        return Err(SupplyError::degenerate(
            "APR indéfini pour un montant staké nul",
        ));
    }

    let balance_sum_gwei = staked_amount * GWEI_PER_ETH;
    let issuance_per_year_gwei = issuance_per_epoch_gwei(staked_amount)? * EPOCHS_PER_YEAR;
    Ok(issuance_per_year_gwei / balance_sum_gwei)
}

/// Montant staké (ETH) impliqué par un APR
///
/// Inverse approché de [`issuance_apr`] : la récompense de base par
/// validateur est déduite de l'APR, puis la courbe est inversée sans les
/// étapes floor/trunc. L'aller-retour n'est donc pas exact (écart relatif de
/// l'ordre de 1e-8 sur les APR réalistes).
pub fn staked_amount_from_apr(apr_fraction: f64) -> Result<f64> {
    if !apr_fraction.is_finite() || apr_fraction <= 0.0 {
        return Err(SupplyError::degenerate(format!(
            "APR doit être strictement positif, reçu {}",
            apr_fraction
        )));
    }

    let base_reward =
        apr_fraction * MAX_EFFECTIVE_BALANCE / BASE_REWARDS_PER_EPOCH / EPOCHS_PER_YEAR;
    let active_validators = ((MAX_EFFECTIVE_BALANCE * BASE_REWARD_FACTOR)
        / BASE_REWARDS_PER_EPOCH
        / base_reward)
        .powi(2)
        / MAX_EFFECTIVE_BALANCE;

    Ok(active_validators * MAX_EFFECTIVE_BALANCE_ETH)
}
