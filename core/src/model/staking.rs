//! Flux de staking journalier
//!
//! Le mouvement d'ETH vers ou hors du staking est borné par le churn des
//! validateurs : `max(4, validateurs_actifs / 65536)` validateurs par epoch.

use super::{EPOCHS_PER_DAY, MAX_EFFECTIVE_BALANCE_ETH};

/// Churn minimum par epoch (validateurs)
pub const MIN_PER_EPOCH_CHURN_LIMIT: f64 = 4.0;

/// Quotient de churn du protocole
pub const CHURN_LIMIT_QUOTIENT: f64 = 65_536.0;

/// ETH pouvant entrer ou sortir du staking en une journée
pub fn estimated_daily_stake_change(staked_amount: f64) -> f64 {
    let active_validators = (staked_amount / MAX_EFFECTIVE_BALANCE_ETH).max(0.0);
    let churn_per_epoch =
        MIN_PER_EPOCH_CHURN_LIMIT.max((active_validators / CHURN_LIMIT_QUOTIENT).floor());
    churn_per_epoch * MAX_EFFECTIVE_BALANCE_ETH * EPOCHS_PER_DAY
}

/// Rapproche `staked` de `target` d'au plus une journée de churn, sans dépasser
pub fn step_toward_target(staked: f64, target: f64) -> f64 {
    if staked < target {
        target.min(staked + estimated_daily_stake_change(staked))
    } else if staked > target {
        target.max(staked - estimated_daily_stake_change(staked))
    } else {
        staked
    }
}
