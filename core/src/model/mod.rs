//! Modèles feuilles de l'offre ETH
//!
//! Ce module regroupe les formules pures utilisées par les simulations :
//! - Émission proof-of-stake et APR (courbe de récompense en 1/√stake)
//! - Burn des frais (base fee supposée ou fraction annuelle)
//! - Flux de staking journalier limité par le churn des validateurs

pub mod burn;
pub mod issuance;
pub mod staking;

// Re-exports principaux
pub use burn::{
    burn_from_fraction, daily_fee_burn, fraction_from_burn_rate, FeeBurnEstimator,
    GasTargetFeeBurn,
};
pub use issuance::{
    issuance_apr, issuance_per_day, issuance_per_year, staked_amount_from_apr,
};
pub use staking::{estimated_daily_stake_change, step_toward_target};

/// Gwei par ETH
pub const GWEI_PER_ETH: f64 = 1e9;

/// Wei par ETH
pub const WEI_PER_ETH: f64 = 1e18;

/// Durée d'un slot (secondes)
pub const SECONDS_PER_SLOT: u64 = 12;

/// Slots par epoch
pub const SLOTS_PER_EPOCH: u64 = 32;

/// Epochs par jour (225)
pub const EPOCHS_PER_DAY: f64 = (24 * 60 * 60) as f64 / (SLOTS_PER_EPOCH * SECONDS_PER_SLOT) as f64;

/// Jours par an utilisés par tous les modèles
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Epochs par an
pub const EPOCHS_PER_YEAR: f64 = DAYS_PER_YEAR * EPOCHS_PER_DAY;

/// Minutes par an
pub const YEAR_IN_MINUTES: f64 = DAYS_PER_YEAR * 24.0 * 60.0;

/// Facteur de récompense de base du protocole
pub const BASE_REWARD_FACTOR: f64 = 64.0;

/// Balance effective maximum d'un validateur (ETH)
pub const MAX_EFFECTIVE_BALANCE_ETH: f64 = 32.0;

/// Balance effective maximum d'un validateur (gwei)
pub const MAX_EFFECTIVE_BALANCE: f64 = MAX_EFFECTIVE_BALANCE_ETH * GWEI_PER_ETH;

/// Récompenses de base versées par epoch
pub const BASE_REWARDS_PER_EPOCH: f64 = 4.0;
