//! Projection journalière de l'offre
//!
//! À partir du dernier point historique, la projection avance jour par jour :
//! le staking se rapproche de la cible au rythme du churn, l'émission PoS
//! (plus l'émission PoW avant la transition) s'ajoute et le burn des frais se
//! retranche après son activation. Un point est émis tous les
//! `sampling_stride_days` jours ainsi que le dernier jour.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Result, SupplyError};
use crate::model::{issuance, staking, FeeBurnEstimator, GasTargetFeeBurn};
use crate::series::{HistoricalInputs, Series, SupplyLookup, TimePoint};
use crate::validation::InputValidator;

/// Activation du burn des frais (London, EIP-1559)
const LONDON_ACTIVATION_DATE: NaiveDate = match NaiveDate::from_ymd_opt(2021, 8, 4) {
    Some(date) => date,
    None => panic!("date d'activation London invalide"),
};

/// Paramètres d'une projection, immuables pendant un calcul
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionParameters {
    /// Montant staké visé (ETH)
    pub target_staked_amount: f64,
    /// Base fee soutenue supposée (gwei)
    pub assumed_base_fee: f64,
    /// Date supposée de passage au proof-of-stake complet
    pub transition_date: DateTime<Utc>,
}

impl ProjectionParameters {
    pub fn new(
        target_staked_amount: f64,
        assumed_base_fee: f64,
        transition_date: DateTime<Utc>,
    ) -> Result<Self> {
        let params = Self {
            target_staked_amount,
            assumed_base_fee,
            transition_date,
        };
        InputValidator::default()
            .validate_projection_parameters(&params)
            .into_result()?;
        Ok(params)
    }
}

/// Configuration de la projection journalière
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    /// Un point émis tous les N jours
    pub sampling_stride_days: usize,
    /// Horizon de projection en fraction de la durée de l'historique
    pub horizon_ratio: f64,
    /// Horizon minimum (jours)
    pub min_horizon_days: usize,
    /// Émission PoW journalière avant la transition (ETH)
    pub pow_daily_issuance: f64,
    /// Activation du burn des frais (London, EIP-1559)
    pub fee_burn_activation: DateTime<Utc>,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            sampling_stride_days: 7,
            horizon_ratio: 0.5,
            min_horizon_days: 1,
            pow_daily_issuance: 13_500.0,
            fee_burn_activation: LONDON_ACTIVATION_DATE.and_time(NaiveTime::MIN).and_utc(),
        }
    }
}

impl ProjectionConfig {
    fn validate(&self) -> Result<()> {
        if self.sampling_stride_days == 0 {
            return Err(SupplyError::invalid_parameter(
                "sampling_stride_days",
                "doit être au moins 1",
            ));
        }
        if !self.horizon_ratio.is_finite() || self.horizon_ratio < 0.0 {
            return Err(SupplyError::invalid_parameter(
                "horizon_ratio",
                format!("doit être fini et positif, reçu {}", self.horizon_ratio),
            ));
        }
        if !self.pow_daily_issuance.is_finite() || self.pow_daily_issuance < 0.0 {
            return Err(SupplyError::invalid_parameter(
                "pow_daily_issuance",
                format!("doit être fini et positif, reçu {}", self.pow_daily_issuance),
            ));
        }
        Ok(())
    }
}

/// Séries projetées
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectedSeries {
    /// Offre totale rapportée (jamais inférieure au staké)
    pub supply: Series,
    /// ETH staké
    pub staked: Series,
    /// ETH en contrats (hors staking)
    pub in_contract: Series,
    /// ETH sur des adresses
    pub in_addresses: Series,
    /// Offre totale par timestamp, historique et projection
    pub supply_by_timestamp: SupplyLookup,
}

impl ProjectedSeries {
    /// Offre totale à une date historique ou projetée
    pub fn supply_at(&self, timestamp: DateTime<Utc>) -> Option<f64> {
        self.supply_by_timestamp.get(&timestamp).copied()
    }
}

/// Décomposition échantillonnée de l'historique
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalBreakdown {
    pub supply: Series,
    /// Uniquement aux dates où le staking est mesuré
    pub staked: Series,
    pub in_contract: Series,
    pub in_addresses: Series,
    /// Maximum atteint avant le premier déclin de l'offre
    pub peak_supply: Option<TimePoint>,
}

/// Accumulateur de la boucle journalière
#[derive(Debug, Clone, Copy, PartialEq)]
struct DailyProjectionState {
    supply: f64,
    staked: f64,
}

impl DailyProjectionState {
    fn advance(
        self,
        date: DateTime<Utc>,
        params: &ProjectionParameters,
        config: &ProjectionConfig,
        daily_burn: f64,
    ) -> Result<Self> {
        let staked = staking::step_toward_target(self.staked, params.target_staked_amount);

        let mut new_issuance = issuance::issuance_per_day(staked)?;
        if date < params.transition_date {
            new_issuance += config.pow_daily_issuance;
        }

        let burn = if date >= config.fee_burn_activation {
            daily_burn
        } else {
            0.0
        };

        Ok(Self {
            supply: (self.supply + new_issuance - burn).max(0.0),
            staked,
        })
    }

    /// L'offre rapportée ne descend jamais sous le montant staké
    fn reported_supply(&self) -> f64 {
        self.supply.max(self.staked)
    }

    fn non_staked(&self) -> f64 {
        (self.supply - self.staked).max(0.0)
    }
}

/// Répartit l'offre non stakée entre contrats et adresses
///
/// Si les adresses passent sous la moitié des contrats, la répartition est
/// forcée à 2/3 contrats, 1/3 adresses.
fn split_non_staked(non_staked: f64, last_in_contract: f64) -> (f64, f64) {
    let mut in_contract = last_in_contract.min(non_staked);
    let mut in_addresses = non_staked - in_contract;
    if in_addresses < in_contract * 0.5 {
        in_contract = (non_staked * 2.0 / 3.0).floor();
        in_addresses = non_staked - in_contract;
    }
    (in_contract, in_addresses)
}

fn start_of_day(timestamp: DateTime<Utc>) -> Result<DateTime<Utc>> {
    let midnight = timestamp
        .date_naive()
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| SupplyError::DateOutOfRange {
            message: format!("minuit introuvable pour {}", timestamp),
        })?;
    Ok(Utc.from_utc_datetime(&midnight))
}

/// Projecteur journalier de l'offre
#[derive(Debug, Clone)]
pub struct SupplyProjector<E = GasTargetFeeBurn> {
    config: ProjectionConfig,
    burn_estimator: E,
}

impl SupplyProjector<GasTargetFeeBurn> {
    pub fn new(config: ProjectionConfig) -> Self {
        Self::with_estimator(config, GasTargetFeeBurn::default())
    }
}

impl Default for SupplyProjector<GasTargetFeeBurn> {
    fn default() -> Self {
        Self::new(ProjectionConfig::default())
    }
}

impl<E: FeeBurnEstimator> SupplyProjector<E> {
    /// Crée un projecteur avec un estimateur de burn fourni par l'appelant
    pub fn with_estimator(config: ProjectionConfig, burn_estimator: E) -> Self {
        Self {
            config,
            burn_estimator,
        }
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Nombre de jours projetés : une fraction de la durée de l'historique
    pub fn horizon_days(&self, inputs: &HistoricalInputs) -> usize {
        let days = inputs.total_supply().span_days().max(0) as f64;
        let horizon = (days * self.config.horizon_ratio).floor() as usize;
        horizon.max(self.config.min_horizon_days)
    }

    /// Projette l'offre jour par jour au-delà du dernier point historique
    pub fn project(
        &self,
        inputs: &HistoricalInputs,
        params: &ProjectionParameters,
    ) -> Result<ProjectedSeries> {
        self.config.validate()?;
        InputValidator::default()
            .validate_projection_parameters(params)
            .into_result()?;

        let last_supply = inputs.last_supply()?;
        let last_staked = inputs.last_staked()?;
        let last_in_contract = inputs.last_in_contract_amount().max(0.0);
        let daily_burn = self.burn_estimator.daily_fee_burn(params.assumed_base_fee)?;
        let horizon = self.horizon_days(inputs);
        let stride = self.config.sampling_stride_days;

        debug!(
            "Projection sur {} jours depuis {} (offre {}, staké {}, cible {})",
            horizon,
            last_supply.timestamp,
            last_supply.value,
            last_staked.value,
            params.target_staked_amount
        );

        let mut supply_by_timestamp = inputs.total_supply().to_lookup();
        let mut supply = Series::default();
        let mut staked = Series::default();
        let mut in_contract = Series::default();
        let mut in_addresses = Series::default();

        // Point de départ : le dernier état historique
        let seed_non_staked = (last_supply.value - last_staked.value).max(0.0);
        let seed_in_contract = last_in_contract.min(seed_non_staked);
        let seed_time = last_supply.timestamp;
        supply.push(TimePoint::new(seed_time, last_supply.value.max(last_staked.value)))?;
        staked.push(TimePoint::new(seed_time, last_staked.value))?;
        in_contract.push(TimePoint::new(seed_time, seed_in_contract))?;
        in_addresses.push(TimePoint::new(seed_time, seed_non_staked - seed_in_contract))?;

        let mut state = DailyProjectionState {
            supply: last_supply.value,
            staked: last_staked.value,
        };

        for day in 0..horizon {
            let next = last_supply
                .timestamp
                .checked_add_signed(Duration::days(day as i64 + 1))
                .ok_or_else(|| SupplyError::DateOutOfRange {
                    message: format!(
                        "impossible d'avancer de {} jours depuis {}",
                        day + 1,
                        last_supply.timestamp
                    ),
                })?;
            let date = start_of_day(next)?;
            state = state.advance(date, params, &self.config, daily_burn)?;

            let reported = state.reported_supply();
            supply_by_timestamp.insert(date, reported);

            if day % stride != 0 && day + 1 != horizon {
                continue;
            }

            let (contract_value, addresses_value) =
                split_non_staked(state.non_staked(), last_in_contract);
            supply.push(TimePoint::new(date, reported))?;
            staked.push(TimePoint::new(date, state.staked))?;
            in_contract.push(TimePoint::new(date, contract_value))?;
            in_addresses.push(TimePoint::new(date, addresses_value))?;
        }

        if !state.supply.is_finite() {
            return Err(SupplyError::degenerate(format!(
                "offre projetée non finie: {}",
                state.supply
            )));
        }

        info!(
            "Projection terminée: {} points, offre finale {:.0} ETH, staké {:.0} ETH",
            supply.len(),
            state.reported_supply(),
            state.staked
        );

        Ok(ProjectedSeries {
            supply,
            staked,
            in_contract,
            in_addresses,
            supply_by_timestamp,
        })
    }

    /// Décompose l'historique échantillonné en staké, contrats et adresses
    pub fn breakdown_history(&self, inputs: &HistoricalInputs) -> Result<HistoricalBreakdown> {
        self.config.validate()?;
        let stride = self.config.sampling_stride_days;
        let total = inputs.total_supply();
        let count = total.len();

        let mut breakdown = HistoricalBreakdown {
            supply: Series::default(),
            staked: Series::default(),
            in_contract: Series::default(),
            in_addresses: Series::default(),
            peak_supply: None,
        };
        let mut max_point: Option<TimePoint> = None;

        for (i, point) in total.iter().enumerate() {
            let current_max = max_point;
            match current_max {
                Some(max) if point.value > max.value => {
                    max_point = Some(*point);
                    breakdown.peak_supply = None;
                }
                Some(max) if point.value < max.value && breakdown.peak_supply.is_none() => {
                    breakdown.peak_supply = Some(max);
                }
                None => max_point = Some(*point),
                _ => {}
            }

            if i % stride != 0 && i + 1 < count {
                continue;
            }

            let staked_value = inputs.staked_supply().value_at(point.timestamp);
            if let Some(value) = staked_value {
                breakdown.staked.push(TimePoint::new(point.timestamp, value))?;
            }
            let non_staked = point.value - staked_value.unwrap_or(0.0);
            let contract_value = inputs.in_contract_amount_at(point.timestamp).unwrap_or(0.0);

            breakdown.in_contract.push(TimePoint::new(point.timestamp, contract_value))?;
            breakdown
                .in_addresses
                .push(TimePoint::new(point.timestamp, non_staked - contract_value))?;
            breakdown.supply.push(*point)?;
        }

        Ok(breakdown)
    }
}

/// Projette l'offre avec la configuration et l'estimateur par défaut
pub fn project(inputs: &HistoricalInputs, params: &ProjectionParameters) -> Result<ProjectedSeries> {
    SupplyProjector::default().project(inputs, params)
}
