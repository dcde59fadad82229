//! Séries temporelles et entrées historiques
//!
//! Une [`Series`] est une suite de points `(timestamp, valeur)` strictement
//! croissante dans le temps. Les données historiques (offre totale, ETH staké,
//! fraction en contrats) arrivent déjà alignées, un point par jour.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SupplyError};
use crate::validation::InputValidator;

/// Table timestamp → offre totale, utilisée pour les recherches de totaux
pub type SupplyLookup = BTreeMap<DateTime<Utc>, f64>;

/// Point d'une série temporelle
///
/// Sérialisé sous la forme `{ "t": "2021-08-04T00:00:00Z", "v": 117000000.0 }`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimePoint {
    /// Instant du point
    #[serde(rename = "t")]
    pub timestamp: DateTime<Utc>,
    /// Valeur au moment `timestamp`
    #[serde(rename = "v")]
    pub value: f64,
}

impl TimePoint {
    pub fn new(timestamp: DateTime<Utc>, value: f64) -> Self {
        Self { timestamp, value }
    }
}

/// Série temporelle ordonnée, sans doublon de timestamp
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<TimePoint>", into = "Vec<TimePoint>")]
pub struct Series {
    points: Vec<TimePoint>,
}

impl Series {
    /// Crée une série en vérifiant l'ordre strictement croissant des timestamps
    pub fn new(name: &'static str, points: Vec<TimePoint>) -> Result<Self> {
        if let Some(index) = points
            .windows(2)
            .position(|pair| pair[1].timestamp <= pair[0].timestamp)
        {
            return Err(SupplyError::NonMonotonicTimestamps {
                series: name,
                index: index + 1,
            });
        }
        Ok(Self { points })
    }

    /// Parse une série depuis un tableau JSON `[{ "t": ..., "v": ... }]`
    pub fn from_json_records(name: &'static str, json: &str) -> Result<Self> {
        let points: Vec<TimePoint> = serde_json::from_str(json)?;
        Self::new(name, points)
    }

    /// Ajoute un point en fin de série
    pub fn push(&mut self, point: TimePoint) -> Result<()> {
        if let Some(last) = self.points.last() {
            if point.timestamp <= last.timestamp {
                return Err(SupplyError::NonMonotonicTimestamps {
                    series: "series",
                    index: self.points.len(),
                });
            }
        }
        self.points.push(point);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&TimePoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&TimePoint> {
        self.points.last()
    }

    pub fn points(&self) -> &[TimePoint] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TimePoint> {
        self.points.iter()
    }

    /// Valeur exacte au timestamp donné (recherche dichotomique)
    pub fn value_at(&self, timestamp: DateTime<Utc>) -> Option<f64> {
        self.points
            .binary_search_by(|point| point.timestamp.cmp(&timestamp))
            .ok()
            .map(|index| self.points[index].value)
    }

    /// Nombre de jours entiers couverts par la série
    pub fn span_days(&self) -> i64 {
        match (self.first(), self.last()) {
            (Some(first), Some(last)) => (last.timestamp - first.timestamp).num_days(),
            _ => 0,
        }
    }

    /// Réduit la série à un point par mois calendaire (le premier vu)
    pub fn monthly(&self) -> Series {
        let mut points: Vec<TimePoint> = Vec::new();
        for point in &self.points {
            let new_month = match points.last() {
                Some(kept) => {
                    (kept.timestamp.year(), kept.timestamp.month())
                        != (point.timestamp.year(), point.timestamp.month())
                }
                None => true,
            };
            if new_month {
                points.push(*point);
            }
        }
        Series { points }
    }

    /// Construit la table timestamp → valeur
    pub fn to_lookup(&self) -> SupplyLookup {
        self.points
            .iter()
            .map(|point| (point.timestamp, point.value))
            .collect()
    }
}

impl TryFrom<Vec<TimePoint>> for Series {
    type Error = SupplyError;

    fn try_from(points: Vec<TimePoint>) -> Result<Self> {
        Series::new("series", points)
    }
}

impl From<Series> for Vec<TimePoint> {
    fn from(series: Series) -> Self {
        series.points
    }
}

/// Entrées historiques alignées
///
/// Invariants vérifiés à la construction : au moins deux points d'offre, au
/// moins un point de staking, valeurs finies et positives, fractions dans
/// `[0, 1]` et `staked(t) <= supply(t)` à chaque date commune.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoricalInputs {
    total_supply: Series,
    staked_supply: Series,
    in_contract_fraction: Series,
}

impl HistoricalInputs {
    /// Nombre minimum de points d'offre totale
    pub const MIN_SUPPLY_POINTS: usize = 2;

    pub fn new(
        total_supply: Series,
        staked_supply: Series,
        in_contract_fraction: Series,
    ) -> Result<Self> {
        if total_supply.len() < Self::MIN_SUPPLY_POINTS {
            return Err(SupplyError::InsufficientHistory {
                series: "total_supply",
                required: Self::MIN_SUPPLY_POINTS,
                actual: total_supply.len(),
            });
        }
        if staked_supply.is_empty() {
            return Err(SupplyError::InsufficientHistory {
                series: "staked_supply",
                required: 1,
                actual: 0,
            });
        }

        let inputs = Self {
            total_supply,
            staked_supply,
            in_contract_fraction,
        };
        InputValidator::default()
            .validate_history(&inputs)
            .into_result()?;
        Ok(inputs)
    }

    /// Charge les trois séries depuis leurs fichiers de données JSON
    pub fn from_json(supply_json: &str, staking_json: &str, contract_json: &str) -> Result<Self> {
        Self::new(
            Series::from_json_records("total_supply", supply_json)?,
            Series::from_json_records("staked_supply", staking_json)?,
            Series::from_json_records("in_contract_fraction", contract_json)?,
        )
    }

    pub fn total_supply(&self) -> &Series {
        &self.total_supply
    }

    pub fn staked_supply(&self) -> &Series {
        &self.staked_supply
    }

    pub fn in_contract_fraction(&self) -> &Series {
        &self.in_contract_fraction
    }

    /// Dernier point d'offre totale
    pub fn last_supply(&self) -> Result<TimePoint> {
        self.total_supply
            .last()
            .copied()
            .ok_or(SupplyError::InsufficientHistory {
                series: "total_supply",
                required: Self::MIN_SUPPLY_POINTS,
                actual: 0,
            })
    }

    /// Dernier point de staking
    pub fn last_staked(&self) -> Result<TimePoint> {
        self.staked_supply
            .last()
            .copied()
            .ok_or(SupplyError::InsufficientHistory {
                series: "staked_supply",
                required: 1,
                actual: 0,
            })
    }

    /// Montant absolu en contrats à une date où la fraction est mesurée
    ///
    /// La fraction mesurée inclut l'ETH staké, qui est donc retiré ici.
    pub fn in_contract_amount_at(&self, timestamp: DateTime<Utc>) -> Option<f64> {
        let fraction = self.in_contract_fraction.value_at(timestamp)?;
        let supply = self.total_supply.value_at(timestamp)?;
        let staked = self.staked_supply.value_at(timestamp).unwrap_or(0.0);
        Some(fraction * supply - staked)
    }

    /// Dernier montant en contrats connu (0 si jamais mesuré)
    pub fn last_in_contract_amount(&self) -> f64 {
        self.in_contract_fraction
            .iter()
            .rev()
            .find_map(|point| self.in_contract_amount_at(point.timestamp))
            .unwrap_or(0.0)
    }
}
