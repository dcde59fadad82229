//! Module de validation pour EthSupply
//!
//! Fournit les validateurs des séries historiques et des paramètres de
//! simulation. Les erreurs sont collectées puis converties en
//! [`SupplyError::Validation`] par les constructeurs.

use crate::error::{Result, SupplyError};
use crate::series::{HistoricalInputs, Series};
use crate::simulation::{EquilibriumParameters, ProjectionParameters};

/// Validateur principal des entrées
#[derive(Debug)]
pub struct InputValidator {
    /// Configuration de validation
    pub config: ValidationConfig,
}

/// Configuration des règles de validation
#[derive(Debug, Clone)]
pub struct ValidationConfig {
    /// Tolérance absolue (ETH) sur la règle staked <= supply
    pub staked_tolerance: f64,
    /// Fraction annuelle maximum acceptée (APR, burn)
    pub max_yearly_fraction: f64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            staked_tolerance: 1e-6,
            max_yearly_fraction: 1.0,
        }
    }
}

impl InputValidator {
    /// Crée un nouveau validateur
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Valide les trois séries historiques et leur cohérence
    pub fn validate_history(&self, inputs: &HistoricalInputs) -> ValidationResult {
        let mut errors = Vec::new();

        self.check_values("total_supply", inputs.total_supply(), &mut errors);
        self.check_values("staked_supply", inputs.staked_supply(), &mut errors);
        self.check_values(
            "in_contract_fraction",
            inputs.in_contract_fraction(),
            &mut errors,
        );

        for point in inputs.in_contract_fraction().iter() {
            if point.value > 1.0 {
                errors.push(format!(
                    "Fraction en contrats hors de [0, 1] le {}: {}",
                    point.timestamp, point.value
                ));
            }
        }

        // L'ETH staké ne peut pas dépasser l'offre totale
        for staked in inputs.staked_supply().iter() {
            if let Some(supply) = inputs.total_supply().value_at(staked.timestamp) {
                if staked.value > supply + self.config.staked_tolerance {
                    errors.push(format!(
                        "Staké supérieur à l'offre le {}: {} > {}",
                        staked.timestamp, staked.value, supply
                    ));
                }
            }
        }

        ValidationResult::from_errors(errors)
    }

    /// Valide les paramètres de projection journalière
    pub fn validate_projection_parameters(&self, params: &ProjectionParameters) -> ValidationResult {
        let mut errors = Vec::new();

        if !params.target_staked_amount.is_finite() || params.target_staked_amount < 0.0 {
            errors.push(format!(
                "Montant staké cible invalide: {}",
                params.target_staked_amount
            ));
        }
        if !params.assumed_base_fee.is_finite() || params.assumed_base_fee < 0.0 {
            errors.push(format!("Base fee supposée invalide: {}", params.assumed_base_fee));
        }

        ValidationResult::from_errors(errors)
    }

    /// Valide les paramètres d'équilibre
    pub fn validate_equilibrium_parameters(&self, params: &EquilibriumParameters) -> ValidationResult {
        let mut errors = Vec::new();
        let max = self.config.max_yearly_fraction;

        let apr = params.staking_apr_fraction;
        if !apr.is_finite() || apr <= 0.0 || apr > max {
            errors.push(format!("APR de staking hors de ]0, {}]: {}", max, apr));
        }
        let burn = params.non_staked_burn_fraction;
        if !burn.is_finite() || burn < 0.0 || burn > max {
            errors.push(format!("Fraction de burn hors de [0, {}]: {}", max, burn));
        }

        ValidationResult::from_errors(errors)
    }

    fn check_values(&self, name: &str, series: &Series, errors: &mut Vec<String>) {
        for (i, point) in series.iter().enumerate() {
            if !point.value.is_finite() || point.value < 0.0 {
                errors.push(format!("{} point {}: valeur invalide {}", name, i, point.value));
            }
        }
    }
}

impl Default for InputValidator {
    fn default() -> Self {
        Self::new(ValidationConfig::default())
    }
}

/// Résultat de validation
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Indique si la validation a réussi
    pub is_valid: bool,
    /// Liste des erreurs trouvées
    pub errors: Vec<String>,
}

impl ValidationResult {
    /// Crée un résultat de validation réussi
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
        }
    }

    /// Crée un résultat à partir d'une liste d'erreurs (valide si vide)
    pub fn from_errors(errors: Vec<String>) -> Self {
        if errors.is_empty() {
            return Self::valid();
        }
        Self {
            is_valid: false,
            errors,
        }
    }

    /// Convertit le résultat en erreur regroupant tous les problèmes
    pub fn into_result(self) -> Result<()> {
        if self.is_valid {
            Ok(())
        } else {
            Err(SupplyError::Validation {
                message: self.errors.join("; "),
            })
        }
    }
}
