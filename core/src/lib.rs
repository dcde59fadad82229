//! EthSupply Core Library
//!
//! Moteur de simulation déterministe de l'offre ETH. Il projette l'offre en
//! circulation dans le temps sous un modèle d'émission proof-of-stake et un
//! modèle de burn des frais, et calcule séparément un équilibre long terme de
//! l'offre pour des hypothèses de staking et de burn fixées.
//!
//! # Features
//!
//! - **Projection journalière** : offre totale, ETH staké, ETH en contrats et
//!   ETH sur des adresses, jour par jour au-delà de l'historique
//! - **Équilibre** : simulation annuelle sur un long horizon jusqu'à ce que
//!   l'émission et le burn se compensent
//! - **Modèles feuilles** : courbe d'émission PoS, conversions APR ⇄ staké,
//!   burn des frais, churn des validateurs
//! - **Pur** : aucune I/O, aucun état partagé ; chaque appel est indépendant
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use ethsupply_core::{
//!     project, solve, EquilibriumParameters, HistoricalInputs, ProjectionParameters,
//! };
//!
//! fn run(supply_json: &str, staking_json: &str, contract_json: &str)
//!     -> Result<(), Box<dyn std::error::Error>>
//! {
//!     let inputs = HistoricalInputs::from_json(supply_json, staking_json, contract_json)?;
//!
//!     let params = ProjectionParameters::new(
//!         30_000_000.0, // ETH staké visé
//!         25.0,         // base fee supposée (gwei)
//!         "2022-09-15T00:00:00Z".parse()?,
//!     )?;
//!     let projected = project(&inputs, &params)?;
//!     println!("offre projetée: {:?}", projected.supply.last());
//!
//!     let equilibrium = solve(inputs.total_supply(), &EquilibriumParameters::new(0.05, 0.02)?)?;
//!     println!("équilibre: {:.1}M ETH", equilibrium.supply_equilibrium / 1e6);
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`series`] - Séries temporelles et entrées historiques
//! - [`model`] - Formules d'émission, de burn et de churn
//! - [`simulation`] - Projection journalière et solveur d'équilibre
//! - [`validation`] - Validation des séries et des paramètres
//! - [`serialization`] - Export JSON/bincode et clés de cache
//! - [`error`] - Types d'erreurs
//!
//! # Logs
//!
//! Le moteur émet des événements `tracing` (`debug!` par calcul, `info!` en
//! fin de calcul, `warn!` sur les hypothèses suspectes) sans jamais installer
//! de subscriber.

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod model;
pub mod serialization;
pub mod series;
pub mod simulation;
pub mod validation;

// Re-exports pour faciliter l'utilisation
pub use error::{Result, SerializationError, SupplyError};
pub use model::{
    burn_from_fraction, daily_fee_burn, estimated_daily_stake_change, fraction_from_burn_rate,
    issuance_apr, issuance_per_day, issuance_per_year, staked_amount_from_apr, FeeBurnEstimator,
    GasTargetFeeBurn,
};
pub use serialization::{
    equilibrium_cache_key, fingerprint, projection_cache_key, Serializable, SerializationFormat,
};
pub use series::{HistoricalInputs, Series, SupplyLookup, TimePoint};
pub use simulation::{
    project, solve, EquilibriumConfig, EquilibriumParameters, EquilibriumResult,
    EquilibriumSolver, HistoricalBreakdown, ProjectedSeries, ProjectionConfig,
    ProjectionParameters, SimulationConfig, SupplyProjector,
};
pub use validation::{InputValidator, ValidationConfig, ValidationResult};

/// Version de la bibliothèque
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
