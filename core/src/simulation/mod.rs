//! Simulations de l'offre ETH
//!
//! - [`projection`] : projection journalière (offre, staké, contrats, adresses)
//! - [`equilibrium`] : équilibre long terme émission/burn
//!
//! Chaque calcul est une fonction pure des séries historiques et des
//! paramètres ; l'appelant relance le calcul quand ses entrées changent.

pub mod equilibrium;
pub mod projection;

// Re-exports principaux
pub use equilibrium::{
    solve, EquilibriumConfig, EquilibriumParameters, EquilibriumResult, EquilibriumSolver,
};
pub use projection::{
    project, HistoricalBreakdown, ProjectedSeries, ProjectionConfig, ProjectionParameters,
    SupplyProjector,
};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::GasTargetFeeBurn;

/// Configuration complète des simulations
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Configuration de la projection journalière
    pub projection: ProjectionConfig,
    /// Configuration du solveur d'équilibre
    pub equilibrium: EquilibriumConfig,
    /// Estimateur de burn par défaut
    pub fee_burn: GasTargetFeeBurn,
}

impl SimulationConfig {
    /// Charge une configuration JSON ; les champs absents prennent leur valeur par défaut
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Projecteur configuré
    pub fn projector(&self) -> SupplyProjector<GasTargetFeeBurn> {
        SupplyProjector::with_estimator(self.projection.clone(), self.fee_burn)
    }

    /// Solveur configuré
    pub fn solver(&self) -> EquilibriumSolver {
        EquilibriumSolver::new(self.equilibrium.clone())
    }
}
