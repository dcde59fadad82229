//! Types d'erreurs pour EthSupply Core

use thiserror::Error;

/// Type de résultat standard pour le module core
pub type Result<T> = std::result::Result<T, SupplyError>;

/// Erreurs principales du moteur de simulation
#[derive(Error, Debug)]
pub enum SupplyError {
    #[error("Historique insuffisant pour {series}: requis {required} points, fourni {actual}")]
    InsufficientHistory {
        series: &'static str,
        required: usize,
        actual: usize,
    },

    #[error("Timestamps non croissants dans {series} à l'index {index}")]
    NonMonotonicTimestamps { series: &'static str, index: usize },

    #[error("Entrée dégénérée: {message}")]
    DegenerateInput { message: String },

    #[error("Paramètre invalide {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("Erreur de validation: {message}")]
    Validation { message: String },

    #[error("Date hors limites: {message}")]
    DateOutOfRange { message: String },

    #[error("Erreur de sérialisation: {0}")]
    Serialization(#[from] SerializationError),
}

impl SupplyError {
    /// Raccourci pour une entrée dégénérée
    pub fn degenerate(message: impl Into<String>) -> Self {
        SupplyError::DegenerateInput {
            message: message.into(),
        }
    }

    /// Raccourci pour un paramètre invalide
    pub fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        SupplyError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

/// Erreurs de sérialisation
#[derive(Error, Debug)]
pub enum SerializationError {
    #[error("Erreur bincode: {0}")]
    Bincode(#[from] bincode::Error),

    #[error("Erreur JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Format non supporté: {format}")]
    UnsupportedFormat { format: String },
}

impl From<serde_json::Error> for SupplyError {
    fn from(err: serde_json::Error) -> Self {
        SupplyError::Serialization(SerializationError::Json(err))
    }
}

impl From<bincode::Error> for SupplyError {
    fn from(err: bincode::Error) -> Self {
        SupplyError::Serialization(SerializationError::Bincode(err))
    }
}
