//! Module de sérialisation pour EthSupply
//!
//! Exporte paramètres et résultats en JSON (consommateurs, graphiques) ou en
//! bincode (cache compact), et calcule des empreintes blake3 servant de clé
//! de mémoïsation côté appelant.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SerializationError};
use crate::series::{HistoricalInputs, Series};
use crate::simulation::{
    EquilibriumParameters, EquilibriumResult, ProjectedSeries, ProjectionParameters,
};

/// Formats de sérialisation supportés
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SerializationFormat {
    /// Bincode - Format binaire compact et rapide
    Bincode,
    /// JSON - Format texte pour les consommateurs et le debug
    Json,
}

/// Trait pour les objets sérialisables
pub trait Serializable: Serialize + for<'de> Deserialize<'de> {
    /// Sérialise l'objet dans le format spécifié
    fn serialize(&self, format: SerializationFormat) -> Result<Vec<u8>> {
        serialize_with_format(self, format)
    }

    /// Désérialise un objet depuis les bytes
    fn deserialize(data: &[u8], format: SerializationFormat) -> Result<Self>
    where
        Self: Sized,
    {
        deserialize_with_format(data, format)
    }
}

impl Serializable for Series {}
impl Serializable for ProjectionParameters {}
impl Serializable for EquilibriumParameters {}
impl Serializable for ProjectedSeries {}
impl Serializable for EquilibriumResult {}

/// Sérialise un objet avec le format spécifié
pub fn serialize_with_format<T: Serialize + ?Sized>(
    obj: &T,
    format: SerializationFormat,
) -> Result<Vec<u8>> {
    match format {
        SerializationFormat::Bincode => Ok(bincode::serialize(obj)?),
        SerializationFormat::Json => Ok(serde_json::to_vec(obj)?),
    }
}

/// Désérialise un objet depuis les bytes avec le format spécifié
pub fn deserialize_with_format<T: for<'de> Deserialize<'de>>(
    data: &[u8],
    format: SerializationFormat,
) -> Result<T> {
    match format {
        SerializationFormat::Bincode => Ok(bincode::deserialize(data)?),
        SerializationFormat::Json => {
            let json_str = std::str::from_utf8(data).map_err(|_| {
                SerializationError::UnsupportedFormat {
                    format: "UTF-8 invalide pour JSON".to_string(),
                }
            })?;
            Ok(serde_json::from_str(json_str)?)
        }
    }
}

/// Empreinte blake3 (hex) de l'encodage bincode d'une valeur
pub fn fingerprint<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let bytes = bincode::serialize(value)?;
    Ok(blake3::hash(&bytes).to_hex().to_string())
}

/// Clé de cache d'une projection : entrées historiques et paramètres
pub fn projection_cache_key(
    inputs: &HistoricalInputs,
    params: &ProjectionParameters,
) -> Result<String> {
    let mut hasher = blake3::Hasher::new();
    hasher.update(&bincode::serialize(inputs)?);
    hasher.update(&bincode::serialize(params)?);
    Ok(hasher.finalize().to_hex().to_string())
}

/// Clé de cache d'un équilibre : offre historique et paramètres
pub fn equilibrium_cache_key(
    historical_supply: &Series,
    params: &EquilibriumParameters,
) -> Result<String> {
    let mut hasher = blake3::Hasher::new();
    hasher.update(&bincode::serialize(historical_supply)?);
    hasher.update(&bincode::serialize(params)?);
    Ok(hasher.finalize().to_hex().to_string())
}
