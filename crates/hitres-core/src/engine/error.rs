use thiserror::Error;

use super::config::ConfigError;
use crate::core::models::hit::InvalidHitError;
use crate::core::models::ids::HitId;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid hit '{label}': {source}")]
    InvalidHit {
        label: String,
        #[source]
        source: InvalidHitError,
    },

    #[error("Hit not found in collection: {0:?}")]
    UnknownHit(HitId),
}
