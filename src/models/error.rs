use crate::types::error::SeriesError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("No tuned hyperparameters for model '{model}'")]
    MissingHyperparameter { model: String },

    #[error("Hyperparameter '{key}' missing for model '{model}'")]
    MissingHyperparameterKey { model: String, key: String },

    #[error("Hyperparameters for model '{model}' have the wrong shape")]
    InvalidHyperparameters {
        model: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("No backend registered for model family '{0}'")]
    UnsupportedFamily(String),

    #[error("Insufficient data: need at least {needed} observations, got {got}")]
    InsufficientData { needed: usize, got: usize },

    #[error("Model '{0}' must be fitted before predicting")]
    NotFitted(String),

    #[error("Forecast and actual series share no dates")]
    NoOverlap,

    #[error("Failed to create model directory '{0}'")]
    DirCreation(PathBuf, #[source] std::io::Error),

    #[error("Failed to write model artifact '{0}'")]
    ArtifactWrite(PathBuf, #[source] std::io::Error),

    #[error("Failed to read model artifact '{0}'")]
    ArtifactRead(PathBuf, #[source] std::io::Error),

    #[error("Failed to encode model artifact")]
    ArtifactEncode(#[source] Box<bincode::error::EncodeError>),

    #[error("Failed to decode model artifact '{0}'")]
    ArtifactDecode(PathBuf, #[source] Box<bincode::error::DecodeError>),

    #[error("Failed to build forecast series")]
    Series(#[from] SeriesError),

    #[error("Model backend failed: {0}")]
    Backend(String),
}
