//! Typed hyperparameters read from tuned search results.

use serde::{Deserialize, Serialize};

/// A parameter set deserialized from a tuned parameter map.
pub trait HyperparameterSet: serde::de::DeserializeOwned {
    /// Keys that must be present in the tuned parameter map.
    const KEYS: &'static [&'static str];
}

/// Block RNN (LSTM or GRU) settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RnnParameters {
    pub input_chunk_length: usize,
    pub batch_size: usize,
    pub n_epochs: usize,
    pub hidden_dim: usize,
    pub n_rnn_layers: usize,
    pub dropout: f64,
    pub lr: f64,
}

impl HyperparameterSet for RnnParameters {
    const KEYS: &'static [&'static str] = &[
        "input_chunk_length",
        "batch_size",
        "n_epochs",
        "hidden_dim",
        "n_rnn_layers",
        "dropout",
        "lr",
    ];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NBeatsParameters {
    pub input_chunk_length: usize,
    pub batch_size: usize,
    pub n_epochs: usize,
    pub dropout: f64,
    pub activation: String,
    pub lr: f64,
}

impl HyperparameterSet for NBeatsParameters {
    const KEYS: &'static [&'static str] = &[
        "input_chunk_length",
        "batch_size",
        "n_epochs",
        "dropout",
        "activation",
        "lr",
    ];
}

/// Lag settings for the gradient-boosted regressors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaggedParameters {
    pub lags: usize,
    pub lags_past_covariates: usize,
}

impl HyperparameterSet for LaggedParameters {
    const KEYS: &'static [&'static str] = &["lags", "lags_past_covariates"];
}
