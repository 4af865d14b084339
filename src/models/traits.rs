//! Forecaster trait and the model specification handed to backends.

use crate::models::artifact::ARTIFACT_EXTENSION;
use crate::models::error::ModelError;
use crate::models::parameters::{LaggedParameters, NBeatsParameters, RnnParameters};
use crate::types::model_family::ModelFamily;
use crate::types::time_series::TimeSeries;
use std::path::Path;

/// Common interface for all forecasting models.
///
/// This trait is object-safe and can be used with `Box<dyn Forecaster>`.
pub trait Forecaster {
    /// Fits the model on `target`. Models that do not use covariates ignore `past_covariates`.
    fn fit(
        &mut self,
        target: &TimeSeries,
        past_covariates: Option<&TimeSeries>,
    ) -> Result<(), ModelError>;

    /// Predicts the `horizon` days following the end of the training series.
    fn predict(&self, horizon: usize) -> Result<TimeSeries, ModelError>;

    /// Persists the model, fitted or not.
    fn save(&self, path: &Path) -> Result<(), ModelError>;

    fn name(&self) -> &str;

    /// File extension of artifacts written by [`Forecaster::save`].
    fn artifact_extension(&self) -> &'static str {
        ARTIFACT_EXTENSION
    }

    fn is_fitted(&self) -> bool;
}

pub type BoxedForecaster = Box<dyn Forecaster>;

/// Family-specific model settings.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelConfig {
    NaiveSeasonal { k: usize },
    /// Additive trend and additive seasonality.
    ExponentialSmoothing { seasonal_periods: usize },
    Rnn(RnnParameters),
    NBeats {
        parameters: NBeatsParameters,
        generic_architecture: bool,
    },
    Lagged(LaggedParameters),
}

/// Everything a backend needs to construct an untrained model.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSpec {
    pub family: ModelFamily,
    /// Forecast horizon, also the output chunk length of the learned models.
    pub horizon: usize,
    pub seed: u64,
    pub config: ModelConfig,
}

impl ModelSpec {
    pub fn unique_name(&self) -> String {
        self.family.unique_name(self.horizon)
    }
}

/// Constructs models from specifications.
///
/// The native backend covers the statistical baselines; learned families are supplied by
/// callers through their own implementation.
pub trait ModelBackend {
    fn create(&self, spec: &ModelSpec) -> Result<BoxedForecaster, ModelError>;
}
