//! Builds untrained models from tuned hyperparameters and stores their initial artifacts.

use crate::hyperparameters::record::HyperparameterRecord;
use crate::models::baseline::exponential_smoothing::ExponentialSmoothing;
use crate::models::baseline::naive_seasonal::NaiveSeasonal;
use crate::models::error::ModelError;
use crate::models::parameters::{
    HyperparameterSet, LaggedParameters, NBeatsParameters, RnnParameters,
};
use crate::models::traits::{BoxedForecaster, ModelBackend, ModelConfig, ModelSpec};
use crate::types::model_family::{ModelFamily, NBeatsVariant};
use bon::bon;
use log::info;
use std::fs;
use std::path::PathBuf;

/// Seasonal lag of the naive baseline, in days.
pub const NAIVE_SEASONAL_K: usize = 365;
/// Seasonal period of the exponential smoothing baseline, in days.
pub const SEASONAL_PERIODS: usize = 365;

/// Creates the natively implemented baselines.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeBackend;

impl ModelBackend for NativeBackend {
    fn create(&self, spec: &ModelSpec) -> Result<BoxedForecaster, ModelError> {
        match spec.config {
            ModelConfig::NaiveSeasonal { k } => Ok(Box::new(NaiveSeasonal::new(k))),
            ModelConfig::ExponentialSmoothing { seasonal_periods } => {
                Ok(Box::new(ExponentialSmoothing::new(seasonal_periods)))
            }
            _ => Err(ModelError::UnsupportedFamily(spec.family.to_string())),
        }
    }
}

/// An untrained model, what it was built for, and the artifact written for it.
pub struct BuiltModel {
    pub model: BoxedForecaster,
    pub family: ModelFamily,
    pub horizon: usize,
    /// `<family>_fh<N>` or `<family>_<variant>_fh<N>`.
    pub unique_name: String,
    pub artifact: PathBuf,
}

pub struct ModelFactory {
    model_dir: PathBuf,
    seed: u64,
    native: NativeBackend,
    learned: Option<Box<dyn ModelBackend>>,
}

#[bon]
impl ModelFactory {
    /// Creates a factory writing artifacts to `model_dir`.
    ///
    /// `learned` constructs the LSTM, GRU, N-BEATS, XGBoost and LightGBM families; without it
    /// only the baselines can be built.
    #[builder]
    pub fn new(
        #[builder(into)] model_dir: PathBuf,
        #[builder(default = 42)] seed: u64,
        learned: Option<Box<dyn ModelBackend>>,
    ) -> Self {
        Self {
            model_dir,
            seed,
            native: NativeBackend,
            learned,
        }
    }
}

impl ModelFactory {
    pub fn model_dir(&self) -> &PathBuf {
        &self.model_dir
    }

    /// Resolves the model specification for `family` at `horizon`.
    ///
    /// # Errors
    ///
    /// [`ModelError::MissingHyperparameter`] when the record has no entry for a tuned
    /// family, [`ModelError::MissingHyperparameterKey`] when the entry lacks a parameter.
    pub fn spec(
        &self,
        family: ModelFamily,
        horizon: usize,
        record: &HyperparameterRecord,
    ) -> Result<ModelSpec, ModelError> {
        let config = match family {
            ModelFamily::NaiveSeasonal => ModelConfig::NaiveSeasonal {
                k: NAIVE_SEASONAL_K,
            },
            ModelFamily::ExponentialSmoothing => ModelConfig::ExponentialSmoothing {
                seasonal_periods: SEASONAL_PERIODS,
            },
            ModelFamily::Lstm | ModelFamily::Gru => {
                ModelConfig::Rnn(tuned::<RnnParameters>(record, family, horizon)?)
            }
            ModelFamily::NBeats(variant) => ModelConfig::NBeats {
                parameters: tuned::<NBeatsParameters>(record, family, horizon)?,
                generic_architecture: variant == NBeatsVariant::Generic,
            },
            ModelFamily::XGBoost | ModelFamily::LightGbm => {
                ModelConfig::Lagged(tuned::<LaggedParameters>(record, family, horizon)?)
            }
        };
        Ok(ModelSpec {
            family,
            horizon,
            seed: self.seed,
            config,
        })
    }

    /// Builds an untrained model and saves it to `<model_dir>/<unique_name>.<ext>`.
    pub fn build(
        &self,
        family: ModelFamily,
        horizon: usize,
        record: &HyperparameterRecord,
    ) -> Result<BuiltModel, ModelError> {
        let spec = self.spec(family, horizon, record)?;
        let backend: &dyn ModelBackend = if family.is_baseline() {
            &self.native
        } else {
            self.learned
                .as_deref()
                .ok_or_else(|| ModelError::UnsupportedFamily(family.to_string()))?
        };
        let model = backend.create(&spec)?;

        fs::create_dir_all(&self.model_dir)
            .map_err(|e| ModelError::DirCreation(self.model_dir.clone(), e))?;
        let unique_name = spec.unique_name();
        let artifact = self
            .model_dir
            .join(format!("{}.{}", unique_name, model.artifact_extension()));
        model.save(&artifact)?;
        info!("Created model {} at {:?}", unique_name, artifact);

        Ok(BuiltModel {
            model,
            family,
            horizon,
            unique_name,
            artifact,
        })
    }
}

fn tuned<P: HyperparameterSet>(
    record: &HyperparameterRecord,
    family: ModelFamily,
    horizon: usize,
) -> Result<P, ModelError> {
    let model = family.unique_name(horizon);
    let tuned = record
        .get(family, horizon)
        .ok_or_else(|| ModelError::MissingHyperparameter {
            model: model.clone(),
        })?;
    if let Some(key) = P::KEYS.iter().find(|k| !tuned.parameters.contains_key(**k)) {
        return Err(ModelError::MissingHyperparameterKey {
            model,
            key: key.to_string(),
        });
    }
    tuned
        .parse()
        .map_err(|source| ModelError::InvalidHyperparameters { model, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hyperparameters::record::TunedParameters;
    use crate::test_support::MeanBackend;
    use serde_json::{json, Value};

    fn tuned_parameters(parameters: Value) -> TunedParameters {
        TunedParameters {
            parameters: parameters.as_object().cloned().unwrap(),
            training_rmse: 1.0,
            hyp_search_time: 2.0,
        }
    }

    fn record() -> HyperparameterRecord {
        let mut record = HyperparameterRecord::new([7]);
        record.insert(
            ModelFamily::Lstm,
            7,
            tuned_parameters(json!({
                "input_chunk_length": 30, "batch_size": 32, "n_epochs": 10,
                "hidden_dim": 25, "n_rnn_layers": 2, "dropout": 0.1, "lr": 0.001
            })),
        );
        record.insert(
            ModelFamily::NBeats(NBeatsVariant::Interpretable),
            7,
            tuned_parameters(json!({
                "input_chunk_length": 60, "batch_size": 64, "n_epochs": 5,
                "dropout": 0.0, "activation": "ReLU", "lr": 0.0005
            })),
        );
        record.insert(ModelFamily::XGBoost, 7, tuned_parameters(json!({"lags": 14})));
        record
    }

    #[test]
    fn test_baseline_artifact_named_by_unique_name() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let factory = ModelFactory::builder().model_dir(dir.path()).build();

        let built = factory.build(ModelFamily::NaiveSeasonal, 7, &HyperparameterRecord::default())?;

        assert_eq!(built.unique_name, "naive_seasonal_fh7");
        assert_eq!(built.family, ModelFamily::NaiveSeasonal);
        assert_eq!(built.horizon, 7);
        assert_eq!(built.artifact, dir.path().join("naive_seasonal_fh7.bin"));
        assert!(built.artifact.exists());
        assert!(!built.model.is_fitted());
        Ok(())
    }

    #[test]
    fn test_baseline_settings() -> Result<(), ModelError> {
        let factory = ModelFactory::builder().model_dir("unused").build();
        let record = HyperparameterRecord::default();
        let spec = factory.spec(ModelFamily::ExponentialSmoothing, 1, &record)?;
        assert_eq!(
            spec.config,
            ModelConfig::ExponentialSmoothing { seasonal_periods: 365 }
        );
        let spec = factory.spec(ModelFamily::NaiveSeasonal, 1, &HyperparameterRecord::default())?;
        assert_eq!(spec.config, ModelConfig::NaiveSeasonal { k: 365 });
        Ok(())
    }

    #[test]
    fn test_typed_parameters_and_seed() -> Result<(), ModelError> {
        let factory = ModelFactory::builder().model_dir("unused").seed(7).build();

        let spec = factory.spec(ModelFamily::Lstm, 7, &record())?;
        assert_eq!(spec.seed, 7);
        let ModelConfig::Rnn(params) = spec.config else {
            panic!("expected RNN config");
        };
        assert_eq!(params.hidden_dim, 25);
        assert_eq!(params.lr, 0.001);

        let spec = factory.spec(ModelFamily::NBeats(NBeatsVariant::Interpretable), 7, &record())?;
        assert!(matches!(
            spec.config,
            ModelConfig::NBeats { generic_architecture: false, .. }
        ));
        assert_eq!(spec.unique_name(), "nbeats_interpretable_fh7");
        Ok(())
    }

    #[test]
    fn test_missing_entry() {
        let factory = ModelFactory::builder().model_dir("unused").build();
        assert!(matches!(
            factory.spec(ModelFamily::Gru, 7, &record()),
            Err(ModelError::MissingHyperparameter { model }) if model == "gru_fh7"
        ));
        assert!(matches!(
            factory.spec(ModelFamily::Lstm, 30, &record()),
            Err(ModelError::MissingHyperparameter { .. })
        ));
    }

    #[test]
    fn test_missing_key() {
        let factory = ModelFactory::builder().model_dir("unused").build();
        assert!(matches!(
            factory.spec(ModelFamily::XGBoost, 7, &record()),
            Err(ModelError::MissingHyperparameterKey { key, .. }) if key == "lags_past_covariates"
        ));
    }

    #[test]
    fn test_learned_family_needs_backend() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let without = ModelFactory::builder().model_dir(dir.path()).build();
        assert!(matches!(
            without.build(ModelFamily::Lstm, 7, &record()),
            Err(ModelError::UnsupportedFamily(_))
        ));

        let with = ModelFactory::builder()
            .model_dir(dir.path())
            .learned(Box::new(MeanBackend::default()))
            .build();
        let built = with.build(ModelFamily::Lstm, 7, &record())?;
        assert_eq!(built.artifact, dir.path().join("lstm_fh7.bin"));
        Ok(())
    }
}
