//! Runs one model through fit, predict and scoring, then records the result.

use crate::experiment::error::ExperimentError;
use crate::experiment::results::{results_file_name, ExperimentResults, ResultRow};
use crate::hyperparameters::record::HyperparameterRecord;
use crate::models::error::ModelError;
use crate::models::factory::BuiltModel;
use crate::models::metrics::{calculate_metrics, Scores};
use crate::models::traits::BoxedForecaster;
use crate::preprocessing::split::{
    train_test_split, CovariateScaling, OutlierSetting, SplitData, SplitInput,
};
use crate::types::model_family::ModelFamily;
use bon::bon;
use chrono::NaiveDate;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// One model to evaluate. Family and horizon are those the model was built for.
pub struct Experiment {
    pub model: BuiltModel,
    pub outliers: OutlierSetting,
    pub cutoff: NaiveDate,
}

/// A model that has not been trained yet.
struct Pending {
    model: BoxedForecaster,
}

/// A trained model.
struct Fitted {
    model: BoxedForecaster,
}

/// A trained model with its test scores.
struct Evaluated {
    scores: Scores,
}

impl Pending {
    fn fit(mut self, split: &SplitData, family: ModelFamily) -> Result<Fitted, ModelError> {
        let covariates = family.uses_past_covariates().then_some(&split.covariates);
        self.model.fit(&split.target_train, covariates)?;
        Ok(Fitted { model: self.model })
    }
}

impl Fitted {
    fn save(&self, path: &Path) -> Result<(), ModelError> {
        self.model.save(path)
    }

    /// Predicts `horizon` days and scores them against the first `horizon` test days.
    fn evaluate(self, horizon: usize, split: &SplitData) -> Result<Evaluated, ModelError> {
        let predicted = self.model.predict(horizon)?;
        let actual = split.target_test.head(horizon);
        let scores = calculate_metrics(&actual, &predicted)?;
        Ok(Evaluated { scores })
    }
}

pub struct ExperimentRunner<'a> {
    input: &'a SplitInput,
    record: &'a HyperparameterRecord,
    results_dir: PathBuf,
}

#[bon]
impl<'a> ExperimentRunner<'a> {
    #[builder]
    pub fn new(
        input: &'a SplitInput,
        record: &'a HyperparameterRecord,
        #[builder(into)] results_dir: PathBuf,
    ) -> Self {
        Self {
            input,
            record,
            results_dir,
        }
    }
}

impl ExperimentRunner<'_> {
    /// Splits the data, fits the model, scores its forecast and records the result.
    ///
    /// The fitted model is saved next to its untrained artifact as
    /// `<unique_name>_fitted.<ext>`. The row is appended to `results` only after scoring
    /// succeeds, and the family's CSV file is then rewritten with all rows of `results`.
    ///
    /// # Errors
    ///
    /// Any split, fit, predict or scoring failure is returned and leaves `results` as it was.
    pub fn run(
        &self,
        results: &mut ExperimentResults,
        experiment: Experiment,
    ) -> Result<ResultRow, ExperimentError> {
        let Experiment {
            model,
            outliers,
            cutoff,
        } = experiment;
        let (family, horizon) = (model.family, model.horizon);
        let scaling = if family.scales_covariates() {
            CovariateScaling::Scaled
        } else {
            CovariateScaling::Unscaled
        };
        let split = train_test_split(self.input, cutoff, outliers, scaling)?;
        let tuned = if family.is_baseline() {
            None
        } else {
            let tuned = self.record.get(family, horizon).ok_or_else(|| {
                ModelError::MissingHyperparameter {
                    model: model.unique_name.clone(),
                }
            })?;
            Some(tuned)
        };

        info!(
            "Running {} Experiments - Forecast Horizon: {} | Outliers: {}",
            family.proper_name(),
            horizon,
            outliers.outliers_retained()
        );

        let fitted_artifact = fitted_artifact_path(&model);
        let start = Instant::now();
        let fitted = Pending { model: model.model }.fit(&split, family)?;
        fitted.save(&fitted_artifact)?;
        let evaluated = fitted.evaluate(horizon, &split)?;
        let training_time = start.elapsed().as_secs_f64() / 60.0;

        let hyp_search_time = tuned.map(|t| t.hyp_search_time);

        let row = ResultRow {
            model_name_proper: family.proper_name().to_string(),
            model_name_unique: model.unique_name,
            outlier_indicator: outliers.outliers_retained(),
            forecast_horizon: horizon,
            rmse: evaluated.scores.rmse,
            mae: evaluated.scores.mae,
            best_val_rmse: tuned.map(|t| t.training_rmse),
            training_time,
            hyp_search_time,
            total_time: hyp_search_time.map(|h| round2(training_time + h)),
        };
        info!(
            "{}: RMSE {:.4}, MAE {:.4}",
            row.model_name_unique, row.rmse, row.mae
        );

        results.push(row.clone());
        fs::create_dir_all(&self.results_dir)
            .map_err(|e| ExperimentError::DirCreation(self.results_dir.clone(), e))?;
        let path = self
            .results_dir
            .join(results_file_name(family, outliers.outliers_retained()));
        results.write_csv(&path)?;

        Ok(row)
    }
}

fn fitted_artifact_path(model: &BuiltModel) -> PathBuf {
    model.artifact.with_file_name(format!(
        "{}_fitted.{}",
        model.unique_name,
        model.model.artifact_extension()
    ))
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hyperparameters::record::TunedParameters;
    use crate::models::factory::ModelFactory;
    use crate::preprocessing::outliers::{adjust_outliers, Granularity};
    use crate::test_support::{synthetic_daily, MeanBackend};
    use crate::types::model_family::NBeatsVariant;
    use serde_json::json;

    fn split_input() -> SplitInput {
        let raw = synthetic_daily(420);
        let columns = raw.value_columns();
        let columns: Vec<&str> = columns.iter().map(String::as_str).collect();
        let adjusted = adjust_outliers(&raw, &columns, Granularity::Month)
            .unwrap()
            .frame;
        SplitInput {
            with_outliers: raw,
            adjusted,
            target: "sunshine_hr".to_string(),
        }
    }

    fn cutoff() -> NaiveDate {
        // Day 400 of the synthetic data.
        NaiveDate::from_ymd_opt(2023, 2, 4).unwrap()
    }

    fn record() -> HyperparameterRecord {
        let mut record = HyperparameterRecord::new([7]);
        let tuned = TunedParameters {
            parameters: json!({"lags": 7, "lags_past_covariates": 7})
                .as_object()
                .cloned()
                .unwrap(),
            training_rmse: 0.9,
            hyp_search_time: 12.345,
        };
        record.insert(ModelFamily::XGBoost, 7, tuned.clone());
        record.insert(
            ModelFamily::NBeats(NBeatsVariant::Generic),
            7,
            TunedParameters {
                parameters: json!({
                    "input_chunk_length": 14, "batch_size": 8, "n_epochs": 1,
                    "dropout": 0.0, "activation": "ReLU", "lr": 0.001
                })
                .as_object()
                .cloned()
                .unwrap(),
                ..tuned
            },
        );
        record
    }

    struct Fixture {
        dir: tempfile::TempDir,
        input: SplitInput,
        record: HyperparameterRecord,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                dir: tempfile::tempdir().unwrap(),
                input: split_input(),
                record: record(),
            }
        }

        fn factory(&self, backend: MeanBackend) -> ModelFactory {
            ModelFactory::builder()
                .model_dir(self.dir.path().join("models"))
                .learned(Box::new(backend))
                .build()
        }

        fn runner(&self) -> ExperimentRunner<'_> {
            ExperimentRunner::builder()
                .input(&self.input)
                .record(&self.record)
                .results_dir(self.dir.path().join("results"))
                .build()
        }

        fn experiment(&self, factory: &ModelFactory, family: ModelFamily) -> Experiment {
            Experiment {
                model: factory.build(family, 7, &self.record).unwrap(),
                outliers: OutlierSetting::Adjusted,
                cutoff: cutoff(),
            }
        }
    }

    #[test]
    fn test_successful_runs_accumulate() -> Result<(), Box<dyn std::error::Error>> {
        let fixture = Fixture::new();
        let factory = fixture.factory(MeanBackend::default());
        let runner = fixture.runner();
        let mut results = ExperimentResults::new();

        for _ in 0..3 {
            let experiment = fixture.experiment(&factory, ModelFamily::NaiveSeasonal);
            runner.run(&mut results, experiment)?;
        }

        assert_eq!(results.len(), 3);
        let csv = fixture
            .dir
            .path()
            .join("results/naive_seasonal_experiment_results.csv");
        assert_eq!(ExperimentResults::from_csv(&csv)?.len(), 3);
        Ok(())
    }

    #[test]
    fn test_failed_run_leaves_results_unchanged() -> Result<(), Box<dyn std::error::Error>> {
        let fixture = Fixture::new();
        let runner = fixture.runner();
        let mut results = ExperimentResults::new();

        let ok = fixture.experiment(&fixture.factory(MeanBackend::default()), ModelFamily::XGBoost);
        runner.run(&mut results, ok)?;

        let failing_factory = fixture.factory(MeanBackend::failing());
        let failing = fixture.experiment(&failing_factory, ModelFamily::XGBoost);
        let outcome = runner.run(&mut results, failing);

        assert!(matches!(outcome, Err(ExperimentError::Model(ModelError::Backend(_)))));
        assert_eq!(results.len(), 1);
        let csv = fixture.dir.path().join("results/xgboost_experiment_results.csv");
        assert_eq!(ExperimentResults::from_csv(&csv)?.len(), 1);
        Ok(())
    }

    #[test]
    fn test_baseline_row_has_no_search_time() -> Result<(), Box<dyn std::error::Error>> {
        let fixture = Fixture::new();
        let factory = fixture.factory(MeanBackend::default());
        let mut results = ExperimentResults::new();

        let experiment = fixture.experiment(&factory, ModelFamily::NaiveSeasonal);
        let row = fixture.runner().run(&mut results, experiment)?;

        assert_eq!(row.model_name_unique, "naive_seasonal_fh7");
        assert_eq!(row.model_name_proper, "Naive Seasonal");
        assert!(!row.outlier_indicator);
        assert_eq!(row.hyp_search_time, None);
        assert_eq!(row.best_val_rmse, None);
        assert_eq!(row.total_time, None);
        assert!(row.rmse >= row.mae);
        assert!(fixture
            .dir
            .path()
            .join("models/naive_seasonal_fh7_fitted.bin")
            .exists());
        Ok(())
    }

    #[test]
    fn test_row_follows_built_model() -> Result<(), Box<dyn std::error::Error>> {
        let fixture = Fixture::new();
        let factory = fixture.factory(MeanBackend::default());
        let runner = fixture.runner();
        let mut results = ExperimentResults::new();

        let experiment = Experiment {
            model: factory.build(ModelFamily::NaiveSeasonal, 14, &fixture.record)?,
            outliers: OutlierSetting::Retained,
            cutoff: cutoff(),
        };
        let row = runner.run(&mut results, experiment)?;
        assert_eq!(row.model_name_proper, "Naive Seasonal");
        assert_eq!(row.model_name_unique, "naive_seasonal_fh14");
        assert_eq!(row.forecast_horizon, 14);
        let csv = fixture
            .dir
            .path()
            .join("results/naive_seasonal_experiment_results.csv");
        assert_eq!(ExperimentResults::from_csv(&csv)?.rows()[0].forecast_horizon, 14);

        // Hyperparameters are looked up at the horizon the model was built for.
        let mut record = fixture.record.clone();
        let tuned = record.get(ModelFamily::XGBoost, 7).cloned();
        record.insert(ModelFamily::XGBoost, 14, tuned.ok_or("missing fixture entry")?);
        let model = factory.build(ModelFamily::XGBoost, 14, &record)?;
        let outcome = runner.run(
            &mut results,
            Experiment {
                model,
                outliers: OutlierSetting::Retained,
                cutoff: cutoff(),
            },
        );
        assert!(matches!(
            outcome,
            Err(ExperimentError::Model(ModelError::MissingHyperparameter { .. }))
        ));
        assert_eq!(results.len(), 1);
        Ok(())
    }

    #[test]
    fn test_tuned_row_totals()-> Result<(), Box<dyn std::error::Error>> {
        let fixture = Fixture::new();
        let factory = fixture.factory(MeanBackend::default());
        let mut results = ExperimentResults::new();

        let experiment = fixture.experiment(&factory, ModelFamily::XGBoost);
        let row = fixture.runner().run(&mut results, experiment)?;

        assert_eq!(row.best_val_rmse, Some(0.9));
        assert_eq!(row.hyp_search_time, Some(12.345));
        assert_eq!(row.total_time, Some(round2(row.training_time + 12.345)));
        Ok(())
    }

    #[test]
    fn test_covariates_follow_family() -> Result<(), Box<dyn std::error::Error>> {
        let fixture = Fixture::new();
        let backend = MeanBackend::default();
        let seen = backend.covariate_maxima();
        let factory = fixture.factory(backend);
        let runner = fixture.runner();
        let mut results = ExperimentResults::new();

        runner.run(&mut results, fixture.experiment(&factory, ModelFamily::XGBoost))?;
        let nbeats = ModelFamily::NBeats(NBeatsVariant::Generic);
        runner.run(&mut results, fixture.experiment(&factory, nbeats))?;

        let seen = seen.lock().unwrap();
        // Scaled covariates stay within [0, 1] on the training slice; raw ones do not.
        assert!(seen[0] <= 1.0 + 1e-6);
        assert!(seen[1] > 1.0);
        assert!(fixture
            .dir
            .path()
            .join("results/nbeats_outliers-false_experiment_results.csv")
            .exists());
        Ok(())
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(1.23456), 1.23);
        assert_eq!(round2(10.005 + 0.0001), 10.01);
    }
}
