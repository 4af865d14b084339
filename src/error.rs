use crate::experiment::error::ExperimentError;
use crate::hyperparameters::error::HyperparameterError;
use crate::json_file::JsonFileError;
use crate::models::error::ModelError;
use crate::preprocessing::error::PreprocessError;
use crate::types::error::SeriesError;
use crate::weather_data::error::WeatherDataError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ForecastError {
    #[error(transparent)]
    WeatherData(#[from] WeatherDataError),

    #[error(transparent)]
    Preprocess(#[from] PreprocessError),

    #[error(transparent)]
    Series(#[from] SeriesError),

    #[error(transparent)]
    Hyperparameter(#[from] HyperparameterError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Experiment(#[from] ExperimentError),

    #[error(transparent)]
    JsonFile(#[from] JsonFileError),

    #[error("Failed to create output directory '{0}'")]
    OutputDirCreation(PathBuf, #[source] std::io::Error),

    #[error("Output path exists but is not a directory: '{0}'")]
    OutputDirNotADirectory(PathBuf),

    #[error("Failed to determine output directory")]
    OutputDirResolution,
}
