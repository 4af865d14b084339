use crate::models::error::ModelError;
use crate::preprocessing::error::PreprocessError;
use polars::prelude::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExperimentError {
    #[error(transparent)]
    Preprocess(#[from] PreprocessError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("Failed to create results directory '{0}'")]
    DirCreation(PathBuf, #[source] std::io::Error),

    #[error("Failed to open results file '{0}'")]
    ResultsFile(PathBuf, #[source] std::io::Error),

    #[error("Failed to write results file '{0}'")]
    ResultsWrite(PathBuf, #[source] PolarsError),

    #[error("Failed to read results file '{0}'")]
    ResultsRead(PathBuf, #[source] PolarsError),

    #[error("Results file '{path}' has an invalid value in column '{column}' at row {row}")]
    InvalidResultValue {
        path: PathBuf,
        column: String,
        row: usize,
    },

    #[error("Failed building results table")]
    Frame(#[from] PolarsError),
}
