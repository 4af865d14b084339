//! Whole-file JSON helpers shared by the weather loader and the hyperparameter store.

use polars::prelude::{DataFrame, JsonReader, PolarsError, SerReader};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum JsonFileError {
    #[error("Failed to read JSON file '{0}'")]
    Read(PathBuf, #[source] std::io::Error),

    #[error("Failed to write JSON file '{0}'")]
    Write(PathBuf, #[source] std::io::Error),

    #[error("Failed to parse JSON file '{0}'")]
    Parse(PathBuf, #[source] serde_json::Error),

    #[error("Failed to encode JSON for '{0}'")]
    Encode(PathBuf, #[source] serde_json::Error),

    #[error("Failed to load JSON file '{0}' into a DataFrame")]
    Frame(PathBuf, #[source] PolarsError),
}

/// Reads a JSON file and deserializes it into `T`.
pub fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T, JsonFileError> {
    let file = File::open(path).map_err(|e| JsonFileError::Read(path.to_path_buf(), e))?;
    serde_json::from_reader(BufReader::new(file))
        .map_err(|e| JsonFileError::Parse(path.to_path_buf(), e))
}

/// Reads a JSON array of records into a polars `DataFrame`.
pub fn read_json_frame(path: &Path) -> Result<DataFrame, JsonFileError> {
    let file = File::open(path).map_err(|e| JsonFileError::Read(path.to_path_buf(), e))?;
    JsonReader::new(BufReader::new(file))
        .finish()
        .map_err(|e| JsonFileError::Frame(path.to_path_buf(), e))
}

/// Serializes `value` as pretty JSON, replacing whatever is at `path`.
pub fn write_json_file<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), JsonFileError> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| JsonFileError::Encode(path.to_path_buf(), e))?;
    std::fs::write(path, text).map_err(|e| JsonFileError::Write(path.to_path_buf(), e))
}
