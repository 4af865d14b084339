use crate::hyperparameters::error::HyperparameterError;
use crate::hyperparameters::record::SearchResult;
use crate::json_file::{read_json_file, write_json_file};
use log::info;
use std::collections::BTreeMap;
use std::path::Path;

/// How [`post_hyperparameter_results`] treats an existing file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OpenMode {
    /// Merge into the entries already stored; keys present in both take the new value.
    #[default]
    Append,
    /// Replace the file contents.
    Overwrite,
}

/// Stores search results as one JSON object keyed by `<family>[_<variant>]_fh<N>`.
///
/// The file always holds a single valid JSON document.
pub fn post_hyperparameter_results(
    results: &BTreeMap<String, SearchResult>,
    path: &Path,
    mode: OpenMode,
) -> Result<(), HyperparameterError> {
    let merged = match mode {
        OpenMode::Append if path.exists() => {
            let mut existing = read_hyperparameter_results(path)?;
            existing.extend(results.iter().map(|(k, v)| (k.clone(), v.clone())));
            existing
        }
        _ => results.clone(),
    };
    write_json_file(path, &merged)?;
    info!("Successfully posted results to {:?}", path);
    Ok(())
}

pub fn read_hyperparameter_results(
    path: &Path,
) -> Result<BTreeMap<String, SearchResult>, HyperparameterError> {
    Ok(read_json_file(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Map;

    fn result(rmse: f64) -> SearchResult {
        SearchResult {
            best_parameters: Map::new(),
            best_rmse: rmse,
            hyperparam_search_time: 1.0,
        }
    }

    #[test]
    fn test_append_merges() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("hyperparameters.json");

        let first = BTreeMap::from([
            ("gru_fh1".to_string(), result(1.0)),
            ("lstm_fh1".to_string(), result(2.0)),
        ]);
        post_hyperparameter_results(&first, &path, OpenMode::Append)?;
        let second = BTreeMap::from([
            ("lstm_fh1".to_string(), result(9.0)),
            ("xgboost_fh1".to_string(), result(3.0)),
        ]);
        post_hyperparameter_results(&second, &path, OpenMode::Append)?;

        let stored = read_hyperparameter_results(&path)?;
        assert_eq!(stored.len(), 3);
        assert_eq!(stored["lstm_fh1"].best_rmse, 9.0);
        assert_eq!(stored["gru_fh1"].best_rmse, 1.0);
        Ok(())
    }

    #[test]
    fn test_overwrite_replaces() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("hyperparameters.json");

        post_hyperparameter_results(
            &BTreeMap::from([("gru_fh1".to_string(), result(1.0))]),
            &path,
            OpenMode::Overwrite,
        )?;
        post_hyperparameter_results(
            &BTreeMap::from([("lstm_fh7".to_string(), result(2.0))]),
            &path,
            OpenMode::Overwrite,
        )?;

        let stored = read_hyperparameter_results(&path)?;
        assert_eq!(stored.keys().collect::<Vec<_>>(), ["lstm_fh7"]);
        Ok(())
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let path = Path::new("/nonexistent-dir/for/hyperparameters.json");
        let result = post_hyperparameter_results(&BTreeMap::new(), path, OpenMode::Overwrite);
        assert!(matches!(result, Err(HyperparameterError::JsonFile(_))));
    }
}
