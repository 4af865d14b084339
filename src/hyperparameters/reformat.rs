//! Converts flat hyperparameter search results (`lstm_fh7`, `nbeats_generic_fh7`, ...)
//! into a [`HyperparameterRecord`] grouped by family and horizon.

use crate::hyperparameters::error::HyperparameterError;
use crate::hyperparameters::record::{HyperparameterRecord, SearchResult};
use crate::types::model_family::ModelFamily;
use regex::Regex;
use std::collections::BTreeMap;

const KEY_PATTERN: &str = r"^(?P<family>[a-z0-9]+)(?:_(?P<variant>[a-z0-9]+))?_fh(?P<fh>\d+)$";

/// A parsed search result key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultKey {
    pub family: ModelFamily,
    pub horizon: usize,
}

/// Parses keys of the form `<family>_fh<N>` or `<family>_<variant>_fh<N>`.
pub struct KeyParser {
    pattern: Regex,
}

impl KeyParser {
    pub fn new() -> Result<Self, HyperparameterError> {
        Ok(Self {
            pattern: Regex::new(KEY_PATTERN)?,
        })
    }

    pub fn parse(&self, key: &str) -> Result<ResultKey, HyperparameterError> {
        let parse_error = || HyperparameterError::Parse {
            key: key.to_string(),
        };
        let captures = self.pattern.captures(key).ok_or_else(parse_error)?;
        let horizon = captures["fh"].parse().map_err(|_| parse_error())?;
        let family = ModelFamily::from_key(
            &captures["family"],
            captures.name("variant").map(|m| m.as_str()),
        )
        .ok_or_else(|| HyperparameterError::UnknownModel {
            key: key.to_string(),
        })?;
        Ok(ResultKey { family, horizon })
    }
}

/// Regroups search results by family and horizon.
///
/// # Errors
///
/// * [`HyperparameterError::Parse`] for a key of neither accepted shape.
/// * [`HyperparameterError::UnknownModel`] for an unknown family or variant.
/// * [`HyperparameterError::UnexpectedHorizon`] for a horizon outside `horizons`.
pub fn reformat_hyperparameters(
    results: &BTreeMap<String, SearchResult>,
    horizons: &[usize],
) -> Result<HyperparameterRecord, HyperparameterError> {
    let parser = KeyParser::new()?;
    let mut record = HyperparameterRecord::new(horizons.iter().copied());

    for (key, result) in results {
        let ResultKey { family, horizon } = parser.parse(key)?;
        if !record.expects_horizon(horizon) {
            return Err(HyperparameterError::UnexpectedHorizon {
                key: key.clone(),
                horizon,
            });
        }
        record.insert(family, horizon, result.clone().into());
    }

    Ok(record)
}
