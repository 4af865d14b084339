use crate::types::model_family::ModelFamily;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};

/// One entry of a raw hyperparameter search results file, keyed by e.g. `lstm_fh7`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub best_parameters: Map<String, Value>,
    pub best_rmse: f64,
    /// Search duration in minutes.
    pub hyperparam_search_time: f64,
}

/// Tuned parameters for one model family and horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TunedParameters {
    pub parameters: Map<String, Value>,
    /// Best validation RMSE found during the search.
    pub training_rmse: f64,
    pub hyp_search_time: f64,
}

impl TunedParameters {
    /// Deserializes the parameter map into a typed parameter struct.
    pub fn parse<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(Value::Object(self.parameters.clone()))
    }
}

impl From<SearchResult> for TunedParameters {
    fn from(result: SearchResult) -> Self {
        Self {
            parameters: result.best_parameters,
            training_rmse: result.best_rmse,
            hyp_search_time: result.hyperparam_search_time,
        }
    }
}

impl From<TunedParameters> for SearchResult {
    fn from(tuned: TunedParameters) -> Self {
        Self {
            best_parameters: tuned.parameters,
            best_rmse: tuned.training_rmse,
            hyperparam_search_time: tuned.hyp_search_time,
        }
    }
}

/// Tuned parameters grouped by model family, then forecast horizon.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HyperparameterRecord {
    horizons: BTreeSet<usize>,
    entries: BTreeMap<ModelFamily, BTreeMap<usize, TunedParameters>>,
}

impl HyperparameterRecord {
    /// Creates an empty record with a slot for every tuned family and horizon.
    pub fn new(horizons: impl IntoIterator<Item = usize>) -> Self {
        Self {
            horizons: horizons.into_iter().collect(),
            entries: ModelFamily::TUNED
                .into_iter()
                .map(|family| (family, BTreeMap::new()))
                .collect(),
        }
    }

    pub fn horizons(&self) -> &BTreeSet<usize> {
        &self.horizons
    }

    pub fn expects_horizon(&self, horizon: usize) -> bool {
        self.horizons.contains(&horizon)
    }

    pub fn insert(&mut self, family: ModelFamily, horizon: usize, tuned: TunedParameters) {
        self.horizons.insert(horizon);
        self.entries.entry(family).or_default().insert(horizon, tuned);
    }

    pub fn get(&self, family: ModelFamily, horizon: usize) -> Option<&TunedParameters> {
        self.entries.get(&family)?.get(&horizon)
    }

    /// Number of filled slots.
    pub fn len(&self) -> usize {
        self.entries.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Converts back to the flat `<family>[_<variant>]_fh<N>` keyed layout.
    pub fn flatten(&self) -> BTreeMap<String, SearchResult> {
        self.entries
            .iter()
            .flat_map(|(family, by_horizon)| {
                by_horizon.iter().map(|(horizon, tuned)| {
                    (family.unique_name(*horizon), SearchResult::from(tuned.clone()))
                })
            })
            .collect()
    }
}
