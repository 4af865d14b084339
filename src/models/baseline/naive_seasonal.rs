//! Seasonal naive model: repeats the value observed `k` days earlier.

use crate::models::artifact::{read_artifact, write_artifact};
use crate::models::baseline::TrainingEnd;
use crate::models::error::ModelError;
use crate::models::traits::Forecaster;
use crate::types::time_series::TimeSeries;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NaiveSeasonal {
    k: usize,
    /// The last `k` training values.
    last_season: Option<Vec<f32>>,
    end: Option<TrainingEnd>,
}

impl NaiveSeasonal {
    pub fn new(k: usize) -> Self {
        Self {
            k,
            last_season: None,
            end: None,
        }
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn load(path: &Path) -> Result<Self, ModelError> {
        read_artifact(path)
    }
}

impl Forecaster for NaiveSeasonal {
    fn fit(&mut self, target: &TimeSeries, _: Option<&TimeSeries>) -> Result<(), ModelError> {
        let values = target.values();
        if self.k == 0 || values.len() < self.k {
            return Err(ModelError::InsufficientData {
                needed: self.k.max(1),
                got: values.len(),
            });
        }
        self.last_season = Some(values[values.len() - self.k..].to_vec());
        self.end = Some(TrainingEnd::of(target)?);
        Ok(())
    }

    fn predict(&self, horizon: usize) -> Result<TimeSeries, ModelError> {
        let (Some(season), Some(end)) = (&self.last_season, &self.end) else {
            return Err(ModelError::NotFitted(self.name().to_string()));
        };
        let values = (0..horizon).map(|h| season[h % self.k]).collect();
        end.forecast(values)
    }

    fn save(&self, path: &Path) -> Result<(), ModelError> {
        write_artifact(path, self)
    }

    fn name(&self) -> &str {
        "NaiveSeasonal"
    }

    fn is_fitted(&self) -> bool {
        self.last_season.is_some()
    }
}
