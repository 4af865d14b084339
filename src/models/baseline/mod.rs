//! Statistical baselines implemented natively.

pub mod exponential_smoothing;
pub mod naive_seasonal;

use crate::models::error::ModelError;
use crate::types::time_series::TimeSeries;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Name and last date of the series a model was trained on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct TrainingEnd {
    component: String,
    last_date: NaiveDate,
}

impl TrainingEnd {
    pub(crate) fn of(target: &TimeSeries) -> Result<Self, ModelError> {
        let last_date = target
            .last_date()
            .ok_or(ModelError::InsufficientData { needed: 1, got: 0 })?;
        let component = target
            .components()
            .first()
            .cloned()
            .unwrap_or_default();
        Ok(Self {
            component,
            last_date,
        })
    }

    /// Wraps forecast values in a series indexed by the days after the training end.
    pub(crate) fn forecast(&self, values: Vec<f32>) -> Result<TimeSeries, ModelError> {
        let dates = (1..=values.len() as u64)
            .filter_map(|offset| self.last_date.checked_add_days(chrono::Days::new(offset)))
            .collect();
        Ok(TimeSeries::univariate(self.component.clone(), dates, values)?)
    }
}
