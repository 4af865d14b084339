use crate::models::error::ModelError;
use crate::types::time_series::TimeSeries;
use std::collections::HashMap;

/// Forecast accuracy scores.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scores {
    pub rmse: f64,
    pub mae: f64,
}

/// Computes RMSE and MAE over the dates present in both series.
///
/// Pairs where either value is `NaN` are skipped.
pub fn calculate_metrics(
    actual: &TimeSeries,
    predicted: &TimeSeries,
) -> Result<Scores, ModelError> {
    let actual_by_date: HashMap<_, _> = actual
        .dates()
        .iter()
        .zip(actual.values())
        .map(|(date, value)| (*date, *value as f64))
        .collect();

    let errors: Vec<f64> = predicted
        .dates()
        .iter()
        .zip(predicted.values())
        .filter_map(|(date, p)| {
            let a = actual_by_date.get(date)?;
            let error = *p as f64 - a;
            (!error.is_nan()).then_some(error)
        })
        .collect();

    if errors.is_empty() {
        return Err(ModelError::NoOverlap);
    }
    let n = errors.len() as f64;
    Ok(Scores {
        rmse: (errors.iter().map(|e| e * e).sum::<f64>() / n).sqrt(),
        mae: errors.iter().map(|e| e.abs()).sum::<f64>() / n,
    })
}
