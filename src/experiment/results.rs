//! The experiment results table and its CSV persistence.

use crate::experiment::error::ExperimentError;
use crate::types::model_family::ModelFamily;
use polars::prelude::*;
use std::fs::File;
use std::path::Path;

const COLUMNS: [&str; 10] = [
    "model_name_proper",
    "model_name_unique",
    "outlier_indicator",
    "forecast_horizon",
    "rmse",
    "mae",
    "best_val_rmse",
    "training_time",
    "hyp_search_time",
    "total_time",
];

/// One completed experiment.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow {
    pub model_name_proper: String,
    pub model_name_unique: String,
    /// `true` when the model was trained on data with outliers retained.
    pub outlier_indicator: bool,
    pub forecast_horizon: usize,
    pub rmse: f64,
    pub mae: f64,
    /// Best validation RMSE from the hyperparameter search; absent for baselines.
    pub best_val_rmse: Option<f64>,
    /// Fit, predict and score time in minutes.
    pub training_time: f64,
    /// Hyperparameter search time in minutes; absent for baselines.
    pub hyp_search_time: Option<f64>,
    /// `training_time + hyp_search_time` rounded to 2 decimals.
    pub total_time: Option<f64>,
}

/// Append-only accumulator of experiment rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExperimentResults {
    rows: Vec<ResultRow>,
}

/// CSV file name for a family's results, split by outlier setting for N-BEATS.
pub fn results_file_name(family: ModelFamily, outliers_retained: bool) -> String {
    match family {
        ModelFamily::NBeats(_) => {
            format!("nbeats_outliers-{outliers_retained}_experiment_results.csv")
        }
        _ => format!("{}_experiment_results.csv", family.key()),
    }
}

impl ExperimentResults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[ResultRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub(crate) fn push(&mut self, row: ResultRow) {
        self.rows.push(row);
    }

    pub fn to_dataframe(&self) -> Result<DataFrame, ExperimentError> {
        let strings = |f: fn(&ResultRow) -> &str| -> Vec<String> {
            self.rows.iter().map(|r| f(r).to_string()).collect()
        };
        let floats = |f: fn(&ResultRow) -> f64| -> Vec<f64> { self.rows.iter().map(f).collect() };
        let optional = |f: fn(&ResultRow) -> Option<f64>| -> Vec<Option<f64>> {
            self.rows.iter().map(f).collect()
        };

        let columns = vec![
            Column::new(COLUMNS[0].into(), strings(|r| r.model_name_proper.as_str())),
            Column::new(COLUMNS[1].into(), strings(|r| r.model_name_unique.as_str())),
            Column::new(
                COLUMNS[2].into(),
                self.rows.iter().map(|r| r.outlier_indicator).collect::<Vec<bool>>(),
            ),
            Column::new(
                COLUMNS[3].into(),
                self.rows
                    .iter()
                    .map(|r| r.forecast_horizon as u64)
                    .collect::<Vec<u64>>(),
            ),
            Column::new(COLUMNS[4].into(), floats(|r| r.rmse)),
            Column::new(COLUMNS[5].into(), floats(|r| r.mae)),
            Column::new(COLUMNS[6].into(), optional(|r| r.best_val_rmse)),
            Column::new(COLUMNS[7].into(), floats(|r| r.training_time)),
            Column::new(COLUMNS[8].into(), optional(|r| r.hyp_search_time)),
            Column::new(COLUMNS[9].into(), optional(|r| r.total_time)),
        ];
        Ok(DataFrame::new(columns)?)
    }

    /// Rewrites `path` with every row accumulated so far.
    pub fn write_csv(&self, path: &Path) -> Result<(), ExperimentError> {
        let mut frame = self.to_dataframe()?;
        let mut file =
            File::create(path).map_err(|e| ExperimentError::ResultsFile(path.to_path_buf(), e))?;
        CsvWriter::new(&mut file)
            .include_header(true)
            .finish(&mut frame)
            .map_err(|e| ExperimentError::ResultsWrite(path.to_path_buf(), e))
    }

    /// Loads a table written by [`ExperimentResults::write_csv`], e.g. to resume a session.
    pub fn from_csv(path: &Path) -> Result<Self, ExperimentError> {
        let read_err = |e| ExperimentError::ResultsRead(path.to_path_buf(), e);
        let frame = CsvReadOptions::default()
            .with_has_header(true)
            .try_into_reader_with_file_path(Some(path.to_path_buf()))
            .map_err(read_err)?
            .finish()
            .map_err(read_err)?;
        let reader = FrameReader { frame: &frame, path };

        let proper = reader.strings(COLUMNS[0])?;
        let unique = reader.strings(COLUMNS[1])?;
        let outliers = reader.bools(COLUMNS[2])?;
        let horizons = reader.floats(COLUMNS[3])?;
        let rmse = reader.floats(COLUMNS[4])?;
        let mae = reader.floats(COLUMNS[5])?;
        let best_val_rmse = reader.floats(COLUMNS[6])?;
        let training_time = reader.floats(COLUMNS[7])?;
        let hyp_search_time = reader.floats(COLUMNS[8])?;
        let total_time = reader.floats(COLUMNS[9])?;

        let rows = (0..frame.height())
            .map(|row| {
                let required = |values: &[Option<f64>], column: usize| {
                    values[row].ok_or_else(|| reader.invalid(COLUMNS[column], row))
                };
                Ok(ResultRow {
                    model_name_proper: proper[row]
                        .clone()
                        .ok_or_else(|| reader.invalid(COLUMNS[0], row))?,
                    model_name_unique: unique[row]
                        .clone()
                        .ok_or_else(|| reader.invalid(COLUMNS[1], row))?,
                    outlier_indicator: outliers[row]
                        .ok_or_else(|| reader.invalid(COLUMNS[2], row))?,
                    forecast_horizon: required(&horizons, 3)? as usize,
                    rmse: required(&rmse, 4)?,
                    mae: required(&mae, 5)?,
                    best_val_rmse: best_val_rmse[row],
                    training_time: required(&training_time, 7)?,
                    hyp_search_time: hyp_search_time[row],
                    total_time: total_time[row],
                })
            })
            .collect::<Result<Vec<_>, ExperimentError>>()?;
        Ok(Self { rows })
    }
}

struct FrameReader<'a> {
    frame: &'a DataFrame,
    path: &'a Path,
}

impl FrameReader<'_> {
    fn column(&self, name: &str) -> Result<&Column, ExperimentError> {
        self.frame
            .column(name)
            .map_err(|e| ExperimentError::ResultsRead(self.path.to_path_buf(), e))
    }

    fn strings(&self, name: &str) -> Result<Vec<Option<String>>, ExperimentError> {
        let column = self.column(name)?.cast(&DataType::String)?;
        Ok(column
            .str()?
            .into_iter()
            .map(|v| v.map(str::to_string))
            .collect())
    }

    fn floats(&self, name: &str) -> Result<Vec<Option<f64>>, ExperimentError> {
        let column = self.column(name)?.cast(&DataType::Float64)?;
        Ok(column.f64()?.into_iter().collect())
    }

    /// Accepts a boolean column or `true`/`True`/`false`/`False` strings.
    fn bools(&self, name: &str) -> Result<Vec<Option<bool>>, ExperimentError> {
        let column = self.column(name)?;
        if column.dtype() == &DataType::Boolean {
            return Ok(column.bool()?.into_iter().collect());
        }
        let column = column.cast(&DataType::String)?;
        Ok(column
            .str()?
            .into_iter()
            .map(|v| match v {
                Some("true") | Some("True") => Some(true),
                Some("false") | Some("False") => Some(false),
                _ => None,
            })
            .collect())
    }

    fn invalid(&self, column: &str, row: usize) -> ExperimentError {
        ExperimentError::InvalidResultValue {
            path: self.path.to_path_buf(),
            column: column.to_string(),
            row,
        }
    }
}
