// daily_frame.rs

//! Contains the `DailyFrame` structure for aggregated daily weather rows and the
//! conversion of its columns into target and covariate time series.

use crate::preprocessing::error::PreprocessError;
use crate::types::error::SeriesError;
use crate::types::time_series::TimeSeries;
use chrono::{Duration, NaiveDate};
use polars::prelude::*;

pub const COL_DATE: &str = "date";

/// Column added by [`DailyFrame::with_temperature_range`].
pub const COL_TEMP_RANGE: &str = "temp_range";

/// A wrapper around a Polars `DataFrame` holding one row per calendar day.
///
/// The frame always has a `date` column of type `Date`, sorted ascending; every other
/// column is a numeric daily variable. Instances are produced by
/// [`crate::HourlyFrame::daily`] and by the outlier adjuster, which returns a new frame
/// rather than mutating its input.
#[derive(Debug, Clone)]
pub struct DailyFrame {
    /// The underlying Polars DataFrame containing the daily data.
    pub frame: DataFrame,
}

impl DailyFrame {
    pub fn new(frame: DataFrame) -> Self {
        Self { frame }
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }

    /// Returns the `date` column as `NaiveDate`s.
    ///
    /// # Errors
    ///
    /// Fails if the column is missing, not of type `Date`, or contains nulls.
    pub fn dates(&self) -> Result<Vec<NaiveDate>, PreprocessError> {
        let epoch = NaiveDate::default(); // 1970-01-01
        let dates = self
            .frame
            .column(COL_DATE)
            .map_err(|e| PreprocessError::ColumnNotFound(COL_DATE.to_string(), e))?
            .date()?;
        dates
            .into_iter()
            .enumerate()
            .map(|(row, days)| {
                days.map(|d| epoch + Duration::days(d as i64))
                    .ok_or(PreprocessError::Series(SeriesError::NullDate(row)))
            })
            .collect()
    }

    /// Names of all columns except `date`, in frame order.
    pub fn value_columns(&self) -> Vec<String> {
        self.frame
            .get_column_names()
            .into_iter()
            .filter(|name| name.as_str() != COL_DATE)
            .map(|name| name.to_string())
            .collect()
    }

    /// Reads a column as `f64`, casting integer columns.
    pub fn column_values(&self, name: &str) -> Result<Vec<Option<f64>>, PreprocessError> {
        let column = self
            .frame
            .column(name)
            .map_err(|e| PreprocessError::ColumnNotFound(name.to_string(), e))?;
        let cast = column
            .cast(&DataType::Float64)
            .map_err(|source| PreprocessError::NonNumericColumn {
                column: name.to_string(),
                source,
            })?;
        Ok(cast.f64()?.into_iter().collect())
    }

    /// Returns a copy of the frame with column `name` replaced (or appended) by `values`.
    pub fn with_values(
        &self,
        name: &str,
        values: Vec<Option<f64>>,
    ) -> Result<DailyFrame, PreprocessError> {
        let mut frame = self.frame.clone();
        frame.with_column(Column::new(name.into(), values))?;
        Ok(DailyFrame::new(frame))
    }

    /// Appends `temp_range = temp_max - temp_min`.
    pub fn with_temperature_range(&self) -> Result<DailyFrame, PreprocessError> {
        let frame = self
            .frame
            .clone()
            .lazy()
            .with_column((col("temp_max") - col("temp_min")).alias(COL_TEMP_RANGE))
            .collect()?;
        Ok(DailyFrame::new(frame))
    }

    /// Rows with `start <= date <= end`.
    pub fn get_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<DailyFrame, PreprocessError> {
        let frame = self
            .frame
            .clone()
            .lazy()
            .filter(
                col(COL_DATE)
                    .gt_eq(lit(start))
                    .and(col(COL_DATE).lt_eq(lit(end))),
            )
            .collect()?;
        Ok(DailyFrame::new(frame))
    }

    /// Builds the univariate target series from `column`, narrowed to `f32`.
    ///
    /// Missing values become `NaN`.
    pub fn target_series(&self, column: &str) -> Result<TimeSeries, PreprocessError> {
        let values = self
            .column_values(column)?
            .into_iter()
            .map(|v| v.map_or(f32::NAN, |v| v as f32))
            .collect();
        Ok(TimeSeries::univariate(column, self.dates()?, values)?)
    }

    /// Builds the covariate series: every column except `date` and `target`,
    /// stacked in frame order.
    ///
    /// # Errors
    ///
    /// Returns [`PreprocessError::Series`] wrapping [`SeriesError::NothingToStack`] when the
    /// frame has no covariate columns.
    pub fn covariate_series(&self, target: &str) -> Result<TimeSeries, PreprocessError> {
        let parts = self
            .value_columns()
            .iter()
            .filter(|name| name.as_str() != target)
            .map(|name| self.target_series(name))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(TimeSeries::stack(&parts)?)
    }
}
