use crate::types::error::SeriesError;
use crate::weather_data::error::WeatherDataError;
use chrono::NaiveDate;
use polars::prelude::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PreprocessError {
    #[error("Invalid month-day code {0}, expected month * 100 + day")]
    InvalidMonthDay(u32),

    #[error("Column '{0}' not found in daily frame")]
    ColumnNotFound(String, #[source] PolarsError),

    #[error("Column '{column}' cannot be read as numeric values")]
    NonNumericColumn {
        column: String,
        #[source]
        source: PolarsError,
    },

    #[error("No training data on or before cutoff date {cutoff}")]
    EmptyTrainingSlice { cutoff: NaiveDate },

    #[error("Scaler was fitted on {expected} components but the series has {found}")]
    ScalerWidthMismatch { expected: usize, found: usize },

    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("Failed to build time series")]
    Series(#[from] SeriesError),

    #[error("Failed to aggregate hourly data")]
    Aggregation(#[from] WeatherDataError),

    #[error("Polars operation failed")]
    Frame(#[from] PolarsError),
}
