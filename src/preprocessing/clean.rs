use crate::preprocessing::error::PreprocessError;
use crate::preprocessing::outliers::{adjust_outliers, Granularity, OutlierReport};
use crate::preprocessing::split::SplitInput;
use crate::types::frequency_frames::daily_frame::DailyFrame;
use crate::types::frequency_frames::hourly_frame::{DailyAggregation, HourlyFrame};

/// Daily data before and after outlier adjustment.
#[derive(Debug, Clone)]
pub struct CleanFrames {
    /// Compact daily aggregation plus `temp_range`, outliers kept.
    pub raw: DailyFrame,
    /// `raw` with every value column clamped per calendar month.
    pub adjusted: DailyFrame,
    pub report: OutlierReport,
}

impl CleanFrames {
    /// Both frames as splitter input forecasting `target`.
    pub fn into_split_input(self, target: impl Into<String>) -> SplitInput {
        SplitInput {
            with_outliers: self.raw,
            adjusted: self.adjusted,
            target: target.into(),
        }
    }
}

/// Aggregates hourly data to the compact daily layout, derives `temp_range` and clamps
/// outliers in every value column by month.
pub fn prepare_clean_frame(hourly: &HourlyFrame) -> Result<CleanFrames, PreprocessError> {
    let raw = hourly
        .daily(DailyAggregation::Compact)?
        .with_temperature_range()?;
    let columns = raw.value_columns();
    let columns: Vec<&str> = columns.iter().map(String::as_str).collect();
    let adjustment = adjust_outliers(&raw, &columns, Granularity::Month)?;
    Ok(CleanFrames {
        raw,
        adjusted: adjustment.frame,
        report: adjustment.report,
    })
}
