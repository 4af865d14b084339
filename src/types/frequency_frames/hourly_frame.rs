// hourly_frame.rs

//! Contains the `HourlyFrame` structure for hourly weather records and their
//! aggregation into daily rows.

use crate::types::frequency_frames::daily_frame::{DailyFrame, COL_DATE};
use crate::weather_data::error::WeatherDataError;
use chrono::NaiveDateTime;
use polars::prelude::*;

pub const COL_TIME: &str = "time";
pub const COL_TEMP: &str = "temp";
pub const COL_HUMIDITY: &str = "humidity";
pub const COL_DEW_POINT: &str = "dew_point";
pub const COL_CLOUD_COVER: &str = "cloud_cover";
pub const COL_WIND_SPEED: &str = "wind_speed";
pub const COL_PRECIPITATION: &str = "precipitation";
pub const COL_SHORTWAVE_RADIATION: &str = "shortwave_radiation";
pub const COL_SUNSHINE_SECONDS: &str = "sunshine_s";

/// Output column for daily sunshine duration in hours.
pub const COL_SUNSHINE_HOURS: &str = "sunshine_hr";

const SECONDS_PER_HOUR: f64 = 3600.0;
const ROUND_DECIMALS: u32 = 3;

/// Variables with min/mean/max aggregates in the full daily layout, in output order.
const MIN_MEAN_MAX_COLUMNS: [&str; 5] = [
    COL_TEMP,
    COL_HUMIDITY,
    COL_DEW_POINT,
    COL_CLOUD_COVER,
    COL_WIND_SPEED,
];

/// One hourly observation. Missing measurements are `None`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HourlyRecord {
    pub time: NaiveDateTime,
    pub temp: Option<f64>,
    pub humidity: Option<f64>,
    pub dew_point: Option<f64>,
    pub cloud_cover: Option<f64>,
    pub wind_speed: Option<f64>,
    pub precipitation: Option<f64>,
    pub shortwave_radiation: Option<f64>,
    /// Sunshine duration within the hour, in seconds.
    pub sunshine_s: Option<f64>,
}

/// Daily row layout produced by [`HourlyFrame::daily`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DailyAggregation {
    /// `sunshine_hr, shortwave_radiation, precipitation`, then `min_`, `mean_` and `max_`
    /// of temp, humidity, dew point, cloud cover and wind speed. Rounded to 3 decimals.
    Full,
    /// `sunshine_hr, humidity_mean, temp_min, temp_mean, temp_max`, unrounded.
    Compact,
}

impl DailyAggregation {
    fn required_columns(self) -> Vec<&'static str> {
        match self {
            DailyAggregation::Full => {
                let mut cols = vec![
                    COL_SUNSHINE_SECONDS,
                    COL_SHORTWAVE_RADIATION,
                    COL_PRECIPITATION,
                ];
                cols.extend(MIN_MEAN_MAX_COLUMNS);
                cols
            }
            DailyAggregation::Compact => vec![COL_SUNSHINE_SECONDS, COL_HUMIDITY, COL_TEMP],
        }
    }

    fn aggregations(self) -> Vec<Expr> {
        match self {
            DailyAggregation::Full => {
                let mut exprs = vec![
                    (col(COL_SUNSHINE_SECONDS).sum() / lit(SECONDS_PER_HOUR))
                        .round(ROUND_DECIMALS)
                        .alias(COL_SUNSHINE_HOURS),
                    col(COL_SHORTWAVE_RADIATION)
                        .sum()
                        .round(ROUND_DECIMALS)
                        .alias(COL_SHORTWAVE_RADIATION),
                    col(COL_PRECIPITATION)
                        .sum()
                        .round(ROUND_DECIMALS)
                        .alias(COL_PRECIPITATION),
                ];
                for name in MIN_MEAN_MAX_COLUMNS {
                    let rounded = |expr: Expr, stat: &str| {
                        expr.round(ROUND_DECIMALS).alias(format!("{stat}_{name}"))
                    };
                    exprs.push(rounded(col(name).min(), "min"));
                    exprs.push(rounded(col(name).mean(), "mean"));
                    exprs.push(rounded(col(name).max(), "max"));
                }
                exprs
            }
            DailyAggregation::Compact => vec![
                (col(COL_SUNSHINE_SECONDS).sum() / lit(SECONDS_PER_HOUR)).alias(COL_SUNSHINE_HOURS),
                col(COL_HUMIDITY).mean().alias("humidity_mean"),
                col(COL_TEMP).min().alias("temp_min"),
                col(COL_TEMP).mean().alias("temp_mean"),
                col(COL_TEMP).max().alias("temp_max"),
            ],
        }
    }
}

/// A wrapper around a Polars `LazyFrame` holding hourly weather data.
///
/// The frame has a `time` datetime column (timezone-naive) and one `f64` column per
/// weather variable using the short names above (`temp`, `humidity`, `sunshine_s`, ...).
/// Instances are usually created with [`crate::load_hourly_json`] or
/// [`HourlyFrame::from_records`].
#[derive(Clone)]
pub struct HourlyFrame {
    /// The underlying Polars LazyFrame containing the hourly data.
    pub frame: LazyFrame,
}

impl HourlyFrame {
    pub fn new(frame: LazyFrame) -> Self {
        Self { frame }
    }

    /// Builds a frame from typed hourly records.
    pub fn from_records(records: &[HourlyRecord]) -> Result<Self, WeatherDataError> {
        let times: Vec<NaiveDateTime> = records.iter().map(|r| r.time).collect();
        let field = |f: fn(&HourlyRecord) -> Option<f64>| -> Vec<Option<f64>> {
            records.iter().map(f).collect()
        };
        let columns = vec![
            time_column(times),
            Column::new(COL_TEMP.into(), field(|r| r.temp)),
            Column::new(COL_HUMIDITY.into(), field(|r| r.humidity)),
            Column::new(COL_DEW_POINT.into(), field(|r| r.dew_point)),
            Column::new(COL_CLOUD_COVER.into(), field(|r| r.cloud_cover)),
            Column::new(COL_WIND_SPEED.into(), field(|r| r.wind_speed)),
            Column::new(COL_PRECIPITATION.into(), field(|r| r.precipitation)),
            Column::new(
                COL_SHORTWAVE_RADIATION.into(),
                field(|r| r.shortwave_radiation),
            ),
            Column::new(COL_SUNSHINE_SECONDS.into(), field(|r| r.sunshine_s)),
        ];
        Ok(Self::new(DataFrame::new(columns)?.lazy()))
    }

    /// Filters the hourly data based on a Polars predicate expression.
    pub fn filter(&self, predicate: Expr) -> HourlyFrame {
        HourlyFrame::new(self.frame.clone().filter(predicate))
    }

    /// Filters the hourly data to records within `[start, end]`.
    pub fn get_range(&self, start: NaiveDateTime, end: NaiveDateTime) -> HourlyFrame {
        self.filter(
            col(COL_TIME)
                .gt_eq(lit(start))
                .and(col(COL_TIME).lt_eq(lit(end))),
        )
    }

    /// Aggregates hourly rows into one row per calendar day present in the data.
    ///
    /// Rows are grouped by `time` truncated to its date and sorted by date. Days without
    /// any hourly row do not appear in the output. Sunshine seconds are summed and divided
    /// by 3600 to give `sunshine_hr`, which is always the first value column.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherDataError::MissingColumn`] when a variable needed by `layout` is
    /// absent, or [`WeatherDataError::DataFrameProcessing`] if the Polars query fails.
    pub fn daily(&self, layout: DailyAggregation) -> Result<DailyFrame, WeatherDataError> {
        let schema = self.frame.clone().collect_schema()?;
        for required in std::iter::once(COL_TIME).chain(layout.required_columns()) {
            if schema.get(required).is_none() {
                return Err(WeatherDataError::MissingColumn(required.to_string()));
            }
        }

        let frame = self
            .frame
            .clone()
            .with_column(col(COL_TIME).dt().date().alias(COL_DATE))
            .group_by([col(COL_DATE)])
            .agg(layout.aggregations())
            .sort([COL_DATE], SortMultipleOptions::default())
            .collect()?;

        Ok(DailyFrame::new(frame))
    }
}

pub(crate) fn time_column(times: Vec<NaiveDateTime>) -> Column {
    DatetimeChunked::from_naive_datetime(COL_TIME.into(), times, TimeUnit::Milliseconds)
        .into_series()
        .into()
}
