use crate::json_file::read_json_file;
use crate::types::frequency_frames::hourly_frame::{
    time_column, HourlyFrame, COL_CLOUD_COVER, COL_DEW_POINT, COL_HUMIDITY, COL_PRECIPITATION,
    COL_SHORTWAVE_RADIATION, COL_SUNSHINE_SECONDS, COL_TEMP, COL_WIND_SPEED,
};
use crate::weather_data::error::WeatherDataError;
use chrono::NaiveDateTime;
use log::debug;
use polars::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Accepted source names per hourly column, short name first.
const VARIABLE_ALIASES: [(&str, &[&str]); 8] = [
    (COL_TEMP, &["temperature_2m"]),
    (COL_HUMIDITY, &["relative_humidity_2m", "relativehumidity_2m"]),
    (COL_DEW_POINT, &["dew_point_2m", "dewpoint_2m"]),
    (COL_CLOUD_COVER, &["cloudcover"]),
    (COL_WIND_SPEED, &["wind_speed_10m", "windspeed_10m"]),
    (COL_PRECIPITATION, &[]),
    (COL_SHORTWAVE_RADIATION, &[]),
    (COL_SUNSHINE_SECONDS, &["sunshine_duration"]),
];

#[derive(Debug, Deserialize)]
struct WeatherResponse {
    hourly: Option<HourlyPayload>,
}

#[derive(Debug, Deserialize)]
struct HourlyPayload {
    time: Vec<String>,
    #[serde(flatten)]
    variables: HashMap<String, Vec<Option<f64>>>,
}

/// Loads the `hourly` object of a weather JSON file into an [`HourlyFrame`].
pub fn load_hourly_json(path: &Path) -> Result<HourlyFrame, WeatherDataError> {
    let response: WeatherResponse = read_json_file(path)?;
    from_response(response)
}

impl HourlyFrame {
    /// Parses a weather JSON document (an object with an `hourly` member holding a `time`
    /// array plus one array per variable) into an hourly frame.
    ///
    /// Variables may use either the short column names (`temp`, `sunshine_s`, ...) or the
    /// Open-Meteo names (`temperature_2m`, `sunshine_duration`, ...). Unrecognised variables
    /// are ignored and absent ones are simply left out of the frame.
    pub fn from_json_str(json: &str) -> Result<HourlyFrame, WeatherDataError> {
        from_response(serde_json::from_str(json)?)
    }
}

fn from_response(response: WeatherResponse) -> Result<HourlyFrame, WeatherDataError> {
    let mut hourly = response.hourly.ok_or(WeatherDataError::MissingHourlyData)?;
    let times = hourly
        .time
        .iter()
        .map(|value| parse_timestamp(value))
        .collect::<Result<Vec<_>, _>>()?;
    let expected = times.len();

    let mut columns = vec![time_column(times)];
    for (name, aliases) in VARIABLE_ALIASES {
        let source = std::iter::once(name)
            .chain(aliases.iter().copied())
            .find(|key| hourly.variables.contains_key(*key));
        let Some(source) = source else {
            debug!("Hourly variable '{}' not present in weather JSON", name);
            continue;
        };
        let values = hourly.variables.remove(source).unwrap_or_default();
        if values.len() != expected {
            return Err(WeatherDataError::ColumnLengthMismatch {
                column: source.to_string(),
                expected,
                found: values.len(),
            });
        }
        columns.push(Column::new(name.into(), values));
    }

    Ok(HourlyFrame::new(DataFrame::new(columns)?.lazy()))
}

fn parse_timestamp(value: &str) -> Result<NaiveDateTime, WeatherDataError> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S"))
        .map_err(|source| WeatherDataError::TimestampParse {
            value: value.to_string(),
            source,
        })
}
