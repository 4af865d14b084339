use crate::json_file::write_json_file;
use crate::weather_data::error::WeatherDataError;
use bon::bon;
use chrono::NaiveDate;
use log::{info, warn};
use reqwest::blocking::Client;
use std::fs;
use std::path::{Path, PathBuf};

const ARCHIVE_URL: &str = "https://archive-api.open-meteo.com/v1/archive";

/// Hourly variables requested by default, using the archive API's names.
pub const DEFAULT_HOURLY_VARIABLES: [&str; 8] = [
    "temperature_2m",
    "relative_humidity_2m",
    "dew_point_2m",
    "cloud_cover",
    "wind_speed_10m",
    "precipitation",
    "shortwave_radiation",
    "sunshine_duration",
];

/// Query for the Open-Meteo historical archive.
#[derive(Debug, Clone, PartialEq)]
pub struct ArchiveRequest {
    pub latitude: f64,
    pub longitude: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub hourly: Vec<String>,
    pub timezone: String,
}

#[bon]
impl ArchiveRequest {
    #[builder]
    pub fn new(
        latitude: f64,
        longitude: f64,
        start_date: NaiveDate,
        end_date: NaiveDate,
        hourly: Option<Vec<String>>,
        #[builder(default = "auto".to_string(), into)] timezone: String,
    ) -> Self {
        let hourly = hourly.unwrap_or_else(|| {
            DEFAULT_HOURLY_VARIABLES
                .iter()
                .map(|v| v.to_string())
                .collect()
        });
        Self {
            latitude,
            longitude,
            start_date,
            end_date,
            hourly,
            timezone,
        }
    }

    pub fn url(&self) -> String {
        format!(
            "{ARCHIVE_URL}?latitude={}&longitude={}\
             &start_date={}&end_date={}&hourly={}&timezone={}",
            self.latitude,
            self.longitude,
            self.start_date.format("%Y-%m-%d"),
            self.end_date.format("%Y-%m-%d"),
            self.hourly.join(","),
            self.timezone,
        )
    }
}

/// Downloads weather JSON and stores it pretty-printed under `output_dir`.
pub struct WeatherDataLoader {
    output_dir: PathBuf,
    download_client: Client,
}

impl WeatherDataLoader {
    pub fn new(output_dir: &Path) -> WeatherDataLoader {
        WeatherDataLoader {
            output_dir: output_dir.to_path_buf(),
            download_client: Client::new(),
        }
    }

    /// Fetches `url` and decodes the body as JSON.
    pub fn fetch_json(&self, url: &str) -> Result<serde_json::Value, WeatherDataError> {
        info!("Downloading data from {}", url);

        let response = self
            .download_client
            .get(url)
            .send()
            .map_err(|e| WeatherDataError::NetworkRequest(url.to_string(), e))?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                warn!("HTTP error for {}: {:?}", url, e);
                return Err(if let Some(status) = e.status() {
                    WeatherDataError::HttpStatus {
                        url: url.to_string(),
                        status,
                        source: e,
                    }
                } else {
                    WeatherDataError::NetworkRequest(url.to_string(), e)
                });
            }
        };

        response
            .json()
            .map_err(|e| WeatherDataError::ResponseDecode(url.to_string(), e))
    }

    /// Fetches `url` and writes the JSON body to `<output_dir>/<file_name>`, creating the
    /// directory if needed. Returns the written path.
    pub fn download_data(&self, url: &str, file_name: &str) -> Result<PathBuf, WeatherDataError> {
        let body = self.fetch_json(url).inspect_err(|e| {
            warn!("Download of {} failed: {}", url, e);
        })?;

        fs::create_dir_all(&self.output_dir)
            .map_err(|e| WeatherDataError::DirCreation(self.output_dir.clone(), e))?;
        let path = self.output_dir.join(file_name);
        write_json_file(&path, &body)?;

        info!("Saved weather data from {} to {:?}", url, path);
        Ok(path)
    }
}

/// Convenience wrapper around [`WeatherDataLoader::download_data`].
///
/// # Errors
///
/// Network, HTTP status and decode failures are returned (and logged at `warn`) instead of
/// being swallowed; the target file is not touched in that case.
pub fn download_data(url: &str, dir: &Path, file_name: &str) -> Result<PathBuf, WeatherDataError> {
    WeatherDataLoader::new(dir).download_data(url, file_name)
}
