//! Deterministic synthetic weather data and a stand-in model backend shared by unit tests.

use crate::models::artifact::write_artifact;
use crate::models::baseline::TrainingEnd;
use crate::models::error::ModelError;
use crate::models::traits::{BoxedForecaster, Forecaster, ModelBackend, ModelSpec};
use crate::types::frequency_frames::daily_frame::DailyFrame;
use crate::types::frequency_frames::hourly_frame::{DailyAggregation, HourlyFrame, HourlyRecord};
use crate::types::time_series::TimeSeries;
use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Cheap repeatable noise in `[-0.5, 0.5]`.
fn jitter(i: usize) -> f64 {
    ((i * 7919 + 13) % 101) as f64 / 100.0 - 0.5
}

/// `days` full days of hourly records starting at midnight on `start`.
pub fn hourly_records(start: NaiveDate, days: usize) -> Vec<HourlyRecord> {
    let mut records = Vec::with_capacity(days * 24);
    for day in 0..days {
        let date = start + Duration::days(day as i64);
        let season = (2.0 * PI * date.ordinal() as f64 / 365.0).sin();
        for hour in 0..24u32 {
            let i = day * 24 + hour as usize;
            let daytime = (6..18).contains(&hour);
            let diurnal = (PI * (hour as f64 - 6.0) / 12.0).sin().max(0.0);
            records.push(HourlyRecord {
                time: date.and_hms_opt(hour, 0, 0).unwrap(),
                temp: Some(10.0 + 8.0 * season + 4.0 * diurnal + jitter(i)),
                humidity: Some(70.0 - 10.0 * season - 15.0 * diurnal + 5.0 * jitter(i + 1)),
                dew_point: Some(5.0 + 4.0 * season + jitter(i + 2)),
                cloud_cover: Some((50.0 + 40.0 * jitter(i + 3)).clamp(0.0, 100.0)),
                wind_speed: Some(12.0 + 6.0 * jitter(i + 4)),
                precipitation: Some((jitter(i + 5) - 0.3).max(0.0)),
                shortwave_radiation: Some(if daytime {
                    300.0 * diurnal * (1.2 + season)
                } else {
                    0.0
                }),
                sunshine_s: Some(if daytime {
                    (3600.0 * (0.5 + 0.3 * season + 0.4 * jitter(i + 6))).clamp(0.0, 3600.0)
                } else {
                    0.0
                }),
            });
        }
    }
    records
}

/// Hourly frame covering `days` days from 2022-01-01.
pub fn synthetic_hourly(days: usize) -> HourlyFrame {
    let start = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap();
    HourlyFrame::from_records(&hourly_records(start, days)).unwrap()
}

/// Compact daily frame (`sunshine_hr, humidity_mean, temp_min, temp_mean, temp_max`)
/// covering `days` days from 2022-01-01.
pub fn synthetic_daily(days: usize) -> DailyFrame {
    synthetic_hourly(days)
        .daily(DailyAggregation::Compact)
        .unwrap()
}

/// Predicts the training mean. Stands in for the learned families in tests.
#[derive(Debug, Serialize, Deserialize)]
pub struct MeanForecaster {
    mean: Option<f32>,
    end: Option<TrainingEnd>,
    #[serde(skip)]
    fail: bool,
    #[serde(skip)]
    covariate_maxima: Arc<Mutex<Vec<f32>>>,
}

impl Forecaster for MeanForecaster {
    fn fit(
        &mut self,
        target: &TimeSeries,
        past_covariates: Option<&TimeSeries>,
    ) -> Result<(), ModelError> {
        if self.fail {
            return Err(ModelError::Backend("refusing to fit".to_string()));
        }
        if let (Some(covariates), Some(last)) = (past_covariates, target.last_date()) {
            let (train, _) = covariates.split_after(last);
            let max = (0..train.width())
                .filter_map(|idx| train.component(idx))
                .flatten()
                .fold(f32::MIN, |acc, v| acc.max(*v));
            if let Ok(mut seen) = self.covariate_maxima.lock() {
                seen.push(max);
            }
        }
        let values: Vec<f32> = target.values().iter().copied().filter(|v| !v.is_nan()).collect();
        self.mean = Some(values.iter().sum::<f32>() / values.len().max(1) as f32);
        self.end = Some(TrainingEnd::of(target)?);
        Ok(())
    }

    fn predict(&self, horizon: usize) -> Result<TimeSeries, ModelError> {
        let (Some(mean), Some(end)) = (self.mean, &self.end) else {
            return Err(ModelError::NotFitted(self.name().to_string()));
        };
        end.forecast(vec![mean; horizon])
    }

    fn save(&self, path: &Path) -> Result<(), ModelError> {
        write_artifact(path, self)
    }

    fn name(&self) -> &str {
        "Mean"
    }

    fn is_fitted(&self) -> bool {
        self.mean.is_some()
    }
}

/// Backend handing out [`MeanForecaster`]s for every learned family.
#[derive(Debug, Default)]
pub struct MeanBackend {
    fail: bool,
    covariate_maxima: Arc<Mutex<Vec<f32>>>,
}

impl MeanBackend {
    /// A backend whose models fail to fit.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Largest covariate value seen on the training slice, one entry per fit with covariates.
    pub fn covariate_maxima(&self) -> Arc<Mutex<Vec<f32>>> {
        Arc::clone(&self.covariate_maxima)
    }
}

impl ModelBackend for MeanBackend {
    fn create(&self, _: &ModelSpec) -> Result<BoxedForecaster, ModelError> {
        Ok(Box::new(MeanForecaster {
            mean: None,
            end: None,
            fail: self.fail,
            covariate_maxima: Arc::clone(&self.covariate_maxima),
        }))
    }
}
