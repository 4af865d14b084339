//! Holt-Winters exponential smoothing with additive trend and additive seasonality.

use crate::models::artifact::{read_artifact, write_artifact};
use crate::models::baseline::TrainingEnd;
use crate::models::error::ModelError;
use crate::models::traits::Forecaster;
use crate::types::time_series::TimeSeries;
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Candidate smoothing factors searched when fitting.
const ALPHA_GRID: [f64; 5] = [0.05, 0.2, 0.4, 0.6, 0.8];
const BETA_GRID: [f64; 3] = [0.001, 0.01, 0.1];
const GAMMA_GRID: [f64; 4] = [0.01, 0.1, 0.3, 0.5];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SmoothingFactors {
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct State {
    level: f64,
    trend: f64,
    seasonals: Vec<f64>,
    /// Number of observations the state has absorbed.
    n: usize,
}

impl State {
    fn initialize(values: &[f64], period: usize) -> Self {
        let first_season = &values[..period];
        let level = first_season.iter().sum::<f64>() / period as f64;
        let trend = if values.len() >= 2 * period {
            (0..period)
                .map(|i| (values[period + i] - values[i]) / period as f64)
                .sum::<f64>()
                / period as f64
        } else {
            0.0
        };
        let mut seasonals: Vec<f64> = first_season.iter().map(|y| y - level).collect();
        let mean = seasonals.iter().sum::<f64>() / period as f64;
        seasonals.iter_mut().for_each(|s| *s -= mean);
        Self {
            level,
            trend,
            seasonals,
            n: period,
        }
    }

    /// Runs the smoothing recursions over `values[period..]` and returns the sum of squared
    /// one-step errors. Missing observations are replaced by their forecast.
    fn run(&mut self, values: &[f64], factors: SmoothingFactors) -> f64 {
        let period = self.seasonals.len();
        let SmoothingFactors { alpha, beta, gamma } = factors;
        let mut sse = 0.0;
        for (t, &observed) in values.iter().enumerate().skip(period) {
            let idx = t % period;
            let s = self.seasonals[idx];
            let forecast = self.level + self.trend + s;
            let y = if observed.is_nan() { forecast } else { observed };
            sse += (y - forecast).powi(2);

            let level_prev = self.level;
            self.level = alpha * (y - s) + (1.0 - alpha) * (level_prev + self.trend);
            self.trend = beta * (self.level - level_prev) + (1.0 - beta) * self.trend;
            self.seasonals[idx] = gamma * (y - self.level) + (1.0 - gamma) * s;
        }
        self.n = values.len();
        sse
    }

    fn forecast(&self, horizon: usize) -> Vec<f64> {
        let period = self.seasonals.len();
        (1..=horizon)
            .map(|h| {
                self.level + h as f64 * self.trend + self.seasonals[(self.n + h - 1) % period]
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExponentialSmoothing {
    seasonal_periods: usize,
    factors: Option<SmoothingFactors>,
    state: Option<State>,
    end: Option<TrainingEnd>,
}

impl ExponentialSmoothing {
    pub fn new(seasonal_periods: usize) -> Self {
        Self {
            seasonal_periods,
            factors: None,
            state: None,
            end: None,
        }
    }

    pub fn seasonal_periods(&self) -> usize {
        self.seasonal_periods
    }

    /// Smoothing factors chosen during fitting.
    pub fn factors(&self) -> Option<SmoothingFactors> {
        self.factors
    }

    pub fn load(path: &Path) -> Result<Self, ModelError> {
        read_artifact(path)
    }

    fn search_factors(values: &[f64], period: usize) -> SmoothingFactors {
        let initial = State::initialize(values, period);
        let mut best = (f64::INFINITY, SmoothingFactors { alpha: 0.2, beta: 0.01, gamma: 0.1 });
        for alpha in ALPHA_GRID {
            for beta in BETA_GRID {
                for gamma in GAMMA_GRID {
                    let factors = SmoothingFactors { alpha, beta, gamma };
                    let sse = initial.clone().run(values, factors);
                    if sse < best.0 {
                        best = (sse, factors);
                    }
                }
            }
        }
        debug!("Selected smoothing factors {:?} with SSE {:.4}", best.1, best.0);
        best.1
    }
}

impl Forecaster for ExponentialSmoothing {
    fn fit(&mut self, target: &TimeSeries, _: Option<&TimeSeries>) -> Result<(), ModelError> {
        let period = self.seasonal_periods;
        let values: Vec<f64> = target.values().iter().map(|v| *v as f64).collect();
        let needed = 2 * period.max(1);
        if values.len() < needed {
            return Err(ModelError::InsufficientData {
                needed,
                got: values.len(),
            });
        }
        if values[..period].iter().any(|v| v.is_nan()) {
            return Err(ModelError::Backend(
                "first season contains missing values".to_string(),
            ));
        }

        let factors = Self::search_factors(&values, period);
        let mut state = State::initialize(&values, period);
        state.run(&values, factors);

        self.factors = Some(factors);
        self.state = Some(state);
        self.end = Some(TrainingEnd::of(target)?);
        Ok(())
    }

    fn predict(&self, horizon: usize) -> Result<TimeSeries, ModelError> {
        let (Some(state), Some(end)) = (&self.state, &self.end) else {
            return Err(ModelError::NotFitted(self.name().to_string()));
        };
        let values = state.forecast(horizon).into_iter().map(|v| v as f32).collect();
        end.forecast(values)
    }

    fn save(&self, path: &Path) -> Result<(), ModelError> {
        write_artifact(path, self)
    }

    fn name(&self) -> &str {
        "ExponentialSmoothing"
    }

    fn is_fitted(&self) -> bool {
        self.state.is_some()
    }
}
