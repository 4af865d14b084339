//! Locations and settings shared by a forecasting session.

use crate::error::ForecastError;
use crate::utils::{default_output_dir, ensure_dir_exists};
use bon::bon;
use std::path::{Path, PathBuf};

/// Horizons evaluated when none are configured, in days.
pub const DEFAULT_FORECAST_HORIZONS: [usize; 4] = [1, 7, 14, 30];

#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    output_dir: PathBuf,
    seed: u64,
    target_column: String,
    forecast_horizons: Vec<usize>,
}

#[bon]
impl PipelineConfig {
    /// Creates a session configuration.
    ///
    /// Without an explicit `output_dir` the platform's local data directory is used
    /// (`sunshine_forecast` below it). Directories are not created until
    /// [`PipelineConfig::ensure_dirs`] is called.
    ///
    /// # Errors
    ///
    /// Returns [`ForecastError::OutputDirResolution`] when no `output_dir` is given and the
    /// platform data directory cannot be determined.
    ///
    /// # Examples
    ///
    /// ```
    /// use sunshine_forecast::PipelineConfig;
    ///
    /// let config = PipelineConfig::builder()
    ///     .output_dir("/tmp/sunshine")
    ///     .forecast_horizons(vec![7])
    ///     .build()?;
    /// assert_eq!(config.seed(), 42);
    /// assert!(config.results_dir().ends_with("results"));
    /// # Ok::<(), sunshine_forecast::ForecastError>(())
    /// ```
    #[builder]
    pub fn new(
        #[builder(into)] output_dir: Option<PathBuf>,
        #[builder(default = 42)] seed: u64,
        #[builder(default = "sunshine_hr".to_string(), into)] target_column: String,
        #[builder(default = DEFAULT_FORECAST_HORIZONS.to_vec())] forecast_horizons: Vec<usize>,
    ) -> Result<Self, ForecastError> {
        let output_dir = match output_dir {
            Some(dir) => dir,
            None => default_output_dir()?,
        };
        Ok(Self {
            output_dir,
            seed,
            target_column,
            forecast_horizons,
        })
    }
}

impl PipelineConfig {
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn target_column(&self) -> &str {
        &self.target_column
    }

    pub fn forecast_horizons(&self) -> &[usize] {
        &self.forecast_horizons
    }

    /// Downloaded weather JSON.
    pub fn data_dir(&self) -> PathBuf {
        self.output_dir.join("data")
    }

    /// Model artifacts, before and after fitting.
    pub fn model_dir(&self) -> PathBuf {
        self.output_dir.join("models")
    }

    /// Experiment result tables.
    pub fn results_dir(&self) -> PathBuf {
        self.output_dir.join("results")
    }

    /// Hyperparameter search results.
    pub fn hyperparameter_file(&self) -> PathBuf {
        self.output_dir.join("hyperparameters.json")
    }

    pub fn ensure_dirs(&self) -> Result<(), ForecastError> {
        for dir in [self.data_dir(), self.model_dir(), self.results_dir()] {
            ensure_dir_exists(&dir)?;
        }
        Ok(())
    }
}
