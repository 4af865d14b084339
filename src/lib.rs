pub mod config;
pub mod error;
pub mod experiment;
pub mod hyperparameters;
pub mod json_file;
pub mod models;
pub mod preprocessing;
pub mod types;
mod utils;
pub mod weather_data;

#[cfg(test)]
mod test_support;

pub use config::PipelineConfig;
pub use error::ForecastError;
pub use json_file::{read_json_file, read_json_frame, write_json_file, JsonFileError};

pub use types::error::SeriesError;
pub use types::frequency_frames::daily_frame::*;
pub use types::frequency_frames::hourly_frame::*;
pub use types::model_family::{ModelFamily, NBeatsVariant};
pub use types::season::{get_season, Season, SeasonFormat, SeasonValue};
pub use types::time_series::TimeSeries;

pub use weather_data::data_loader::{download_data, ArchiveRequest, WeatherDataLoader};
pub use weather_data::error::WeatherDataError;
pub use weather_data::hourly_json::load_hourly_json;

pub use preprocessing::clean::{prepare_clean_frame, CleanFrames};
pub use preprocessing::cutoff::generate_cutoff_date;
pub use preprocessing::error::PreprocessError;
pub use preprocessing::outliers::{adjust_outliers, Granularity, OutlierReport};
pub use preprocessing::scaler::MinMaxScaler;
pub use preprocessing::split::{
    train_test_split, CovariateScaling, OutlierSetting, SplitData, SplitInput,
};

pub use hyperparameters::error::HyperparameterError;
pub use hyperparameters::io::{post_hyperparameter_results, read_hyperparameter_results, OpenMode};
pub use hyperparameters::record::{HyperparameterRecord, SearchResult, TunedParameters};
pub use hyperparameters::reformat::reformat_hyperparameters;

pub use models::error::ModelError;
pub use models::factory::{BuiltModel, ModelFactory, NativeBackend};
pub use models::metrics::{calculate_metrics, Scores};
pub use models::traits::{BoxedForecaster, Forecaster, ModelBackend, ModelConfig, ModelSpec};

pub use experiment::error::ExperimentError;
pub use experiment::results::{results_file_name, ExperimentResults, ResultRow};
pub use experiment::runner::{Experiment, ExperimentRunner};
