//! Leakage-free train/test split of target and covariate series.

use crate::preprocessing::error::PreprocessError;
use crate::preprocessing::scaler::MinMaxScaler;
use crate::types::frequency_frames::daily_frame::DailyFrame;
use crate::types::time_series::TimeSeries;
use chrono::NaiveDate;
use log::debug;

/// Which daily frame the series are built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutlierSetting {
    /// Raw aggregated data, outliers kept.
    Retained,
    /// Data after outlier adjustment.
    Adjusted,
}

impl OutlierSetting {
    /// `true` when outliers are kept in the data.
    pub fn outliers_retained(self) -> bool {
        matches!(self, OutlierSetting::Retained)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CovariateScaling {
    Scaled,
    Unscaled,
}

/// The two candidate daily frames and the target column shared by every split.
#[derive(Debug, Clone)]
pub struct SplitInput {
    pub with_outliers: DailyFrame,
    pub adjusted: DailyFrame,
    pub target: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SplitData {
    /// Target values with dates `<= cutoff`.
    pub target_train: TimeSeries,
    /// Target values with dates `> cutoff`.
    pub target_test: TimeSeries,
    /// Full-length covariates, min-max scaled unless [`CovariateScaling::Unscaled`] was requested.
    pub covariates: TimeSeries,
}

/// Splits target and covariates at `cutoff`.
///
/// The scaler is fitted on the covariate rows up to and including `cutoff` and then applied
/// to the whole covariate series, so nothing after the cutoff influences the scaling.
///
/// # Errors
///
/// Returns [`PreprocessError::EmptyTrainingSlice`] when no row lies on or before `cutoff`.
pub fn train_test_split(
    input: &SplitInput,
    cutoff: NaiveDate,
    outliers: OutlierSetting,
    scaling: CovariateScaling,
) -> Result<SplitData, PreprocessError> {
    let frame = match outliers {
        OutlierSetting::Retained => &input.with_outliers,
        OutlierSetting::Adjusted => &input.adjusted,
    };

    let target = frame.target_series(&input.target)?;
    let covariates = frame.covariate_series(&input.target)?;

    let (target_train, target_test) = target.split_after(cutoff);
    if target_train.is_empty() {
        return Err(PreprocessError::EmptyTrainingSlice { cutoff });
    }
    debug!(
        "Split at {}: {} training rows, {} test rows",
        cutoff,
        target_train.len(),
        target_test.len()
    );

    let covariates = match scaling {
        CovariateScaling::Unscaled => covariates,
        CovariateScaling::Scaled => {
            let (covariates_train, _) = covariates.split_after(cutoff);
            MinMaxScaler::fit(&covariates_train).transform(&covariates)?
        }
    };

    Ok(SplitData {
        target_train,
        target_test,
        covariates,
    })
}
