//! The closed set of forecasting model families used in the experiments.

use std::fmt;

/// N-BEATS architecture variant, tuned and trained independently per horizon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NBeatsVariant {
    Generic,
    Interpretable,
}

impl NBeatsVariant {
    pub const ALL: [NBeatsVariant; 2] = [NBeatsVariant::Generic, NBeatsVariant::Interpretable];

    pub fn key(self) -> &'static str {
        match self {
            NBeatsVariant::Generic => "generic",
            NBeatsVariant::Interpretable => "interpretable",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.key() == key)
    }
}

/// A forecasting model family.
///
/// The baselines (`NaiveSeasonal`, `ExponentialSmoothing`) take no tuned
/// hyperparameters and ignore covariates; every other family is tuned per
/// forecast horizon and trained with past covariates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ModelFamily {
    NaiveSeasonal,
    ExponentialSmoothing,
    Lstm,
    Gru,
    NBeats(NBeatsVariant),
    XGBoost,
    LightGbm,
}

impl ModelFamily {
    /// Families that appear in hyperparameter search results.
    pub const TUNED: [ModelFamily; 6] = [
        ModelFamily::Gru,
        ModelFamily::LightGbm,
        ModelFamily::Lstm,
        ModelFamily::NBeats(NBeatsVariant::Generic),
        ModelFamily::NBeats(NBeatsVariant::Interpretable),
        ModelFamily::XGBoost,
    ];

    /// Short key used in file names and hyperparameter keys.
    pub fn key(self) -> &'static str {
        match self {
            ModelFamily::NaiveSeasonal => "naive_seasonal",
            ModelFamily::ExponentialSmoothing => "exponential_smoothing",
            ModelFamily::Lstm => "lstm",
            ModelFamily::Gru => "gru",
            ModelFamily::NBeats(_) => "nbeats",
            ModelFamily::XGBoost => "xgboost",
            ModelFamily::LightGbm => "lgbm",
        }
    }

    pub fn variant(self) -> Option<NBeatsVariant> {
        match self {
            ModelFamily::NBeats(variant) => Some(variant),
            _ => None,
        }
    }

    /// Resolves a family key plus optional variant key, e.g. `("nbeats", Some("generic"))`.
    ///
    /// N-BEATS requires a variant and every other family forbids one.
    pub fn from_key(family: &str, variant: Option<&str>) -> Option<Self> {
        let resolved = match (family, variant) {
            ("naive_seasonal", None) => ModelFamily::NaiveSeasonal,
            ("exponential_smoothing", None) => ModelFamily::ExponentialSmoothing,
            ("lstm", None) => ModelFamily::Lstm,
            ("gru", None) => ModelFamily::Gru,
            ("nbeats", Some(v)) => ModelFamily::NBeats(NBeatsVariant::from_key(v)?),
            ("xgboost", None) => ModelFamily::XGBoost,
            ("lgbm", None) => ModelFamily::LightGbm,
            _ => return None,
        };
        Some(resolved)
    }

    pub fn proper_name(self) -> &'static str {
        match self {
            ModelFamily::NaiveSeasonal => "Naive Seasonal",
            ModelFamily::ExponentialSmoothing => "Exponential Smoothing",
            ModelFamily::Lstm => "LSTM",
            ModelFamily::Gru => "GRU",
            ModelFamily::NBeats(NBeatsVariant::Generic) => "N-BEATS (Generic)",
            ModelFamily::NBeats(NBeatsVariant::Interpretable) => "N-BEATS (Interpretable)",
            ModelFamily::XGBoost => "XGBoost",
            ModelFamily::LightGbm => "LightGBM",
        }
    }

    /// `lstm_fh7`, or `nbeats_generic_fh7` for the variant family.
    pub fn unique_name(self, horizon: usize) -> String {
        format!("{self}_fh{horizon}")
    }

    pub fn is_baseline(self) -> bool {
        matches!(
            self,
            ModelFamily::NaiveSeasonal | ModelFamily::ExponentialSmoothing
        )
    }

    pub fn uses_past_covariates(self) -> bool {
        !self.is_baseline()
    }

    /// N-BEATS is trained on unscaled covariates. The other covariate users get min-max
    /// scaled ones.
    pub fn scales_covariates(self) -> bool {
        self.uses_past_covariates() && !matches!(self, ModelFamily::NBeats(_))
    }
}

impl fmt::Display for ModelFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.variant() {
            Some(variant) => write!(f, "{}_{}", self.key(), variant.key()),
            None => f.write_str(self.key()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_names() {
        assert_eq!(ModelFamily::Lstm.unique_name(7), "lstm_fh7");
        assert_eq!(
            ModelFamily::NBeats(NBeatsVariant::Interpretable).unique_name(30),
            "nbeats_interpretable_fh30"
        );
        assert_eq!(ModelFamily::NaiveSeasonal.unique_name(1), "naive_seasonal_fh1");
    }

    #[test]
    fn test_from_key_round_trips_tuned_families() {
        for family in ModelFamily::TUNED {
            let variant = family.variant().map(NBeatsVariant::key);
            assert_eq!(ModelFamily::from_key(family.key(), variant), Some(family));
        }
    }

    #[test]
    fn test_from_key_rejects_bad_variants() {
        assert_eq!(ModelFamily::from_key("nbeats", None), None);
        assert_eq!(ModelFamily::from_key("nbeats", Some("deep")), None);
        assert_eq!(ModelFamily::from_key("lstm", Some("generic")), None);
        assert_eq!(ModelFamily::from_key("prophet", None), None);
    }

    #[test]
    fn test_covariate_handling() {
        assert!(!ModelFamily::NaiveSeasonal.uses_past_covariates());
        assert!(ModelFamily::XGBoost.scales_covariates());
        assert!(ModelFamily::NBeats(NBeatsVariant::Generic).uses_past_covariates());
        assert!(!ModelFamily::NBeats(NBeatsVariant::Generic).scales_covariates());
    }
}
