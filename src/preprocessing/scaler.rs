use crate::preprocessing::error::PreprocessError;
use crate::types::time_series::TimeSeries;

/// Per-component min-max scaler mapping the fitted range onto `[0, 1]`.
///
/// `x_scaled = (x - min) / (max - min)`. A constant component uses a scale of 1 so it maps
/// to 0. `NaN` values are ignored when fitting and stay `NaN`.
#[derive(Debug, Clone, PartialEq)]
pub struct MinMaxScaler {
    mins: Vec<f32>,
    scales: Vec<f32>,
}

impl MinMaxScaler {
    pub fn fit(series: &TimeSeries) -> Self {
        let (mins, scales) = (0..series.width())
            .map(|idx| {
                let values = series.component(idx).unwrap_or(&[]);
                let finite = values.iter().copied().filter(|v| !v.is_nan());
                let (min, max) = finite.fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), v| {
                    (lo.min(v), hi.max(v))
                });
                if min > max {
                    // No observed values.
                    return (0.0, 1.0);
                }
                let range = max - min;
                (min, if range < 1e-10 { 1.0 } else { range })
            })
            .unzip();
        Self { mins, scales }
    }

    pub fn transform(&self, series: &TimeSeries) -> Result<TimeSeries, PreprocessError> {
        self.check_width(series)?;
        Ok(series.map_values(|idx, v| (v - self.mins[idx]) / self.scales[idx]))
    }

    pub fn inverse_transform(&self, series: &TimeSeries) -> Result<TimeSeries, PreprocessError> {
        self.check_width(series)?;
        Ok(series.map_values(|idx, v| v * self.scales[idx] + self.mins[idx]))
    }

    fn check_width(&self, series: &TimeSeries) -> Result<(), PreprocessError> {
        if series.width() != self.mins.len() {
            return Err(PreprocessError::ScalerWidthMismatch {
                expected: self.mins.len(),
                found: series.width(),
            });
        }
        Ok(())
    }
}
