//! A small daily-indexed time series container for targets and stacked covariates.

use crate::types::error::SeriesError;
use chrono::{Days, NaiveDate};

/// Daily time series with one or more `f32` components sharing a date index.
///
/// Values are stored per component, each aligned with `dates`. A univariate
/// series (the forecast target) has exactly one component; covariates are
/// several univariate series stacked along the component axis.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    dates: Vec<NaiveDate>,
    components: Vec<String>,
    values: Vec<Vec<f32>>,
}

impl TimeSeries {
    /// Creates a single-component series.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::LengthMismatch`] if `values` and `dates` differ in length, or
    /// [`SeriesError::UnsortedIndex`] if `dates` is not strictly increasing.
    pub fn univariate(
        name: impl Into<String>,
        dates: Vec<NaiveDate>,
        values: Vec<f32>,
    ) -> Result<Self, SeriesError> {
        let name = name.into();
        if dates.len() != values.len() {
            return Err(SeriesError::LengthMismatch {
                component: name,
                expected: dates.len(),
                found: values.len(),
            });
        }
        if let Some(pair) = dates.windows(2).find(|pair| pair[0] >= pair[1]) {
            return Err(SeriesError::UnsortedIndex {
                previous: pair[0],
                next: pair[1],
            });
        }
        Ok(Self {
            dates,
            components: vec![name],
            values: vec![values],
        })
    }

    /// Stacks series horizontally into one multi-component series.
    ///
    /// Every input must have exactly the same date index as the first one.
    pub fn stack(series: &[TimeSeries]) -> Result<Self, SeriesError> {
        let first = series.first().ok_or(SeriesError::NothingToStack)?;
        let mut stacked = Self {
            dates: first.dates.clone(),
            components: Vec::new(),
            values: Vec::new(),
        };
        for part in series {
            if part.dates != stacked.dates {
                return Err(SeriesError::IndexMismatch {
                    component: part.components.join(","),
                });
            }
            stacked.components.extend(part.components.iter().cloned());
            stacked.values.extend(part.values.iter().cloned());
        }
        Ok(stacked)
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn components(&self) -> &[String] {
        &self.components
    }

    /// Values of the component at `index`.
    pub fn component(&self, index: usize) -> Option<&[f32]> {
        self.values.get(index).map(Vec::as_slice)
    }

    /// Values of the first component; the whole series for a univariate target.
    pub fn values(&self) -> &[f32] {
        self.values.first().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Number of components.
    pub fn width(&self) -> usize {
        self.components.len()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.dates.first().copied()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }

    /// Splits into `(dates <= cutoff, dates > cutoff)`.
    pub fn split_after(&self, cutoff: NaiveDate) -> (Self, Self) {
        let split_at = self.dates.partition_point(|date| *date <= cutoff);
        (self.slice(0, split_at), self.slice(split_at, self.len()))
    }

    /// The first `n` time steps (or the whole series if shorter).
    pub fn head(&self, n: usize) -> Self {
        self.slice(0, n.min(self.len()))
    }

    /// Applies `f(component_index, value)` to every value, keeping the index.
    pub fn map_values(&self, f: impl Fn(usize, f32) -> f32) -> Self {
        let values = self
            .values
            .iter()
            .enumerate()
            .map(|(idx, component)| component.iter().map(|v| f(idx, *v)).collect())
            .collect();
        Self {
            dates: self.dates.clone(),
            components: self.components.clone(),
            values,
        }
    }

    /// The `n` consecutive dates following the last date of the series.
    pub fn continuation_dates(&self, n: usize) -> Vec<NaiveDate> {
        let Some(last) = self.last_date() else {
            return Vec::new();
        };
        (1..=n as u64)
            .filter_map(|offset| last.checked_add_days(Days::new(offset)))
            .collect()
    }

    fn slice(&self, start: usize, end: usize) -> Self {
        Self {
            dates: self.dates[start..end].to_vec(),
            components: self.components.clone(),
            values: self.values.iter().map(|v| v[start..end].to_vec()).collect(),
        }
    }
}
