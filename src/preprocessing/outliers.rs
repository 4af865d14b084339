//! IQR-based outlier clamping per calendar month or per season.

use crate::preprocessing::error::PreprocessError;
use crate::types::frequency_frames::daily_frame::{DailyFrame, COL_DATE};
use crate::types::season::Season;
use log::info;
use polars::prelude::*;

const IQR_MULTIPLIER: f64 = 1.5;
const GROUP_COLUMN: &str = "__outlier_group";

/// Grouping used to compute outlier bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    /// Calendar month, 1-12.
    Month,
    /// Meteorological season as given by [`Season::from_date`].
    Season,
}

impl Granularity {
    fn group_expr(self) -> Expr {
        match self {
            Granularity::Month => col(COL_DATE).dt().month().cast(DataType::UInt32),
            Granularity::Season => Season::index_expr(col(COL_DATE)),
        }
    }
}

/// Inclusive clamp range `[Q1 - 1.5 IQR, Q3 + 1.5 IQR]` of a column, evaluated per group.
///
/// Quartiles use linear interpolation and ignore missing values.
#[derive(Debug, Clone)]
pub struct OutlierBounds {
    pub lower: Expr,
    pub upper: Expr,
}

impl OutlierBounds {
    fn over_groups(value: &Expr) -> Self {
        let quartile = |q: f64| {
            value
                .clone()
                .quantile(lit(q), QuantileMethod::Linear)
                .over([col(GROUP_COLUMN)])
        };
        let (q1, q3) = (quartile(0.25), quartile(0.75));
        let iqr = q3.clone() - q1.clone();
        Self {
            lower: q1 - lit(IQR_MULTIPLIER) * iqr.clone(),
            upper: q3 + lit(IQR_MULTIPLIER) * iqr,
        }
    }

    /// `true` where `value` lies outside the bounds; null where either side is null.
    pub fn is_outside(&self, value: &Expr) -> Expr {
        value
            .clone()
            .lt(self.lower.clone())
            .or(value.clone().gt(self.upper.clone()))
    }

    /// `value` with out-of-range entries replaced by the nearest bound.
    pub fn clamp(&self, value: Expr) -> Expr {
        when(value.clone().lt(self.lower.clone()))
            .then(self.lower.clone())
            .when(value.clone().gt(self.upper.clone()))
            .then(self.upper.clone())
            .otherwise(value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnAdjustment {
    pub column: String,
    /// Number of values replaced by a bound.
    pub adjusted: usize,
    /// Total rows in the frame.
    pub rows: usize,
}

impl ColumnAdjustment {
    /// Adjusted values as a percentage of all rows.
    pub fn percentage(&self) -> f64 {
        if self.rows == 0 {
            0.0
        } else {
            self.adjusted as f64 / self.rows as f64 * 100.0
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutlierReport {
    pub columns: Vec<ColumnAdjustment>,
}

impl OutlierReport {
    pub fn total_adjusted(&self) -> usize {
        self.columns.iter().map(|c| c.adjusted).sum()
    }

    pub fn for_column(&self, column: &str) -> Option<&ColumnAdjustment> {
        self.columns.iter().find(|c| c.column == column)
    }
}

#[derive(Debug, Clone)]
pub struct OutlierAdjustment {
    pub frame: DailyFrame,
    pub report: OutlierReport,
}

fn adjusted_flag(column: &str) -> String {
    format!("__{column}_adjusted")
}

/// Clamps values of `columns` that fall outside the 1.5 IQR fences of their group.
///
/// Groups are derived from the `date` column according to `granularity`. Bounds for a
/// column are computed from its values before any clamping; missing values are ignored
/// in the quantiles and left as they are. Adjusted columns are returned as `f64`. The
/// input frame is not modified.
///
/// # Errors
///
/// Returns [`PreprocessError::ColumnNotFound`] for an unknown column.
pub fn adjust_outliers(
    daily: &DailyFrame,
    columns: &[&str],
    granularity: Granularity,
) -> Result<OutlierAdjustment, PreprocessError> {
    let mut exprs = Vec::with_capacity(columns.len() * 2);
    for &column in columns {
        daily
            .frame
            .column(column)
            .map_err(|e| PreprocessError::ColumnNotFound(column.to_string(), e))?
            .cast(&DataType::Float64)
            .map_err(|source| PreprocessError::NonNumericColumn {
                column: column.to_string(),
                source,
            })?;

        let value = col(column).cast(DataType::Float64);
        let bounds = OutlierBounds::over_groups(&value);
        exprs.push(bounds.is_outside(&value).alias(adjusted_flag(column)));
        exprs.push(bounds.clamp(value).alias(column));
    }

    let clamped = daily
        .frame
        .clone()
        .lazy()
        .with_column(granularity.group_expr().alias(GROUP_COLUMN))
        .with_columns(exprs)
        .collect()?;

    let rows = daily.height();
    let mut report = OutlierReport::default();
    for &column in columns {
        let adjusted = clamped
            .column(&adjusted_flag(column))?
            .bool()?
            .sum()
            .unwrap_or(0) as usize;
        let adjustment = ColumnAdjustment {
            column: column.to_string(),
            adjusted,
            rows,
        };
        info!(
            "Total outliers adjusted in the {} column: {}",
            column, adjustment.adjusted
        );
        info!("Percent of total rows: {:.2}%", adjustment.percentage());
        report.columns.push(adjustment);
    }

    let frame = clamped.select(daily.frame.get_column_names_owned())?;
    Ok(OutlierAdjustment {
        frame: DailyFrame::new(frame),
        report,
    })
}
