//! Meteorological season lookup from a month-day code (Jan 1 = 101, Dec 31 = 1231).
//!
//! The boundaries are fixed and carry a 1-3 day margin compared to the
//! astronomical seasons of any particular year.

use crate::preprocessing::error::PreprocessError;
use chrono::{Datelike, NaiveDate};
use polars::prelude::*;
use std::fmt;
use std::ops::RangeInclusive;

const SPRING: RangeInclusive<u32> = 320..=619;
const SUMMER: RangeInclusive<u32> = 620..=921;
const FALL: RangeInclusive<u32> = 922..=1219;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
}

impl Season {
    pub const ALL: [Season; 4] = [Season::Spring, Season::Summer, Season::Fall, Season::Winter];

    /// Classifies a month-day code such as `401` (April 1st).
    ///
    /// # Errors
    ///
    /// Returns [`PreprocessError::InvalidMonthDay`] if the code is not a calendar day.
    pub fn from_month_day(month_day: u32) -> Result<Self, PreprocessError> {
        let (month, day) = (month_day / 100, month_day % 100);
        // 2000 is a leap year, so Feb 29 is accepted.
        if NaiveDate::from_ymd_opt(2000, month, day).is_none() {
            return Err(PreprocessError::InvalidMonthDay(month_day));
        }
        Ok(Self::classify(month_day))
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self::classify(month_day(date))
    }

    fn classify(month_day: u32) -> Self {
        if SPRING.contains(&month_day) {
            Season::Spring
        } else if SUMMER.contains(&month_day) {
            Season::Summer
        } else if FALL.contains(&month_day) {
            Season::Fall
        } else {
            // [1220, 1231] and [101, 319]
            Season::Winter
        }
    }

    /// Polars expression giving the 1-4 season index of a date column, using the same
    /// boundaries as [`Season::from_date`].
    pub fn index_expr(date: Expr) -> Expr {
        let month_day = date.clone().dt().month().cast(DataType::UInt32) * lit(100u32)
            + date.dt().day().cast(DataType::UInt32);
        let within = |range: &RangeInclusive<u32>| {
            month_day
                .clone()
                .gt_eq(lit(*range.start()))
                .and(month_day.clone().lt_eq(lit(*range.end())))
        };
        let index = |season: Season| lit(season.index() as u32).cast(DataType::UInt32);
        when(within(&SPRING))
            .then(index(Season::Spring))
            .when(within(&SUMMER))
            .then(index(Season::Summer))
            .when(within(&FALL))
            .then(index(Season::Fall))
            .otherwise(index(Season::Winter))
    }

    pub fn label(self) -> &'static str {
        match self {
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Fall => "Fall",
            Season::Winter => "Winter",
        }
    }

    /// 1-based index: Spring = 1 through Winter = 4.
    pub fn index(self) -> u8 {
        match self {
            Season::Spring => 1,
            Season::Summer => 2,
            Season::Fall => 3,
            Season::Winter => 4,
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How [`get_season`] reports the season.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeasonFormat {
    Label,
    Index,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeasonValue {
    Label(&'static str),
    Index(u8),
}

/// Returns the season of `month_day` as a label or a 1-4 index.
pub fn get_season(month_day: u32, format: SeasonFormat) -> Result<SeasonValue, PreprocessError> {
    let season = Season::from_month_day(month_day)?;
    Ok(match format {
        SeasonFormat::Label => SeasonValue::Label(season.label()),
        SeasonFormat::Index => SeasonValue::Index(season.index()),
    })
}

/// `month * 100 + day` for `date`.
pub fn month_day(date: NaiveDate) -> u32 {
    date.month() * 100 + date.day()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_for_reference_days() -> Result<(), PreprocessError> {
        let expected = [
            (101, "Winter"),
            (401, "Spring"),
            (701, "Summer"),
            (1001, "Fall"),
            (1231, "Winter"),
        ];
        for (code, label) in expected {
            assert_eq!(get_season(code, SeasonFormat::Label)?, SeasonValue::Label(label));
        }
        Ok(())
    }

    #[test]
    fn test_indices_for_reference_days() -> Result<(), PreprocessError> {
        let expected = [(101, 4), (401, 1), (701, 2), (1001, 3), (1231, 4)];
        for (code, index) in expected {
            assert_eq!(get_season(code, SeasonFormat::Index)?, SeasonValue::Index(index));
        }
        Ok(())
    }

    #[test]
    fn test_boundaries() -> Result<(), PreprocessError> {
        assert_eq!(Season::from_month_day(319)?, Season::Winter);
        assert_eq!(Season::from_month_day(320)?, Season::Spring);
        assert_eq!(Season::from_month_day(619)?, Season::Spring);
        assert_eq!(Season::from_month_day(620)?, Season::Summer);
        assert_eq!(Season::from_month_day(921)?, Season::Summer);
        assert_eq!(Season::from_month_day(922)?, Season::Fall);
        assert_eq!(Season::from_month_day(1219)?, Season::Fall);
        assert_eq!(Season::from_month_day(1220)?, Season::Winter);
        Ok(())
    }

    #[test]
    fn test_invalid_codes_are_rejected() {
        for code in [0, 100, 132, 230, 1300, 1232, 99_999] {
            assert!(
                matches!(
                    Season::from_month_day(code),
                    Err(PreprocessError::InvalidMonthDay(c)) if c == code
                ),
                "code {code} should be rejected"
            );
        }
    }

    #[test]
    fn test_from_date_matches_code() {
        let date = NaiveDate::from_ymd_opt(2021, 6, 20).unwrap();
        assert_eq!(month_day(date), 620);
        assert_eq!(Season::from_date(date), Season::Summer);
        assert_eq!(Season::from_date(date).to_string(), "Summer");
    }

    #[test]
    fn test_index_expr_matches_classifier() -> Result<(), Box<dyn std::error::Error>> {
        let daily = crate::test_support::synthetic_daily(366);
        let seasons = daily
            .frame
            .clone()
            .lazy()
            .select([Season::index_expr(col("date")).alias("season")])
            .collect()?;
        let seasons: Vec<Option<u32>> = seasons.column("season")?.u32()?.into_iter().collect();

        for (date, index) in daily.dates()?.into_iter().zip(seasons) {
            assert_eq!(index, Some(Season::from_date(date).index() as u32), "{date}");
        }
        Ok(())
    }
}
