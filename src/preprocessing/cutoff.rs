use crate::preprocessing::error::PreprocessError;
use chrono::{Days, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Picks a training cutoff uniformly from the inclusive range `start..=end`.
///
/// The same `seed` always yields the same date for the same range.
pub fn generate_cutoff_date(
    start: NaiveDate,
    end: NaiveDate,
    seed: u64,
) -> Result<NaiveDate, PreprocessError> {
    if start > end {
        return Err(PreprocessError::InvalidDateRange { start, end });
    }
    let span = (end - start).num_days() as u64;
    let mut rng = StdRng::seed_from_u64(seed);
    let offset = rng.random_range(0..=span);
    start
        .checked_add_days(Days::new(offset))
        .ok_or(PreprocessError::InvalidDateRange { start, end })
}
