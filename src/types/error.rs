use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SeriesError {
    #[error("Series component '{component}' has {found} values for {expected} dates")]
    LengthMismatch {
        component: String,
        expected: usize,
        found: usize,
    },

    #[error("Date index must be strictly increasing, found {previous} followed by {next}")]
    UnsortedIndex { previous: NaiveDate, next: NaiveDate },

    #[error("Cannot stack component '{component}': its date index differs from the first series")]
    IndexMismatch { component: String },

    #[error("Cannot stack an empty list of series")]
    NothingToStack,

    #[error("Date column contains a null value at row {0}")]
    NullDate(usize),
}
