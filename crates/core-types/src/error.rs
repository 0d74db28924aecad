use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("Unknown column '{0}'")]
    UnknownField(String),

    #[error("Column '{0}' is not numeric")]
    NonNumericField(String),

    #[error("Aligned series mismatch: {0}")]
    Unaligned(String),
}
