use chrono::NaiveDate;
use thiserror::Error;

/// Input the engine refuses to compute over.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IndicatorError {
    /// Close price is NaN, infinite or negative.
    #[error("invalid close price {close} at index {index} ({date})")]
    InvalidClose {
        index: usize,
        date: NaiveDate,
        close: f64,
    },

    /// Dates are not strictly ascending.
    #[error("date {date} at index {index} does not follow {previous}")]
    UnorderedDates {
        index: usize,
        previous: NaiveDate,
        date: NaiveDate,
    },
}
