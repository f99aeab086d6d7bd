//! series::errors — validation failures for observation series.
//!
//! Purpose
//! -------
//! Report why a raw sequence of (date, cumulative count) observations could
//! not be turned into a [`VaccinationSeries`](crate::series::VaccinationSeries).
//!
//! Conventions
//! -----------
//! - Indices are 0-based positions in the input sequence.
//! - Non-monotonic cumulative counts are *not* an error; correction days may
//!   legitimately lower the running total.
use chrono::NaiveDate;

pub type SeriesResult<T> = Result<T, SeriesError>;

/// SeriesError — structural problems with an observation sequence.
///
/// Variants
/// --------
/// - `Empty`
///   No observations were supplied.
/// - `UnorderedDates { index, previous, current }`
///   The date at `index` is earlier than the date before it.
/// - `DuplicateDate { index, date }`
///   The date at `index` repeats the previous observation's date.
#[derive(Debug, Clone, PartialEq)]
pub enum SeriesError {
    Empty,
    UnorderedDates { index: usize, previous: NaiveDate, current: NaiveDate },
    DuplicateDate { index: usize, date: NaiveDate },
}

impl std::error::Error for SeriesError {}

impl std::fmt::Display for SeriesError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeriesError::Empty => write!(f, "Observation series is empty."),
            SeriesError::UnorderedDates { index, previous, current } => write!(
                f,
                "Observation {index} is out of order: {current} follows {previous}. Dates must be ascending."
            ),
            SeriesError::DuplicateDate { index, date } => {
                write!(f, "Observation {index} repeats date {date}.")
            }
        }
    }
}
