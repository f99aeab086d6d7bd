//! io::errors — failures of the data-source collaborators.
//!
//! Purpose
//! -------
//! Give the fetch, decode, and export layer one error type so the CLI can
//! report "no connection and no cache" differently from "the file is
//! malformed".
//!
//! Conventions
//! -----------
//! - `line` payloads are 1-based file line numbers (the header is line 1), to
//!   match what a user sees when opening the file.
//! - Third-party errors (`reqwest`, `csv`, `std::io`) are flattened into
//!   strings so the enum stays `Clone` and `PartialEq` like the other error
//!   types in the crate.
use crate::series::SeriesError;
use std::path::PathBuf;

pub type IoResult<T> = Result<T, IoError>;

/// IoError — data-source and export failures.
///
/// Variants
/// --------
/// - `Offline { cache_path }`
///   No network connection and no cached copy to fall back on.
/// - `Http(message)`
///   The download failed (transport error or non-success status).
/// - `Cache { path, message }`
///   Reading or writing a local file failed.
/// - `Csv(message)`
///   The CSV reader or writer failed.
/// - `MissingColumn(name)`
///   The header lacks a required column.
/// - `InvalidDate { line, value }`
///   A `date` cell is not an ISO-8601 calendar date.
/// - `InvalidCount { line, value }`
///   A `people_vaccinated` cell is not a non-negative whole number.
/// - `Series(err)`
///   The decoded rows violate series ordering invariants.
#[derive(Debug, Clone, PartialEq)]
pub enum IoError {
    // ---- Fetch ----
    Offline { cache_path: PathBuf },
    Http(String),
    Cache { path: PathBuf, message: String },

    // ---- Decode ----
    Csv(String),
    MissingColumn(&'static str),
    InvalidDate { line: usize, value: String },
    InvalidCount { line: usize, value: String },
    Series(SeriesError),
}

impl IoError {
    pub(crate) fn cache(path: impl Into<PathBuf>, err: impl std::fmt::Display) -> Self {
        IoError::Cache { path: path.into(), message: err.to_string() }
    }
}

impl std::error::Error for IoError {}

impl std::fmt::Display for IoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IoError::Offline { cache_path } => write!(
                f,
                "No internet connection and no cached data at {}.",
                cache_path.display()
            ),
            IoError::Http(msg) => write!(f, "Download failed: {msg}"),
            IoError::Cache { path, message } => {
                write!(f, "File error at {}: {message}", path.display())
            }
            IoError::Csv(msg) => write!(f, "CSV error: {msg}"),
            IoError::MissingColumn(name) => write!(f, "CSV header has no '{name}' column."),
            IoError::InvalidDate { line, value } => {
                write!(f, "Line {line}: '{value}' is not a YYYY-MM-DD date.")
            }
            IoError::InvalidCount { line, value } => {
                write!(f, "Line {line}: '{value}' is not a non-negative whole count.")
            }
            IoError::Series(err) => write!(f, "Invalid series: {err}"),
        }
    }
}

impl From<SeriesError> for IoError {
    fn from(err: SeriesError) -> Self {
        IoError::Series(err)
    }
}

impl From<csv::Error> for IoError {
    fn from(err: csv::Error) -> Self {
        IoError::Csv(err.to_string())
    }
}

impl From<reqwest::Error> for IoError {
    fn from(err: reqwest::Error) -> Self {
        IoError::Http(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Verify decode errors carry the file line number and offending text.
    //
    // Given
    // -----
    // - `InvalidCount { line: 12, value: "abc" }`.
    //
    // Expect
    // ------
    // - The message reads "Line 12" and contains "abc".
    fn invalid_count_includes_line_and_value_in_display() {
        // Arrange
        let err = IoError::InvalidCount { line: 12, value: "abc".to_string() };

        // Act
        let msg = err.to_string();

        // Assert
        assert!(msg.contains("Line 12") && msg.contains("abc"), "Got: {msg}");
    }

    #[test]
    // Purpose
    // -------
    // Verify series errors are wrapped, not flattened.
    //
    // Given
    // -----
    // - `SeriesError::Empty`.
    //
    // Expect
    // ------
    // - `IoError::Series(SeriesError::Empty)`.
    fn from_series_error_wraps_variant() {
        assert_eq!(IoError::from(SeriesError::Empty), IoError::Series(SeriesError::Empty));
    }
}
