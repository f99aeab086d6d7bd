//! series::validation — shared input guards for observation sequences.
//!
//! Purpose
//! -------
//! Centralize the structural checks every observation sequence must pass
//! before the numeric pipeline sees it: non-empty, strictly ascending
//! dates, no duplicates.
//!
//! Key behaviors
//! -------------
//! - [`validate_observations`] maps the first violation to a
//!   [`SeriesError`].
//! - [`count_calendar_gaps`] reports how many consecutive pairs skip at
//!   least one calendar day. Gaps are tolerated; the loader only logs them.
//!
//! Invariants & assumptions
//! ------------------------
//! - Cumulative counts are not checked for monotonicity. Correction days
//!   can lower the running total and the pipeline passes that through.
//!
//! Testing notes
//! -------------
//! - Unit tests cover every error branch and the gap counter.
use crate::series::{
    data::ObservationPoint,
    errors::{SeriesError, SeriesResult},
};
use chrono::NaiveDate;

/// Validate ordering constraints on a raw observation sequence.
///
/// Parameters
/// ----------
/// - `points`: `&[ObservationPoint]`
///   Observations in file order.
///
/// Returns
/// -------
/// `SeriesResult<()>`
///   - `Ok(())` when the sequence is non-empty and strictly ascending by
///     date.
///
/// Errors
/// ------
/// - `SeriesError::Empty`
///   Returned when `points` is empty.
/// - `SeriesError::DuplicateDate { index, date }`
///   Returned when two consecutive observations share a date.
/// - `SeriesError::UnorderedDates { index, previous, current }`
///   Returned when a date precedes the one before it.
///
/// Panics
/// ------
/// - Never panics.
pub fn validate_observations(points: &[ObservationPoint]) -> SeriesResult<()> {
    if points.is_empty() {
        return Err(SeriesError::Empty);
    }

    for (offset, pair) in points.windows(2).enumerate() {
        let index = offset + 1;
        let (previous, current) = (pair[0].date, pair[1].date);
        if current == previous {
            return Err(SeriesError::DuplicateDate { index, date: current });
        }
        if current < previous {
            return Err(SeriesError::UnorderedDates { index, previous, current });
        }
    }

    Ok(())
}

/// Count consecutive date pairs that are more than one day apart.
pub fn count_calendar_gaps(dates: &[NaiveDate]) -> usize {
    dates.windows(2).filter(|pair| (pair[1] - pair[0]).num_days() > 1).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - The success path on an ascending series with a non-monotonic count.
    // - Each error branch of `validate_observations`.
    // - Gap counting on a series that skips days.
    // -------------------------------------------------------------------------

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2021, 3, d).unwrap()
    }

    fn point(d: u32, count: u64) -> ObservationPoint {
        ObservationPoint { date: day(d), cumulative_vaccinated: count }
    }

    #[test]
    // Purpose
    // -------
    // Verify that ascending dates pass even when the cumulative count
    // regresses on a correction day.
    //
    // Given
    // -----
    // - Three ascending days with counts 100, 90, 120.
    //
    // Expect
    // ------
    // - `Ok(())`.
    fn validate_observations_accepts_non_monotonic_counts() {
        // Arrange
        let points = vec![point(1, 100), point(2, 90), point(3, 120)];

        // Act
        let result = validate_observations(&points);

        // Assert
        assert!(result.is_ok(), "Expected Ok(()), got {result:?}");
    }

    #[test]
    // Purpose
    // -------
    // Ensure an empty sequence is rejected.
    //
    // Given
    // -----
    // - No observations.
    //
    // Expect
    // ------
    // - `Err(SeriesError::Empty)`.
    fn validate_observations_empty_returns_empty() {
        // Act
        let result = validate_observations(&[]);

        // Assert
        assert_eq!(result, Err(SeriesError::Empty));
    }

    #[test]
    // Purpose
    // -------
    // Ensure a repeated date is rejected with its position.
    //
    // Given
    // -----
    // - Days 1, 2, 2.
    //
    // Expect
    // ------
    // - `Err(SeriesError::DuplicateDate { index: 2, .. })`.
    fn validate_observations_duplicate_date_returns_duplicate_date() {
        // Arrange
        let points = vec![point(1, 10), point(2, 20), point(2, 30)];

        // Act
        let result = validate_observations(&points);

        // Assert
        assert_eq!(result, Err(SeriesError::DuplicateDate { index: 2, date: day(2) }));
    }

    #[test]
    // Purpose
    // -------
    // Ensure a date that goes backwards is rejected.
    //
    // Given
    // -----
    // - Days 1, 5, 3.
    //
    // Expect
    // ------
    // - `Err(SeriesError::UnorderedDates { index: 2, previous: 5, current: 3 })`.
    fn validate_observations_descending_date_returns_unordered_dates() {
        // Arrange
        let points = vec![point(1, 10), point(5, 20), point(3, 30)];

        // Act
        let result = validate_observations(&points);

        // Assert
        match result {
            Err(SeriesError::UnorderedDates { index, previous, current }) => {
                assert_eq!(index, 2);
                assert_eq!(previous, day(5));
                assert_eq!(current, day(3));
            }
            other => panic!("expected UnorderedDates, got {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify that only pairs more than one day apart count as gaps.
    //
    // Given
    // -----
    // - Days 1, 2, 4, 5, 9.
    //
    // Expect
    // ------
    // - Two gaps (2→4 and 5→9).
    fn count_calendar_gaps_counts_skipped_days() {
        // Arrange
        let dates = vec![day(1), day(2), day(4), day(5), day(9)];

        // Act / Assert
        assert_eq!(count_calendar_gaps(&dates), 2);
    }
}
