//! pipeline::differencer — daily administered counts from cumulative totals.
//!
//! Purpose
//! -------
//! First-difference the cumulative series: `administered[i] =
//! cumulative[i] − cumulative[i−1]`. Index 0 has no prior-day baseline and
//! stays undefined.
//!
//! Invariants & assumptions
//! ------------------------
//! - Output length equals input length; exactly `N − 1` entries are defined.
//! - Negative differences are passed through unmodified. A correction in the
//!   source data can lower the cumulative total, and that shows up here as a
//!   negative daily count. It is not clamped.
use crate::{
    pipeline::errors::{PipelineError, PipelineResult},
    series::VaccinationSeries,
};
use ndarray::Array1;

/// Compute the administered-per-day series.
///
/// Parameters
/// ----------
/// - `series`: `&VaccinationSeries`
///   Validated cumulative observations of length N.
///
/// Returns
/// -------
/// `PipelineResult<Array1<Option<i64>>>`
///   - `Ok(administered)` with `administered[0] == None` and
///     `administered[i] == Some(cumulative[i] − cumulative[i−1])` for
///     `1 ≤ i < N`.
///
/// Errors
/// ------
/// - `PipelineError::InsufficientData { len }`
///   Returned when `N < 2`.
///
/// Notes
/// -----
/// - Counts are widened to `i64` before subtracting, so a regression in the
///   cumulative total yields a negative value instead of an underflow.
pub fn administered_per_day(series: &VaccinationSeries) -> PipelineResult<Array1<Option<i64>>> {
    let n = series.len();
    if n < 2 {
        return Err(PipelineError::InsufficientData { len: n });
    }

    let cumulative = series.cumulative();
    let administered = (0..n)
        .map(|i| match i {
            0 => None,
            _ => Some(cumulative[i] as i64 - cumulative[i - 1] as i64),
        })
        .collect();

    Ok(administered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::ObservationPoint;
    use chrono::NaiveDate;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - The defined/undefined layout of the output.
    // - Pass-through of negative differences.
    // - Rejection of single-observation input.
    // -------------------------------------------------------------------------

    fn series(counts: &[u64]) -> VaccinationSeries {
        let start = NaiveDate::from_ymd_opt(2021, 5, 1).unwrap();
        let points = counts
            .iter()
            .enumerate()
            .map(|(i, &c)| ObservationPoint {
                date: start + chrono::Duration::days(i as i64),
                cumulative_vaccinated: c,
            })
            .collect();
        VaccinationSeries::new(points).unwrap()
    }

    #[test]
    // Purpose
    // -------
    // Verify the first-difference values and that exactly N−1 are defined.
    //
    // Given
    // -----
    // - Cumulative counts [1000, 1200, 1500, 1550].
    //
    // Expect
    // ------
    // - `[None, 200, 300, 50]`.
    fn administered_per_day_differences_consecutive_counts() {
        // Arrange
        let s = series(&[1000, 1200, 1500, 1550]);

        // Act
        let administered = administered_per_day(&s).unwrap();

        // Assert
        assert_eq!(administered.to_vec(), vec![None, Some(200), Some(300), Some(50)]);
        assert_eq!(administered.iter().flatten().count(), s.len() - 1);
    }

    #[test]
    // Purpose
    // -------
    // Ensure a regression in the cumulative count yields a negative daily
    // value instead of being clamped.
    //
    // Given
    // -----
    // - Cumulative counts [500, 450, 700].
    //
    // Expect
    // ------
    // - `[None, -50, 250]`.
    fn administered_per_day_passes_negative_corrections_through() {
        // Arrange
        let s = series(&[500, 450, 700]);

        // Act
        let administered = administered_per_day(&s).unwrap();

        // Assert
        assert_eq!(administered.to_vec(), vec![None, Some(-50), Some(250)]);
    }

    #[test]
    // Purpose
    // -------
    // Ensure a single observation is rejected.
    //
    // Given
    // -----
    // - One cumulative count.
    //
    // Expect
    // ------
    // - `Err(PipelineError::InsufficientData { len: 1 })`.
    fn administered_per_day_single_observation_returns_insufficient_data() {
        // Arrange
        let s = series(&[42]);

        // Act
        let result = administered_per_day(&s);

        // Assert
        assert_eq!(result, Err(PipelineError::InsufficientData { len: 1 }));
    }
}
