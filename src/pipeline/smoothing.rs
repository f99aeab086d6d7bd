//! pipeline::smoothing — administration rate from daily counts.
//!
//! Purpose
//! -------
//! Turn the noisy administered-per-day series into a smoothed "doses per
//! day" rate. Two smoothing rules are supported and selected through
//! [`SmoothingMode`] rather than hardcoded as separate code paths.
//!
//! Key behaviors
//! -------------
//! - `MovingWindow { window_size: k }`: `rate[i]` is the arithmetic mean of
//!   the `k` most recent administered values ending at `i`.
//! - `CumulativeAverage`: `rate[i]` is the cumulative count at `i` divided
//!   by the calendar days elapsed since the first observation. Doses given
//!   before the first observation are included in the numerator.
//!
//! Invariants & assumptions
//! ------------------------
//! - Moving window: `rate[i]` is defined iff `k` defined administered values
//!   end at `i`, i.e. iff `i ≥ k` in observation indices.
//! - Cumulative average: `rate[i]` is defined iff `i ≥ 1`. Dates are
//!   strictly ascending, so the elapsed-day denominator is positive there.
//! - Output is aligned index-for-index with the input series.
//!
//! Conventions
//! -----------
//! - `SmoothingMode` deserializes from the tagged form used in the config
//!   file: `{ mode = "moving_window", window_size = 2 }` or
//!   `{ mode = "cumulative_average" }`.
use crate::{
    pipeline::errors::{PipelineError, PipelineResult},
    series::VaccinationSeries,
};
use ndarray::{s, Array1};
use serde::Deserialize;
use statrs::statistics::Statistics;

/// Default moving-window length: today and yesterday.
pub const DEFAULT_WINDOW_SIZE: usize = 2;

/// How the administered series is smoothed into a rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SmoothingMode {
    /// Trailing mean over the last `window_size` administered values.
    MovingWindow { window_size: usize },
    /// Cumulative count over elapsed calendar days.
    CumulativeAverage,
}

impl Default for SmoothingMode {
    fn default() -> Self {
        SmoothingMode::MovingWindow { window_size: DEFAULT_WINDOW_SIZE }
    }
}

impl SmoothingMode {
    /// Build a validated moving-window mode.
    ///
    /// Errors
    /// ------
    /// - `PipelineError::InvalidWindow` when `window_size == 0`.
    pub fn moving_window(window_size: usize) -> PipelineResult<Self> {
        let mode = SmoothingMode::MovingWindow { window_size };
        mode.validate()?;
        Ok(mode)
    }

    /// Check mode parameters; only the window size can be invalid.
    pub fn validate(&self) -> PipelineResult<()> {
        match self {
            SmoothingMode::MovingWindow { window_size: 0 } => {
                Err(PipelineError::InvalidWindow { window_size: 0 })
            }
            _ => Ok(()),
        }
    }
}

/// Compute the smoothed administration rate.
///
/// Parameters
/// ----------
/// - `series`: `&VaccinationSeries`
///   Source observations; the cumulative average reads counts and dates
///   from here directly.
/// - `administered`: `&Array1<Option<i64>>`
///   Output of
///   [`administered_per_day`](crate::pipeline::differencer::administered_per_day),
///   aligned with `series`. Only the moving window reads it.
/// - `mode`: `SmoothingMode`
///   Smoothing rule.
///
/// Returns
/// -------
/// `PipelineResult<Array1<Option<f64>>>`
///   - `Ok(rate)` aligned with `series`; undefined entries are `None`.
///
/// Errors
/// ------
/// - `PipelineError::InvalidWindow` for a zero moving window.
///
/// Panics
/// ------
/// - Panics if `administered.len() != series.len()`; both come from the same
///   series in the orchestrator.
pub fn smooth_rate(
    series: &VaccinationSeries, administered: &Array1<Option<i64>>, mode: SmoothingMode,
) -> PipelineResult<Array1<Option<f64>>> {
    mode.validate()?;
    assert_eq!(series.len(), administered.len(), "administered series misaligned with input");

    let rate = match mode {
        SmoothingMode::MovingWindow { window_size } => moving_window_rate(administered, window_size),
        SmoothingMode::CumulativeAverage => cumulative_average_rate(series),
    };
    Ok(rate)
}

//
// ---------- Private helpers ----------
//

/// Trailing mean over `k` values; `None` until `k` defined values exist.
fn moving_window_rate(administered: &Array1<Option<i64>>, k: usize) -> Array1<Option<f64>> {
    (0..administered.len())
        .map(|i| {
            if i + 1 < k {
                return None;
            }
            let window: Option<Vec<f64>> = administered
                .slice(s![i + 1 - k..=i])
                .iter()
                .map(|value| value.map(|v| v as f64))
                .collect();
            window.map(|values| values.mean())
        })
        .collect()
}

/// Cumulative people vaccinated divided by elapsed calendar days.
fn cumulative_average_rate(series: &VaccinationSeries) -> Array1<Option<f64>> {
    series
        .cumulative()
        .iter()
        .enumerate()
        .map(|(i, &total)| {
            let elapsed = series.elapsed_days(i);
            (elapsed > 0).then(|| total as f64 / elapsed as f64)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{pipeline::differencer::administered_per_day, series::ObservationPoint};
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Moving-window definedness boundary and values for k = 1, 2, 3.
    // - Cumulative-average values, including across a calendar gap.
    // - Window validation.
    //
    // They intentionally DO NOT cover:
    // - Acceleration on top of the rate; see `pipeline::acceleration`.
    // -------------------------------------------------------------------------

    fn series_on(days: &[(u32, u64)]) -> VaccinationSeries {
        let points = days
            .iter()
            .map(|&(d, c)| ObservationPoint {
                date: NaiveDate::from_ymd_opt(2021, 6, d).unwrap(),
                cumulative_vaccinated: c,
            })
            .collect();
        VaccinationSeries::new(points).unwrap()
    }

    #[test]
    // Purpose
    // -------
    // Verify the default window of 2 averages today and yesterday.
    //
    // Given
    // -----
    // - Cumulative [1000, 1200, 1500, 1550] ⇒ administered [_, 200, 300, 50].
    //
    // Expect
    // ------
    // - rate = [_, _, 250, 175].
    fn smooth_rate_default_window_averages_last_two_days() {
        // Arrange
        let s = series_on(&[(1, 1000), (2, 1200), (3, 1500), (4, 1550)]);
        let administered = administered_per_day(&s).unwrap();

        // Act
        let rate = smooth_rate(&s, &administered, SmoothingMode::default()).unwrap();

        // Assert
        assert_eq!(rate[0], None);
        assert_eq!(rate[1], None);
        assert_relative_eq!(rate[2].unwrap(), 250.0);
        assert_relative_eq!(rate[3].unwrap(), 175.0);
    }

    #[test]
    // Purpose
    // -------
    // Verify the definedness boundary `i ≥ k` across several window sizes.
    //
    // Given
    // -----
    // - Six observations; k in {1, 2, 3}.
    //
    // Expect
    // ------
    // - Exactly indices k..N are defined.
    fn smooth_rate_moving_window_defined_iff_index_at_least_window() {
        // Arrange
        let s = series_on(&[(1, 0), (2, 10), (3, 30), (4, 60), (5, 100), (6, 150)]);
        let administered = administered_per_day(&s).unwrap();

        for k in 1..=3 {
            // Act
            let rate = smooth_rate(&s, &administered, SmoothingMode::moving_window(k).unwrap())
                .unwrap();

            // Assert
            for (i, value) in rate.iter().enumerate() {
                assert_eq!(value.is_some(), i >= k, "k={k}, i={i}, value={value:?}");
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify that a window of 1 reproduces the administered series.
    //
    // Given
    // -----
    // - Administered [_, 100, 150, 150].
    //
    // Expect
    // ------
    // - rate == administered as f64.
    fn smooth_rate_window_one_equals_administered() {
        // Arrange
        let s = series_on(&[(1, 0), (2, 100), (3, 250), (4, 400)]);
        let administered = administered_per_day(&s).unwrap();

        // Act
        let rate = smooth_rate(&s, &administered, SmoothingMode::moving_window(1).unwrap())
            .unwrap();

        // Assert
        assert_eq!(rate.to_vec(), vec![None, Some(100.0), Some(150.0), Some(150.0)]);
    }

    #[test]
    // Purpose
    // -------
    // Verify the cumulative average divides by calendar days, not rows.
    //
    // Given
    // -----
    // - Observations on June 1, 2, 5 with counts 0, 100, 700.
    //
    // Expect
    // ------
    // - rate = [_, 100/1, 700/4].
    fn smooth_rate_cumulative_average_uses_elapsed_days() {
        // Arrange
        let s = series_on(&[(1, 0), (2, 100), (5, 700)]);
        let administered = administered_per_day(&s).unwrap();

        // Act
        let rate = smooth_rate(&s, &administered, SmoothingMode::CumulativeAverage).unwrap();

        // Assert
        assert_eq!(rate[0], None);
        assert_relative_eq!(rate[1].unwrap(), 100.0);
        assert_relative_eq!(rate[2].unwrap(), 175.0);
    }

    #[test]
    // Purpose
    // -------
    // Verify the cumulative average divides the cumulative count itself, so
    // doses given before the first observation count toward the rate.
    //
    // Given
    // -----
    // - Observations on June 1, 2, 3 with counts 1000, 1200, 1500.
    //
    // Expect
    // ------
    // - rate = [_, 1200/1, 1500/2], not the [_, 200, 250] that summing the
    //   administered differences would give.
    fn smooth_rate_cumulative_average_counts_doses_before_first_observation() {
        // Arrange
        let s = series_on(&[(1, 1000), (2, 1200), (3, 1500)]);
        let administered = administered_per_day(&s).unwrap();

        // Act
        let rate = smooth_rate(&s, &administered, SmoothingMode::CumulativeAverage).unwrap();

        // Assert
        assert_eq!(rate[0], None);
        assert_relative_eq!(rate[1].unwrap(), 1200.0);
        assert_relative_eq!(rate[2].unwrap(), 750.0);
    }

    #[test]
    // Purpose
    // -------
    // Ensure a zero window is rejected both at construction and at use.
    //
    // Given
    // -----
    // - `window_size = 0`.
    //
    // Expect
    // ------
    // - `InvalidWindow { window_size: 0 }` from both entry points.
    fn zero_window_returns_invalid_window() {
        // Arrange
        let s = series_on(&[(1, 0), (2, 10)]);
        let administered = administered_per_day(&s).unwrap();
        let raw = SmoothingMode::MovingWindow { window_size: 0 };

        // Act / Assert
        assert_eq!(
            SmoothingMode::moving_window(0),
            Err(PipelineError::InvalidWindow { window_size: 0 })
        );
        assert_eq!(
            smooth_rate(&s, &administered, raw),
            Err(PipelineError::InvalidWindow { window_size: 0 })
        );
    }
}
