//! pipeline::acceleration — percentage rate-of-change of the smoothed rate.
//!
//! Purpose
//! -------
//! Derive the "acceleration" of the vaccination campaign: how much the
//! smoothed rate changed from one day to the next, as a percentage, plus the
//! aggregate statistics the milestone projector consumes.
//!
//! Key behaviors
//! -------------
//! - [`acceleration_at`] applies the point formula
//!   `a[i] = (rate[i] − rate[i−1]) · 100 / rate[i]` and raises
//!   `UndefinedAcceleration` on a zero denominator.
//! - [`acceleration_series`] maps that formula over the whole rate series,
//!   absorbing undefined points as `None`.
//! - [`mean_acceleration`] averages the defined entries.
//! - [`delta_of_means`] compares the mean over all but the last point with
//!   the mean over all points, as a percentage change.
//! - [`AccelerationDefinition`] selects which aggregate the projector uses.
//!
//! Invariants & assumptions
//! ------------------------
//! - The denominator is the *current* rate, not the previous one. This is
//!   not the symmetric percentage-change formula and changes both sign
//!   behavior and magnitude; it is kept exactly as is.
//! - `acceleration[i]` is defined iff `rate[i−1]` and `rate[i]` are defined
//!   and `rate[i] ≠ 0`. Index 0 is never defined.
//! - No NaN or infinity is ever produced.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the point formula (including its asymmetry), zero
//!   denominators, the mean, the delta-of-means variant, and their empty
//!   cases.
use crate::pipeline::errors::{PipelineError, PipelineResult};
use ndarray::{s, Array1, ArrayView1};
use serde::Deserialize;
use statrs::statistics::Statistics;

/// Which aggregate acceleration feeds the milestone projector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccelerationDefinition {
    /// Mean of all defined per-point accelerations.
    #[default]
    PerPointMean,
    /// Percentage change between the mean excluding the last point and the
    /// mean including it.
    DeltaOfMeans,
}

/// Aggregate acceleration statistics for one run.
///
/// Fields
/// ------
/// - `mean_acceleration`: `f64`
///   Arithmetic mean of all defined per-point accelerations.
/// - `delta_of_means`: `PipelineResult<f64>`
///   Delta-of-means value, or the reason it is undefined for this series:
///   `EmptySeries` for too few points, `UndefinedAcceleration` for a zero
///   current mean.
#[derive(Debug, Clone, PartialEq)]
pub struct AccelerationSummary {
    pub mean_acceleration: f64,
    pub delta_of_means: PipelineResult<f64>,
}

impl AccelerationSummary {
    /// Summarize an acceleration series.
    ///
    /// Errors
    /// ------
    /// - `PipelineError::EmptySeries` when no entry is defined. The
    ///   delta-of-means part never fails the summary; its error is stored
    ///   in the field instead.
    pub fn from_series(acceleration: &Array1<Option<f64>>) -> PipelineResult<Self> {
        let mean_acceleration = mean_acceleration(acceleration.view())?;
        let delta_of_means = delta_of_means(acceleration);
        Ok(AccelerationSummary { mean_acceleration, delta_of_means })
    }

    /// Scalar selected by `definition`.
    ///
    /// Errors
    /// ------
    /// - The stored delta-of-means error when `DeltaOfMeans` is requested
    ///   but was undefined for this series.
    pub fn select(&self, definition: AccelerationDefinition) -> PipelineResult<f64> {
        match definition {
            AccelerationDefinition::PerPointMean => Ok(self.mean_acceleration),
            AccelerationDefinition::DeltaOfMeans => {
                self.delta_of_means.clone()
            }
        }
    }
}

/// Percentage change of the rate at `index`, relative to the current rate.
///
/// Parameters
/// ----------
/// - `index`: `usize`
///   Position of `current` in the series, used only for error reporting.
/// - `previous`: `f64`
///   Rate at `index − 1`.
/// - `current`: `f64`
///   Rate at `index`.
///
/// Returns
/// -------
/// `PipelineResult<f64>`
///   - `Ok((current − previous) · 100 / current)`.
///
/// Errors
/// ------
/// - `PipelineError::UndefinedAcceleration { index }` when `current == 0`.
#[inline]
pub fn acceleration_at(index: usize, previous: f64, current: f64) -> PipelineResult<f64> {
    if current == 0.0 {
        return Err(PipelineError::UndefinedAcceleration { index });
    }
    Ok((current - previous) * 100.0 / current)
}

/// Per-point acceleration series aligned with `rate`.
///
/// Undefined points (missing operands, zero denominator) become `None`;
/// the `UndefinedAcceleration` raised for a zero denominator is absorbed
/// here and does not reach the caller.
pub fn acceleration_series(rate: &Array1<Option<f64>>) -> Array1<Option<f64>> {
    (0..rate.len())
        .map(|i| {
            if i == 0 {
                return None;
            }
            let (previous, current) = (rate[i - 1]?, rate[i]?);
            acceleration_at(i, previous, current).ok()
        })
        .collect()
}

/// Arithmetic mean of the defined entries of an acceleration series.
///
/// Errors
/// ------
/// - `PipelineError::EmptySeries` when no entry is defined.
pub fn mean_acceleration(acceleration: ArrayView1<'_, Option<f64>>) -> PipelineResult<f64> {
    let defined: Vec<f64> = acceleration.iter().flatten().copied().collect();
    if defined.is_empty() {
        return Err(PipelineError::EmptySeries);
    }
    Ok(defined.mean())
}

/// Delta-of-means acceleration.
///
/// Parameters
/// ----------
/// - `acceleration`: `&Array1<Option<f64>>`
///   Per-point acceleration series of length N.
///
/// Returns
/// -------
/// `PipelineResult<f64>`
///   - `Ok((m_curr − m_prev) · 100 / m_curr)` where `m_prev` is the mean of
///     the defined entries in `[0, N−2]` and `m_curr` the mean over
///     `[0, N−1]`.
///
/// Errors
/// ------
/// - `PipelineError::EmptySeries`
///   Returned when the series is empty or `[0, N−2]` has no defined entry.
/// - `PipelineError::UndefinedAcceleration { index: N−1 }`
///   Returned when `m_curr == 0`.
///
/// Notes
/// -----
/// - The current mean is the denominator, matching [`acceleration_at`].
pub fn delta_of_means(acceleration: &Array1<Option<f64>>) -> PipelineResult<f64> {
    let n = acceleration.len();
    if n == 0 {
        return Err(PipelineError::EmptySeries);
    }
    let previous_mean = mean_acceleration(acceleration.slice(s![..n - 1]))?;
    let current_mean = mean_acceleration(acceleration.view())?;
    acceleration_at(n - 1, previous_mean, current_mean)
}
