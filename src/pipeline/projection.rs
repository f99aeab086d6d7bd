//! pipeline::projection — days remaining until coverage milestones.
//!
//! Purpose
//! -------
//! Project how long the campaign needs to reach a population-coverage
//! milestone by treating vaccinations as one-dimensional motion: the
//! current rate is the initial velocity, the aggregate acceleration is held
//! constant, and the distance is the number of people still to vaccinate.
//!
//! Key behaviors
//! -------------
//! - Solve `v_f² = v₀² + 2·a·d` and `t = (v_f − v₀) / a` in closed form
//!   ([`days_to_cover`]).
//! - Fall back to constant velocity (`t = d / v₀`) when `a == 0`.
//! - Report a milestone that the modeled motion never reaches as
//!   [`DaysRemaining::Unreachable`] instead of taking the square root of a
//!   negative number.
//! - Project each [`MilestoneTarget`] independently ([`project_milestones`]).
//!
//! Invariants & assumptions
//! ------------------------
//! - `d ≤ 0` (milestone already passed) yields `Days(0.0)` before any other
//!   check.
//! - A returned `Days(t)` always satisfies `t ≥ 0` and `t.is_finite()`.
//! - `v_f` is the non-negative root; a negative or non-finite solution means
//!   the target is not reached moving forward in time and maps to
//!   `Unreachable`.
//!
//! Conventions
//! -----------
//! - The acceleration fed in is whatever scalar the caller selected
//!   (per-point mean or delta of means); no unit conversion happens here.
//!
//! Testing notes
//! -------------
//! - Unit tests pin every branch: already reached, constant velocity, zero
//!   velocity and acceleration, negative discriminant, negative velocity,
//!   and the accelerating/decelerating closed form.
use crate::pipeline::errors::{PipelineError, PipelineResult};

/// A coverage milestone: reach `population_threshold` people vaccinated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MilestoneTarget {
    pub label: String,
    pub population_threshold: u64,
}

impl MilestoneTarget {
    /// Build a milestone, rejecting a zero threshold.
    ///
    /// Errors
    /// ------
    /// - `PipelineError::InvalidMilestone` when `population_threshold == 0`.
    pub fn new(label: impl Into<String>, population_threshold: u64) -> PipelineResult<Self> {
        let label = label.into();
        if population_threshold == 0 {
            return Err(PipelineError::InvalidMilestone { label });
        }
        Ok(MilestoneTarget { label, population_threshold })
    }

    /// Milestone at `fraction` of `reference_population`, rounded to the
    /// nearest person.
    ///
    /// Errors
    /// ------
    /// - `PipelineError::InvalidMilestone` when the fraction is not finite,
    ///   not positive, or rounds to a zero threshold.
    pub fn from_fraction(
        label: impl Into<String>, fraction: f64, reference_population: u64,
    ) -> PipelineResult<Self> {
        let label = label.into();
        if !fraction.is_finite() || fraction <= 0.0 {
            return Err(PipelineError::InvalidMilestone { label });
        }
        let threshold = (fraction * reference_population as f64).round() as u64;
        MilestoneTarget::new(label, threshold)
    }
}

/// Outcome of a projection that did not fail.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DaysRemaining {
    /// Finite, non-negative number of days.
    Days(f64),
    /// The modeled motion never reaches the milestone.
    Unreachable,
}

/// Projection for one milestone.
///
/// `outcome` holds `Err(PipelineError::DivisionByZero)` when this milestone
/// alone could not be projected; the other milestones are unaffected.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionResult {
    pub target: MilestoneTarget,
    pub outcome: PipelineResult<DaysRemaining>,
}

/// Solve the constant-acceleration motion model for the time to cover
/// `distance`.
///
/// Parameters
/// ----------
/// - `label`: `&str`
///   Milestone label, used only for the error payload.
/// - `initial_velocity`: `f64`
///   Current rate v₀ in doses per day.
/// - `acceleration`: `f64`
///   Constant acceleration a.
/// - `distance`: `f64`
///   People still to vaccinate, d.
///
/// Returns
/// -------
/// `PipelineResult<DaysRemaining>`
///   - `Ok(Days(0.0))` if `d ≤ 0`.
///   - `Ok(Days(d / v₀))` if `a == 0` and `v₀ > 0`.
///   - `Ok(Unreachable)` if `a == 0` and `v₀ < 0`, if `v₀² + 2·a·d < 0`, or
///     if the closed-form time is negative or non-finite.
///   - `Ok(Days((v_f − v₀) / a))` otherwise, with `v_f = √(v₀² + 2·a·d)`.
///
/// Errors
/// ------
/// - `PipelineError::DivisionByZero { label }` if `a == 0` and `v₀ == 0`.
///
/// Panics
/// ------
/// - Never panics.
pub fn days_to_cover(
    label: &str, initial_velocity: f64, acceleration: f64, distance: f64,
) -> PipelineResult<DaysRemaining> {
    if distance <= 0.0 {
        return Ok(DaysRemaining::Days(0.0));
    }

    if acceleration == 0.0 {
        if initial_velocity == 0.0 {
            return Err(PipelineError::DivisionByZero { label: label.to_string() });
        }
        return Ok(finite_days(distance / initial_velocity));
    }

    let discriminant = initial_velocity.powi(2) + 2.0 * acceleration * distance;
    if discriminant < 0.0 {
        return Ok(DaysRemaining::Unreachable);
    }

    let final_velocity = discriminant.sqrt();
    Ok(finite_days((final_velocity - initial_velocity) / acceleration))
}

/// Project every milestone from the current state of the campaign.
///
/// Parameters
/// ----------
/// - `targets`: `&[MilestoneTarget]`
///   Milestones in display order.
/// - `current_cumulative`: `u64`
///   Latest cumulative people vaccinated.
/// - `initial_velocity`: `f64`
///   Latest smoothed rate.
/// - `acceleration`: `f64`
///   Selected aggregate acceleration.
///
/// Returns
/// -------
/// `Vec<ProjectionResult>`
///   One entry per target, in input order. Failures are per entry.
pub fn project_milestones(
    targets: &[MilestoneTarget], current_cumulative: u64, initial_velocity: f64,
    acceleration: f64,
) -> Vec<ProjectionResult> {
    targets
        .iter()
        .map(|target| {
            let distance = target.population_threshold as f64 - current_cumulative as f64;
            ProjectionResult {
                target: target.clone(),
                outcome: days_to_cover(&target.label, initial_velocity, acceleration, distance),
            }
        })
        .collect()
}

#[inline]
fn finite_days(days: f64) -> DaysRemaining {
    if days.is_finite() && days >= 0.0 {
        DaysRemaining::Days(days)
    } else {
        DaysRemaining::Unreachable
    }
}
