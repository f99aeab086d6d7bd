//! pipeline::report — run the stages in order and assemble the result.
//!
//! Purpose
//! -------
//! Wire the differencer, rate smoother, acceleration engine, and milestone
//! projector into a single [`Pipeline`], and expose its outputs as plain
//! values: the aligned [`DerivedSeries`] and the scalar [`Report`].
//!
//! Key behaviors
//! -------------
//! - [`Pipeline::derive`] computes the three derived series.
//! - [`Pipeline::run`] additionally summarizes acceleration and projects
//!   every configured milestone.
//!
//! Invariants & assumptions
//! ------------------------
//! - Each stage reads its predecessor's output and returns a fresh array;
//!   nothing is mutated in place.
//! - Fatal errors: `InsufficientData`, `InvalidWindow`, `EmptySeries`, and
//!   `UndefinedAcceleration` for a selected but undefined delta of means.
//!   `DivisionByZero` stays attached to its milestone inside the report.
//!
//! Downstream usage
//! ----------------
//! - The CLI renders a [`Report`] with `crate::format` and, on request,
//!   writes the [`DerivedSeries`] with `crate::io::snapshot`.
use crate::{
    pipeline::{
        acceleration::{acceleration_series, AccelerationDefinition, AccelerationSummary},
        differencer::administered_per_day,
        errors::{PipelineError, PipelineResult},
        options::PipelineOptions,
        projection::{project_milestones, ProjectionResult},
        smoothing::smooth_rate,
    },
    series::VaccinationSeries,
};
use chrono::NaiveDate;
use ndarray::Array1;
use tracing::debug;

/// Derived series aligned index-for-index with the observations.
///
/// Fields
/// ------
/// - `administered`: daily first differences; `None` at index 0.
/// - `rate`: smoothed administration rate.
/// - `acceleration`: percentage change of `rate`.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedSeries {
    pub administered: Array1<Option<i64>>,
    pub rate: Array1<Option<f64>>,
    pub acceleration: Array1<Option<f64>>,
}

/// Scalar outcome of one run.
///
/// Fields
/// ------
/// - `last_date`, `total_vaccinated`: the most recent observation.
/// - `latest_administered`: doses on `last_date`.
/// - `latest_rate`, `latest_acceleration`: last entries of the derived
///   series, `None` when undefined there.
/// - `mean_acceleration`, `delta_of_means`: aggregate statistics.
/// - `acceleration_definition`, `selected_acceleration`: which aggregate was
///   fed to the projector, and its value.
/// - `projections`: one entry per configured milestone.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub last_date: NaiveDate,
    pub total_vaccinated: u64,
    pub latest_administered: i64,
    pub latest_rate: Option<f64>,
    pub latest_acceleration: Option<f64>,
    pub mean_acceleration: f64,
    pub delta_of_means: Option<f64>,
    pub acceleration_definition: AccelerationDefinition,
    pub selected_acceleration: f64,
    pub projections: Vec<ProjectionResult>,
}

/// Configured numeric pipeline.
#[derive(Debug, Clone)]
pub struct Pipeline {
    options: PipelineOptions,
}

impl Pipeline {
    /// Build a pipeline; the smoothing mode is re-validated here in case the
    /// options were assembled field by field.
    ///
    /// Errors
    /// ------
    /// - `PipelineError::InvalidWindow` for a zero moving window.
    pub fn new(options: PipelineOptions) -> PipelineResult<Self> {
        options.smoothing.validate()?;
        Ok(Pipeline { options })
    }

    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Compute administered, rate, and acceleration series.
    ///
    /// Errors
    /// ------
    /// - `PipelineError::InsufficientData` when the series has fewer than 2
    ///   observations.
    pub fn derive(&self, series: &VaccinationSeries) -> PipelineResult<DerivedSeries> {
        let administered = administered_per_day(series)?;
        let rate = smooth_rate(series, &administered, self.options.smoothing)?;
        let acceleration = acceleration_series(&rate);

        debug!(
            observations = series.len(),
            defined_rate = rate.iter().flatten().count(),
            defined_acceleration = acceleration.iter().flatten().count(),
            smoothing = ?self.options.smoothing,
            "derived series computed"
        );

        Ok(DerivedSeries { administered, rate, acceleration })
    }

    /// Run the full pipeline and return the report.
    ///
    /// Returns
    /// -------
    /// `PipelineResult<Report>`
    ///   - `Ok(report)` with projections for every milestone. A milestone
    ///     that cannot be projected carries its own error.
    ///
    /// Errors
    /// ------
    /// - `PipelineError::InsufficientData` for fewer than 2 observations.
    /// - `PipelineError::EmptySeries` when no acceleration is defined, or
    ///   when `DeltaOfMeans` is selected but too few accelerations exist.
    /// - `PipelineError::UndefinedAcceleration` when `DeltaOfMeans` is
    ///   selected and the current mean acceleration is zero.
    pub fn run(&self, series: &VaccinationSeries) -> PipelineResult<Report> {
        let derived = self.derive(series)?;
        self.report(series, &derived)
    }

    /// Build the report from already derived series.
    ///
    /// Errors
    /// ------
    /// - Same as [`Pipeline::run`], minus the derivation step.
    pub fn report(
        &self, series: &VaccinationSeries, derived: &DerivedSeries,
    ) -> PipelineResult<Report> {
        let n = series.len();
        let summary = AccelerationSummary::from_series(&derived.acceleration)?;
        let selected_acceleration = summary.select(self.options.acceleration)?;

        let last = series.last();
        let latest_administered = derived.administered[n - 1]
            .ok_or(PipelineError::InsufficientData { len: n })?;
        let latest_rate = derived.rate[n - 1];
        let latest_acceleration = derived.acceleration[n - 1];
        let initial_velocity = latest_rate.ok_or(PipelineError::InsufficientData { len: n })?;

        let projections = project_milestones(
            &self.options.milestones,
            last.cumulative_vaccinated,
            initial_velocity,
            selected_acceleration,
        );

        debug!(
            mean_acceleration = summary.mean_acceleration,
            delta_of_means = ?summary.delta_of_means,
            selected_acceleration,
            milestones = projections.len(),
            "pipeline run complete"
        );

        Ok(Report {
            last_date: last.date,
            total_vaccinated: last.cumulative_vaccinated,
            latest_administered,
            latest_rate,
            latest_acceleration,
            mean_acceleration: summary.mean_acceleration,
            delta_of_means: summary.delta_of_means.clone().ok(),
            acceleration_definition: self.options.acceleration,
            selected_acceleration,
            projections,
        })
    }
}
