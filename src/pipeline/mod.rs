//! pipeline — numeric core: differencing, smoothing, acceleration, projection.
//!
//! Purpose
//! -------
//! Turn a validated cumulative vaccination series into daily administered
//! counts, a smoothed rate, a percentage "acceleration" of that rate, and
//! closed-form projections of the days remaining until coverage milestones.
//!
//! Key behaviors
//! -------------
//! - [`differencer`]: first differences of the cumulative counts.
//! - [`smoothing`]: moving-window or cumulative-average rate, selected by
//!   [`SmoothingMode`].
//! - [`acceleration`]: per-point percentage change of the rate, its mean,
//!   and the delta-of-means variant, selected by [`AccelerationDefinition`].
//! - [`projection`]: constant-acceleration motion model per
//!   [`MilestoneTarget`].
//! - [`report`]: the [`Pipeline`] that chains the stages and assembles a
//!   [`Report`].
//!
//! Invariants & assumptions
//! ------------------------
//! - Single-threaded, synchronous, deterministic. No stage blocks, and no
//!   stage mutates another's output.
//! - Derived series are `ndarray::Array1<Option<_>>` aligned with the input;
//!   `None` marks an undefined entry. NaN and infinities never appear in
//!   outputs.
//! - Per-point undefinedness is absorbed; aggregate emptiness and
//!   per-milestone division by zero are surfaced as distinct
//!   [`PipelineError`] variants; unreachable milestones are a value.
//!
//! Conventions
//! -----------
//! - Indices are observation indices: index 0 is the oldest day, and
//!   `administered[0]` is always undefined.
//! - Only [`report`] logs (at `debug`); stage functions are pure.
//!
//! Downstream usage
//! ----------------
//! - Typical code builds [`PipelineOptions`], then:
//!
//!   ```rust
//!   # use chrono::NaiveDate;
//!   # use vaccine_acceleration::series::{ObservationPoint, VaccinationSeries};
//!   use vaccine_acceleration::pipeline::{Pipeline, PipelineOptions};
//!
//!   # let start = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
//!   # let points = [1000_u64, 1200, 1500, 1550]
//!   #     .iter()
//!   #     .enumerate()
//!   #     .map(|(i, &c)| ObservationPoint {
//!   #         date: start + chrono::Duration::days(i as i64),
//!   #         cumulative_vaccinated: c,
//!   #     })
//!   #     .collect();
//!   # let series = VaccinationSeries::new(points).unwrap();
//!   let pipeline = Pipeline::new(PipelineOptions::default()).unwrap();
//!   let report = pipeline.run(&series).unwrap();
//!   assert_eq!(report.latest_rate, Some(175.0));
//!   ```
//!
//! Testing notes
//! -------------
//! - Each stage module unit-tests its formula and edge cases; `report`
//!   tests the wiring; `tests/integration_pipeline.rs` runs the whole
//!   chain from CSV text to rendered report.

pub mod acceleration;
pub mod differencer;
pub mod errors;
pub mod options;
pub mod projection;
pub mod report;
pub mod smoothing;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::acceleration::{AccelerationDefinition, AccelerationSummary};
pub use self::errors::{PipelineError, PipelineResult};
pub use self::options::PipelineOptions;
pub use self::projection::{DaysRemaining, MilestoneTarget, ProjectionResult};
pub use self::report::{DerivedSeries, Pipeline, Report};
pub use self::smoothing::SmoothingMode;

// ---- Optional convenience prelude for downstream crates -------------------

pub mod prelude {
    pub use super::acceleration::AccelerationDefinition;
    pub use super::errors::{PipelineError, PipelineResult};
    pub use super::options::PipelineOptions;
    pub use super::projection::{DaysRemaining, MilestoneTarget};
    pub use super::report::{Pipeline, Report};
    pub use super::smoothing::SmoothingMode;
}
