//! series — validated cumulative vaccination observations.
//!
//! Purpose
//! -------
//! Hold the input side of the pipeline: the observation record type, the
//! validated series container, its validation helpers, and its error type.
//! Everything downstream borrows a [`VaccinationSeries`] and can rely on
//! its ordering invariants.
//!
//! Key behaviors
//! -------------
//! - [`VaccinationSeries::new`] validates ordering once at the boundary.
//! - [`validate_observations`] and [`count_calendar_gaps`] are shared by the
//!   loader and the container.
//!
//! Conventions
//! -----------
//! - This subtree performs no I/O and no logging. Decoding files and
//!   reporting gaps is the loader's job (`crate::io`).

pub mod data;
pub mod errors;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::data::{ObservationPoint, VaccinationSeries};
pub use self::errors::{SeriesError, SeriesResult};
pub use self::validation::{count_calendar_gaps, validate_observations};
