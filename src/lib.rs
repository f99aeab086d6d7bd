//! vaccine_acceleration — vaccination rate, acceleration, and milestone
//! projections from a cumulative daily series.
//!
//! Purpose
//! -------
//! Serve as the crate root for the library and the `vaccine-acceleration`
//! binary. The library turns a cumulative "people vaccinated" series into
//! daily administered counts, a smoothed vaccination rate, the percentage
//! acceleration of that rate, and the days remaining until coverage
//! milestones under a constant-acceleration model.
//!
//! Key behaviors
//! -------------
//! - [`series`]: validated, date-ordered observations.
//! - [`pipeline`]: the numeric core (differencer, smoother, acceleration
//!   engine, projector) and the [`pipeline::Report`] it produces.
//! - [`io`]: download-and-cache of the remote CSV, decoding into a series,
//!   and snapshot export of the derived series.
//! - [`format`]: terminal rendering of a report.
//! - [`config`] and [`logging`]: ambient setup for the binary.
//!
//! Invariants & assumptions
//! ------------------------
//! - The numeric core is pure and deterministic; all I/O lives in [`io`]
//!   and the binary.
//! - Undefined values are `None`, never NaN.
//!
//! Downstream usage
//! ----------------
//! - Library users build a [`series::VaccinationSeries`] (directly or via
//!   [`io::read_series`]) and run a [`pipeline::Pipeline`] over it.
//!
//! Testing notes
//! -------------
//! - Unit tests live beside each module; `tests/integration_pipeline.rs`
//!   drives CSV text through to the rendered report.

pub mod config;
pub mod format;
pub mod io;
pub mod logging;
pub mod pipeline;
pub mod series;
