//! Observation containers for cumulative vaccination series.
//!
//! Purpose
//! -------
//! Provide a small, validated container for the daily cumulative
//! "people vaccinated" series that feeds the numeric pipeline. This module
//! is the single place where raw observations become a trusted series.
//!
//! Key behaviors
//! -------------
//! - [`ObservationPoint`] is one `(date, cumulative count)` record as read
//!   from the source file.
//! - [`VaccinationSeries`] enforces ordering invariants at construction and
//!   stores dates and counts in parallel, index-aligned buffers.
//!
//! Invariants & assumptions
//! ------------------------
//! - The series is non-empty and strictly ascending by date.
//! - Calendar gaps are allowed; consumers that need elapsed time use
//!   [`VaccinationSeries::elapsed_days`] instead of the index.
//! - Counts may decrease between consecutive days.
//!
//! Conventions
//! -----------
//! - Indexing is 0-based; index 0 is the oldest observation.
//!
//! Downstream usage
//! ----------------
//! - The loader builds a [`VaccinationSeries`] once per run; every pipeline
//!   stage borrows it immutably.
//!
//! Testing notes
//! -------------
//! - Unit tests cover construction (happy path and rejection), accessors,
//!   and elapsed-day arithmetic across a gap.
use crate::series::{errors::SeriesResult, validation::validate_observations};
use chrono::NaiveDate;
use ndarray::Array1;

/// One daily record: the calendar date and the cumulative number of people
/// vaccinated up to and including that date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObservationPoint {
    pub date: NaiveDate,
    pub cumulative_vaccinated: u64,
}

/// `VaccinationSeries` — validated, immutable observation sequence.
///
/// Purpose
/// -------
/// Represent a single country's cumulative vaccination series in a form the
/// pipeline can trust without re-validating: ordered, non-empty, and with
/// dates and counts aligned index-for-index.
///
/// Fields
/// ------
/// - `dates`: `Vec<NaiveDate>`
///   Observation dates, strictly ascending.
/// - `cumulative`: `Array1<u64>`
///   Cumulative people vaccinated at each date.
///
/// Invariants
/// ----------
/// - `dates.len() == cumulative.len() > 0`.
/// - `dates[i] < dates[i + 1]` for every valid `i`.
///
/// Performance
/// -----------
/// - Validation is a single O(n) pass. Accessors borrow; nothing is cloned.
#[derive(Debug, Clone, PartialEq)]
pub struct VaccinationSeries {
    dates: Vec<NaiveDate>,
    cumulative: Array1<u64>,
}

impl VaccinationSeries {
    /// Construct a validated [`VaccinationSeries`] from raw observations.
    ///
    /// Parameters
    /// ----------
    /// - `points`: `Vec<ObservationPoint>`
    ///   Observations in chronological order.
    ///
    /// Returns
    /// -------
    /// `SeriesResult<VaccinationSeries>`
    ///   - `Ok(series)` when the ordering invariants hold.
    ///   - `Err(SeriesError)` otherwise; see
    ///     [`validate_observations`](crate::series::validation::validate_observations).
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use chrono::NaiveDate;
    /// # use vaccine_acceleration::series::{ObservationPoint, VaccinationSeries};
    /// let points = vec![
    ///     ObservationPoint { date: NaiveDate::from_ymd_opt(2021, 1, 16).unwrap(), cumulative_vaccinated: 0 },
    ///     ObservationPoint { date: NaiveDate::from_ymd_opt(2021, 1, 17).unwrap(), cumulative_vaccinated: 191_181 },
    /// ];
    /// let series = VaccinationSeries::new(points).unwrap();
    /// assert_eq!(series.len(), 2);
    /// ```
    pub fn new(points: Vec<ObservationPoint>) -> SeriesResult<Self> {
        validate_observations(&points)?;

        let dates = points.iter().map(|p| p.date).collect();
        let cumulative = points.iter().map(|p| p.cumulative_vaccinated).collect();

        Ok(VaccinationSeries { dates, cumulative })
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Always `false` for a constructed series; kept for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn cumulative(&self) -> &Array1<u64> {
        &self.cumulative
    }

    /// Observation at `index`, if in range.
    pub fn get(&self, index: usize) -> Option<ObservationPoint> {
        let date = *self.dates.get(index)?;
        let cumulative_vaccinated = *self.cumulative.get(index)?;
        Some(ObservationPoint { date, cumulative_vaccinated })
    }

    /// Most recent observation.
    pub fn last(&self) -> ObservationPoint {
        let index = self.len() - 1;
        ObservationPoint { date: self.dates[index], cumulative_vaccinated: self.cumulative[index] }
    }

    /// Calendar days between the first observation and the one at `index`.
    ///
    /// Panics if `index >= self.len()`.
    pub fn elapsed_days(&self, index: usize) -> i64 {
        (self.dates[index] - self.dates[0]).num_days()
    }
}
