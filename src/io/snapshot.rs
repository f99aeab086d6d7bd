//! io::snapshot — optional CSV dump of the derived series.
//!
//! One row per observation with the input count and the three derived
//! columns. Undefined entries are written as empty cells.
use crate::{
    io::errors::{IoError, IoResult},
    pipeline::DerivedSeries,
    series::VaccinationSeries,
};
use chrono::NaiveDate;
use serde::Serialize;
use std::{fs::File, path::Path};
use tracing::info;

#[derive(Debug, Serialize)]
struct SnapshotRow {
    date: NaiveDate,
    people_vaccinated: u64,
    vaccine_administered: Option<i64>,
    vaccination_rate: Option<f64>,
    vaccination_rate_acceleration: Option<f64>,
}

/// Write the snapshot to any writer.
///
/// Panics if `derived` is not aligned with `series`; both come from the same
/// pipeline run.
pub fn write_snapshot(
    writer: impl std::io::Write, series: &VaccinationSeries, derived: &DerivedSeries,
) -> IoResult<()> {
    assert_eq!(series.len(), derived.administered.len(), "derived series misaligned with input");

    let mut csv_writer = csv::Writer::from_writer(writer);
    for (i, (&date, &people_vaccinated)) in
        series.dates().iter().zip(series.cumulative().iter()).enumerate()
    {
        csv_writer.serialize(SnapshotRow {
            date,
            people_vaccinated,
            vaccine_administered: derived.administered[i],
            vaccination_rate: derived.rate[i],
            vaccination_rate_acceleration: derived.acceleration[i],
        })?;
    }
    csv_writer.flush().map_err(|e| IoError::Csv(e.to_string()))?;
    Ok(())
}

/// Write the snapshot to `path`, replacing any existing file.
pub fn export_snapshot(
    path: &Path, series: &VaccinationSeries, derived: &DerivedSeries,
) -> IoResult<()> {
    let file = File::create(path).map_err(|e| IoError::cache(path, e))?;
    write_snapshot(file, series, derived)?;
    info!(path = %path.display(), rows = series.len(), "snapshot exported");
    Ok(())
}
