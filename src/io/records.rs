//! io::records — decode the country vaccination CSV into a series.
//!
//! Purpose
//! -------
//! Read the OWID per-country vaccination file and keep only what the
//! pipeline needs: the `date` and `people_vaccinated` columns.
//!
//! Key behaviors
//! -------------
//! - Locate columns by header name; column order and extra columns do not
//!   matter.
//! - Skip rows whose `people_vaccinated` cell is empty (the source leaves it
//!   blank on days only other counters were reported), logging at `warn`.
//!   A skipped row becomes a calendar gap: the next first difference spans
//!   every day since the previous kept row and is used as that day's count.
//! - Report malformed cells with their file line number (header = line 1).
//! - Accept whole numbers written either as integers or as floats with a
//!   zero fractional part (`"1234"` or `"1234.0"`).
//! - Log how many calendar gaps the resulting series has.
//!
//! Invariants & assumptions
//! ------------------------
//! - Rows are expected in ascending date order; ordering violations surface
//!   as `IoError::Series`.
use crate::{
    io::errors::{IoError, IoResult},
    series::{count_calendar_gaps, ObservationPoint, VaccinationSeries},
};
use chrono::NaiveDate;
use std::{fs::File, path::Path};
use tracing::{debug, warn};

pub const DATE_COLUMN: &str = "date";
pub const COUNT_COLUMN: &str = "people_vaccinated";

/// Decode a series from any CSV byte source.
///
/// Parameters
/// ----------
/// - `reader`: `impl std::io::Read`
///   CSV text with a header row.
///
/// Returns
/// -------
/// `IoResult<VaccinationSeries>`
///   - `Ok(series)` holding every row with a non-empty count.
///
/// Errors
/// ------
/// - `IoError::MissingColumn` if `date` or `people_vaccinated` is absent.
/// - `IoError::InvalidDate` / `IoError::InvalidCount` for malformed cells.
/// - `IoError::Series` if no usable row remains or dates are not strictly
///   ascending.
/// - `IoError::Csv` for malformed CSV structure.
pub fn read_series(reader: impl std::io::Read) -> IoResult<VaccinationSeries> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let date_idx = column_index(&headers, DATE_COLUMN)?;
    let count_idx = column_index(&headers, COUNT_COLUMN)?;

    let mut points = Vec::new();
    let mut skipped = 0_usize;
    for (offset, record) in csv_reader.records().enumerate() {
        let record = record?;
        let line = offset + 2;
        let date_cell = record.get(date_idx).unwrap_or("").trim();
        let count_cell = record.get(count_idx).unwrap_or("").trim();

        if count_cell.is_empty() {
            warn!(
                line,
                date = date_cell,
                "skipping row without people_vaccinated; next difference spans the gap"
            );
            skipped += 1;
            continue;
        }

        points.push(ObservationPoint {
            date: parse_date(line, date_cell)?,
            cumulative_vaccinated: parse_count(line, count_cell)?,
        });
    }

    let series = VaccinationSeries::new(points)?;
    let gaps = count_calendar_gaps(series.dates());
    debug!(rows = series.len(), skipped, gaps, "decoded vaccination series");
    Ok(series)
}

/// Decode a series from a CSV file on disk.
///
/// Errors
/// ------
/// - `IoError::Cache` if the file cannot be opened; otherwise as
///   [`read_series`].
pub fn load_series(path: &Path) -> IoResult<VaccinationSeries> {
    let file = File::open(path).map_err(|e| IoError::cache(path, e))?;
    read_series(file)
}

//
// ---------- Private helpers ----------
//

fn column_index(headers: &csv::StringRecord, name: &'static str) -> IoResult<usize> {
    headers.iter().position(|h| h.trim() == name).ok_or(IoError::MissingColumn(name))
}

fn parse_date(line: usize, cell: &str) -> IoResult<NaiveDate> {
    NaiveDate::parse_from_str(cell, "%Y-%m-%d")
        .map_err(|_| IoError::InvalidDate { line, value: cell.to_string() })
}

fn parse_count(line: usize, cell: &str) -> IoResult<u64> {
    if let Ok(count) = cell.parse::<u64>() {
        return Ok(count);
    }
    match cell.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 && v.fract() == 0.0 && v <= u64::MAX as f64 => {
            Ok(v as u64)
        }
        _ => Err(IoError::InvalidCount { line, value: cell.to_string() }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::SeriesError;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Decoding an OWID-shaped file with quoted commas and extra columns.
    // - Skipping rows with an empty count.
    // - Each decode error branch.
    //
    // They intentionally DO NOT cover:
    // - File-system access; `load_series` is a thin wrapper exercised by the
    //   fetch tests.
    // -------------------------------------------------------------------------

    const OWID_SAMPLE: &str = "\
location,date,vaccine,source_url,total_vaccinations,people_vaccinated,people_fully_vaccinated
India,2021-01-15,\"Covaxin, Oxford/AstraZeneca\",https://example.org,0,0,
India,2021-01-16,\"Covaxin, Oxford/AstraZeneca\",https://example.org,191181,191181,
India,2021-01-17,\"Covaxin, Oxford/AstraZeneca\",https://example.org,224301,,
India,2021-01-18,\"Covaxin, Oxford/AstraZeneca\",https://example.org,454049,454049.0,
";

    #[test]
    // Purpose
    // -------
    // Verify an OWID-shaped file decodes, honoring quoted commas and
    // skipping the blank-count row.
    //
    // Given
    // -----
    // - Four rows, the third with an empty `people_vaccinated`.
    //
    // Expect
    // ------
    // - Three observations: 0, 191181, 454049 (the last written as a float).
    // - The skipped day leaves one calendar gap between Jan 16 and Jan 18.
    fn read_series_decodes_owid_layout_and_skips_blank_counts() {
        // Act
        let series = read_series(OWID_SAMPLE.as_bytes()).unwrap();

        // Assert
        assert_eq!(series.len(), 3);
        assert_eq!(count_calendar_gaps(series.dates()), 1);
        assert_eq!(series.cumulative().to_vec(), vec![0, 191_181, 454_049]);
        assert_eq!(series.last().date, NaiveDate::from_ymd_opt(2021, 1, 18).unwrap());
    }

    #[test]
    // Purpose
    // -------
    // Ensure a missing required column is reported by name.
    //
    // Given
    // -----
    // - A header without `people_vaccinated`.
    //
    // Expect
    // ------
    // - `Err(MissingColumn("people_vaccinated"))`.
    fn read_series_missing_count_column_returns_missing_column() {
        // Arrange
        let text = "date,total_vaccinations\n2021-01-15,0\n";

        // Act / Assert
        assert_eq!(read_series(text.as_bytes()), Err(IoError::MissingColumn(COUNT_COLUMN)));
    }

    #[test]
    // Purpose
    // -------
    // Ensure malformed cells are reported with the file line a user would
    // open, counting the header as line 1.
    //
    // Given
    // -----
    // - A bad date on line 3; a negative count on line 2; a fractional count
    //   on line 2.
    //
    // Expect
    // ------
    // - `InvalidDate { line: 3, .. }` and `InvalidCount { line: 2, .. }`
    //   twice.
    fn read_series_malformed_cells_return_line_errors() {
        // Arrange
        let bad_date = "date,people_vaccinated\n2021-01-15,0\n15/01/2021,10\n";
        let negative = "date,people_vaccinated\n2021-01-15,-5\n";
        let fractional = "date,people_vaccinated\n2021-01-15,10.5\n";

        // Act / Assert
        assert_eq!(
            read_series(bad_date.as_bytes()),
            Err(IoError::InvalidDate { line: 3, value: "15/01/2021".to_string() })
        );
        assert_eq!(
            read_series(negative.as_bytes()),
            Err(IoError::InvalidCount { line: 2, value: "-5".to_string() })
        );
        assert_eq!(
            read_series(fractional.as_bytes()),
            Err(IoError::InvalidCount { line: 2, value: "10.5".to_string() })
        );
    }

    #[test]
    // Purpose
    // -------
    // Ensure a file whose every count is blank yields an empty-series error.
    //
    // Given
    // -----
    // - Two rows with blank counts.
    //
    // Expect
    // ------
    // - `Err(Series(SeriesError::Empty))`.
    fn read_series_all_blank_counts_returns_empty_series() {
        // Arrange
        let text = "date,people_vaccinated\n2021-01-15,\n2021-01-16,\n";

        // Act / Assert
        assert_eq!(read_series(text.as_bytes()), Err(IoError::Series(SeriesError::Empty)));
    }
}
