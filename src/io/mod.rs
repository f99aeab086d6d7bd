//! io — data-source collaborators around the numeric core.
//!
//! Purpose
//! -------
//! Everything that touches the network or the file system: keeping a fresh
//! local copy of the remote CSV ([`fetch`]), decoding it into a
//! [`VaccinationSeries`](crate::series::VaccinationSeries) ([`records`]),
//! and exporting the derived series ([`snapshot`]).
//!
//! Conventions
//! -----------
//! - All blocking I/O happens here, before or after the pipeline runs.
//! - Failures are reported as [`IoError`]; the CLI adds context with
//!   `anyhow`.
//! - Progress is logged with `tracing` (`info` for downloads and exports,
//!   `warn` for skipped rows and stale caches, `debug` for details).

pub mod errors;
pub mod fetch;
pub mod records;
pub mod snapshot;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::errors::{IoError, IoResult};
pub use self::fetch::{
    ensure_local_copy, DataSource, FetchOutcome, FetchPolicy, ReqwestSource, SourceOptions,
};
pub use self::records::{load_series, read_series};
pub use self::snapshot::{export_snapshot, write_snapshot};
