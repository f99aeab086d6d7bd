//! io::fetch — keep a fresh local copy of the remote CSV.
//!
//! Purpose
//! -------
//! Download the country file at most once per day. The local copy doubles as
//! a cache: if it was written today it is reused, otherwise it is replaced
//! by a fresh download.
//!
//! Key behaviors
//! -------------
//! - [`DataSource`] abstracts the network (reachability probe + GET) so the
//!   refresh policy can be tested without I/O.
//! - [`ReqwestSource`] is the real implementation on
//!   `reqwest::blocking::Client`, probing reachability with a TCP connect.
//! - [`ensure_local_copy`] applies a [`FetchPolicy`] and reports whether the
//!   cache was reused or refreshed.
//!
//! Invariants & assumptions
//! ------------------------
//! - "Today" is the local calendar date, compared against the cache file's
//!   modification time.
//! - With no connection, a stale cache is used with a warning; with no cache
//!   either, the run fails with `IoError::Offline`.
use crate::io::errors::{IoError, IoResult};
use chrono::{DateTime, Local, NaiveDate};
use std::{
    fs,
    net::{TcpStream, ToSocketAddrs},
    path::{Path, PathBuf},
    time::Duration,
};
use tracing::{debug, info, warn};

/// OWID per-country vaccination file for India.
pub const DEFAULT_SOURCE_URL: &str = "https://raw.githubusercontent.com/owid/covid-19-data/master/public/data/vaccinations/country_data/India.csv";

/// Local cache file name.
pub const DEFAULT_CACHE_PATH: &str = "India.csv";

/// Public DNS resolver used as a reachability probe.
pub const DEFAULT_PROBE_ADDR: &str = "1.1.1.1:53";

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const USER_AGENT: &str = concat!("vaccine-acceleration/", env!("CARGO_PKG_VERSION"));

/// Where the data comes from and where it is cached.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceOptions {
    pub url: String,
    pub cache_path: PathBuf,
    pub probe_addr: String,
    pub timeout: Duration,
}

impl Default for SourceOptions {
    fn default() -> Self {
        SourceOptions {
            url: DEFAULT_SOURCE_URL.to_string(),
            cache_path: PathBuf::from(DEFAULT_CACHE_PATH),
            probe_addr: DEFAULT_PROBE_ADDR.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// When to download.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FetchPolicy {
    /// Download unless the cache was written today.
    #[default]
    IfStale,
    /// Always download.
    Refresh,
    /// Never touch the network; the cache must exist.
    Offline,
}

/// What [`ensure_local_copy`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Downloaded { bytes: usize },
    CachedToday,
    StaleCache,
    OfflineCache,
}

/// Network access needed by the refresh policy.
pub trait DataSource {
    /// Whether the network looks reachable.
    fn is_reachable(&self) -> bool;

    /// Fetch `url` and return the response body.
    fn get(&self, url: &str) -> IoResult<Vec<u8>>;
}

/// Blocking HTTP source backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestSource {
    client: reqwest::blocking::Client,
    probe_addr: String,
    timeout: Duration,
}

impl ReqwestSource {
    pub fn new(options: &SourceOptions) -> IoResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(options.timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| IoError::Http(format!("failed to create HTTP client: {e}")))?;

        Ok(ReqwestSource {
            client,
            probe_addr: options.probe_addr.clone(),
            timeout: options.timeout,
        })
    }
}

impl DataSource for ReqwestSource {
    fn is_reachable(&self) -> bool {
        let addrs = match self.probe_addr.to_socket_addrs() {
            Ok(addrs) => addrs,
            Err(e) => {
                debug!(probe = %self.probe_addr, error = %e, "probe address did not resolve");
                return false;
            }
        };
        addrs.into_iter().any(|addr| TcpStream::connect_timeout(&addr, self.timeout).is_ok())
    }

    fn get(&self, url: &str) -> IoResult<Vec<u8>> {
        let response = self.client.get(url).send()?.error_for_status()?;
        Ok(response.bytes()?.to_vec())
    }
}

/// Whether the file at `path` was last modified on `today`.
///
/// A missing or unreadable file counts as not fetched.
pub fn fetched_on(path: &Path, today: NaiveDate) -> bool {
    fs::metadata(path)
        .and_then(|meta| meta.modified())
        .map(|modified| DateTime::<Local>::from(modified).date_naive() == today)
        .unwrap_or(false)
}

/// Make sure `options.cache_path` holds usable data according to `policy`.
///
/// Parameters
/// ----------
/// - `options`: `&SourceOptions`
///   Remote URL and cache path.
/// - `policy`: `FetchPolicy`
///   Refresh rule.
/// - `source`: `&impl DataSource`
///   Network access.
///
/// Returns
/// -------
/// `IoResult<FetchOutcome>`
///   - `Downloaded` after writing a fresh copy.
///   - `CachedToday` when the cache was already written today.
///   - `StaleCache` when offline but an older cache exists.
///   - `OfflineCache` under `FetchPolicy::Offline`.
///
/// Errors
/// ------
/// - `IoError::Offline` when the cache is needed but missing.
/// - `IoError::Http` when the download fails.
/// - `IoError::Cache` when the cache cannot be written.
pub fn ensure_local_copy(
    options: &SourceOptions, policy: FetchPolicy, source: &impl DataSource,
) -> IoResult<FetchOutcome> {
    let cache = options.cache_path.as_path();
    let offline_error = || IoError::Offline { cache_path: cache.to_path_buf() };

    match policy {
        FetchPolicy::Offline => {
            return if cache.exists() { Ok(FetchOutcome::OfflineCache) } else { Err(offline_error()) };
        }
        FetchPolicy::IfStale if fetched_on(cache, Local::now().date_naive()) => {
            debug!(cache = %cache.display(), "cache already fetched today");
            return Ok(FetchOutcome::CachedToday);
        }
        _ => {}
    }

    if !source.is_reachable() {
        if cache.exists() {
            warn!(cache = %cache.display(), "no internet connection, using stale cache");
            return Ok(FetchOutcome::StaleCache);
        }
        return Err(offline_error());
    }

    info!(url = %options.url, "downloading vaccination data");
    let body = source.get(&options.url)?;
    if let Some(parent) = cache.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| IoError::cache(parent, e))?;
    }
    fs::write(cache, &body).map_err(|e| IoError::cache(cache, e))?;
    info!(bytes = body.len(), cache = %cache.display(), "cache refreshed");

    Ok(FetchOutcome::Downloaded { bytes: body.len() })
}
