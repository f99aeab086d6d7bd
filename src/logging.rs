//! Logging setup for the command-line tool.
//!
//! Logs go to stderr so the report on stdout stays clean. `RUST_LOG` wins
//! over the verbosity flag when set.

use tracing_subscriber::EnvFilter;

/// Filter directive for a `-v` count: 0 ⇒ warn, 1 ⇒ info, 2+ ⇒ debug.
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Install the global subscriber. Call once, at the start of `main`.
pub fn init_logging(verbosity: u8, ansi: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(ansi)
        .with_target(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_maps_to_levels() {
        assert_eq!(default_directive(0), "warn");
        assert_eq!(default_directive(1), "info");
        assert_eq!(default_directive(2), "debug");
        assert_eq!(default_directive(9), "debug");
    }
}
