// src/log.rs
use tracing_subscriber::{fmt, fmt::time::Uptime, EnvFilter};

use crate::config::consts::DEFAULT_LOG_FILTER;

/// Install the global subscriber: `[elapsed][LEVEL] message` lines on stderr,
/// filtered by `RUST_LOG` (default `movie_scrape=info`, or `debug` when
/// `verbose`). Stdout stays free for progress lines and previews.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("movie_scrape=debug")
        } else {
            EnvFilter::new(DEFAULT_LOG_FILTER)
        }
    });

    let _ = fmt()
        .with_env_filter(filter)
        .with_timer(Uptime::default())
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
