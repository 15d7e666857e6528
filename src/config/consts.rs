// src/config/consts.rs
use std::time::Duration;

// Browser
pub const DEFAULT_WEBDRIVER_URL: &str = "http://localhost:9515";
pub const WINDOW_WIDTH: u32 = 1920;
pub const WINDOW_HEIGHT: u32 = 1080;

// Readiness
pub const READY_TIMEOUT: Duration = Duration::from_secs(20);
// thirtyfour's own query poll; also the fastest we allow
pub const READY_POLL: Duration = Duration::from_millis(500);

// Settle delays
pub const IMDB_SETTLE: Duration = Duration::from_secs(3);
pub const RT_SETTLE_MIN: Duration = Duration::from_secs(4);
pub const RT_SETTLE_MAX: Duration = Duration::from_secs(7);

// Limits
pub const IMDB_LIMIT: usize = 50;
pub const RT_LIMIT: usize = 5;

// Export
pub const IMDB_FILE: &str = "movie_data_by_genre.csv";
pub const RT_FILE: &str = "movies_dataset.csv";
pub const PREVIEW_ROWS: usize = 5;

// Logging
pub const DEFAULT_LOG_FILTER: &str = "movie_scrape=info";
