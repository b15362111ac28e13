//! Configuration loader and defaults for the cardioweb server.
//!
//! Exposes a lazily-initialized `CONFIG` which reads values from
//! environment variables (with sensible defaults). Fields include the
//! listening port (`web_port`), the database location (`db_path`), the
//! display row cap (`row_limit`), and the upstream statistics endpoint
//! (`stats_url`).
//!
use std::env;

use once_cell::sync::Lazy;

const DEFAULT_WEB_PORT: u16 = 5001;

const DEFAULT_DB_PATH: &str = "database/heart_failure.db";

const DEFAULT_ROW_LIMIT: usize = 100;

/// Public health-topic search endpoint queried by `/global-stats`.
const DEFAULT_STATS_URL: &str = "https://health.gov/myhealthfinder/api/v3/topicsearch.json";

/// Application configuration for the web server
pub struct Config {
    /// HTTP listen port
    pub web_port: u16,
    /// Path to the SQLite database produced by the loader
    pub db_path: String,
    /// Maximum number of rows the tabular view renders
    pub row_limit: usize,
    /// Upstream statistics API endpoint
    pub stats_url: String,
}

/// Global application configuration instance, lazily initialized
pub static CONFIG: Lazy<Config> = Lazy::new(|| Config {
    web_port: env::var("CARDIO_WEB_PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_WEB_PORT),
    db_path: env::var("CARDIO_DB").unwrap_or_else(|_| DEFAULT_DB_PATH.into()),
    row_limit: env::var("CARDIO_ROW_LIMIT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_ROW_LIMIT),
    stats_url: env::var("CARDIO_STATS_URL").unwrap_or_else(|_| DEFAULT_STATS_URL.into()),
});
