//! Application-level configuration constants.

use log::LevelFilter;

// Build-time environment
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3001";
const API_BASE_URL_ENV: Option<&str> = option_env!("LEADERBOARD_API_URL");
const LOG_LEVEL_ENV: Option<&str> = option_env!("LEADERBOARD_LOG_LEVEL");

// Default values for query fields
pub const DEFAULT_KINGDOM: &str = "3951";
pub const DEFAULT_LIMIT: u32 = 100;
pub const LATEST_DT: &str = "latest";

// Min/Max limits for input fields
pub const MIN_LIMIT: u32 = 1;
pub const MAX_LIMIT: u32 = 500;

/// The only kingdom with verified snapshot data.
pub const VERIFIED_KINGDOM: &str = "3951";

// UI constants
pub const LIMIT_STEP: u32 = 10;

/// Base URL of the leaderboard API, without a trailing slash.
///
/// Taken from `LEADERBOARD_API_URL` at build time; an unset or blank value
/// falls back to the local development address.
pub fn api_base_url() -> String {
    resolve_base_url(API_BASE_URL_ENV)
}

fn resolve_base_url(configured: Option<&str>) -> String {
    let url = configured
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .unwrap_or(DEFAULT_API_BASE_URL);
    url.trim_end_matches('/').to_string()
}

/// Console log level, from `LEADERBOARD_LOG_LEVEL` at build time.
pub fn log_level() -> LevelFilter {
    LOG_LEVEL_ENV
        .and_then(|level| level.trim().parse().ok())
        .unwrap_or(LevelFilter::Info)
}
