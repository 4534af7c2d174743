//! Runtime configuration from the environment.

use std::env;
use std::time::Duration;

/// Settings for the HTTP catalog and response cache.
///
/// Read from `BOOKING_API_BASE_URL`, `BOOKING_REQUEST_TIMEOUT_SECS`, and
/// `BOOKING_CACHE_TTL_SECS`; anything unset or unparsable falls back to
/// the defaults. Binaries call `dotenv::dotenv()` before loading so a
/// `.env` file works too.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_base_url: String,
    pub request_timeout: Duration,
    pub cache_ttl: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000/api/v1".to_string(),
            request_timeout: Duration::from_secs(10),
            cache_ttl: Duration::from_secs(5 * 60),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key/value lookup; the environment in production,
    /// a plain map in tests.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Config::default();
        let secs = |key| lookup(key)?.parse().ok().map(Duration::from_secs);
        Self {
            api_base_url: lookup("BOOKING_API_BASE_URL").unwrap_or(defaults.api_base_url),
            request_timeout: secs("BOOKING_REQUEST_TIMEOUT_SECS")
                .unwrap_or(defaults.request_timeout),
            cache_ttl: secs("BOOKING_CACHE_TTL_SECS").unwrap_or(defaults.cache_ttl),
        }
    }
}
