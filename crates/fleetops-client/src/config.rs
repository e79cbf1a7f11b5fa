//! Client configuration from the environment.
//!
//! Every knob has a default matching the deployed dashboard; durations accept
//! humantime spellings ("3s", "5m").

use std::env;
use std::num::ParseIntError;
use std::time::Duration;

use thiserror::Error;

use crate::http::RetryPolicy;

/// Backend base URL.
pub const API_URL_ENV: &str = "FLEETOPS_API_URL";
/// Additional attempts after the first failed call.
pub const RETRY_ATTEMPTS_ENV: &str = "FLEETOPS_RETRY_ATTEMPTS";
/// Base unit of the linear backoff.
pub const RETRY_DELAY_ENV: &str = "FLEETOPS_RETRY_DELAY";
/// TTL of the read-through response cache.
pub const CACHE_TTL_ENV: &str = "FLEETOPS_CACHE_TTL";
/// How long to wait for the backend to come up.
pub const BACKEND_TIMEOUT_ENV: &str = "FLEETOPS_BACKEND_TIMEOUT";

/// Errors from environment parsing.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid {var}: {source}")]
    InvalidDuration {
        var: &'static str,
        source: humantime::DurationError,
    },

    #[error("invalid {var}: {source}")]
    InvalidNumber {
        var: &'static str,
        source: ParseIntError,
    },
}

/// Tunables for talking to the backend.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    /// Additional attempts after the first (total calls = this + 1).
    pub retry_attempts: u32,
    /// Attempt i waits `retry_delay * (i + 1)`.
    pub retry_delay: Duration,
    pub cache_ttl: Duration,
    pub backend_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            retry_attempts: 5,
            retry_delay: Duration::from_secs(3),
            cache_ttl: Duration::from_secs(5 * 60),
            backend_timeout: Duration::from_secs(60),
        }
    }
}

impl ClientConfig {
    /// Read overrides from the environment on top of the defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Ok(url) = env::var(API_URL_ENV) {
            config.base_url = url;
        }
        if let Ok(raw) = env::var(RETRY_ATTEMPTS_ENV) {
            config.retry_attempts = raw.parse().map_err(|source| ConfigError::InvalidNumber {
                var: RETRY_ATTEMPTS_ENV,
                source,
            })?;
        }
        config.retry_delay = duration_from_env(RETRY_DELAY_ENV, config.retry_delay)?;
        config.cache_ttl = duration_from_env(CACHE_TTL_ENV, config.cache_ttl)?;
        config.backend_timeout = duration_from_env(BACKEND_TIMEOUT_ENV, config.backend_timeout)?;
        Ok(config)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            retry_attempts: self.retry_attempts,
            retry_delay: self.retry_delay,
        }
    }
}

fn duration_from_env(var: &'static str, fallback: Duration) -> Result<Duration, ConfigError> {
    match env::var(var) {
        Ok(raw) => humantime::parse_duration(&raw)
            .map_err(|source| ConfigError::InvalidDuration { var, source }),
        Err(_) => Ok(fallback),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_deployed_dashboard() {
        let config = ClientConfig::default();
        assert_eq!(config.retry_attempts, 5);
        assert_eq!(config.retry_delay, Duration::from_secs(3));
        assert_eq!(config.cache_ttl, Duration::from_secs(300));
        assert_eq!(config.backend_timeout, Duration::from_secs(60));
    }

    #[test]
    fn test_retry_policy_carries_the_tunables() {
        let config = ClientConfig {
            retry_attempts: 2,
            retry_delay: Duration::from_millis(10),
            ..Default::default()
        };
        let policy = config.retry_policy();
        assert_eq!(policy.retry_attempts, 2);
        assert_eq!(policy.retry_delay, Duration::from_millis(10));
    }
}
