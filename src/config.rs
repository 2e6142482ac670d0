//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::DEFAULT_CACHE_TTL_SECS;
use crate::rate_limit::{DEFAULT_MAX_REQUESTS, DEFAULT_WINDOW_SECS};

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Time-to-live of cached aggregates, in seconds
    pub cache_ttl: u64,
    /// Requests admitted per key per window on mutation endpoints
    pub rate_limit_max_requests: usize,
    /// Rate-limit window length, in seconds
    pub rate_limit_window: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Interval between background sweeps, in seconds
    pub cleanup_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_TTL` - Cache TTL in seconds (default: 300, must be > 0)
    /// - `RATE_LIMIT_MAX_REQUESTS` - Requests per window (default: 30)
    /// - `RATE_LIMIT_WINDOW` - Window length in seconds (default: 60, must be > 0)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CLEANUP_INTERVAL` - Sweep frequency in seconds (default: 60, must be > 0)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            cache_ttl: positive_var("CACHE_TTL").unwrap_or(defaults.cache_ttl),
            rate_limit_max_requests: parse_var("RATE_LIMIT_MAX_REQUESTS")
                .unwrap_or(defaults.rate_limit_max_requests),
            rate_limit_window: positive_var("RATE_LIMIT_WINDOW")
                .unwrap_or(defaults.rate_limit_window),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            cleanup_interval: positive_var("CLEANUP_INTERVAL")
                .unwrap_or(defaults.cleanup_interval),
        }
    }

    pub fn cache_ttl_duration(&self) -> Duration {
        Duration::from_secs(self.cache_ttl)
    }

    pub fn rate_limit_window_duration(&self) -> Duration {
        Duration::from_secs(self.rate_limit_window)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_ttl: DEFAULT_CACHE_TTL_SECS,
            rate_limit_max_requests: DEFAULT_MAX_REQUESTS,
            rate_limit_window: DEFAULT_WINDOW_SECS,
            server_port: 3000,
            cleanup_interval: 60,
        }
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

fn positive_var(name: &str) -> Option<u64> {
    parse_var(name).filter(|v: &u64| *v > 0)
}
