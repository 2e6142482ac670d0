//! Response DTOs for the guard service API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::CacheStats;
use crate::rate_limit::LimiterStats;

/// Cache section of the stats endpoint
#[derive(Debug, Clone, Serialize)]
pub struct CacheStatsResponse {
    pub hits: u64,
    pub misses: u64,
    pub expirations: u64,
    pub invalidations: u64,
    /// Stored entries, including expired ones not yet swept
    pub total_entries: usize,
    /// Entries that are still fresh
    pub live_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
    pub ttl_secs: u64,
}

impl CacheStatsResponse {
    pub fn new(stats: &CacheStats, live_entries: usize, ttl_secs: u64) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            expirations: stats.expirations,
            invalidations: stats.invalidations,
            total_entries: stats.total_entries,
            live_entries,
            hit_rate: stats.hit_rate(),
            ttl_secs,
        }
    }
}

/// Rate limiter section of the stats endpoint
#[derive(Debug, Clone, Serialize)]
pub struct RateLimitStatsResponse {
    pub allowed: u64,
    pub rejected: u64,
    pub tracked_keys: usize,
    pub max_requests: usize,
    pub window_secs: u64,
}

impl RateLimitStatsResponse {
    pub fn new(stats: &LimiterStats, max_requests: usize, window_secs: u64) -> Self {
        Self {
            allowed: stats.allowed,
            rejected: stats.rejected,
            tracked_keys: stats.tracked_keys,
            max_requests,
            window_secs,
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub cache: CacheStatsResponse,
    pub rate_limit: RateLimitStatsResponse,
}

/// Response body for POST /cache/invalidate
#[derive(Debug, Clone, Serialize)]
pub struct InvalidateResponse {
    /// Success message
    pub message: String,
    /// Number of entries dropped
    pub removed: usize,
}

impl InvalidateResponse {
    pub fn new(pattern: Option<&str>, removed: usize) -> Self {
        let message = match pattern {
            Some(pattern) if !pattern.is_empty() => {
                format!("Invalidated {} entries matching '{}'", removed, pattern)
            }
            _ => format!("Cleared {} entries", removed),
        };
        Self { message, removed }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
