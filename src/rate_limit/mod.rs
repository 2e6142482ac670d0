//! Rate Limit Module
//!
//! Sliding-window admission control keyed by caller identity.

mod limiter;


use serde::Serialize;

pub use limiter::SlidingWindowLimiter;

// == Public Constants ==
/// Default requests admitted per window for mutation endpoints
pub const DEFAULT_MAX_REQUESTS: usize = 30;

/// Default window length, in seconds
pub const DEFAULT_WINDOW_SECS: u64 = 60;

// == Limiter Stats ==
/// Snapshot of limiter activity.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LimiterStats {
    /// Requests admitted since creation
    pub allowed: u64,
    /// Requests turned away since creation
    pub rejected: u64,
    /// Keys currently holding history
    pub tracked_keys: usize,
}
