//! Fino Guard - aggregate cache and rate limiter for the Fino finance tracker
//!
//! Provides a fixed-TTL cache for per-user summaries and a sliding-window
//! rate limiter for mutation endpoints, plus the thin HTTP layer around them.

pub mod api;
pub mod cache;
pub mod clock;
pub mod config;
pub mod error;
pub mod models;
pub mod rate_limit;
pub mod tasks;

pub use api::AppState;
pub use cache::ExpiringCache;
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::Config;
pub use rate_limit::SlidingWindowLimiter;
pub use tasks::{spawn_cache_sweeper, spawn_limiter_sweeper};
