//! Cache Module
//!
//! Fixed-TTL in-memory cache for memoizing per-user aggregate results.

mod entry;
pub mod keys;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use stats::CacheStats;
pub use store::ExpiringCache;

// == Public Constants ==
/// Default time-to-live for cached aggregates, in seconds
pub const DEFAULT_CACHE_TTL_SECS: u64 = 300;
