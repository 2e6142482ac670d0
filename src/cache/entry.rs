//! Cache Entry Module
//!
//! A stored value together with the instant it was written.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// A single cached value and its write timestamp.
///
/// Entries are never mutated in place; a new write replaces the whole entry.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Instant the value was written
    pub written_at: Instant,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates an entry written at `now`.
    pub fn new(value: V, now: Instant) -> Self {
        Self {
            value,
            written_at: now,
        }
    }

    // == Age ==
    /// Time elapsed since the entry was written, zero if `now` predates it.
    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.written_at)
    }

    // == Is Expired ==
    /// Checks if the entry has outlived `ttl`.
    ///
    /// Boundary condition: an entry is present only while `age < ttl`, so it
    /// is expired from the instant its age reaches the TTL.
    pub fn is_expired(&self, ttl: Duration, now: Instant) -> bool {
        self.age(now) >= ttl
    }

    // == Time To Live ==
    /// Remaining lifetime at `now`, zero once expired.
    pub fn ttl_remaining(&self, ttl: Duration, now: Instant) -> Duration {
        ttl.saturating_sub(self.age(now))
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_secs(10);

    #[test]
    fn test_fresh_entry_not_expired() {
        let now = Instant::now();
        let entry = CacheEntry::new("value", now);

        assert!(!entry.is_expired(TTL, now));
        assert_eq!(entry.ttl_remaining(TTL, now), TTL);
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let now = Instant::now();
        let entry = CacheEntry::new("value", now);

        assert!(!entry.is_expired(TTL, now + TTL - Duration::from_millis(1)));
        assert!(entry.is_expired(TTL, now + TTL), "Entry should be expired at boundary");
    }

    #[test]
    fn test_ttl_remaining_after_expiry() {
        let now = Instant::now();
        let entry = CacheEntry::new("value", now);

        let later = now + TTL + Duration::from_secs(3);
        assert_eq!(entry.ttl_remaining(TTL, later), Duration::ZERO);
    }

    #[test]
    fn test_age_before_write_is_zero() {
        let now = Instant::now() + Duration::from_secs(1);
        let entry = CacheEntry::new(1u32, now);

        assert_eq!(entry.age(now - Duration::from_secs(1)), Duration::ZERO);
    }
}
