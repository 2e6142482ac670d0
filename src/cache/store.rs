//! Cache Store Module
//!
//! Fixed-TTL key-value cache with lazy expiry and an explicit sweep.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use crate::cache::{CacheEntry, CacheStats};
use crate::clock::{Clock, SystemClock};

// == Expiring Cache ==
/// Thread-safe cache whose entries vanish once older than a fixed TTL.
///
/// A single mutex guards the whole map and every operation holds it for its
/// full duration. Expired entries are never served: `get` drops them on
/// sight, and [`ExpiringCache::cleanup_expired`] reclaims the ones nobody
/// reads again.
pub struct ExpiringCache<V> {
    inner: Mutex<Inner<V>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

struct Inner<V> {
    entries: HashMap<String, CacheEntry<V>>,
    stats: CacheStats,
}

impl<V: Clone> ExpiringCache<V> {
    // == Constructor ==
    /// Creates a cache reading time from the system clock.
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    /// Creates a cache reading time from `clock`.
    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: Mutex::new(Inner {
                entries: HashMap::new(),
                stats: CacheStats::new(),
            }),
            ttl,
            clock,
        }
    }

    // == Get ==
    /// Returns the value for `key` if it is present and fresh.
    ///
    /// A stale entry found under `key` is removed as a side effect.
    pub fn get(&self, key: &str) -> Option<V> {
        let mut guard = self.inner.lock();
        let inner = &mut *guard;
        let now = self.clock.now();

        match inner.entries.get(key).map(|entry| entry.is_expired(self.ttl, now)) {
            Some(false) => {
                inner.stats.record_hit();
                inner.entries.get(key).map(|entry| entry.value.clone())
            }
            Some(true) => {
                inner.entries.remove(key);
                inner.stats.record_expirations(1);
                inner.stats.record_miss();
                None
            }
            None => {
                inner.stats.record_miss();
                None
            }
        }
    }

    // == Set ==
    /// Stores `value` under `key` stamped with the current instant.
    ///
    /// Any previous entry for the key is replaced, value and timestamp
    /// together.
    pub fn set(&self, key: impl Into<String>, value: V) {
        let mut inner = self.inner.lock();
        let now = self.clock.now();
        inner.entries.insert(key.into(), CacheEntry::new(value, now));
    }

    // == Get Or Compute ==
    /// Returns the cached value for `key`, or computes, stores and returns it.
    ///
    /// `compute` runs without the lock held, so two callers missing at the
    /// same time may both compute; the later write wins.
    pub fn get_or_compute<F>(&self, key: &str, compute: F) -> V
    where
        F: FnOnce() -> V,
    {
        if let Some(value) = self.get(key) {
            return value;
        }
        let value = compute();
        self.set(key, value.clone());
        value
    }

    /// Fallible variant of [`ExpiringCache::get_or_compute`]. Errors are
    /// returned to the caller and never cached.
    pub fn try_get_or_compute<F, E>(&self, key: &str, compute: F) -> Result<V, E>
    where
        F: FnOnce() -> Result<V, E>,
    {
        if let Some(value) = self.get(key) {
            return Ok(value);
        }
        let value = compute()?;
        self.set(key, value.clone());
        Ok(value)
    }

    // == Invalidate ==
    /// Removes every key containing `pattern`, or everything when `pattern`
    /// is `None` or empty.
    ///
    /// Returns the number of entries removed.
    pub fn invalidate(&self, pattern: Option<&str>) -> usize {
        let mut guard = self.inner.lock();
        let inner = &mut *guard;
        let before = inner.entries.len();

        match pattern.filter(|p| !p.is_empty()) {
            Some(pattern) => inner.entries.retain(|key, _| !key.contains(pattern)),
            None => inner.entries.clear(),
        }

        let removed = before - inner.entries.len();
        inner.stats.record_invalidations(removed);
        removed
    }

    // == Clear ==
    /// Drops every entry.
    pub fn clear(&self) {
        self.invalidate(None);
    }

    // == Size ==
    /// Number of stored entries, including expired ones not yet swept.
    pub fn size(&self) -> usize {
        self.inner.lock().entries.len()
    }

    /// Number of entries that are still fresh.
    pub fn live_size(&self) -> usize {
        let inner = self.inner.lock();
        let now = self.clock.now();
        inner
            .entries
            .values()
            .filter(|entry| !entry.is_expired(self.ttl, now))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().entries.is_empty()
    }

    // == Cleanup Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup_expired(&self) -> usize {
        let mut guard = self.inner.lock();
        let inner = &mut *guard;
        let now = self.clock.now();
        let ttl = self.ttl;
        let before = inner.entries.len();

        inner.entries.retain(|_, entry| !entry.is_expired(ttl, now));

        let removed = before - inner.entries.len();
        inner.stats.record_expirations(removed);
        removed
    }

    // == Stats ==
    /// Snapshot of the cache counters.
    pub fn stats(&self) -> CacheStats {
        let inner = self.inner.lock();
        let mut stats = inner.stats.clone();
        stats.total_entries = inner.entries.len();
        stats
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

impl<V> fmt::Debug for ExpiringCache<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExpiringCache")
            .field("ttl", &self.ttl)
            .field("entries", &self.inner.lock().entries.len())
            .finish_non_exhaustive()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use std::thread;

    const TTL: Duration = Duration::from_secs(300);

    fn cache_with_clock() -> (ExpiringCache<String>, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new());
        let cache = ExpiringCache::with_clock(TTL, clock.clone());
        (cache, clock)
    }

    #[test]
    fn test_cache_new() {
        let (cache, _) = cache_with_clock();
        assert_eq!(cache.size(), 0);
        assert!(cache.is_empty());
        assert_eq!(cache.ttl(), TTL);
    }

    #[test]
    fn test_set_and_get() {
        let (cache, _) = cache_with_clock();

        cache.set("key1", "value1".to_string());

        assert_eq!(cache.get("key1").as_deref(), Some("value1"));
        assert_eq!(cache.size(), 1);
    }

    #[test]
    fn test_get_missing_key() {
        let (cache, _) = cache_with_clock();
        assert!(cache.get("missing").is_none());
        assert_eq!(cache.stats().misses, 1);
    }

    #[test]
    fn test_value_served_until_ttl_boundary() {
        let (cache, clock) = cache_with_clock();
        cache.set("key1", "value1".to_string());

        clock.advance(TTL - Duration::from_millis(1));
        assert_eq!(cache.get("key1").as_deref(), Some("value1"));

        clock.advance(Duration::from_millis(2));
        assert!(cache.get("key1").is_none());
    }

    #[test]
    fn test_expired_get_removes_entry() {
        let (cache, clock) = cache_with_clock();
        cache.set("key1", "value1".to_string());

        clock.advance(TTL + Duration::from_secs(1));
        assert_eq!(cache.size(), 1);
        assert!(cache.get("key1").is_none());
        assert_eq!(cache.size(), 0);

        let stats = cache.stats();
        assert_eq!(stats.expirations, 1);
        assert_eq!(stats.misses, 1);
    }

    #[test]
    fn test_overwrite_resets_timestamp() {
        let (cache, clock) = cache_with_clock();

        cache.set("key1", "value1".to_string());
        clock.advance(Duration::from_secs(200));
        cache.set("key1", "value2".to_string());
        clock.advance(Duration::from_secs(200));

        assert_eq!(cache.get("key1").as_deref(), Some("value2"));
        assert_eq!(cache.size(), 1);
    }

    #[test]
    fn test_invalidate_by_pattern() {
        let (cache, _) = cache_with_clock();
        cache.set("user_1_a", "a".to_string());
        cache.set("user_1_b", "b".to_string());
        cache.set("user_2_a", "c".to_string());

        let removed = cache.invalidate(Some("user_1"));

        assert_eq!(removed, 2);
        assert!(cache.get("user_1_a").is_none());
        assert!(cache.get("user_1_b").is_none());
        assert_eq!(cache.get("user_2_a").as_deref(), Some("c"));
        assert_eq!(cache.stats().invalidations, 2);
    }

    #[test]
    fn test_invalidate_without_pattern_clears() {
        let (cache, _) = cache_with_clock();
        cache.set("a", "1".to_string());
        cache.set("b", "2".to_string());

        assert_eq!(cache.invalidate(None), 2);
        assert_eq!(cache.size(), 0);
        assert!(cache.get("a").is_none());
        assert!(cache.get("b").is_none());
    }

    #[test]
    fn test_empty_pattern_clears() {
        let (cache, _) = cache_with_clock();
        cache.set("a", "1".to_string());

        assert_eq!(cache.invalidate(Some("")), 1);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_clear() {
        let (cache, _) = cache_with_clock();
        cache.set("a", "1".to_string());
        cache.clear();
        assert_eq!(cache.size(), 0);
    }

    #[test]
    fn test_size_counts_unswept_expired_entries() {
        let (cache, clock) = cache_with_clock();
        cache.set("old", "1".to_string());
        clock.advance(TTL);
        cache.set("new", "2".to_string());

        assert_eq!(cache.size(), 2);
        assert_eq!(cache.live_size(), 1);
    }

    #[test]
    fn test_cleanup_expired() {
        let (cache, clock) = cache_with_clock();
        cache.set("key1", "value1".to_string());
        clock.advance(Duration::from_secs(250));
        cache.set("key2", "value2".to_string());
        clock.advance(Duration::from_secs(100));

        let removed = cache.cleanup_expired();

        assert_eq!(removed, 1);
        assert_eq!(cache.size(), 1);
        assert_eq!(cache.get("key2").as_deref(), Some("value2"));
        assert_eq!(cache.stats().expirations, 1);
    }

    #[test]
    fn test_get_or_compute_short_circuits_on_hit() {
        let (cache, _) = cache_with_clock();
        let mut calls = 0;

        let first = cache.get_or_compute("summary", || {
            calls += 1;
            "computed".to_string()
        });
        let second = cache.get_or_compute("summary", || {
            calls += 1;
            "recomputed".to_string()
        });

        assert_eq!(first, "computed");
        assert_eq!(second, "computed");
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_get_or_compute_recomputes_after_expiry() {
        let (cache, clock) = cache_with_clock();
        cache.get_or_compute("summary", || "old".to_string());
        clock.advance(TTL);

        let value = cache.get_or_compute("summary", || "new".to_string());
        assert_eq!(value, "new");
    }

    #[test]
    fn test_try_get_or_compute_does_not_cache_errors() {
        let (cache, _) = cache_with_clock();

        let failed: Result<String, &str> = cache.try_get_or_compute("k", || Err("db down"));
        assert_eq!(failed, Err("db down"));
        assert!(cache.is_empty());

        let ok: Result<String, &str> = cache.try_get_or_compute("k", || Ok("v".to_string()));
        assert_eq!(ok.as_deref(), Ok("v"));
        assert_eq!(cache.size(), 1);
    }

    #[test]
    fn test_concurrent_set_and_get() {
        const THREADS: usize = 8;
        const OPS: usize = 500;
        const KEYS: usize = 50;

        let cache: Arc<ExpiringCache<usize>> = Arc::new(ExpiringCache::new(TTL));

        thread::scope(|scope| {
            for t in 0..THREADS {
                let cache = Arc::clone(&cache);
                scope.spawn(move || {
                    for i in 0..OPS {
                        let key = format!("k{}", i % KEYS);
                        cache.set(key.clone(), t * OPS + i);
                        assert!(cache.get(&key).is_some());
                    }
                });
            }
        });

        let stats = cache.stats();
        assert_eq!(cache.size(), KEYS);
        assert_eq!(stats.hits, (THREADS * OPS) as u64);
        assert_eq!(stats.misses, 0);
    }
}
