//! Sliding-Window Limiter Module
//!
//! Exact per-key admission control over a trailing time window.

use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use crate::clock::{Clock, SystemClock};
use crate::rate_limit::LimiterStats;

// == Sliding Window Limiter ==
/// Bounds how many operations each key may perform within a trailing window.
///
/// Every admitted request is remembered by its instant. A request is admitted
/// only while fewer than `max_requests` remembered instants fall inside
/// `(now - window, now]`. Rejected requests are not remembered.
pub struct SlidingWindowLimiter {
    inner: Mutex<Inner>,
    max_requests: usize,
    window: Duration,
    clock: Arc<dyn Clock>,
}

#[derive(Default)]
struct Inner {
    requests: HashMap<String, VecDeque<Instant>>,
    allowed: u64,
    rejected: u64,
}

impl SlidingWindowLimiter {
    // == Constructor ==
    /// Creates a limiter reading time from the system clock.
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self::with_clock(max_requests, window, Arc::new(SystemClock))
    }

    /// Creates a limiter reading time from `clock`.
    pub fn with_clock(max_requests: usize, window: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
            max_requests,
            window,
            clock,
        }
    }

    // == Is Allowed ==
    /// Decides whether `key` may perform one more operation now.
    ///
    /// Prunes the key's history, rejects if the window is full, otherwise
    /// records the request and admits it. The whole sequence runs under one
    /// lock acquisition.
    pub fn is_allowed(&self, key: &str) -> bool {
        let mut guard = self.inner.lock();
        let inner = &mut *guard;
        let now = self.clock.now();

        let timestamps = inner.requests.entry(key.to_string()).or_default();
        prune(timestamps, self.window, now);

        if timestamps.len() >= self.max_requests {
            inner.rejected += 1;
            return false;
        }

        timestamps.push_back(now);
        inner.allowed += 1;
        true
    }

    // == Remaining ==
    /// Requests `key` could still make right now, without recording anything.
    pub fn remaining(&self, key: &str) -> usize {
        let inner = self.inner.lock();
        let now = self.clock.now();
        let used = inner.requests.get(key).map_or(0, |timestamps| {
            timestamps
                .iter()
                .filter(|t| in_window(**t, self.window, now))
                .count()
        });
        self.max_requests.saturating_sub(used)
    }

    // == Reset ==
    /// Forgets all history for `key`.
    pub fn reset(&self, key: &str) {
        self.inner.lock().requests.remove(key);
    }

    // == Cleanup ==
    /// Prunes every key and drops those left without history.
    ///
    /// Returns the number of keys dropped.
    pub fn cleanup(&self) -> usize {
        let mut inner = self.inner.lock();
        let now = self.clock.now();
        let window = self.window;
        let before = inner.requests.len();

        inner.requests.retain(|_, timestamps| {
            prune(timestamps, window, now);
            !timestamps.is_empty()
        });

        before - inner.requests.len()
    }

    // == Introspection ==
    /// Number of keys currently tracked, including drained ones not yet swept.
    pub fn tracked_keys(&self) -> usize {
        self.inner.lock().requests.len()
    }

    pub fn stats(&self) -> LimiterStats {
        let inner = self.inner.lock();
        LimiterStats {
            allowed: inner.allowed,
            rejected: inner.rejected,
            tracked_keys: inner.requests.len(),
        }
    }

    pub fn max_requests(&self) -> usize {
        self.max_requests
    }

    pub fn window(&self) -> Duration {
        self.window
    }
}

impl fmt::Debug for SlidingWindowLimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlidingWindowLimiter")
            .field("max_requests", &self.max_requests)
            .field("window", &self.window)
            .finish_non_exhaustive()
    }
}

fn in_window(timestamp: Instant, window: Duration, now: Instant) -> bool {
    now.saturating_duration_since(timestamp) < window
}

// Timestamps are appended in order, so expired ones sit at the front.
fn prune(timestamps: &mut VecDeque<Instant>, window: Duration, now: Instant) {
    while let Some(&oldest) = timestamps.front() {
        if in_window(oldest, window, now) {
            break;
        }
        timestamps.pop_front();
    }
}
