//! API Handlers
//!
//! HTTP request handlers for the guard service endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;
use tracing::info;

use crate::cache::{keys, ExpiringCache};
use crate::config::Config;
use crate::error::{GuardError, Result};
use crate::models::{
    CacheStatsResponse, HealthResponse, InvalidateRequest, InvalidateResponse,
    RateLimitStatsResponse, StatsResponse,
};
use crate::rate_limit::SlidingWindowLimiter;

/// Application state shared across all handlers.
///
/// Both components synchronize internally, so they are shared through a
/// plain `Arc` without an outer lock.
#[derive(Clone)]
pub struct AppState {
    /// Cache for aggregate JSON payloads
    pub cache: Arc<ExpiringCache<Value>>,
    /// Limiter guarding every mutation endpoint
    pub limiter: Arc<SlidingWindowLimiter>,
}

impl AppState {
    pub fn new(cache: ExpiringCache<Value>, limiter: SlidingWindowLimiter) -> Self {
        Self {
            cache: Arc::new(cache),
            limiter: Arc::new(limiter),
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            ExpiringCache::new(config.cache_ttl_duration()),
            SlidingWindowLimiter::new(
                config.rate_limit_max_requests,
                config.rate_limit_window_duration(),
            ),
        )
    }

    /// Drops every cached aggregate belonging to `user_id`.
    ///
    /// Called after any write that changes that user's expenses or
    /// investments.
    pub fn invalidate_user(&self, user_id: i64) -> usize {
        self.cache.invalidate(Some(keys::user_scope(user_id).as_str()))
    }
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// Handler for GET /stats
///
/// Reports cache and rate limiter counters.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let cache = CacheStatsResponse::new(
        &state.cache.stats(),
        state.cache.live_size(),
        state.cache.ttl().as_secs(),
    );
    let rate_limit = RateLimitStatsResponse::new(
        &state.limiter.stats(),
        state.limiter.max_requests(),
        state.limiter.window().as_secs(),
    );

    Json(StatsResponse { cache, rate_limit })
}

/// Handler for POST /cache/invalidate
///
/// Drops cached entries whose key contains the pattern, or all of them.
pub async fn invalidate_handler(
    State(state): State<AppState>,
    Json(req): Json<InvalidateRequest>,
) -> Result<Json<InvalidateResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(GuardError::InvalidRequest(error_msg));
    }

    let pattern = req.pattern.as_deref();
    let removed = state.cache.invalidate(pattern);
    info!(?pattern, removed, "Cache invalidated");

    Ok(Json(InvalidateResponse::new(pattern, removed)))
}

/// Handler for DELETE /cache/users/:user_id
///
/// Drops every cached aggregate of one user.
pub async fn invalidate_user_handler(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Json<InvalidateResponse> {
    let removed = state.invalidate_user(user_id);
    info!(user_id, removed, "User aggregates invalidated");

    let scope = keys::user_scope(user_id);
    Json(InvalidateResponse::new(Some(scope.as_str()), removed))
}
