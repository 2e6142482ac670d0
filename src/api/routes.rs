//! API Routes
//!
//! Configures the Axum router with all guard service endpoints.

use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    health_handler, invalidate_handler, invalidate_user_handler, stats_handler, AppState,
};
use super::middleware::rate_limit_guard;

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /health` - Health check endpoint
/// - `GET /stats` - Cache and rate limiter statistics
/// - `POST /cache/invalidate` - Drop entries by pattern (rate limited)
/// - `DELETE /cache/users/:user_id` - Drop one user's aggregates (rate limited)
///
/// # Middleware
/// - Rate limit: one shared limiter over every mutation route
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mutations = Router::new()
        .route("/cache/invalidate", post(invalidate_handler))
        .route("/cache/users/:user_id", delete(invalidate_user_handler))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_guard,
        ));

    Router::new()
        .route("/health", get(health_handler))
        .route("/stats", get(stats_handler))
        .merge(mutations)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
