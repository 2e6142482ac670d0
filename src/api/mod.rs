//! API Module
//!
//! HTTP handlers, rate-limit middleware and routing for the guard service.
//!
//! # Endpoints
//! - `GET /health` - Health check endpoint
//! - `GET /stats` - Cache and rate limiter statistics
//! - `POST /cache/invalidate` - Drop cached entries by pattern
//! - `DELETE /cache/users/:user_id` - Drop one user's cached aggregates

pub mod handlers;
pub mod middleware;
pub mod routes;

pub use handlers::*;
pub use middleware::{limiter_key, rate_limit_guard, USER_ID_HEADER};
pub use routes::create_router;
