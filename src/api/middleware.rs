//! Rate Limit Middleware
//!
//! Guards mutation routes with the shared sliding-window limiter.

use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use tracing::warn;

use super::handlers::AppState;
use crate::error::{GuardError, Result};

/// Header carrying the authenticated user's id, set by the auth layer
pub const USER_ID_HEADER: &str = "x-user-id";

const ANONYMOUS: &str = "anonymous";
const UNKNOWN_ORIGIN: &str = "unknown";

/// Builds the limiter key `"{origin}:{user}"` for a request.
///
/// The origin is the peer IP when the server was started with connect info,
/// otherwise `unknown`. The user falls back to `anonymous`.
pub fn limiter_key(peer: Option<SocketAddr>, headers: &HeaderMap) -> String {
    let origin = peer.map_or_else(|| UNKNOWN_ORIGIN.to_string(), |addr| addr.ip().to_string());
    let user = headers
        .get(USER_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(ANONYMOUS);

    format!("{origin}:{user}")
}

/// Rejects the request with 429 when its caller has exhausted the window.
pub async fn rate_limit_guard(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response> {
    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let key = limiter_key(peer, request.headers());

    if !state.limiter.is_allowed(&key) {
        warn!(%key, path = %request.uri().path(), "Rate limit exceeded");
        return Err(GuardError::RateLimited);
    }

    Ok(next.run(request).await)
}
