//! Request and Response models for the guard service API
//!
//! DTOs used for serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

pub use requests::InvalidateRequest;
pub use responses::{
    CacheStatsResponse, ErrorResponse, HealthResponse, InvalidateResponse, RateLimitStatsResponse,
    StatsResponse,
};
