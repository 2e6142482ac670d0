//! Background Tasks Module
//!
//! Periodic sweeps that run alongside the server.
//!
//! # Tasks
//! - Cache sweep: removes expired cache entries
//! - Limiter sweep: drops rate-limit keys with no requests in the window

mod cleanup;

pub use cleanup::{spawn_cache_sweeper, spawn_limiter_sweeper};
