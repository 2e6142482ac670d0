//! Cache key builders for per-user aggregates.
//!
//! Every aggregate is keyed under `user_{id}_...` so that a single
//! [`user_scope`] invalidation drops all of one user's cached results after a
//! write.

use std::fmt::Display;

/// Loose per-user prefix, `user_{id}`.
///
/// Substring matching on this prefix also hits longer ids (`user_1` matches
/// `user_10_...`). Prefer [`user_scope`] for invalidation.
pub fn user_prefix(user_id: i64) -> String {
    format!("user_{user_id}")
}

/// Exact per-user scope, `user_{id}_`.
pub fn user_scope(user_id: i64) -> String {
    format!("user_{user_id}_")
}

pub fn expenses_summary(user_id: i64) -> String {
    format!("user_{user_id}_expenses_summary")
}

/// Month/year filtered expense summary. Absent filters render as `None`.
pub fn monthly_summary(user_id: i64, month: Option<u32>, year: Option<i32>) -> String {
    format!(
        "user_{user_id}_summary_{}_{}",
        render_filter(month),
        render_filter(year)
    )
}

pub fn monthly_trend(user_id: i64) -> String {
    format!("user_{user_id}_monthly_trend")
}

pub fn investments_summary(user_id: i64) -> String {
    format!("user_{user_id}_investments_summary")
}

pub fn investment_trend(user_id: i64, period: &str) -> String {
    format!("user_{user_id}_investment_trend_{period}")
}

fn render_filter<T: Display>(value: Option<T>) -> String {
    value.map_or_else(|| "None".to_string(), |v| v.to_string())
}
