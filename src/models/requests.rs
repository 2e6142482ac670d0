//! Request DTOs for the guard service API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

/// Longest accepted invalidation pattern, in bytes
pub const MAX_PATTERN_LENGTH: usize = 256;

/// Request body for POST /cache/invalidate
///
/// # Fields
/// - `pattern`: substring selecting the keys to drop; absent or null clears
///   the whole cache
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InvalidateRequest {
    #[serde(default)]
    pub pattern: Option<String>,
}

impl InvalidateRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        match &self.pattern {
            Some(pattern) if pattern.len() > MAX_PATTERN_LENGTH => Some(format!(
                "Pattern exceeds maximum length of {} characters",
                MAX_PATTERN_LENGTH
            )),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalidate_request_deserialize() {
        let req: InvalidateRequest = serde_json::from_str(r#"{"pattern": "user_1_"}"#).unwrap();
        assert_eq!(req.pattern.as_deref(), Some("user_1_"));
    }

    #[test]
    fn test_invalidate_request_without_pattern() {
        let req: InvalidateRequest = serde_json::from_str("{}").unwrap();
        assert!(req.pattern.is_none());

        let req: InvalidateRequest = serde_json::from_str(r#"{"pattern": null}"#).unwrap();
        assert!(req.pattern.is_none());
    }

    #[test]
    fn test_validate_long_pattern() {
        let req = InvalidateRequest {
            pattern: Some("x".repeat(MAX_PATTERN_LENGTH + 1)),
        };
        assert!(req.validate().is_some());
    }

    #[test]
    fn test_validate_valid_request() {
        let req = InvalidateRequest {
            pattern: Some("user_3_".to_string()),
        };
        assert!(req.validate().is_none());
        assert!(InvalidateRequest::default().validate().is_none());
    }
}
