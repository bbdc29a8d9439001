//! Error types for the PalliCare client
//!
//! ## Table of Contents
//! - **ErrorCode**: symbolic failure categories shared with the UI layer
//! - **ApiError**: the uniform error shape every caller receives
//! - **Result**: type alias for `Result<T, ApiError>`

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ApiError>;

/// Fixed message used for every transport-level failure.
pub const CONNECTIVITY_ADVISORY: &str =
    "Unable to reach the server. Please check your internet connection and try again.";

/// Symbolic failure category attached to every [`ApiError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// No response was received (offline, DNS failure, timeout)
    NetworkError,
    /// HTTP 401; the stored session is discarded as a side effect
    Unauthorized,
    /// HTTP 403
    Forbidden,
    /// HTTP 404
    NotFound,
    /// HTTP 422, or a client-side validation failure before dispatch
    ValidationError,
    /// HTTP 429
    RateLimitExceeded,
    /// HTTP 500/502/503/504
    ServerError,
    /// Any other non-success status
    ApiError,
    /// Failure before the request was dispatched (bad config, bad body)
    RequestConfigError,
}

impl ErrorCode {
    /// Wire/display name of the category
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NetworkError => "NETWORK_ERROR",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden => "FORBIDDEN",
            Self::NotFound => "NOT_FOUND",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::RateLimitExceeded => "RATE_LIMIT_EXCEEDED",
            Self::ServerError => "SERVER_ERROR",
            Self::ApiError => "API_ERROR",
            Self::RequestConfigError => "REQUEST_CONFIG_ERROR",
        }
    }

    /// Generic user-facing fallback when the server supplied no message
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::NetworkError => CONNECTIVITY_ADVISORY,
            Self::Unauthorized => "Your session has expired. Please sign in again.",
            Self::Forbidden => "You do not have permission to perform this action.",
            Self::NotFound => "The requested item could not be found.",
            Self::ValidationError => "Some of the submitted fields are invalid.",
            Self::RateLimitExceeded => "Too many requests. Please wait a moment and retry.",
            Self::ServerError => "The server encountered an error. Please try again later.",
            Self::ApiError => "The request could not be completed.",
            Self::RequestConfigError => "The request could not be prepared.",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Uniform error produced by the HTTP client's failure classification.
///
/// Callers never see transport-specific error types; every failure path in
/// the crate converges on this shape.
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
#[error("{code}: {message}")]
pub struct ApiError {
    /// User-presentable message (server-supplied when available)
    pub message: String,
    /// HTTP status, or `None` when no response was received
    pub status: Option<u16>,
    /// Symbolic category
    pub code: ErrorCode,
    /// Raw server payload, when one was returned
    pub data: Option<serde_json::Value>,
    /// Classification time
    pub timestamp: DateTime<Utc>,
}

impl ApiError {
    /// Create an error with an explicit code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
            code,
            data: None,
            timestamp: Utc::now(),
        }
    }

    /// Transport failure: no response was received
    pub fn network() -> Self {
        Self::new(ErrorCode::NetworkError, CONNECTIVITY_ADVISORY)
    }

    /// Pre-dispatch failure (malformed configuration or body)
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::RequestConfigError, message)
    }

    /// Client-side validation failure, raised before any network call
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationError, message)
    }

    /// Classify a received HTTP status.
    ///
    /// `server_message` is the message extracted from the response body and
    /// `transport_message` is the transport's own description; for statuses
    /// outside the fixed table the first available of the two is used, else
    /// the category fallback.
    pub fn from_status(
        status: u16,
        server_message: Option<String>,
        transport_message: Option<String>,
        data: Option<serde_json::Value>,
    ) -> Self {
        let code = match status {
            401 => ErrorCode::Unauthorized,
            403 => ErrorCode::Forbidden,
            404 => ErrorCode::NotFound,
            422 => ErrorCode::ValidationError,
            429 => ErrorCode::RateLimitExceeded,
            500 | 502 | 503 | 504 => ErrorCode::ServerError,
            _ => ErrorCode::ApiError,
        };

        let message = server_message
            .or(transport_message)
            .unwrap_or_else(|| code.fallback_message().to_string());

        Self {
            message,
            status: Some(status),
            code,
            data,
            timestamp: Utc::now(),
        }
    }

    /// Attach the raw server payload
    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Attach an HTTP status
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Whether this failure discarded the stored session
    pub fn is_unauthorized(&self) -> bool {
        self.code == ErrorCode::Unauthorized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification_table() {
        let cases = [
            (401, ErrorCode::Unauthorized),
            (403, ErrorCode::Forbidden),
            (404, ErrorCode::NotFound),
            (422, ErrorCode::ValidationError),
            (429, ErrorCode::RateLimitExceeded),
            (500, ErrorCode::ServerError),
            (502, ErrorCode::ServerError),
            (503, ErrorCode::ServerError),
            (504, ErrorCode::ServerError),
            (418, ErrorCode::ApiError),
            (409, ErrorCode::ApiError),
        ];

        for (status, expected) in cases {
            let err = ApiError::from_status(status, None, None, None);
            assert_eq!(err.code, expected, "status {}", status);
            assert_eq!(err.status, Some(status));
        }
    }

    #[test]
    fn test_message_precedence() {
        // Server message wins
        let err = ApiError::from_status(
            418,
            Some("teapot refused".into()),
            Some("transport text".into()),
            None,
        );
        assert_eq!(err.message, "teapot refused");

        // Transport message next
        let err = ApiError::from_status(418, None, Some("transport text".into()), None);
        assert_eq!(err.message, "transport text");

        // Category fallback last
        let err = ApiError::from_status(418, None, None, None);
        assert_eq!(err.message, ErrorCode::ApiError.fallback_message());
    }

    #[test]
    fn test_network_error_shape() {
        let err = ApiError::network();
        assert_eq!(err.code, ErrorCode::NetworkError);
        assert_eq!(err.message, CONNECTIVITY_ADVISORY);
        assert!(err.status.is_none());
    }

    #[test]
    fn test_code_wire_names() {
        assert_eq!(ErrorCode::NetworkError.as_str(), "NETWORK_ERROR");
        assert_eq!(ErrorCode::RateLimitExceeded.to_string(), "RATE_LIMIT_EXCEEDED");
        let json = serde_json::to_string(&ErrorCode::RequestConfigError).unwrap();
        assert_eq!(json, "\"REQUEST_CONFIG_ERROR\"");
    }
}
