//! Error types for the analytics engine

use std::time::Duration;
use thiserror::Error;

/// Result type alias for engine operations
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

/// Errors that can occur while fetching or driving a dashboard
#[derive(Error, Debug)]
pub enum AnalyticsError {
    /// Error raised by the shared core types
    #[error(transparent)]
    Core(#[from] alumni_core::Error),

    /// HTTP transport error
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend answered with a non-success status
    #[error("Backend returned {status} for {path}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Requested path
        path: String,
    },

    /// Response body did not match the expected envelope
    #[error("Failed to decode response from {path}: {source}")]
    Decode {
        /// Requested path
        path: String,
        /// Underlying decode error
        #[source]
        source: serde_json::Error,
    },

    /// Request exceeded its deadline
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// Data source refused the request
    #[error("Data source unavailable: {message}")]
    SourceUnavailable {
        /// Error message
        message: String,
    },

    /// Invalid base URL or endpoint
    #[error("Invalid endpoint: {message}")]
    InvalidEndpoint {
        /// Error message
        message: String,
    },
}

impl AnalyticsError {
    /// Create a status error
    pub fn status(status: u16, path: impl Into<String>) -> Self {
        Self::Status {
            status,
            path: path.into(),
        }
    }

    /// Create a source unavailable error
    pub fn source_unavailable(message: impl Into<String>) -> Self {
        Self::SourceUnavailable {
            message: message.into(),
        }
    }

    /// Create an invalid endpoint error
    pub fn invalid_endpoint(message: impl Into<String>) -> Self {
        Self::InvalidEndpoint {
            message: message.into(),
        }
    }

    /// Check if retrying the same request could succeed
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Http(_) | Self::Timeout(_) | Self::SourceUnavailable { .. } => true,
            Self::Status { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_error_display() {
        let err = AnalyticsError::status(503, "analytics/companies");
        assert_eq!(err.to_string(), "Backend returned 503 for analytics/companies");

        let err = AnalyticsError::Timeout(Duration::from_secs(30));
        assert_eq!(err.to_string(), "Request timed out after 30s");
    }

    #[test]
    fn test_error_retryable() {
        assert!(AnalyticsError::status(502, "x").is_retryable());
        assert!(AnalyticsError::status(429, "x").is_retryable());
        assert!(!AnalyticsError::status(404, "x").is_retryable());
        assert!(AnalyticsError::source_unavailable("down").is_retryable());
        assert!(!AnalyticsError::invalid_endpoint("no scheme").is_retryable());
    }

    #[test]
    fn test_core_error_is_transparent() {
        let err = AnalyticsError::from(alumni_core::Error::PageOutOfRange {
            requested: 4,
            total_pages: 2,
        });
        assert_eq!(err.to_string(), "Page 4 is outside 1..=2");
        assert!(!err.is_retryable());
    }
}
