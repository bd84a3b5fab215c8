//! Resolver error types

use thiserror::Error;

/// Errors that can occur while talking to the resolver
#[derive(Debug, Error)]
pub enum ResolverError {
    /// Connection to the resolver failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request timeout
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },

    /// The resolver has no matching entity
    #[error("{0}")]
    NotFound(String),

    /// The resolver answered with a non-success status
    #[error("Request failed (HTTP {status}): {message}")]
    RequestFailed {
        /// HTTP status code
        status: u16,
        /// Error message reported by the resolver
        message: String,
    },

    /// Failed to parse response from the resolver
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_is_verbatim() {
        let err = ResolverError::NotFound("record not found".to_string());
        assert_eq!(err.to_string(), "record not found");
    }

    #[test]
    fn test_error_display() {
        let err = ResolverError::RequestFailed {
            status: 500,
            message: "database is locked".to_string(),
        };
        assert!(err.to_string().contains("500"));
        assert!(err.to_string().contains("database is locked"));

        let err = ResolverError::Timeout { timeout_secs: 10 };
        assert!(err.to_string().contains("10"));
    }
}
