//! API error handling
//!
//! Every failure becomes a `{success: false, error}` envelope. The message is
//! passed through untouched; only the status code depends on the configured
//! [`ErrorStatusPolicy`].

use application::ApplicationError;
use axum::extract::rejection::PathRejection;
use axum::http::StatusCode;
use infrastructure::ErrorStatusPolicy;
use thiserror::Error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed path parameter or unknown data type
    #[error("{0}")]
    BadRequest(String),

    /// The resolver has no matching entity
    #[error("{0}")]
    NotFound(String),

    /// The resolver failed
    #[error("{0}")]
    Upstream(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// Status code for this error under `policy`
    pub const fn status(&self, policy: ErrorStatusPolicy) -> StatusCode {
        match policy {
            ErrorStatusPolicy::Uniform => StatusCode::BAD_REQUEST,
            ErrorStatusPolicy::Differentiated => match self {
                Self::BadRequest(_) => StatusCode::BAD_REQUEST,
                Self::NotFound(_) => StatusCode::NOT_FOUND,
                Self::Upstream(_) => StatusCode::BAD_GATEWAY,
                Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    /// Message for the `error` field of the envelope
    pub fn message(&self) -> &str {
        match self {
            Self::BadRequest(msg)
            | Self::NotFound(msg)
            | Self::Upstream(msg)
            | Self::Internal(msg) => msg,
        }
    }
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        match err {
            ApplicationError::Domain(e) => Self::BadRequest(e.to_string()),
            ApplicationError::NotFound(msg) => Self::NotFound(msg),
            ApplicationError::ExternalService(msg) => Self::Upstream(msg),
            ApplicationError::Internal(msg) => Self::Internal(msg),
        }
    }
}

impl From<domain::DomainError> for ApiError {
    fn from(err: domain::DomainError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}
