//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Invalid request input (bad number, bad date, unknown data type)
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The resolver has no entity for the requested key
    ///
    /// The message is the resolver's own and is relayed verbatim.
    #[error("{0}")]
    NotFound(String),

    /// Any other resolver failure, message relayed verbatim
    #[error("{0}")]
    ExternalService(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}
