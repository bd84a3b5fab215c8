//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// A request parameter could not be parsed
    #[error("invalid {name} {value:?}: {reason}")]
    InvalidParameter {
        name: String,
        value: String,
        reason: String,
    },

    /// The requested data type is not one of the recognized lookup types
    #[error("invalid data type requested: {0}")]
    UnknownDataType(String),

    /// Date arithmetic left the representable calendar range
    #[error("Invalid date/time: {0}")]
    InvalidDateTime(String),
}

impl DomainError {
    /// Create an invalid parameter error
    pub fn invalid_parameter(
        name: impl Into<String>,
        value: impl Into<String>,
        reason: impl ToString,
    ) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            value: value.into(),
            reason: reason.to_string(),
        }
    }
}
