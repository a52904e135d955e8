//! Error types for centralconfig-client.

use std::fmt;

/// Result type alias for centralconfig-client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Boxed error produced by a transport implementation.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur when talking to the centralconfig service.
///
/// Application-level failures reported by the service (a non-success `status`
/// inside a well-formed envelope) are never turned into a `ClientError`;
/// callers inspect the envelope for those.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// A required field is missing or invalid. Raised before any network call.
    #[error("Configuration error: {0}")]
    Configuration(#[from] ValidationError),

    /// The request could not be serialized.
    #[error("Failed to encode request: {0}")]
    Encode(#[source] serde_json::Error),

    /// The HTTP exchange could not be completed (connect, DNS, timeout, I/O).
    #[error("Transport error: {0}")]
    Transport(#[source] BoxError),

    /// The response body is not valid JSON or does not have the envelope shape.
    #[error("Failed to decode response: {source}")]
    Decode {
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
        /// Raw response body, kept for logging context
        body: String,
    },

    /// The operation was abandoned because its cancellation signal fired.
    #[error("Request was cancelled")]
    Cancelled,

    #[cfg(feature = "settings")]
    /// Client settings could not be loaded.
    #[error("Failed to load client settings: {0}")]
    Settings(String),
}

impl ClientError {
    /// Wrap any error as a transport failure.
    pub fn transport<E>(err: E) -> Self
    where
        E: Into<BoxError>,
    {
        Self::Transport(err.into())
    }

    pub(crate) fn decode(source: serde_json::Error, body: &[u8]) -> Self {
        Self::Decode {
            source,
            body: String::from_utf8_lossy(body).into_owned(),
        }
    }

    /// Returns true for missing/invalid field errors.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }

    /// Returns true for transport failures.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Returns true for response decode failures.
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }

    /// Returns true if the operation was cancelled.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

/// Validation error for client fields and settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is empty.
    MissingField {
        /// The field name
        field: String,
    },

    /// A specific field has an invalid value.
    InvalidField {
        /// The field name
        field: String,
        /// The reason why it's invalid
        reason: String,
    },

    /// Multiple validation errors occurred.
    Multiple(Vec<ValidationError>),
}

impl ValidationError {
    /// Create a missing field error.
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Create an invalid field error.
    pub fn invalid_field(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Name of the offending field, if there is exactly one.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::MissingField { field } | Self::InvalidField { field, .. } => Some(field),
            Self::Multiple(_) => None,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField { field } => {
                write!(f, "Field '{}' is required but was empty", field)
            }
            Self::InvalidField { field, reason } => {
                write!(f, "Field '{}' is invalid: {}", field, reason)
            }
            Self::Multiple(errors) => {
                writeln!(f, "Multiple validation errors:")?;
                for (i, err) in errors.iter().enumerate() {
                    writeln!(f, "  {}. {}", i + 1, err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ValidationError {}
