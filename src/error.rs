//! Error types for kumarmind.
//!
//! All errors are strongly typed using thiserror. Failures of the mind
//! itself are not listed here: they travel through `Cognition::react`
//! as the mind's own error type.

use thiserror::Error;

/// Errors raised while reading or adopting a cognition document.
#[derive(Debug, Error)]
pub enum MindError {
    /// A field is missing or has the wrong shape.
    #[error("Malformed document: field '{field}' {reason}")]
    MalformedDocument {
        /// Path of the offending field, e.g. `answers[1]`.
        field: String,
        /// What is wrong with it.
        reason: String,
    },

    /// The text is not JSON at all.
    #[error("Invalid JSON text: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

impl MindError {
    /// Creates a malformed-document error for one field.
    #[must_use]
    pub fn malformed(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedDocument {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Returns true if this is a malformed-document error.
    #[must_use]
    pub const fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedDocument { .. })
    }

    /// Returns the offending field for malformed-document errors.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::MalformedDocument { field, .. } => Some(field),
            Self::InvalidJson(_) => None,
        }
    }
}

/// Transport errors of the transit provider stub.
#[derive(Debug, Error)]
pub enum TransitError {
    /// The endpoint could not be reached.
    #[error("Connection failed: {message}")]
    ConnectionFailed {
        /// Transport detail.
        message: String,
    },

    /// The response was not understood.
    #[error("Failed to parse response: {message}")]
    ParseFailed {
        /// Parser detail.
        message: String,
    },

    /// The endpoint answered with an error status.
    #[error("Server error (code {code}): {message}")]
    ServerError {
        /// HTTP status code.
        code: u32,
        /// Server-supplied description.
        message: String,
    },
}

impl TransitError {
    /// Returns true if this error is retryable.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::ConnectionFailed { .. } => true,
            Self::ServerError { code, .. } => *code >= 500,
            Self::ParseFailed { .. } => false,
        }
    }
}

/// Result type alias for kumarmind document operations.
pub type MindResult<T> = Result<T, MindError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_message_names_field() {
        let err = MindError::malformed("query_date", "is missing");
        let msg = format!("{err}");
        assert!(msg.contains("query_date"));
        assert!(msg.contains("is missing"));
        assert!(err.is_malformed());
        assert_eq!(err.field(), Some("query_date"));
    }

    #[test]
    fn test_invalid_json_from_serde() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: MindError = parse_err.into();
        assert!(!err.is_malformed());
        assert!(err.field().is_none());
        assert!(format!("{err}").contains("Invalid JSON"));
    }

    #[test]
    fn test_transit_error_retryable() {
        let err = TransitError::ConnectionFailed {
            message: "refused".to_string(),
        };
        assert!(err.is_retryable());
        assert!(format!("{err}").contains("refused"));

        let err = TransitError::ServerError {
            code: 503,
            message: "busy".to_string(),
        };
        assert!(err.is_retryable());

        let err = TransitError::ServerError {
            code: 404,
            message: "gone".to_string(),
        };
        assert!(!err.is_retryable());

        let err = TransitError::ParseFailed {
            message: "bad xml".to_string(),
        };
        assert!(!err.is_retryable());
    }
}
