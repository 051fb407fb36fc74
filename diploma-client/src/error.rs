//! Client error types

use thiserror::Error;

use shared::ValidationError;

/// Message used when the server rejects a call without explaining why
pub const GENERIC_SERVER_ERROR: &str = "Server returned an error";

/// Client error type
///
/// Every variant renders as a message fit for the operator; callers that
/// only display errors never need to match on the kind.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed (network, TLS, timeout, body decoding)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with an empty or `null` body
    #[error("No response from server")]
    NoResponse,

    /// Envelope status other than 200
    #[error("{message}")]
    Api { status: u16, message: String },

    /// Local precondition failed; nothing was sent
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Authentication required
    #[error("Authentication required")]
    Unauthorized,

    /// Permission denied
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// Envelope failure with the server message, or the generic fallback
    pub fn api(status: u16, message: Option<String>) -> Self {
        let message = message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| GENERIC_SERVER_ERROR.to_string());
        Self::Api { status, message }
    }

    /// True when the failure happened before any request was sent
    pub fn is_local(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_uses_server_message() {
        let err = ClientError::api(409, Some("Diploma number already exists".into()));
        assert_eq!(err.to_string(), "Diploma number already exists");
    }

    #[test]
    fn test_api_error_falls_back_to_generic_message() {
        assert_eq!(ClientError::api(500, None).to_string(), GENERIC_SERVER_ERROR);
        assert_eq!(
            ClientError::api(500, Some("  ".into())).to_string(),
            GENERIC_SERVER_ERROR
        );
    }

    #[test]
    fn test_validation_error_is_local() {
        let err: ClientError = ValidationError::DuplicateYear(2024).into();
        assert!(err.is_local());
        assert_eq!(err.to_string(), "A diploma book already exists for year 2024");
        assert!(!ClientError::NoResponse.is_local());
    }
}
