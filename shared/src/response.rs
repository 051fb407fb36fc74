//! API Response types
//!
//! Envelope returned by every diploma registry endpoint.

use serde::{Deserialize, Serialize};

/// The only status code the registry treats as success
pub const STATUS_OK: u16 = 200;

/// Unified API response structure
///
/// All API responses follow this format:
/// ```json
/// {
///     "data": { ... },
///     "status": 200,
///     "message": "optional text"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Response payload (absent on most failures)
    pub data: Option<T>,
    /// Application status (200 = success)
    pub status: u16,
    /// Human-readable message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response
    pub fn ok(data: T) -> Self {
        Self {
            data: Some(data),
            status: STATUS_OK,
            message: None,
        }
    }

    /// Create a successful response without payload
    pub fn empty() -> Self {
        Self {
            data: None,
            status: STATUS_OK,
            message: None,
        }
    }

    /// Create an error response
    pub fn error(status: u16, message: impl Into<String>) -> Self {
        Self {
            data: None,
            status,
            message: Some(message.into()),
        }
    }

    /// Attach a message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn is_success(&self) -> bool {
        self.status == STATUS_OK
    }

    /// Consume the envelope, keeping only the payload
    pub fn into_data(self) -> Option<T> {
        self.data
    }
}

/// Payload of the `/validate/*` endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidityCheck {
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ValidityCheck {
    pub fn valid() -> Self {
        Self {
            valid: true,
            message: None,
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: Some(message.into()),
        }
    }
}

/// Marker payload cached after a successful delete
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deleted {
    pub deleted: bool,
}

impl Default for Deleted {
    fn default() -> Self {
        Self { deleted: true }
    }
}
