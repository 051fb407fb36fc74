//! Shared types for the diploma registry
//!
//! Domain models, the response envelope, and the local validation rules
//! used by the client crate and by anything serving the same API.

pub mod error;
pub mod models;
pub mod response;
pub mod util;
pub mod validation;

// Re-exports
pub use error::ValidationError;
pub use response::{ApiResponse, Deleted, ValidityCheck};
pub use serde::{Deserialize, Serialize};
