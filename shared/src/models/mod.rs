//! Data models
//!
//! Wire records of the diploma registry API. All IDs are server-assigned
//! strings; JSON field names are camelCase.

pub mod diploma_book;
pub mod diploma_info;
pub mod form_field;
pub mod graduation_decision;
pub mod search;

// Re-exports
pub use diploma_book::*;
pub use diploma_info::*;
pub use form_field::*;
pub use graduation_decision::*;
pub use search::*;
