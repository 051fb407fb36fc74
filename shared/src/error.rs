//! Local validation errors
//!
//! Precondition failures detected before any request is sent. Every variant
//! renders as a message that can be shown to an operator as-is.

use thiserror::Error;

/// Minimum number of filled criteria for a diploma search
pub const MIN_SEARCH_CRITERIA: usize = 2;

/// Validation error raised by the domain rules
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is absent or blank
    #[error("{field} must not be empty")]
    MissingField { field: &'static str },

    /// A text field exceeds its length limit
    #[error("{field} must not exceed {max} characters")]
    TooLong { field: &'static str, max: usize },

    /// A field does not match its expected format
    #[error("{field} {reason}")]
    InvalidFormat { field: &'static str, reason: String },

    /// A date field could not be parsed
    #[error("{field} is not a valid date: {value}")]
    InvalidDate { field: &'static str, value: String },

    /// A date field lies in the future
    #[error("{field} must not be in the future")]
    FutureDate { field: &'static str },

    /// Book year outside the accepted range
    #[error("Year must be between {min} and {max}, got {year}")]
    YearOutOfRange { year: i32, min: i32, max: i32 },

    /// A diploma book already exists for the year
    #[error("A diploma book already exists for year {0}")]
    DuplicateYear(i32),

    /// Not enough search criteria filled in
    #[error("Please fill in at least {required} fields to search (got {provided})")]
    InsufficientSearchCriteria { required: usize, provided: usize },

    /// A custom field value does not satisfy the form field schema
    #[error("Custom field '{field}': {reason}")]
    CustomField { field: String, reason: String },
}

impl ValidationError {
    pub fn missing(field: &'static str) -> Self {
        Self::MissingField { field }
    }

    pub fn too_long(field: &'static str, max: usize) -> Self {
        Self::TooLong { field, max }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_readable() {
        assert_eq!(
            ValidationError::missing("Student ID").to_string(),
            "Student ID must not be empty"
        );
        assert_eq!(
            ValidationError::InsufficientSearchCriteria {
                required: MIN_SEARCH_CRITERIA,
                provided: 1
            }
            .to_string(),
            "Please fill in at least 2 fields to search (got 1)"
        );
        assert_eq!(
            ValidationError::DuplicateYear(2024).to_string(),
            "A diploma book already exists for year 2024"
        );
    }
}
