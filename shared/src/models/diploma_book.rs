//! Diploma Book Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::util::lenient;

/// Diploma book entity (yearly ledger numbering issued diplomas)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiplomaBook {
    pub id: String,
    pub year: i32,
    /// Last number handed out in this book
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub current_number: i64,
    #[serde(
        default,
        deserialize_with = "lenient::timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(
        default,
        deserialize_with = "lenient::timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Create diploma book payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiplomaBookCreate {
    pub year: i32,
}

impl DiplomaBookCreate {
    pub fn new(year: i32) -> Self {
        Self { year }
    }

    /// Check the year against the accepted range
    pub fn validate(&self, current_year: i32) -> Result<(), ValidationError> {
        crate::validation::book_year(self.year, current_year)
    }
}

/// Update diploma book payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiplomaBookUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_number: Option<i64>,
}

impl DiplomaBookUpdate {
    pub fn validate(&self, current_year: i32) -> Result<(), ValidationError> {
        if let Some(year) = self.year {
            crate::validation::book_year(year, current_year)?;
        }
        Ok(())
    }
}
