//! Diploma search parameters

use serde::{Deserialize, Serialize};

use crate::error::{MIN_SEARCH_CRITERIA, ValidationError};
use crate::util::{non_blank, parse_calendar_date};

/// Public diploma search query
///
/// At least [`MIN_SEARCH_CRITERIA`] of the five criteria must be filled in
/// before a search is sent. Blank strings do not count.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiplomaSearchParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diploma_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub book_number: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
}

impl DiplomaSearchParams {
    /// Number of filled criteria
    pub fn filled_count(&self) -> usize {
        [
            non_blank(self.diploma_number.as_deref()).is_some(),
            self.book_number.is_some(),
            non_blank(self.student_id.as_deref()).is_some(),
            non_blank(self.full_name.as_deref()).is_some(),
            non_blank(self.date_of_birth.as_deref()).is_some(),
        ]
        .into_iter()
        .filter(|filled| *filled)
        .count()
    }

    /// Enforce the minimum number of criteria
    pub fn validate(&self) -> Result<(), ValidationError> {
        let provided = self.filled_count();
        if provided < MIN_SEARCH_CRITERIA {
            return Err(ValidationError::InsufficientSearchCriteria {
                required: MIN_SEARCH_CRITERIA,
                provided,
            });
        }
        Ok(())
    }

    /// Query pairs to send, trimmed, blanks dropped, date as `YYYY-MM-DD`
    /// when it parses (left as typed otherwise)
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(5);
        if let Some(v) = non_blank(self.diploma_number.as_deref()) {
            pairs.push(("diplomaNumber", v.to_string()));
        }
        if let Some(v) = self.book_number {
            pairs.push(("bookNumber", v.to_string()));
        }
        if let Some(v) = non_blank(self.student_id.as_deref()) {
            pairs.push(("studentId", v.to_string()));
        }
        if let Some(v) = non_blank(self.full_name.as_deref()) {
            pairs.push(("fullName", v.to_string()));
        }
        if let Some(v) = non_blank(self.date_of_birth.as_deref()) {
            let date = parse_calendar_date(v)
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| v.to_string());
            pairs.push(("dateOfBirth", date));
        }
        pairs
    }
}
