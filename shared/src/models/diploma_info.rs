//! Diploma Info Model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ValidationError;
use crate::util::{calendar_date, lenient, non_blank, parse_calendar_date};
use crate::validation::{max_len, not_in_future, required_text};

const DIPLOMA_NUMBER_MAX: usize = 20;
const STUDENT_ID_MAX: usize = 20;
const FULL_NAME_MAX: usize = 100;

/// Diploma info entity (one issued diploma)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiplomaInfo {
    pub id: String,
    /// Sequence number inside the diploma book (server assigned)
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub book_number: i64,
    pub diploma_number: String,
    pub student_id: String,
    pub full_name: String,
    #[serde(with = "calendar_date")]
    pub date_of_birth: NaiveDate,
    /// Graduation decision reference (String ID)
    pub graduation_decision_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diploma_book_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub custom_fields: Map<String, Value>,
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

/// Create diploma info payload
///
/// Every field is optional so that incomplete form input can be handed over
/// as-is; [`DiplomaInfoCreate::into_request`] rejects what is missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiplomaInfoCreate {
    pub diploma_number: Option<String>,
    pub student_id: Option<String>,
    pub full_name: Option<String>,
    /// Free text: `YYYY-MM-DD`, RFC 3339 or `DD/MM/YYYY`
    pub date_of_birth: Option<String>,
    pub graduation_decision_id: Option<String>,
    pub diploma_book_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub custom_fields: Map<String, Value>,
}

impl DiplomaInfoCreate {
    /// Check required fields and build the body sent to the server.
    ///
    /// Required: diploma number, student ID, full name, date of birth and
    /// graduation decision. The date of birth is normalized to `YYYY-MM-DD`
    /// and must not lie after `today`.
    pub fn into_request(&self, today: NaiveDate) -> Result<NewDiplomaInfo, ValidationError> {
        let diploma_number = non_blank(self.diploma_number.as_deref())
            .ok_or(ValidationError::missing("Diploma number"))?;
        let student_id = non_blank(self.student_id.as_deref())
            .ok_or(ValidationError::missing("Student ID"))?;
        let full_name =
            non_blank(self.full_name.as_deref()).ok_or(ValidationError::missing("Full name"))?;
        let raw_dob = non_blank(self.date_of_birth.as_deref())
            .ok_or(ValidationError::missing("Date of birth"))?;
        let graduation_decision_id = non_blank(self.graduation_decision_id.as_deref())
            .ok_or(ValidationError::missing("Graduation decision"))?;

        max_len("Diploma number", diploma_number, DIPLOMA_NUMBER_MAX)?;
        max_len("Student ID", student_id, STUDENT_ID_MAX)?;
        max_len("Full name", full_name, FULL_NAME_MAX)?;

        let date_of_birth =
            parse_calendar_date(raw_dob).ok_or_else(|| ValidationError::InvalidDate {
                field: "Date of birth",
                value: raw_dob.to_string(),
            })?;
        not_in_future("Date of birth", date_of_birth, today)?;

        Ok(NewDiplomaInfo {
            diploma_number: diploma_number.to_string(),
            student_id: student_id.to_string(),
            full_name: full_name.to_string(),
            date_of_birth,
            graduation_decision_id: graduation_decision_id.to_string(),
            diploma_book_id: non_blank(self.diploma_book_id.as_deref()).map(str::to_string),
            custom_fields: self.custom_fields.clone(),
        })
    }
}

/// Validated create body, as sent on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDiplomaInfo {
    pub diploma_number: String,
    pub student_id: String,
    pub full_name: String,
    #[serde(with = "calendar_date")]
    pub date_of_birth: NaiveDate,
    pub graduation_decision_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diploma_book_id: Option<String>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub custom_fields: Map<String, Value>,
}

/// Update diploma info payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiplomaInfoUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diploma_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(
        default,
        with = "calendar_date::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graduation_decision_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_fields: Option<Map<String, Value>>,
}

impl DiplomaInfoUpdate {
    pub fn validate(&self, today: NaiveDate) -> Result<(), ValidationError> {
        if let Some(v) = &self.diploma_number {
            required_text("Diploma number", Some(v), DIPLOMA_NUMBER_MAX)?;
        }
        if let Some(v) = &self.student_id {
            required_text("Student ID", Some(v), STUDENT_ID_MAX)?;
        }
        if let Some(v) = &self.full_name {
            required_text("Full name", Some(v), FULL_NAME_MAX)?;
        }
        if let Some(dob) = self.date_of_birth {
            not_in_future("Date of birth", dob, today)?;
        }
        if let Some(v) = &self.graduation_decision_id {
            required_text("Graduation decision", Some(v), usize::MAX)?;
        }
        Ok(())
    }
}
