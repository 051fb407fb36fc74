//! Graduation Decision Model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::util::{calendar_date, lenient};
use crate::validation::{not_in_future, required_text};

const NUMBER_MAX: usize = 50;
const SUMMARY_MAX: usize = 500;

/// Graduation decision entity (order authorizing a cohort's graduation)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraduationDecision {
    pub id: String,
    pub number: String,
    #[serde(with = "calendar_date")]
    pub issue_date: NaiveDate,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub summary: String,
    /// Diploma book reference (String ID)
    pub diploma_book_id: String,
    /// How many times the decision was looked up through public search
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub search_count: i64,
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

/// Create graduation decision payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraduationDecisionCreate {
    pub number: String,
    #[serde(with = "calendar_date")]
    pub issue_date: NaiveDate,
    pub summary: String,
    pub diploma_book_id: String,
}

impl GraduationDecisionCreate {
    /// Validate and return a trimmed copy ready to send
    pub fn normalized(&self, today: NaiveDate) -> Result<Self, ValidationError> {
        let number = required_text("Decision number", Some(&self.number), NUMBER_MAX)?;
        not_in_future("Issue date", self.issue_date, today)?;
        let summary = required_text("Summary", Some(&self.summary), SUMMARY_MAX)?;
        let diploma_book_id = required_text("Diploma book", Some(&self.diploma_book_id), usize::MAX)?;
        Ok(Self {
            number: number.to_string(),
            issue_date: self.issue_date,
            summary: summary.to_string(),
            diploma_book_id: diploma_book_id.to_string(),
        })
    }
}

/// Update graduation decision payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraduationDecisionUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(
        default,
        with = "calendar_date::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub issue_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diploma_book_id: Option<String>,
}

impl GraduationDecisionUpdate {
    /// Check the fields being patched
    pub fn validate(&self, today: NaiveDate) -> Result<(), ValidationError> {
        if let Some(number) = &self.number {
            required_text("Decision number", Some(number), NUMBER_MAX)?;
        }
        if let Some(issue_date) = self.issue_date {
            not_in_future("Issue date", issue_date, today)?;
        }
        if let Some(summary) = &self.summary {
            required_text("Summary", Some(summary), SUMMARY_MAX)?;
        }
        if let Some(book_id) = &self.diploma_book_id {
            required_text("Diploma book", Some(book_id), usize::MAX)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn payload() -> GraduationDecisionCreate {
        GraduationDecisionCreate {
            number: " 123/QD-HV ".into(),
            issue_date: date(2024, 6, 1),
            summary: " Graduation of class 2020 ".into(),
            diploma_book_id: "b1".into(),
        }
    }

    #[test]
    fn test_normalized_trims_text() {
        let normalized = payload().normalized(date(2024, 7, 1)).unwrap();
        assert_eq!(normalized.number, "123/QD-HV");
        assert_eq!(normalized.summary, "Graduation of class 2020");
    }

    #[test]
    fn test_issue_date_in_future_rejected() {
        let err = payload().normalized(date(2024, 5, 31)).unwrap_err();
        assert_eq!(err, ValidationError::FutureDate { field: "Issue date" });
    }

    #[test]
    fn test_number_too_long_rejected() {
        let mut p = payload();
        p.number = "x".repeat(51);
        assert_eq!(
            p.normalized(date(2024, 7, 1)).unwrap_err(),
            ValidationError::too_long("Decision number", 50)
        );
    }

    #[test]
    fn test_issue_date_wire_format() {
        let json = serde_json::to_value(payload()).unwrap();
        assert_eq!(json["issueDate"], "2024-06-01");
        assert_eq!(json["diplomaBookId"], "b1");
    }

    #[test]
    fn test_decision_accepts_timestamp_issue_date() {
        let decision: GraduationDecision = serde_json::from_str(
            r#"{"id":"d1","number":"1","issueDate":"2024-06-01T00:00:00.000Z","summary":"s","diplomaBookId":"b1"}"#,
        )
        .unwrap();
        assert_eq!(decision.issue_date, date(2024, 6, 1));
        assert_eq!(decision.search_count, 0);
    }

    #[test]
    fn test_update_validates_only_present_fields() {
        let patch = GraduationDecisionUpdate {
            summary: Some("short".into()),
            ..Default::default()
        };
        assert!(patch.validate(date(2024, 1, 1)).is_ok());
        assert_eq!(
            serde_json::to_string(&patch).unwrap(),
            r#"{"summary":"short"}"#
        );
    }

    #[test]
    fn test_update_rejects_what_create_rejects() {
        let blank_summary = GraduationDecisionUpdate {
            summary: Some("   ".into()),
            ..Default::default()
        };
        assert_eq!(
            blank_summary.validate(date(2024, 1, 1)).unwrap_err(),
            ValidationError::missing("Summary")
        );

        let blank_book = GraduationDecisionUpdate {
            diploma_book_id: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(
            blank_book.validate(date(2024, 1, 1)).unwrap_err(),
            ValidationError::missing("Diploma book")
        );
    }

    #[test]
    fn test_decision_null_defaults() {
        let decision: GraduationDecision = serde_json::from_str(
            r#"{"id":"d1","number":"1","issueDate":"2024-06-01","summary":null,"searchCount":null,"diplomaBookId":"b1","createdAt":"2024-06-01 10:00:00"}"#,
        )
        .unwrap();
        assert_eq!(decision.summary, "");
        assert_eq!(decision.search_count, 0);
        assert!(decision.created_at.is_some());
    }
}
