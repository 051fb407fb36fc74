//! Uniqueness and validity checks (`/validate/*`)
//!
//! These never touch the cache.

use serde_json::json;
use shared::{ApiResponse, ValidityCheck};

use super::DiplomaApi;
use crate::client::HttpClient;
use crate::error::ClientResult;

impl<C: HttpClient> DiplomaApi<C> {
    async fn check(
        &self,
        operation: &'static str,
        endpoint: &str,
        body: serde_json::Value,
    ) -> ClientResult<ApiResponse<ValidityCheck>> {
        let response = self
            .http
            .post(&self.path(&format!("validate/{endpoint}")), &body)
            .await;
        self.finish(operation, response, None)
    }

    /// POST /validate/diploma-number
    pub async fn validate_diploma_number(
        &self,
        diploma_number: &str,
    ) -> ClientResult<ApiResponse<ValidityCheck>> {
        self.check(
            "validate_diploma_number",
            "diploma-number",
            json!({ "diplomaNumber": diploma_number }),
        )
        .await
    }

    /// POST /validate/student-id
    pub async fn validate_student_id(
        &self,
        student_id: &str,
    ) -> ClientResult<ApiResponse<ValidityCheck>> {
        self.check(
            "validate_student_id",
            "student-id",
            json!({ "studentId": student_id }),
        )
        .await
    }

    /// POST /validate/diploma-book
    pub async fn validate_book_year(&self, year: i32) -> ClientResult<ApiResponse<ValidityCheck>> {
        self.check("validate_book_year", "diploma-book", json!({ "year": year }))
            .await
    }

    /// POST /validate/graduation-decision
    pub async fn validate_decision_number(
        &self,
        number: &str,
    ) -> ClientResult<ApiResponse<ValidityCheck>> {
        self.check(
            "validate_decision_number",
            "graduation-decision",
            json!({ "number": number }),
        )
        .await
    }
}
