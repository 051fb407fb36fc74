//! Graduation decision endpoints

use shared::ApiResponse;
use shared::models::{GraduationDecision, GraduationDecisionCreate, GraduationDecisionUpdate};

use super::DiplomaApi;
use crate::cache::CacheKey;
use crate::client::HttpClient;
use crate::error::ClientResult;

impl<C: HttpClient> DiplomaApi<C> {
    /// GET /decisions
    pub async fn list_decisions(&self) -> ClientResult<ApiResponse<Vec<GraduationDecision>>> {
        let response = self.http.get(&self.path("decisions")).await;
        self.finish(
            "list_decisions",
            response,
            Some(CacheKey::GraduationDecisions),
        )
    }

    /// POST /decisions
    ///
    /// Text is trimmed before sending; an invalid payload is rejected
    /// without a request.
    pub async fn create_decision(
        &self,
        data: &GraduationDecisionCreate,
    ) -> ClientResult<ApiResponse<GraduationDecision>> {
        let body = self.check_local("create_decision", data.normalized(self.today()))?;
        let response = self.http.post(&self.path("decisions"), &body).await;
        self.finish(
            "create_decision",
            response,
            Some(CacheKey::CreatedGraduationDecision),
        )
    }

    /// PUT /decisions/{id}
    pub async fn update_decision(
        &self,
        id: &str,
        data: &GraduationDecisionUpdate,
    ) -> ClientResult<ApiResponse<GraduationDecision>> {
        self.check_local("update_decision", data.validate(self.today()))?;
        let response = self
            .http
            .put(&self.item_path("decisions", id), data)
            .await;
        self.finish("update_decision", response, None)
    }

    /// DELETE /decisions/{id}
    pub async fn delete_decision(&self, id: &str) -> ClientResult<ApiResponse<serde_json::Value>> {
        let response = self.http.delete(&self.item_path("decisions", id)).await;
        self.finish_delete(
            "delete_decision",
            response,
            CacheKey::DeletedGraduationDecision(id.to_string()),
        )
    }
}
