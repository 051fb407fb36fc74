//! Diploma form field endpoints

use shared::ApiResponse;
use shared::models::{DiplomaFormField, DiplomaFormFieldCreate, DiplomaFormFieldUpdate};

use super::DiplomaApi;
use crate::cache::CacheKey;
use crate::client::HttpClient;
use crate::error::ClientResult;

impl<C: HttpClient> DiplomaApi<C> {
    /// GET /fields
    pub async fn list_form_fields(&self) -> ClientResult<ApiResponse<Vec<DiplomaFormField>>> {
        let response = self.http.get(&self.path("fields")).await;
        self.finish(
            "list_form_fields",
            response,
            Some(CacheKey::DiplomaFormFields),
        )
    }

    /// POST /fields
    pub async fn create_form_field(
        &self,
        data: &DiplomaFormFieldCreate,
    ) -> ClientResult<ApiResponse<DiplomaFormField>> {
        let body = self.check_local("create_form_field", data.normalized())?;
        let response = self.http.post(&self.path("fields"), &body).await;
        self.finish(
            "create_form_field",
            response,
            Some(CacheKey::CreatedDiplomaFormField),
        )
    }

    /// PUT /fields/{id}
    pub async fn update_form_field(
        &self,
        id: &str,
        data: &DiplomaFormFieldUpdate,
    ) -> ClientResult<ApiResponse<DiplomaFormField>> {
        self.check_local("update_form_field", data.validate())?;
        let response = self
            .http
            .put(&self.item_path("fields", id), data)
            .await;
        self.finish(
            "update_form_field",
            response,
            Some(CacheKey::UpdatedDiplomaFormField(id.to_string())),
        )
    }

    /// DELETE /fields/{id}
    pub async fn delete_form_field(&self, id: &str) -> ClientResult<ApiResponse<serde_json::Value>> {
        let response = self.http.delete(&self.item_path("fields", id)).await;
        self.finish_delete(
            "delete_form_field",
            response,
            CacheKey::DeletedDiplomaFormField(id.to_string()),
        )
    }
}
