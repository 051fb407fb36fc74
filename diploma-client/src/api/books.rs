//! Diploma book endpoints

use chrono::Datelike;
use shared::ApiResponse;
use shared::models::{DiplomaBook, DiplomaBookCreate, DiplomaBookUpdate};

use super::DiplomaApi;
use crate::cache::CacheKey;
use crate::client::HttpClient;
use crate::error::ClientResult;

impl<C: HttpClient> DiplomaApi<C> {
    /// GET /books
    pub async fn list_books(&self) -> ClientResult<ApiResponse<Vec<DiplomaBook>>> {
        let response = self.http.get(&self.path("books")).await;
        self.finish("list_books", response, Some(CacheKey::DiplomaBooks))
    }

    /// POST /books
    pub async fn create_book(
        &self,
        data: &DiplomaBookCreate,
    ) -> ClientResult<ApiResponse<DiplomaBook>> {
        self.check_local("create_book", data.validate(self.today().year()))?;
        let response = self.http.post(&self.path("books"), data).await;
        self.finish("create_book", response, Some(CacheKey::CreatedDiplomaBook))
    }

    /// PUT /books/{id}
    pub async fn update_book(
        &self,
        id: &str,
        data: &DiplomaBookUpdate,
    ) -> ClientResult<ApiResponse<DiplomaBook>> {
        self.check_local("update_book", data.validate(self.today().year()))?;
        let response = self.http.put(&self.item_path("books", id), data).await;
        self.finish("update_book", response, None)
    }

    /// DELETE /books/{id}
    pub async fn delete_book(&self, id: &str) -> ClientResult<ApiResponse<serde_json::Value>> {
        let response = self.http.delete(&self.item_path("books", id)).await;
        self.finish_delete(
            "delete_book",
            response,
            CacheKey::DeletedDiplomaBook(id.to_string()),
        )
    }
}
