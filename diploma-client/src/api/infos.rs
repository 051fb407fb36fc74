//! Diploma info endpoints, including public search

use shared::ApiResponse;
use shared::models::{DiplomaInfo, DiplomaInfoCreate, DiplomaInfoUpdate, DiplomaSearchParams};

use super::DiplomaApi;
use crate::cache::CacheKey;
use crate::client::HttpClient;
use crate::error::ClientResult;

impl<C: HttpClient> DiplomaApi<C> {
    /// GET /infos, optionally filtered by diploma book
    pub async fn list_infos(
        &self,
        diploma_book_id: Option<&str>,
    ) -> ClientResult<ApiResponse<Vec<DiplomaInfo>>> {
        let mut path = self.path("infos");
        if let Some(book_id) = diploma_book_id {
            let query = url::form_urlencoded::Serializer::new(String::new())
                .append_pair("diplomaBookId", book_id)
                .finish();
            path = format!("{path}?{query}");
        }
        let response = self.http.get(&path).await;
        self.finish("list_infos", response, Some(CacheKey::DiplomaInfos))
    }

    /// POST /infos
    ///
    /// Rejected locally, without a request, when a required field is
    /// missing or the date of birth is invalid.
    pub async fn create_info(
        &self,
        data: &DiplomaInfoCreate,
    ) -> ClientResult<ApiResponse<DiplomaInfo>> {
        let body = self.check_local("create_info", data.into_request(self.today()))?;
        let response = self.http.post(&self.path("infos"), &body).await;
        let response: ApiResponse<DiplomaInfo> =
            self.finish("create_info", response, Some(CacheKey::CreatedDiplomaInfo))?;
        if let Some(info) = &response.data {
            tracing::info!(id = %info.id, diploma_number = %info.diploma_number, "Diploma info created");
        }
        Ok(response)
    }

    /// PUT /infos/{id}
    pub async fn update_info(
        &self,
        id: &str,
        data: &DiplomaInfoUpdate,
    ) -> ClientResult<ApiResponse<DiplomaInfo>> {
        self.check_local("update_info", data.validate(self.today()))?;
        let response = self.http.put(&self.item_path("infos", id), data).await;
        self.finish("update_info", response, None)
    }

    /// DELETE /infos/{id}
    pub async fn delete_info(&self, id: &str) -> ClientResult<ApiResponse<serde_json::Value>> {
        let response = self.http.delete(&self.item_path("infos", id)).await;
        self.finish_delete(
            "delete_info",
            response,
            CacheKey::DeletedDiplomaInfo(id.to_string()),
        )
    }

    /// GET /infos/search
    ///
    /// Rejected locally, without a request, unless at least two criteria
    /// are filled in.
    pub async fn search_infos(
        &self,
        params: &DiplomaSearchParams,
    ) -> ClientResult<ApiResponse<Vec<DiplomaInfo>>> {
        self.check_local("search_infos", params.validate())?;
        let query = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(params.query_pairs())
            .finish();
        let path = format!("{}?{}", self.path("infos/search"), query);
        let response = self.http.get(&path).await;
        self.finish(
            "search_infos",
            response,
            Some(CacheKey::SearchedDiplomaInfos),
        )
    }
}
