//! Session state for the diploma registry
//!
//! `DiplomaStore` holds the in-memory copies of the four registry
//! collections. Every mutator calls the access layer first and only splices
//! the confirmed server result into its collection; nothing is updated
//! optimistically and nothing is retried.
//!
//! Payload rules are checked by the access layer. The store adds only the
//! checks that need its collections: one book per year, and custom fields
//! against the loaded form fields.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Datelike;
use shared::ApiResponse;
use shared::ValidationError;
use shared::models::{
    DiplomaBook, DiplomaBookCreate, DiplomaFormField, DiplomaFormFieldCreate,
    DiplomaFormFieldUpdate, DiplomaInfo, DiplomaInfoCreate, DiplomaSearchParams,
    GraduationDecision, GraduationDecisionCreate, GraduationDecisionUpdate,
    validate_custom_fields,
};
use tokio::sync::RwLock;

use crate::api::DiplomaApi;
use crate::client::HttpClient;
use crate::error::{ClientError, ClientResult};

/// One of the collections held by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Books,
    Decisions,
    FormFields,
    Infos,
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Books => "diploma books",
            Self::Decisions => "graduation decisions",
            Self::FormFields => "diploma form fields",
            Self::Infos => "diploma infos",
        })
    }
}

/// Outcome of a full load; failed collections keep their previous contents
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub failed: Vec<Collection>,
}

impl LoadReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// In-memory copies of the registry collections
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiplomaState {
    pub books: Vec<DiplomaBook>,
    pub decisions: Vec<GraduationDecision>,
    pub form_fields: Vec<DiplomaFormField>,
    pub infos: Vec<DiplomaInfo>,
}

/// Session store for the diploma registry
pub struct DiplomaStore<C> {
    api: DiplomaApi<C>,
    state: RwLock<DiplomaState>,
    initialized: AtomicBool,
}

/// Payload of a confirmed response, or the server message
fn require_data<T>(response: ApiResponse<T>, fallback: &str) -> ClientResult<T> {
    match response.data {
        Some(data) => Ok(data),
        None => Err(ClientError::api(
            response.status,
            response.message.or_else(|| Some(fallback.to_string())),
        )),
    }
}

/// Replace `slot` with a successful list result, or record the failure
fn apply_list<T>(
    slot: &mut Vec<T>,
    result: ClientResult<ApiResponse<Vec<T>>>,
    collection: Collection,
    report: &mut LoadReport,
) {
    match result {
        Ok(response) => *slot = response.data.unwrap_or_default(),
        Err(e) => {
            tracing::error!(%collection, error = %e, "Failed to load collection");
            report.failed.push(collection);
        }
    }
}

impl<C: HttpClient> DiplomaStore<C> {
    pub fn new(api: DiplomaApi<C>) -> Self {
        Self {
            api,
            state: RwLock::new(DiplomaState::default()),
            initialized: AtomicBool::new(false),
        }
    }

    pub fn api(&self) -> &DiplomaApi<C> {
        &self.api
    }

    fn reject(&self, operation: &'static str, err: ValidationError) -> ClientError {
        tracing::warn!(operation, error = %err, "Rejected before sending");
        err.into()
    }

    // ========== Loading ==========

    /// Load every collection the first time it is called.
    ///
    /// Returns `None` when the store was already initialized.
    pub async fn initialize(&self) -> Option<LoadReport> {
        if self.initialized.swap(true, Ordering::SeqCst) {
            return None;
        }
        Some(self.load_all().await)
    }

    /// Fetch the four collections concurrently and replace each one whose
    /// request succeeded. A failure never blocks or rolls back the others.
    pub async fn load_all(&self) -> LoadReport {
        let (books, decisions, form_fields, infos) = tokio::join!(
            self.api.list_books(),
            self.api.list_decisions(),
            self.api.list_form_fields(),
            self.api.list_infos(None),
        );

        let mut report = LoadReport::default();
        let mut state = self.state.write().await;
        apply_list(&mut state.books, books, Collection::Books, &mut report);
        apply_list(&mut state.decisions, decisions, Collection::Decisions, &mut report);
        apply_list(&mut state.form_fields, form_fields, Collection::FormFields, &mut report);
        apply_list(&mut state.infos, infos, Collection::Infos, &mut report);

        tracing::info!(
            books = state.books.len(),
            decisions = state.decisions.len(),
            form_fields = state.form_fields.len(),
            infos = state.infos.len(),
            failed = report.failed.len(),
            "Diploma registry loaded"
        );
        report
    }

    // ========== Snapshots ==========

    pub async fn snapshot(&self) -> DiplomaState {
        self.state.read().await.clone()
    }

    pub async fn books(&self) -> Vec<DiplomaBook> {
        self.state.read().await.books.clone()
    }

    pub async fn decisions(&self) -> Vec<GraduationDecision> {
        self.state.read().await.decisions.clone()
    }

    pub async fn form_fields(&self) -> Vec<DiplomaFormField> {
        self.state.read().await.form_fields.clone()
    }

    pub async fn infos(&self) -> Vec<DiplomaInfo> {
        self.state.read().await.infos.clone()
    }

    // ========== Diploma books ==========

    /// Reload the book collection
    pub async fn fetch_books(&self) -> ClientResult<Vec<DiplomaBook>> {
        let books = self.api.list_books().await?.data.unwrap_or_default();
        self.state.write().await.books = books.clone();
        Ok(books)
    }

    /// Open a book for `year` and append it.
    ///
    /// The year must lie between 1900 and next year and must not already
    /// have a book in the loaded collection.
    pub async fn create_book(&self, year: i32) -> ClientResult<DiplomaBook> {
        let existing: Vec<i32> = self.state.read().await.books.iter().map(|b| b.year).collect();
        shared::validation::new_book_year(year, existing, self.api.today().year())
            .map_err(|e| self.reject("create_book", e))?;

        let response = self.api.create_book(&DiplomaBookCreate::new(year)).await?;
        let book = require_data(response, "Failed to create diploma book")?;
        self.state.write().await.books.push(book.clone());
        Ok(book)
    }

    // ========== Graduation decisions ==========

    /// Reload the decision collection
    pub async fn fetch_decisions(&self) -> ClientResult<Vec<GraduationDecision>> {
        let decisions = self.api.list_decisions().await?.data.unwrap_or_default();
        self.state.write().await.decisions = decisions.clone();
        Ok(decisions)
    }

    pub async fn create_decision(
        &self,
        data: &GraduationDecisionCreate,
    ) -> ClientResult<GraduationDecision> {
        let response = self.api.create_decision(data).await?;
        let decision = require_data(response, "Failed to create graduation decision")?;
        self.state.write().await.decisions.push(decision.clone());
        Ok(decision)
    }

    /// Patch a decision and replace it in place
    pub async fn update_decision(
        &self,
        id: &str,
        data: &GraduationDecisionUpdate,
    ) -> ClientResult<GraduationDecision> {
        let response = self.api.update_decision(id, data).await?;
        let decision = require_data(response, "Failed to update graduation decision")?;
        let mut state = self.state.write().await;
        if let Some(slot) = state.decisions.iter_mut().find(|d| d.id == id) {
            *slot = decision.clone();
        }
        Ok(decision)
    }

    // ========== Diploma form fields ==========

    /// Reload the form field collection
    pub async fn fetch_form_fields(&self) -> ClientResult<Vec<DiplomaFormField>> {
        let fields = self.api.list_form_fields().await?.data.unwrap_or_default();
        self.state.write().await.form_fields = fields.clone();
        Ok(fields)
    }

    pub async fn create_form_field(
        &self,
        field: &DiplomaFormFieldCreate,
    ) -> ClientResult<DiplomaFormField> {
        let response = self.api.create_form_field(field).await?;
        let created = require_data(response, "Failed to create diploma form field")?;
        self.state.write().await.form_fields.push(created.clone());
        Ok(created)
    }

    /// Patch a form field and replace it in place
    pub async fn update_form_field(
        &self,
        id: &str,
        field: &DiplomaFormFieldUpdate,
    ) -> ClientResult<DiplomaFormField> {
        let response = self.api.update_form_field(id, field).await?;
        let updated = require_data(response, "Failed to update diploma form field")?;
        let mut state = self.state.write().await;
        if let Some(slot) = state.form_fields.iter_mut().find(|f| f.id == id) {
            *slot = updated.clone();
        }
        Ok(updated)
    }

    /// Delete a form field; the collection is only touched on success
    pub async fn delete_form_field(&self, id: &str) -> ClientResult<()> {
        self.api.delete_form_field(id).await?;
        self.state.write().await.form_fields.retain(|f| f.id != id);
        Ok(())
    }

    // ========== Diploma infos ==========

    /// Reload the info collection, optionally for one book
    pub async fn fetch_infos(&self, diploma_book_id: Option<&str>) -> ClientResult<Vec<DiplomaInfo>> {
        let infos = self
            .api
            .list_infos(diploma_book_id)
            .await?
            .data
            .unwrap_or_default();
        self.state.write().await.infos = infos.clone();
        Ok(infos)
    }

    /// Create a diploma record and append it.
    ///
    /// Custom field values are checked against the loaded form fields.
    pub async fn create_info(&self, info: &DiplomaInfoCreate) -> ClientResult<DiplomaInfo> {
        {
            let state = self.state.read().await;
            validate_custom_fields(&state.form_fields, &info.custom_fields)
                .map_err(|e| self.reject("create_info", e))?;
        }
        let response = self.api.create_info(info).await?;
        let created = require_data(response, "Failed to create diploma info")?;
        self.state.write().await.infos.push(created.clone());
        Ok(created)
    }

    /// Search diploma records. Results are returned, not stored.
    pub async fn search_info(&self, params: &DiplomaSearchParams) -> ClientResult<Vec<DiplomaInfo>> {
        let response = self.api.search_infos(params).await?;
        Ok(response.data.unwrap_or_default())
    }
}
