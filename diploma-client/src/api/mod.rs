//! Remote access layer
//!
//! One async function per registry operation. Each performs exactly one
//! request, validates the envelope with [`validate_response`], and on
//! success mirrors the payload into the cache. Errors are logged and
//! returned to the caller unchanged; nothing is retried.

mod books;
mod decisions;
mod fields;
mod infos;
mod validate;

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use shared::{ApiResponse, ValidationError};

use crate::cache::{self, CacheKey, CacheStore, MemoryCache};
use crate::client::HttpClient;
use crate::config::{ClientConfig, DEFAULT_API_PREFIX};
use crate::error::{ClientError, ClientResult};

/// Percent-encode a path segment
fn encode_segment(raw: &str) -> String {
    // form encoding writes spaces as '+', which a path would keep literally
    url::form_urlencoded::byte_serialize(raw.as_bytes())
        .map(|part| if part == "+" { "%20" } else { part })
        .collect()
}

/// Check an envelope: a missing response or a status other than 200 is an
/// error, anything else is returned unchanged.
pub fn validate_response<T>(response: Option<ApiResponse<T>>) -> ClientResult<ApiResponse<T>> {
    let response = response.ok_or(ClientError::NoResponse)?;
    if !response.is_success() {
        return Err(ClientError::api(response.status, response.message));
    }
    Ok(response)
}

/// Registry API bound to a transport and a response cache
pub struct DiplomaApi<C> {
    http: C,
    cache: Arc<dyn CacheStore>,
    prefix: String,
    clock: fn() -> NaiveDate,
}

impl<C: HttpClient> DiplomaApi<C> {
    /// API on the default prefix with an in-memory cache
    pub fn new(http: C) -> Self {
        Self {
            http,
            cache: Arc::new(MemoryCache::new()),
            prefix: DEFAULT_API_PREFIX.to_string(),
            clock: shared::util::today,
        }
    }

    /// API configured from `config` (prefix and cache backend)
    pub fn from_config(http: C, config: &ClientConfig) -> Self {
        Self {
            http,
            cache: config.build_cache(),
            prefix: config.normalized_prefix(),
            clock: shared::util::today,
        }
    }

    /// Replace the cache store
    pub fn with_cache(mut self, cache: Arc<dyn CacheStore>) -> Self {
        self.cache = cache;
        self
    }

    /// Replace the date source used by the "not in the future" rules
    pub fn with_clock(mut self, clock: fn() -> NaiveDate) -> Self {
        self.clock = clock;
        self
    }

    pub fn cache(&self) -> &Arc<dyn CacheStore> {
        &self.cache
    }

    pub fn http(&self) -> &C {
        &self.http
    }

    /// Today's date as seen by validation
    pub fn today(&self) -> NaiveDate {
        (self.clock)()
    }

    fn path(&self, endpoint: &str) -> String {
        format!("{}/{}", self.prefix, endpoint)
    }

    /// Path of one record; the id is encoded as a single segment
    fn item_path(&self, collection: &str, id: &str) -> String {
        self.path(&format!("{collection}/{}", encode_segment(id)))
    }

    /// Reject a payload that failed local validation, without a request
    fn check_local<T>(
        &self,
        operation: &'static str,
        result: Result<T, ValidationError>,
    ) -> ClientResult<T> {
        result.map_err(|e| self.fail(operation, e.into()))
    }

    /// Log and pass through a failure
    fn fail(&self, operation: &'static str, err: ClientError) -> ClientError {
        tracing::error!(operation, error = %err, "Diploma API call failed");
        err
    }

    /// Validate the envelope and mirror its payload under `key`
    fn finish<T: Serialize>(
        &self,
        operation: &'static str,
        response: ClientResult<Option<ApiResponse<T>>>,
        key: Option<CacheKey>,
    ) -> ClientResult<ApiResponse<T>> {
        match response.and_then(validate_response) {
            Ok(response) => {
                if let Some(key) = key {
                    cache::remember(self.cache.as_ref(), &key, &response.data);
                }
                Ok(response)
            }
            Err(e) => Err(self.fail(operation, e)),
        }
    }

    /// Validate a delete envelope and record the deletion under `key`
    fn finish_delete(
        &self,
        operation: &'static str,
        response: ClientResult<Option<ApiResponse<serde_json::Value>>>,
        key: CacheKey,
    ) -> ClientResult<ApiResponse<serde_json::Value>> {
        let response = self.finish(operation, response, None)?;
        cache::remember(self.cache.as_ref(), &key, &shared::Deleted::default());
        Ok(response)
    }
}
