//! Response cache
//!
//! Successful payloads are mirrored under stable keys for inspection and
//! debugging. The cache is never read back for correctness; writes are
//! best-effort and a failing store only produces a warning.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use dashmap::DashMap;
use thiserror::Error;

/// Cache error type
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Keys under which responses are mirrored
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    DiplomaBooks,
    CreatedDiplomaBook,
    DeletedDiplomaBook(String),
    GraduationDecisions,
    CreatedGraduationDecision,
    DeletedGraduationDecision(String),
    DiplomaFormFields,
    CreatedDiplomaFormField,
    UpdatedDiplomaFormField(String),
    DeletedDiplomaFormField(String),
    DiplomaInfos,
    CreatedDiplomaInfo,
    DeletedDiplomaInfo(String),
    SearchedDiplomaInfos,
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DiplomaBooks => f.write_str("diplomaBooks"),
            Self::CreatedDiplomaBook => f.write_str("createdDiplomaBook"),
            Self::DeletedDiplomaBook(id) => write!(f, "deletedDiplomaBook_{id}"),
            Self::GraduationDecisions => f.write_str("graduationDecisions"),
            Self::CreatedGraduationDecision => f.write_str("createdGraduationDecision"),
            Self::DeletedGraduationDecision(id) => write!(f, "deletedGraduationDecision_{id}"),
            Self::DiplomaFormFields => f.write_str("diplomaFormFields"),
            Self::CreatedDiplomaFormField => f.write_str("createdDiplomaFormField"),
            Self::UpdatedDiplomaFormField(id) => write!(f, "updatedDiplomaFormField_{id}"),
            Self::DeletedDiplomaFormField(id) => write!(f, "deletedDiplomaFormField_{id}"),
            Self::DiplomaInfos => f.write_str("diplomaInfos"),
            Self::CreatedDiplomaInfo => f.write_str("createdDiplomaInfo"),
            Self::DeletedDiplomaInfo(id) => write!(f, "deletedDiplomaInfo_{id}"),
            Self::SearchedDiplomaInfos => f.write_str("searchedDiplomaInfos"),
        }
    }
}

/// Key-value store holding serialized JSON payloads
pub trait CacheStore: Send + Sync {
    fn set(&self, key: &str, value: &str) -> Result<(), CacheError>;
    fn get(&self, key: &str) -> Result<Option<String>, CacheError>;
    fn remove(&self, key: &str) -> Result<(), CacheError>;
}

/// Serialize `data` and store it under `key`, logging instead of failing
pub fn remember<T: serde::Serialize + ?Sized>(store: &dyn CacheStore, key: &CacheKey, data: &T) {
    let key = key.to_string();
    let result = serde_json::to_string(data)
        .map_err(CacheError::from)
        .and_then(|json| store.set(&key, &json));
    if let Err(e) = result {
        tracing::warn!(key = %key, error = %e, "Failed to write response cache");
    }
}

/// In-memory cache
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: DashMap<String, String>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Stored keys, sorted
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.entries.iter().map(|e| e.key().clone()).collect();
        keys.sort();
        keys
    }
}

impl CacheStore for MemoryCache {
    fn set(&self, key: &str, value: &str) -> Result<(), CacheError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        Ok(self.entries.get(key).map(|v| v.value().clone()))
    }

    fn remove(&self, key: &str) -> Result<(), CacheError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// File cache: one `<key>.json` file per entry
#[derive(Debug, Clone)]
pub struct FileCache {
    dir: PathBuf,
}

impl FileCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> PathBuf {
        // ids end up in keys; encoding keeps separators out and distinct keys apart
        let name: String = url::form_urlencoded::byte_serialize(key.as_bytes()).collect();
        self.dir.join(format!("{name}.json"))
    }
}

impl CacheStore for FileCache {
    fn set(&self, key: &str, value: &str) -> Result<(), CacheError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path(key), value)?;
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let path = self.path(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    fn remove(&self, key: &str) -> Result<(), CacheError> {
        let path = self.path(key);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

/// Disabled cache
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCache;

impl CacheStore for NoopCache {
    fn set(&self, _key: &str, _value: &str) -> Result<(), CacheError> {
        Ok(())
    }

    fn get(&self, _key: &str) -> Result<Option<String>, CacheError> {
        Ok(None)
    }

    fn remove(&self, _key: &str) -> Result<(), CacheError> {
        Ok(())
    }
}
