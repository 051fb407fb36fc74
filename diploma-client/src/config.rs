//! Client configuration

use std::path::PathBuf;

/// Default base path of the diploma registry API
pub const DEFAULT_API_PREFIX: &str = "/api/diploma";

/// Client configuration for connecting to the diploma registry
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | DIPLOMA_BASE_URL | http://localhost:8000 | backend origin |
/// | DIPLOMA_API_PREFIX | /api/diploma | API base path |
/// | DIPLOMA_TOKEN | - | bearer token |
/// | DIPLOMA_TIMEOUT_SECS | 30 | request timeout |
/// | DIPLOMA_CACHE_DIR | - | directory for the file cache |
/// | DIPLOMA_CACHE_ENABLED | true | `false` disables the response cache |
/// | DIPLOMA_LOG_LEVEL | info | logger level |
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Server base URL (e.g., "http://localhost:8000")
    pub base_url: String,

    /// Path prefix prepended to every endpoint
    pub api_prefix: String,

    /// Bearer token for authentication
    pub token: Option<String>,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Mirror successful responses into the cache
    pub cache_enabled: bool,

    /// Cache directory; in-memory cache when unset
    pub cache_dir: Option<PathBuf>,

    /// Log level for [`crate::logger::init_logger`]
    pub log_level: String,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_prefix: DEFAULT_API_PREFIX.to_string(),
            token: None,
            timeout: 30,
            cache_enabled: true,
            cache_dir: None,
            log_level: "info".to_string(),
        }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through a key lookup; unset or unparsable keys
    /// keep their defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(url) = lookup("DIPLOMA_BASE_URL") {
            config.base_url = url;
        }
        if let Some(prefix) = lookup("DIPLOMA_API_PREFIX") {
            config.api_prefix = prefix;
        }
        config.token = lookup("DIPLOMA_TOKEN").filter(|t| !t.is_empty());
        if let Some(timeout) = lookup("DIPLOMA_TIMEOUT_SECS")
            .and_then(|v| v.parse().ok())
            .filter(|&secs: &u64| secs > 0)
        {
            config.timeout = timeout;
        }
        if let Some(enabled) = lookup("DIPLOMA_CACHE_ENABLED").and_then(|v| v.parse().ok()) {
            config.cache_enabled = enabled;
        }
        config.cache_dir = lookup("DIPLOMA_CACHE_DIR")
            .filter(|d| !d.is_empty())
            .map(PathBuf::from);
        if let Some(level) = lookup("DIPLOMA_LOG_LEVEL") {
            config.log_level = level;
        }
        config
    }

    /// Set the API path prefix
    pub fn with_api_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.api_prefix = prefix.into();
        self
    }

    /// Set the bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Store cached responses as files in `dir`
    pub fn with_cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = Some(dir.into());
        self
    }

    /// Turn the response cache off
    pub fn without_cache(mut self) -> Self {
        self.cache_enabled = false;
        self
    }

    /// Prefix normalized to a leading slash and no trailing slash
    pub fn normalized_prefix(&self) -> String {
        let trimmed = self.api_prefix.trim_matches('/');
        if trimmed.is_empty() {
            String::new()
        } else {
            format!("/{trimmed}")
        }
    }

    /// Reject settings no transport can work with
    pub fn validate(&self) -> crate::ClientResult<()> {
        if self.base_url.trim().is_empty() {
            return Err(crate::ClientError::Config("base URL is empty".into()));
        }
        if self.timeout == 0 {
            return Err(crate::ClientError::Config(
                "request timeout must be at least one second".into(),
            ));
        }
        Ok(())
    }

    /// Create a network HTTP client from this configuration
    pub fn build_http_client(&self) -> crate::ClientResult<crate::NetworkHttpClient> {
        crate::NetworkHttpClient::from_config(self)
    }

    /// Create the cache store this configuration asks for
    pub fn build_cache(&self) -> std::sync::Arc<dyn crate::CacheStore> {
        use crate::cache::{FileCache, MemoryCache, NoopCache};
        match (&self.cache_enabled, &self.cache_dir) {
            (false, _) => std::sync::Arc::new(NoopCache),
            (true, Some(dir)) => std::sync::Arc::new(FileCache::new(dir)),
            (true, None) => std::sync::Arc::new(MemoryCache::new()),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:8000")
    }
}
