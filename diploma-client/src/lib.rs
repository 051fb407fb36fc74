//! Diploma Client - client for a diploma registry backend
//!
//! Layers, bottom-up:
//! - [`client`]: HTTP transports (network and in-process)
//! - [`api`]: one function per registry endpoint, envelope validation and
//!   the response cache
//! - [`store`]: in-memory session copies of the registry collections

pub mod api;
pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod logger;
pub mod store;

pub use api::{DiplomaApi, validate_response};
pub use cache::{CacheKey, CacheStore, FileCache, MemoryCache, NoopCache};
pub use client::{HttpClient, NetworkHttpClient};
#[cfg(feature = "in-process")]
pub use client::OneshotHttpClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use store::{Collection, DiplomaState, DiplomaStore, LoadReport};

// Re-export shared types for convenience
pub use shared::models;
pub use shared::{ApiResponse, Deleted, ValidationError, ValidityCheck};
