//! Literalura Catalog
//!
//! Orchestration layer that ties a remote book source, the normalizer, and the
//! SQLite store together. Searching the source and storing the first hit is the
//! only way books enter the catalog; everything else reads.

pub mod service;

pub use service::{CatalogService, Ingested};

use literalura_config::{Config, SourceConfig};
use literalura_content_sources::{ClientConfig, GutendexSource, HttpTransport};
use literalura_core::{AppError, Result};
use literalura_database::StorePolicy;
use std::time::Duration;

/// Database path that selects a private in-memory catalog
pub const IN_MEMORY: &str = ":memory:";

/// Settings needed to open a catalog
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// SQLite file path, or [`IN_MEMORY`]
    pub database_path: String,
    /// Write policy handed to the store
    pub policy: StorePolicy,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            database_path: "literalura.db".to_string(),
            policy: StorePolicy::default(),
        }
    }
}

impl ServiceConfig {
    pub fn new(database_path: impl Into<String>) -> Self {
        Self {
            database_path: database_path.into(),
            ..Default::default()
        }
    }

    pub fn in_memory() -> Self {
        Self::new(IN_MEMORY)
    }

    pub fn with_policy(mut self, policy: StorePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn is_in_memory(&self) -> bool {
        self.database_path == IN_MEMORY
    }
}

impl From<&Config> for ServiceConfig {
    fn from(config: &Config) -> Self {
        Self::new(config.app.database_path.to_string_lossy()).with_policy(
            StorePolicy::default()
                .with_author_policy(config.catalog.author_policy)
                .with_missing_downloads(config.catalog.missing_downloads),
        )
    }
}

/// Builds the Gutendex source described by `[source]`
pub fn http_source(config: &SourceConfig) -> Result<GutendexSource<HttpTransport>> {
    let client = ClientConfig::default()
        .with_timeout(Duration::from_secs(config.timeout_secs))
        .with_user_agent(config.user_agent.clone());

    let transport = HttpTransport::with_config(client).map_err(AppError::from)?;
    Ok(GutendexSource::new(transport).with_base_url(config.base_url.clone()))
}
