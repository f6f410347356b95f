// FILE: src/traits.rs
// ============================================================================

use crate::SourceResult;
use literalura_core::{Language, RemoteBook};
use std::future::Future;

/// Fetches a URL and returns the response body
pub trait Transport: Send + Sync {
    fn get(&self, url: &str) -> impl Future<Output = SourceResult<String>> + Send;
}

/// A searchable remote catalog of books
pub trait BookSource: Send + Sync {
    /// Search for books, best match first
    fn search(
        &self,
        query: &SearchQuery,
    ) -> impl Future<Output = SourceResult<Vec<RemoteBook>>> + Send;

    /// Get metadata about the source
    fn metadata(&self) -> SourceMetadata;
}

/// Search query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub text: String,
    pub language: Option<Language>,
}

impl SearchQuery {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            language: None,
        }
    }

    /// Restricts results to books available in `language`
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = Some(language);
        self
    }
}

/// Source metadata
#[derive(Debug, Clone)]
pub struct SourceMetadata {
    pub name: String,
    pub description: String,
    pub base_url: String,
}
