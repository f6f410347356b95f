// FILE: crates/content-sources/src/gutendex.rs

use crate::{
    decode, BookSource, HttpTransport, SearchPage, SearchQuery, SourceError, SourceMetadata,
    SourceResult, Transport,
};
use literalura_core::RemoteBook;

/// Gutendex catalog of Project Gutenberg books
pub struct GutendexSource<T: Transport = HttpTransport> {
    base_url: String,
    transport: T,
}

impl<T: Transport> GutendexSource<T> {
    pub const API_BASE: &'static str = "https://gutendex.com/books/";

    /// Create a source talking to the public Gutendex endpoint
    pub fn new(transport: T) -> Self {
        Self {
            base_url: Self::API_BASE.to_string(),
            transport,
        }
    }

    /// Point the source at another Gutendex-compatible endpoint
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the search URL for a query
    pub fn search_url(&self, query: &SearchQuery) -> String {
        let mut url = format!(
            "{}?search={}",
            self.base_url,
            urlencoding::encode(query.text.trim())
        );
        if let Some(language) = query.language {
            url.push_str("&languages=");
            url.push_str(language.code());
        }
        url
    }
}

impl<T: Transport> BookSource for GutendexSource<T> {
    async fn search(&self, query: &SearchQuery) -> SourceResult<Vec<RemoteBook>> {
        if query.text.trim().is_empty() {
            return Err(SourceError::InvalidQuery("Empty query".to_string()));
        }

        let url = self.search_url(query);
        let body = self.transport.get(&url).await?;
        let page: SearchPage = decode(&body)?;

        log::debug!(
            "Gutendex returned {} of {} matches for {:?}",
            page.results.len(),
            page.count,
            query.text
        );

        Ok(page.results)
    }

    fn metadata(&self) -> SourceMetadata {
        SourceMetadata {
            name: "Gutendex".to_string(),
            description: "JSON web API for Project Gutenberg ebook metadata".to_string(),
            base_url: self.base_url.clone(),
        }
    }
}

// Form-style percent encoding over UTF-8 bytes
mod urlencoding {
    pub fn encode(s: &str) -> String {
        let mut out = String::with_capacity(s.len());
        for byte in s.bytes() {
            match byte {
                b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                    out.push(byte as char)
                }
                b' ' => out.push('+'),
                _ => out.push_str(&format!("%{:02X}", byte)),
            }
        }
        out
    }
}
