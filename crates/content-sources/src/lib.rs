// FILE: crates/content-sources/src/lib.rs

mod decode;
mod gutendex;
mod http;
mod memory;
mod traits;

pub use decode::{decode, SearchPage};
pub use gutendex::GutendexSource;
pub use http::{ClientConfig, HttpTransport};
pub use memory::StaticSource;
pub use traits::{BookSource, SearchQuery, SourceMetadata, Transport};

use literalura_core::AppError;
use thiserror::Error;

/// Result type for content source operations
pub type SourceResult<T> = Result<T, SourceError>;

/// Errors from content sources
#[derive(Debug, Error)]
pub enum SourceError {
    /// Request could not be sent or the body could not be read
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    /// Network error without an underlying HTTP error
    #[error("Network error: {0}")]
    Network(String),

    /// Body is not the expected JSON shape
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Invalid query
    #[error("Invalid query: {0}")]
    InvalidQuery(String),
}

impl From<SourceError> for AppError {
    fn from(err: SourceError) -> Self {
        match err {
            SourceError::Http(e) => AppError::transport("HTTP request failed", e),
            SourceError::Status { .. } | SourceError::Network(_) => AppError::TransportError {
                message: err.to_string(),
                source: None,
            },
            SourceError::Parse(e) => AppError::decode("Unexpected response body", e),
            SourceError::InvalidQuery(reason) => AppError::InvalidArgument {
                argument: "query".to_string(),
                reason,
            },
        }
    }
}
