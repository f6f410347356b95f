//! Literalura core
//!
//! Domain model, language registry, error taxonomy, and the normalizer that
//! turns raw API records into catalog books.

pub mod error;
pub mod normalize;
pub mod types;

// Re-export commonly used types
pub use error::{AppError, ErrorSeverity, Result};
pub use normalize::normalize;
pub use types::{
    join_subjects, Author, AuthorPolicy, AuthorSummary, Book, Language, MissingDownloads,
    RemoteAuthor, RemoteBook, SUBJECT_SEPARATOR,
};
