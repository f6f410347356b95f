//! Remote record normalization
//!
//! Turns a [`RemoteBook`] into a detached [`Book`]. This is a pure transform:
//! nothing is fetched, looked up, or persisted here.

use crate::error::{AppError, Result};
use crate::types::{join_subjects, Author, Book, Language, RemoteAuthor, RemoteBook};
use log::trace;

/// Normalizes a raw record into the catalog's book shape
///
/// - the title is copied verbatim
/// - subjects are joined with `;` in input order
/// - only the first language code is used; the rest are discarded
/// - every nested author becomes a new [`Author`], unvalidated and not deduplicated
/// - a missing download count stays `None`
///
/// # Errors
///
/// [`AppError::MissingLanguage`] if the record lists no languages,
/// [`AppError::UnsupportedLanguage`] if the first code is not in the registry.
pub fn normalize(record: &RemoteBook) -> Result<Book> {
    let language = primary_language(record)?;

    let book = Book {
        title: record.title.clone(),
        subjects: join_subjects(&record.subjects),
        language,
        download_count: record.download_count,
        authors: record.authors.iter().map(normalize_author).collect(),
    };

    trace!(
        "Normalized '{}' ({}, {} authors)",
        book.title,
        book.language.code(),
        book.authors.len()
    );
    Ok(book)
}

fn primary_language(record: &RemoteBook) -> Result<Language> {
    let code = record
        .languages
        .first()
        .ok_or_else(|| AppError::MissingLanguage {
            title: record.title.clone(),
        })?;
    Language::resolve(code)
}

fn normalize_author(author: &RemoteAuthor) -> Author {
    Author::new(author.name.clone(), author.birth_year, author.death_year)
}
