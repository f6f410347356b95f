//! Book domain model

use crate::types::{Author, Language};
use serde::{Deserialize, Serialize};

/// Separator used when subjects are stored as a single field
pub const SUBJECT_SEPARATOR: char = ';';

/// A catalogued book
///
/// Titles are unique across the catalog. A `Book` carries no storage
/// identity; the same shape is used before and after persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub title: String,
    /// Subjects joined with [`SUBJECT_SEPARATOR`], in source order
    pub subjects: String,
    pub language: Language,
    /// `None` when the source did not report a count
    pub download_count: Option<i64>,
    pub authors: Vec<Author>,
}

impl Book {
    /// Creates a book with no subjects, authors, or download count
    pub fn new(title: impl Into<String>, language: Language) -> Self {
        Self {
            title: title.into(),
            subjects: String::new(),
            language,
            download_count: None,
            authors: Vec::new(),
        }
    }

    /// Sets subjects from an ordered list
    pub fn with_subjects<I, S>(mut self, subjects: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.subjects = join_subjects(subjects);
        self
    }

    pub fn with_download_count(mut self, count: i64) -> Self {
        self.download_count = Some(count);
        self
    }

    pub fn with_author(mut self, author: Author) -> Self {
        self.authors.push(author);
        self
    }

    /// Splits the stored subjects field back into its parts
    ///
    /// An empty field yields an empty list.
    pub fn subject_list(&self) -> Vec<&str> {
        if self.subjects.is_empty() {
            Vec::new()
        } else {
            self.subjects.split(SUBJECT_SEPARATOR).collect()
        }
    }

    /// Author names joined with ", " for display
    pub fn author_names(&self) -> String {
        self.authors
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Joins subjects with the separator, preserving order
pub fn join_subjects<I, S>(subjects: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut joined = String::new();
    for (i, subject) in subjects.into_iter().enumerate() {
        if i > 0 {
            joined.push(SUBJECT_SEPARATOR);
        }
        joined.push_str(subject.as_ref());
    }
    joined
}
