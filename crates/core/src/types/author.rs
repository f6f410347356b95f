//! Author domain model

use serde::{Deserialize, Serialize};

/// An author as recorded against a book
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    pub birth_year: Option<i32>,
    pub death_year: Option<i32>,
}

impl Author {
    pub fn new(name: impl Into<String>, birth_year: Option<i32>, death_year: Option<i32>) -> Self {
        Self {
            name: name.into(),
            birth_year,
            death_year,
        }
    }

    /// Returns true if `birth <= year < death`
    ///
    /// Both years must be known. An author with no recorded death year is
    /// never considered alive, which also excludes living authors.
    pub fn is_alive_in(&self, year: i32) -> bool {
        match (self.birth_year, self.death_year) {
            (Some(birth), Some(death)) => birth <= year && year < death,
            _ => false,
        }
    }
}

/// An author together with the titles of the books that reference it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorSummary {
    pub author: Author,
    pub titles: Vec<String>,
}

impl AuthorSummary {
    pub fn new(author: Author, titles: Vec<String>) -> Self {
        Self { author, titles }
    }
}
