//! Raw book records as delivered by the bibliographic API
//!
//! These mirror the JSON shape of a search result. Unknown fields are ignored,
//! missing or `null` lists decode as empty, and the Spanish field names used by
//! older exports are accepted as aliases.

use serde::{Deserialize, Deserializer, Serialize};

/// A book record exactly as fetched, before normalization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteBook {
    #[serde(alias = "titulo")]
    pub title: String,

    #[serde(default, alias = "autores", deserialize_with = "null_as_empty")]
    pub authors: Vec<RemoteAuthor>,

    #[serde(default, alias = "temas", deserialize_with = "null_as_empty")]
    pub subjects: Vec<String>,

    #[serde(default, alias = "idiomas", deserialize_with = "null_as_empty")]
    pub languages: Vec<String>,

    #[serde(default, alias = "contadorDeDescargas")]
    pub download_count: Option<i64>,
}

impl RemoteBook {
    /// Creates a record with only a title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            authors: Vec::new(),
            subjects: Vec::new(),
            languages: Vec::new(),
            download_count: None,
        }
    }

    pub fn with_author(mut self, author: RemoteAuthor) -> Self {
        self.authors.push(author);
        self
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subjects.push(subject.into());
        self
    }

    pub fn with_language(mut self, code: impl Into<String>) -> Self {
        self.languages.push(code.into());
        self
    }

    pub fn with_download_count(mut self, count: i64) -> Self {
        self.download_count = Some(count);
        self
    }
}

/// A nested author record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteAuthor {
    #[serde(alias = "nombre")]
    pub name: String,

    #[serde(default, alias = "anhioDeNacimiento")]
    pub birth_year: Option<i32>,

    #[serde(default, alias = "anhioDeFallecimiento")]
    pub death_year: Option<i32>,
}

impl RemoteAuthor {
    pub fn new(name: impl Into<String>, birth_year: Option<i32>, death_year: Option<i32>) -> Self {
        Self {
            name: name.into(),
            birth_year,
            death_year,
        }
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
