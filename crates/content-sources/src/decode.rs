//! JSON decoding of API responses

use crate::SourceResult;
use literalura_core::RemoteBook;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Decodes a JSON body into `T`, ignoring fields `T` does not declare
pub fn decode<T: DeserializeOwned>(body: &str) -> SourceResult<T> {
    Ok(serde_json::from_str(body)?)
}

/// One page of search results
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchPage {
    #[serde(default, alias = "cantidad")]
    pub count: u64,

    #[serde(default, alias = "siguiente")]
    pub next: Option<String>,

    #[serde(default)]
    pub previous: Option<String>,

    #[serde(default, alias = "libros")]
    pub results: Vec<RemoteBook>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SourceError;

    const PAGE: &str = r#"{
        "count": 2,
        "next": null,
        "previous": null,
        "results": [
            {
                "id": 1342,
                "title": "Pride and Prejudice",
                "authors": [{"name": "Austen, Jane", "birth_year": 1775, "death_year": 1817}],
                "translators": [],
                "subjects": ["England -- Fiction", "Love stories"],
                "bookshelves": ["Best Books Ever Listings"],
                "languages": ["en"],
                "copyright": false,
                "media_type": "Text",
                "formats": {"text/html": "https://www.gutenberg.org/ebooks/1342.html.images"},
                "download_count": 54321
            },
            {
                "id": 42671,
                "title": "Pride and Prejudice",
                "authors": [],
                "subjects": [],
                "languages": ["en", "fr"],
                "download_count": 12
            }
        ]
    }"#;

    #[test]
    fn test_decode_search_page() {
        let page: SearchPage = decode(PAGE).unwrap();

        assert_eq!(page.count, 2);
        assert!(page.next.is_none());
        assert_eq!(page.results.len(), 2);
        assert_eq!(page.results[0].authors[0].name, "Austen, Jane");
        assert_eq!(page.results[1].languages, vec!["en", "fr"]);
    }

    #[test]
    fn test_decode_empty_page() {
        let page: SearchPage = decode(r#"{"count": 0, "next": null, "results": []}"#).unwrap();
        assert!(page.results.is_empty());
    }

    #[test]
    fn test_decode_malformed() {
        let result: SourceResult<SearchPage> = decode("<html>502 Bad Gateway</html>");
        assert!(matches!(result, Err(SourceError::Parse(_))));
    }

    #[test]
    fn test_decode_incompatible_shape() {
        let result: SourceResult<SearchPage> = decode(r#"{"results": "nope"}"#);
        assert!(matches!(result, Err(SourceError::Parse(_))));
    }
}
