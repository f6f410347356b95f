//! In-memory book source for offline use and tests

use crate::{BookSource, SearchQuery, SourceMetadata, SourceResult};
use literalura_core::RemoteBook;

/// Serves a fixed list of records, matching titles case-insensitively
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    books: Vec<RemoteBook>,
}

impl StaticSource {
    pub fn new(books: Vec<RemoteBook>) -> Self {
        Self { books }
    }

    pub fn with_book(mut self, book: RemoteBook) -> Self {
        self.books.push(book);
        self
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    fn matches(book: &RemoteBook, query: &SearchQuery, needle: &str) -> bool {
        if !book.title.to_lowercase().contains(needle) {
            return false;
        }
        match query.language {
            Some(language) => book
                .languages
                .iter()
                .any(|code| code.eq_ignore_ascii_case(language.code())),
            None => true,
        }
    }
}

impl BookSource for StaticSource {
    async fn search(&self, query: &SearchQuery) -> SourceResult<Vec<RemoteBook>> {
        let needle = query.text.trim().to_lowercase();

        Ok(self
            .books
            .iter()
            .filter(|book| Self::matches(book, query, &needle))
            .cloned()
            .collect())
    }

    fn metadata(&self) -> SourceMetadata {
        SourceMetadata {
            name: "Static".to_string(),
            description: format!("{} records held in memory", self.books.len()),
            base_url: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use literalura_core::Language;

    fn source() -> StaticSource {
        StaticSource::default()
            .with_book(RemoteBook::new("Dune").with_language("en"))
            .with_book(RemoteBook::new("Dune Messiah").with_language("en"))
            .with_book(RemoteBook::new("Don Quijote").with_language("es"))
    }

    #[tokio::test]
    async fn test_search_matches_substring_in_order() {
        let results = source().search(&SearchQuery::new("DUNE")).await.unwrap();
        let titles: Vec<_> = results.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["Dune", "Dune Messiah"]);
    }

    #[tokio::test]
    async fn test_search_language_filter() {
        let query = SearchQuery::new("d").with_language(Language::Spanish);
        let results = source().search(&query).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Don Quijote");
    }

    #[tokio::test]
    async fn test_search_no_match() {
        let results = source().search(&SearchQuery::new("Ulysses")).await.unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_metadata() {
        let source = source();
        assert_eq!(source.len(), 3);
        assert_eq!(source.metadata().name, "Static");
    }
}
