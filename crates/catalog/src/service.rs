// FILE: crates/catalog/src/service.rs

use crate::ServiceConfig;
use literalura_content_sources::{BookSource, SearchQuery};
use literalura_core::{normalize, AppError, AuthorSummary, Book, Language, Result};
use literalura_database::{
    connect, connect_in_memory, run_migrations, CatalogStore, DatabaseConfig,
};
use log::{debug, info};

/// Outcome of a fetch: the stored book and whether this call created it
#[derive(Debug, Clone, PartialEq)]
pub struct Ingested {
    pub book: Book,
    pub was_new: bool,
}

/// High-level catalog operations
pub struct CatalogService<S: BookSource> {
    store: CatalogStore,
    source: S,
}

impl<S: BookSource> CatalogService<S> {
    /// Wrap an already-migrated store
    pub fn new(store: CatalogStore, source: S) -> Self {
        Self { store, source }
    }

    /// Connect to the configured database, migrate it, and build the service
    pub async fn open(config: &ServiceConfig, source: S) -> Result<Self> {
        info!(
            "Opening catalog at {} using {}",
            config.database_path,
            source.metadata().name
        );

        let pool = if config.is_in_memory() {
            connect_in_memory().await?
        } else {
            connect(DatabaseConfig::new(&config.database_path)).await?
        };
        run_migrations(&pool).await?;

        Ok(Self::new(
            CatalogStore::with_policy(pool, config.policy),
            source,
        ))
    }

    pub fn store(&self) -> &CatalogStore {
        &self.store
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Search the source, normalize the best match, and store it
    ///
    /// A title already in the catalog is returned as stored, with
    /// `was_new == false`; the freshly fetched record is discarded.
    pub async fn fetch_and_store(&self, title_query: &str) -> Result<Ingested> {
        let text = title_query.trim();
        if text.is_empty() {
            return Err(AppError::InvalidArgument {
                argument: "title".to_string(),
                reason: "Search text must not be empty".to_string(),
            });
        }

        let results = self.source.search(&SearchQuery::new(text)).await?;
        debug!("Source returned {} results for {:?}", results.len(), text);

        let first = results.first().ok_or_else(|| AppError::NoResults {
            query: text.to_string(),
        })?;

        let candidate = normalize(first)?;
        let (book, was_new) = self.store.upsert_book(&candidate).await?;

        if was_new {
            info!("Added '{}' to the catalog", book.title);
        } else {
            debug!("Kept existing record for '{}'", book.title);
        }

        Ok(Ingested { book, was_new })
    }

    /// All books, oldest first
    pub async fn list_books(&self) -> Result<Vec<Book>> {
        self.store.list_books().await
    }

    pub async fn list_authors(&self) -> Result<Vec<AuthorSummary>> {
        self.store.list_authors().await
    }

    /// Books whose language is `code`
    ///
    /// The code is checked against the registry before the store is queried.
    pub async fn books_by_language(&self, code: &str) -> Result<Vec<Book>> {
        let language = Language::resolve(code)?;
        self.store.books_by_language(language).await
    }

    /// Authors born no later than `year` who died after it
    ///
    /// Authors with an unknown birth or death year never match.
    pub async fn authors_alive_in(&self, year: i32) -> Result<Vec<AuthorSummary>> {
        self.store.authors_alive_in(year).await
    }

    /// Supported languages in registry order
    pub fn languages(&self) -> Vec<Language> {
        Language::all().collect()
    }
}
