//! Catalog store
//!
//! Owns books, authors, and the association between them. Title is the only
//! deduplication key: the first book stored under a title wins and is never
//! updated afterwards.

use crate::queries::{authors, books};
use crate::DbPool;
use literalura_core::{
    AppError, AuthorPolicy, AuthorSummary, Book, Language, MissingDownloads, Result,
};
use log::{debug, info};
use sqlx::pool::PoolConnection;
use sqlx::{Sqlite, SqliteConnection};
use uuid::Uuid;

/// Policies the store applies when writing a new book
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StorePolicy {
    pub authors: AuthorPolicy,
    pub missing_downloads: MissingDownloads,
}

impl StorePolicy {
    pub fn with_author_policy(mut self, policy: AuthorPolicy) -> Self {
        self.authors = policy;
        self
    }

    pub fn with_missing_downloads(mut self, policy: MissingDownloads) -> Self {
        self.missing_downloads = policy;
        self
    }
}

/// Book and author repository backed by SQLite
#[derive(Debug, Clone)]
pub struct CatalogStore {
    pool: DbPool,
    policy: StorePolicy,
}

impl CatalogStore {
    pub fn new(pool: DbPool) -> Self {
        Self::with_policy(pool, StorePolicy::default())
    }

    pub fn with_policy(pool: DbPool, policy: StorePolicy) -> Self {
        Self { pool, policy }
    }

    pub fn policy(&self) -> StorePolicy {
        self.policy
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    /// Stores a book unless one with the same title already exists
    ///
    /// Returns the stored book and whether it was created by this call. When a
    /// book with the title exists, it is returned unchanged and `book` is
    /// discarded. The insert is the first statement of the transaction, so the
    /// write lock is held before anything is read; a writer that loses the
    /// title to another connection reads back the winner's book.
    pub async fn upsert_book(&self, book: &Book) -> Result<(Book, bool)> {
        let prepared = match self.apply_download_policy(book) {
            Ok(prepared) => prepared,
            Err(err) => {
                // A stored title still wins over a record the policy rejects
                return match self.find_book_by_title(&book.title).await? {
                    Some(existing) => Ok((existing, false)),
                    None => Err(err),
                };
            }
        };
        let book_id = Uuid::new_v4().to_string();

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::storage("Failed to start transaction", e))?;

        if !books::insert_book(&mut tx, &book_id, &prepared).await? {
            let existing = books::get_book_by_title(&mut tx, &book.title)
                .await?
                .ok_or_else(|| AppError::StorageUnavailable {
                    message: format!("Book '{}' vanished after conflicting insert", book.title),
                    source: None,
                })?;
            tx.rollback()
                .await
                .map_err(|e| AppError::storage("Failed to roll back transaction", e))?;

            info!("Book '{}' already in catalog", book.title);
            return Ok((existing, false));
        }

        self.write_authors(&mut tx, &book_id, &prepared).await?;

        let stored = books::get_book_by_title(&mut tx, &prepared.title)
            .await?
            .ok_or_else(|| AppError::StorageUnavailable {
                message: format!("Book '{}' missing after insert", prepared.title),
                source: None,
            })?;

        tx.commit()
            .await
            .map_err(|e| AppError::storage("Failed to commit book", e))?;

        info!(
            "Stored '{}' with {} author(s)",
            stored.title,
            stored.authors.len()
        );
        Ok((stored, true))
    }

    /// Lists all books
    pub async fn list_books(&self) -> Result<Vec<Book>> {
        let mut conn = self.acquire().await?;
        books::list_books(&mut conn).await
    }

    /// Lists all authors with the titles of their books
    pub async fn list_authors(&self) -> Result<Vec<AuthorSummary>> {
        let mut conn = self.acquire().await?;
        authors::list_authors(&mut conn).await
    }

    /// Books whose stored language is exactly `language`
    pub async fn books_by_language(&self, language: Language) -> Result<Vec<Book>> {
        debug!("Listing books in {}", language.code());
        let mut conn = self.acquire().await?;
        books::get_books_by_language(&mut conn, language).await
    }

    /// Authors with `birth_year <= year < death_year`
    ///
    /// Authors missing either year are never returned.
    pub async fn authors_alive_in(&self, year: i32) -> Result<Vec<AuthorSummary>> {
        debug!("Listing authors alive in {}", year);
        let mut conn = self.acquire().await?;
        authors::get_authors_alive_in(&mut conn, year).await
    }

    /// Looks up a book by exact title
    pub async fn find_book_by_title(&self, title: &str) -> Result<Option<Book>> {
        let mut conn = self.acquire().await?;
        books::get_book_by_title(&mut conn, title).await
    }

    pub async fn count_books(&self) -> Result<i64> {
        let mut conn = self.acquire().await?;
        books::count_books(&mut conn).await
    }

    pub async fn count_authors(&self) -> Result<i64> {
        let mut conn = self.acquire().await?;
        authors::count_authors(&mut conn).await
    }

    async fn acquire(&self) -> Result<PoolConnection<Sqlite>> {
        self.pool
            .acquire()
            .await
            .map_err(|e| AppError::storage("Failed to acquire connection", e))
    }

    fn apply_download_policy(&self, book: &Book) -> Result<Book> {
        let mut prepared = book.clone();
        if prepared.download_count.is_none() {
            match self.policy.missing_downloads {
                MissingDownloads::Keep => {}
                MissingDownloads::Zero => prepared.download_count = Some(0),
                MissingDownloads::Reject => {
                    return Err(AppError::InvalidRecord {
                        field: "download_count".to_string(),
                        reason: format!("'{}' has no download count", book.title),
                    })
                }
            }
        }
        Ok(prepared)
    }

    async fn write_authors(
        &self,
        conn: &mut SqliteConnection,
        book_id: &str,
        book: &Book,
    ) -> Result<()> {
        for (position, author) in book.authors.iter().enumerate() {
            let existing = match self.policy.authors {
                AuthorPolicy::PerBook => None,
                AuthorPolicy::ReuseByName => {
                    authors::find_author_id_by_name(conn, &author.name).await?
                }
            };

            let author_id = match existing {
                Some(id) => id,
                None => {
                    let id = Uuid::new_v4().to_string();
                    authors::insert_author(conn, &id, author).await?;
                    id
                }
            };

            authors::link_author(conn, book_id, &author_id, position as i64).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::connect_in_memory;
    use crate::migrations::run_migrations;
    use literalura_core::Author;

    async fn setup(policy: StorePolicy) -> CatalogStore {
        let pool = connect_in_memory().await.expect("Failed to create database");
        run_migrations(&pool).await.expect("Failed to migrate");
        CatalogStore::with_policy(pool, policy)
    }

    fn dune() -> Book {
        Book::new("Dune", Language::English)
            .with_subjects(["Fiction", "Space"])
            .with_download_count(500)
            .with_author(Author::new("Frank Herbert", Some(1920), Some(1986)))
    }

    #[tokio::test]
    async fn test_upsert_twice_keeps_one_book() {
        let store = setup(StorePolicy::default()).await;

        let (first, was_new) = store.upsert_book(&dune()).await.unwrap();
        assert!(was_new);
        assert_eq!(first, dune());

        let (second, was_new) = store.upsert_book(&dune()).await.unwrap();
        assert!(!was_new);
        assert_eq!(second, first);

        assert_eq!(store.count_books().await.unwrap(), 1);
        assert_eq!(store.count_authors().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_first_write_wins() {
        let store = setup(StorePolicy::default()).await;
        store.upsert_book(&dune()).await.unwrap();

        let rival = Book::new("Dune", Language::French)
            .with_download_count(1)
            .with_author(Author::new("Someone Else", None, None));
        let (stored, was_new) = store.upsert_book(&rival).await.unwrap();

        assert!(!was_new);
        assert_eq!(stored.language, Language::English);
        assert_eq!(stored.download_count, Some(500));
        assert_eq!(stored.author_names(), "Frank Herbert");
        assert_eq!(store.count_authors().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_per_book_policy_duplicates_authors() {
        let store = setup(StorePolicy::default()).await;

        let herbert = Author::new("Frank Herbert", Some(1920), Some(1986));
        store.upsert_book(&dune()).await.unwrap();
        store
            .upsert_book(&Book::new("Dune Messiah", Language::English).with_author(herbert))
            .await
            .unwrap();

        let authors = store.list_authors().await.unwrap();
        assert_eq!(authors.len(), 2);
        assert_eq!(authors[0].titles, vec!["Dune"]);
        assert_eq!(authors[1].titles, vec!["Dune Messiah"]);
    }

    #[tokio::test]
    async fn test_reuse_by_name_policy_shares_authors() {
        let policy = StorePolicy::default().with_author_policy(AuthorPolicy::ReuseByName);
        let store = setup(policy).await;

        let herbert = Author::new("Frank Herbert", Some(1920), Some(1986));
        store.upsert_book(&dune()).await.unwrap();
        store
            .upsert_book(&Book::new("Dune Messiah", Language::English).with_author(herbert))
            .await
            .unwrap();

        let authors = store.list_authors().await.unwrap();
        assert_eq!(authors.len(), 1);
        assert_eq!(authors[0].titles, vec!["Dune", "Dune Messiah"]);
    }

    #[tokio::test]
    async fn test_missing_downloads_policies() {
        let uncounted = Book::new("Uncounted", Language::English);

        let keep = setup(StorePolicy::default()).await;
        let (stored, _) = keep.upsert_book(&uncounted).await.unwrap();
        assert_eq!(stored.download_count, None);

        let zero =
            setup(StorePolicy::default().with_missing_downloads(MissingDownloads::Zero)).await;
        let (stored, _) = zero.upsert_book(&uncounted).await.unwrap();
        assert_eq!(stored.download_count, Some(0));

        let reject =
            setup(StorePolicy::default().with_missing_downloads(MissingDownloads::Reject)).await;
        let err = reject.upsert_book(&uncounted).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidRecord { .. }));
        assert_eq!(reject.count_books().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_reject_policy_does_not_block_existing_title() {
        let store =
            setup(StorePolicy::default().with_missing_downloads(MissingDownloads::Reject)).await;
        store.upsert_book(&dune()).await.unwrap();

        let (stored, was_new) = store
            .upsert_book(&Book::new("Dune", Language::English))
            .await
            .unwrap();
        assert!(!was_new);
        assert_eq!(stored.download_count, Some(500));
    }

    #[tokio::test]
    async fn test_books_by_language_filters() {
        let store = setup(StorePolicy::default()).await;
        for (title, lang) in [
            ("Dune", Language::English),
            ("Rayuela", Language::Spanish),
            ("Ficciones", Language::Spanish),
            ("Candide", Language::French),
        ] {
            store.upsert_book(&Book::new(title, lang)).await.unwrap();
        }

        let spanish = store.books_by_language(Language::Spanish).await.unwrap();
        let titles: Vec<&str> = spanish.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["Rayuela", "Ficciones"]);
    }

    #[tokio::test]
    async fn test_authors_alive_in() {
        let store = setup(StorePolicy::default()).await;
        store
            .upsert_book(
                &Book::new("Old", Language::English)
                    .with_author(Author::new("Bounded", Some(1800), Some(1850)))
                    .with_author(Author::new("Open Ended", Some(1800), None)),
            )
            .await
            .unwrap();

        let alive = store.authors_alive_in(1849).await.unwrap();
        assert_eq!(alive.len(), 1);
        assert_eq!(alive[0].author.name, "Bounded");
        assert_eq!(alive[0].titles, vec!["Old"]);

        assert!(store.authors_alive_in(1850).await.unwrap().is_empty());
        assert!(store.authors_alive_in(1799).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_find_book_by_title() {
        let store = setup(StorePolicy::default()).await;
        assert!(store.find_book_by_title("Dune").await.unwrap().is_none());

        store.upsert_book(&dune()).await.unwrap();
        let found = store.find_book_by_title("Dune").await.unwrap().unwrap();
        assert_eq!(found.subject_list(), vec!["Fiction", "Space"]);
    }

    #[tokio::test]
    async fn test_closed_pool_is_storage_unavailable() {
        let store = setup(StorePolicy::default()).await;
        store.pool().close().await;

        let err = store.list_books().await.unwrap_err();
        assert!(matches!(err, AppError::StorageUnavailable { .. }));
    }
}
