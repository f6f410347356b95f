//! Book database operations

use crate::queries::authors::authors_for_book;
use literalura_core::{AppError, Book, Language};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection};

const BOOK_COLUMNS: &str = "id, title, subjects, language, download_count";

/// Inserts a book row unless one with the same title exists
///
/// Returns `false` when the title was already taken. Authors are not written
/// here; see [`crate::queries::authors`].
pub async fn insert_book(
    conn: &mut SqliteConnection,
    id: &str,
    book: &Book,
) -> Result<bool, AppError> {
    let result = sqlx::query(
        r#"
        INSERT INTO books (id, title, subjects, language, download_count)
        VALUES (?, ?, ?, ?, ?)
        ON CONFLICT(title) DO NOTHING
        "#,
    )
    .bind(id)
    .bind(&book.title)
    .bind(&book.subjects)
    .bind(book.language.code())
    .bind(book.download_count)
    .execute(conn)
    .await
    .map_err(|e| AppError::storage("Failed to create book", e))?;

    Ok(result.rows_affected() == 1)
}

/// Gets a book and its authors by exact title
pub async fn get_book_by_title(
    conn: &mut SqliteConnection,
    title: &str,
) -> Result<Option<Book>, AppError> {
    let row = sqlx::query(&format!("SELECT {} FROM books WHERE title = ?", BOOK_COLUMNS))
        .bind(title)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| AppError::storage("Failed to fetch book", e))?;

    match row {
        Some(row) => {
            let (id, book) = row_to_book(row)?;
            Ok(Some(with_authors(conn, &id, book).await?))
        }
        None => Ok(None),
    }
}

/// Lists all books in insertion order
pub async fn list_books(conn: &mut SqliteConnection) -> Result<Vec<Book>, AppError> {
    let rows = sqlx::query(&format!(
        "SELECT {} FROM books ORDER BY added_at, rowid",
        BOOK_COLUMNS
    ))
    .fetch_all(&mut *conn)
    .await
    .map_err(|e| AppError::storage("Failed to list books", e))?;

    rows_to_books(conn, rows).await
}

/// Gets books stored with the given language
pub async fn get_books_by_language(
    conn: &mut SqliteConnection,
    language: Language,
) -> Result<Vec<Book>, AppError> {
    let rows = sqlx::query(&format!(
        "SELECT {} FROM books WHERE language = ? ORDER BY added_at, rowid",
        BOOK_COLUMNS
    ))
    .bind(language.code())
    .fetch_all(&mut *conn)
    .await
    .map_err(|e| AppError::storage("Failed to get books by language", e))?;

    rows_to_books(conn, rows).await
}

/// Counts stored books
pub async fn count_books(conn: &mut SqliteConnection) -> Result<i64, AppError> {
    sqlx::query_scalar("SELECT COUNT(*) FROM books")
        .fetch_one(conn)
        .await
        .map_err(|e| AppError::storage("Failed to count books", e))
}

async fn rows_to_books(
    conn: &mut SqliteConnection,
    rows: Vec<SqliteRow>,
) -> Result<Vec<Book>, AppError> {
    let mut books = Vec::with_capacity(rows.len());
    for row in rows {
        let (id, book) = row_to_book(row)?;
        books.push(with_authors(conn, &id, book).await?);
    }
    Ok(books)
}

async fn with_authors(
    conn: &mut SqliteConnection,
    id: &str,
    mut book: Book,
) -> Result<Book, AppError> {
    book.authors = authors_for_book(conn, id).await?;
    Ok(book)
}

/// Converts a database row to a book id and a Book without authors
fn row_to_book(row: SqliteRow) -> Result<(String, Book), AppError> {
    let id: String = row
        .try_get("id")
        .map_err(|e| AppError::storage("Missing book ID", e))?;

    let code: String = row
        .try_get("language")
        .map_err(|e| AppError::storage("Missing language", e))?;
    let language =
        Language::resolve(&code).map_err(|e| AppError::storage("Invalid stored language", e))?;

    let book = Book {
        title: row
            .try_get("title")
            .map_err(|e| AppError::storage("Missing title", e))?,
        subjects: row
            .try_get("subjects")
            .map_err(|e| AppError::storage("Missing subjects", e))?,
        language,
        download_count: row
            .try_get("download_count")
            .map_err(|e| AppError::storage("Invalid download count", e))?,
        authors: Vec::new(),
    };

    Ok((id, book))
}
