//! Author database operations

use literalura_core::{AppError, Author, AuthorSummary};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection};

/// Creates a new author row
pub async fn insert_author(
    conn: &mut SqliteConnection,
    id: &str,
    author: &Author,
) -> Result<(), AppError> {
    sqlx::query("INSERT INTO authors (id, name, birth_year, death_year) VALUES (?, ?, ?, ?)")
        .bind(id)
        .bind(&author.name)
        .bind(author.birth_year)
        .bind(author.death_year)
        .execute(conn)
        .await
        .map_err(|e| AppError::storage("Failed to create author", e))?;

    Ok(())
}

/// Finds the oldest author row with exactly this name
pub async fn find_author_id_by_name(
    conn: &mut SqliteConnection,
    name: &str,
) -> Result<Option<String>, AppError> {
    sqlx::query_scalar("SELECT id FROM authors WHERE name = ? ORDER BY rowid LIMIT 1")
        .bind(name)
        .fetch_optional(conn)
        .await
        .map_err(|e| AppError::storage("Failed to look up author", e))
}

/// Associates an author with a book at the given position
///
/// Linking the same pair twice is a no-op.
pub async fn link_author(
    conn: &mut SqliteConnection,
    book_id: &str,
    author_id: &str,
    position: i64,
) -> Result<(), AppError> {
    sqlx::query(
        "INSERT OR IGNORE INTO book_authors (book_id, author_id, position) VALUES (?, ?, ?)",
    )
    .bind(book_id)
    .bind(author_id)
    .bind(position)
    .execute(conn)
    .await
    .map_err(|e| AppError::storage("Failed to link author to book", e))?;

    Ok(())
}

/// Gets the authors of a book in their original order
pub async fn authors_for_book(
    conn: &mut SqliteConnection,
    book_id: &str,
) -> Result<Vec<Author>, AppError> {
    let rows = sqlx::query(
        r#"
        SELECT a.id, a.name, a.birth_year, a.death_year
        FROM authors a
        JOIN book_authors ba ON ba.author_id = a.id
        WHERE ba.book_id = ?
        ORDER BY ba.position
        "#,
    )
    .bind(book_id)
    .fetch_all(conn)
    .await
    .map_err(|e| AppError::storage("Failed to get book authors", e))?;

    rows.into_iter()
        .map(|row| row_to_author(row).map(|(_, author)| author))
        .collect()
}

/// Lists every author with the titles of their books
pub async fn list_authors(conn: &mut SqliteConnection) -> Result<Vec<AuthorSummary>, AppError> {
    let rows = sqlx::query("SELECT id, name, birth_year, death_year FROM authors ORDER BY rowid")
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| AppError::storage("Failed to list authors", e))?;

    rows_to_summaries(conn, rows).await
}

/// Gets authors with `birth_year <= year < death_year`
///
/// Rows with an unknown birth or death year never match.
pub async fn get_authors_alive_in(
    conn: &mut SqliteConnection,
    year: i32,
) -> Result<Vec<AuthorSummary>, AppError> {
    let rows = sqlx::query(
        r#"
        SELECT id, name, birth_year, death_year
        FROM authors
        WHERE birth_year <= ? AND death_year > ?
        ORDER BY rowid
        "#,
    )
    .bind(year)
    .bind(year)
    .fetch_all(&mut *conn)
    .await
    .map_err(|e| AppError::storage("Failed to get authors alive in year", e))?;

    rows_to_summaries(conn, rows).await
}

/// Counts stored authors
pub async fn count_authors(conn: &mut SqliteConnection) -> Result<i64, AppError> {
    sqlx::query_scalar("SELECT COUNT(*) FROM authors")
        .fetch_one(conn)
        .await
        .map_err(|e| AppError::storage("Failed to count authors", e))
}

async fn titles_for_author(
    conn: &mut SqliteConnection,
    author_id: &str,
) -> Result<Vec<String>, AppError> {
    sqlx::query_scalar(
        r#"
        SELECT b.title
        FROM books b
        JOIN book_authors ba ON ba.book_id = b.id
        WHERE ba.author_id = ?
        ORDER BY b.added_at, b.rowid
        "#,
    )
    .bind(author_id)
    .fetch_all(conn)
    .await
    .map_err(|e| AppError::storage("Failed to get author titles", e))
}

async fn rows_to_summaries(
    conn: &mut SqliteConnection,
    rows: Vec<SqliteRow>,
) -> Result<Vec<AuthorSummary>, AppError> {
    let mut summaries = Vec::with_capacity(rows.len());
    for row in rows {
        let (id, author) = row_to_author(row)?;
        let titles = titles_for_author(conn, &id).await?;
        summaries.push(AuthorSummary::new(author, titles));
    }
    Ok(summaries)
}

fn row_to_author(row: SqliteRow) -> Result<(String, Author), AppError> {
    let id: String = row
        .try_get("id")
        .map_err(|e| AppError::storage("Missing author ID", e))?;

    let author = Author {
        name: row
            .try_get("name")
            .map_err(|e| AppError::storage("Missing author name", e))?,
        birth_year: row
            .try_get("birth_year")
            .map_err(|e| AppError::storage("Invalid birth year", e))?,
        death_year: row
            .try_get("death_year")
            .map_err(|e| AppError::storage("Invalid death year", e))?,
    };

    Ok((id, author))
}
