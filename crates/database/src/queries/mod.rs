//! Database query operations organized by entity
//!
//! Every function takes a plain connection so the same query can run on a
//! pooled connection or inside a transaction.

pub mod authors;
pub mod books;

// Re-export commonly used query functions
pub use authors::{
    authors_for_book, count_authors, find_author_id_by_name, get_authors_alive_in,
    insert_author, link_author, list_authors,
};
pub use books::{count_books, get_book_by_title, get_books_by_language, insert_book, list_books};
