//! Literalura Database Layer
//!
//! This crate persists the book catalog in SQLite using sqlx. Row identifiers
//! are UUID strings that never leave this crate; callers see plain `Book` and
//! `AuthorSummary` values.

pub mod connection;
pub mod migrations;
pub mod queries;
pub mod store;

pub use connection::{connect, connect_in_memory, DatabaseConfig, DbPool};
pub use migrations::run_migrations;
pub use store::{CatalogStore, StorePolicy};
