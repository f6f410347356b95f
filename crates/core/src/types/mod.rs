//! Domain types for Literalura
//!
//! - `language`: the fixed language registry
//! - `book`: catalogued books
//! - `author`: authors and author listings
//! - `remote`: raw records from the bibliographic API
//! - `policy`: configurable store policies

mod author;
mod book;
mod language;
mod policy;
mod remote;

pub use author::{Author, AuthorSummary};
pub use book::{join_subjects, Book, SUBJECT_SEPARATOR};
pub use language::Language;
pub use policy::{AuthorPolicy, MissingDownloads};
pub use remote::{RemoteAuthor, RemoteBook};
