//! Store policies that are a matter of configuration rather than data

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How authors of a newly stored book are matched against existing ones
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthorPolicy {
    /// Every stored book gets its own author rows, even if an author with the
    /// same name already exists
    #[default]
    PerBook,
    /// Link to an existing author with the exact same name when there is one
    ReuseByName,
}

/// What the store does with a book whose download count is unknown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingDownloads {
    /// Store the count as unknown
    #[default]
    Keep,
    /// Store zero
    Zero,
    /// Refuse to store the book
    Reject,
}

impl fmt::Display for AuthorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthorPolicy::PerBook => write!(f, "per_book"),
            AuthorPolicy::ReuseByName => write!(f, "reuse_by_name"),
        }
    }
}

impl FromStr for AuthorPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "per_book" => Ok(AuthorPolicy::PerBook),
            "reuse_by_name" => Ok(AuthorPolicy::ReuseByName),
            other => Err(format!("unknown author policy '{}'", other)),
        }
    }
}

impl fmt::Display for MissingDownloads {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissingDownloads::Keep => write!(f, "keep"),
            MissingDownloads::Zero => write!(f, "zero"),
            MissingDownloads::Reject => write!(f, "reject"),
        }
    }
}

impl FromStr for MissingDownloads {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "keep" => Ok(MissingDownloads::Keep),
            "zero" => Ok(MissingDownloads::Zero),
            "reject" => Ok(MissingDownloads::Reject),
            other => Err(format!("unknown download policy '{}'", other)),
        }
    }
}
