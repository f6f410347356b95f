//! Catalog storage policy section

use crate::validation::{ConfigSection, ValidationError};
use literalura_core::{AuthorPolicy, MissingDownloads};
use serde::{Deserialize, Serialize};

/// How ingested records are written to the store
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CatalogConfig {
    /// Whether authors with the same name share one row
    pub author_policy: AuthorPolicy,

    /// What to store when a record has no download count
    pub missing_downloads: MissingDownloads,
}

impl ConfigSection for CatalogConfig {
    // Both fields are closed enums; serde already rejects unknown values.
    fn validate(&self) -> Result<(), Vec<ValidationError>> {
        Ok(())
    }

    fn section_name(&self) -> &'static str {
        "catalog"
    }
}
