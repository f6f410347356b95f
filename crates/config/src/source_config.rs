//! Remote book API configuration section

use crate::validation::{ConfigSection, ValidationError, Validator};
use serde::{Deserialize, Serialize};

/// Settings for the HTTP book source
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SourceConfig {
    /// Search endpoint, queried as `{base_url}?search=...`
    pub base_url: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// User agent sent with every request
    pub user_agent: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://gutendex.com/books/".to_string(),
            timeout_secs: 30,
            user_agent: concat!("literalura/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ConfigSection for SourceConfig {
    fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let results = vec![
            Validator::http_url(&self.base_url, "source.base_url"),
            Validator::in_range(self.timeout_secs, 1, 300, "source.timeout_secs"),
            Validator::not_empty(&self.user_agent, "source.user_agent"),
        ];

        Validator::collect_errors(results)
    }

    fn section_name(&self) -> &'static str {
        "source"
    }
}
