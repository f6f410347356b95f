//! Literalura Configuration System
//!
//! Settings live in a single TOML file with one table per concern:
//!
//! - **`[app]`**: database location and log level
//! - **`[source]`**: the remote book API endpoint and HTTP behavior
//! - **`[catalog]`**: how the store treats repeated authors and missing
//!   download counts
//!
//! Missing files fall back to defaults, writes are atomic, and environment
//! variables prefixed `LITERALURA_` override file values.
//!
//! # Example
//!
//! ```rust,no_run
//! use literalura_config::{Config, ConfigManager};
//!
//! let manager = ConfigManager::new().expect("Failed to initialize config");
//! let config = manager.load().unwrap_or_else(|e| {
//!     eprintln!("Config error: {}, using defaults", e);
//!     Config::default()
//! });
//!
//! println!("Database: {}", config.app.database_path.display());
//! ```

mod error;
mod manager;
mod persistence;
mod validation;

// Config sections
pub mod app_config;
mod catalog_config;
mod source_config;

pub use error::{ConfigError, ConfigResult, ValidationError};
pub use manager::{apply_env_overrides, ConfigManager, ENV_PREFIX};
pub use validation::{ConfigSection, Validator};

pub use app_config::{AppConfig, LogLevel};
pub use catalog_config::CatalogConfig;
pub use source_config::SourceConfig;

use serde::{Deserialize, Serialize};

/// Current config file format version
pub const CONFIG_VERSION: u32 = 1;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Config file format version
    pub version: u32,

    /// Application-level settings
    pub app: AppConfig,

    /// Remote book API settings
    pub source: SourceConfig,

    /// Catalog storage policy
    pub catalog: CatalogConfig,
}

impl Config {
    /// Creates a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates the entire configuration
    ///
    /// Returns all validation errors found across all sections.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let checks = [
            (self.app.section_name(), self.app.validate()),
            (self.source.section_name(), self.source.validate()),
            (self.catalog.section_name(), self.catalog.validate()),
        ];

        let mut errors = Vec::new();
        for (section, result) in checks {
            if let Err(mut found) = result {
                log::debug!("[{}] has {} invalid value(s)", section, found.len());
                errors.append(&mut found);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            app: AppConfig::default(),
            source: SourceConfig::default(),
            catalog: CatalogConfig::default(),
        }
    }
}
