//! Error types for the Literalura catalog
//!
//! Every failure the catalog can report is a variant of [`AppError`]. Errors are
//! classified into three severity tiers:
//! - **UserInput**: The caller supplied something the catalog cannot use (unknown
//!   language code, a search with no matches). Fix the input and try again.
//! - **Degraded**: An external collaborator (HTTP transport, remote API, decoder)
//!   failed. The local catalog is still usable.
//! - **Fatal**: The storage engine is unreachable or returned something
//!   unexpected. Nothing can be read or written until it is fixed.
//!
//! The catalog never retries on its own. Retry policy, if any, belongs to the
//! transport or storage collaborator.

use thiserror::Error;

/// Error severity classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// Input must be corrected by the user
    UserInput,
    /// An external collaborator failed, local catalog still works
    Degraded,
    /// Storage is unusable
    Fatal,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UserInput => write!(f, "User input"),
            Self::Degraded => write!(f, "Degraded"),
            Self::Fatal => write!(f, "Fatal"),
        }
    }
}

/// Main error type for Literalura
#[derive(Error, Debug)]
pub enum AppError {
    // ===== Normalization / validation =====
    /// Language code is not in the registry
    #[error("Unsupported language: '{code}'")]
    UnsupportedLanguage { code: String },

    /// Remote record carried no language at all
    #[error("Missing language for book '{title}'")]
    MissingLanguage { title: String },

    /// A record was rejected by the configured store policy
    #[error("Invalid record: {field} - {reason}")]
    InvalidRecord { field: String, reason: String },

    /// Invalid argument provided
    #[error("Invalid argument: {argument} - {reason}")]
    InvalidArgument { argument: String, reason: String },

    // ===== Remote search =====
    /// The remote search returned an empty result set
    #[error("No results for '{query}'")]
    NoResults { query: String },

    /// Network or I/O failure talking to the remote API
    #[error("Transport error: {message}")]
    TransportError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Response body could not be decoded into the expected shape
    #[error("Decode error: {message}")]
    DecodeError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    // ===== Storage =====
    /// Backing storage engine is unreachable or failed
    #[error("Storage unavailable: {message}")]
    StorageUnavailable {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    // ===== Configuration =====
    /// Invalid configuration
    #[error("Invalid configuration: {setting} = '{value}' ({reason})")]
    InvalidConfiguration {
        setting: String,
        value: String,
        reason: String,
    },
}

impl AppError {
    /// Returns the severity level of this error
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnsupportedLanguage { .. }
            | Self::MissingLanguage { .. }
            | Self::InvalidRecord { .. }
            | Self::InvalidArgument { .. }
            | Self::NoResults { .. }
            | Self::InvalidConfiguration { .. } => ErrorSeverity::UserInput,

            Self::TransportError { .. } | Self::DecodeError { .. } => ErrorSeverity::Degraded,

            Self::StorageUnavailable { .. } => ErrorSeverity::Fatal,
        }
    }

    /// Returns a user-friendly error message suitable for display
    pub fn user_message(&self) -> String {
        match self {
            Self::UnsupportedLanguage { code } => {
                format!(
                    "'{}' is not a supported language. Pick one of the listed languages.",
                    code
                )
            }
            Self::MissingLanguage { title } => {
                format!("'{}' has no language information and cannot be stored.", title)
            }
            Self::InvalidRecord { field, .. } => {
                format!("The book record was rejected ({}).", field)
            }
            Self::InvalidArgument { argument, .. } => {
                format!("Invalid input for {}.", argument)
            }
            Self::NoResults { query } => format!("No books found for '{}'.", query),
            Self::TransportError { .. } => {
                "Cannot reach the book service. Please check your connection.".to_string()
            }
            Self::DecodeError { .. } => "Received invalid data from the book service.".to_string(),
            Self::StorageUnavailable { .. } => {
                "The catalog database is unavailable. Please check the database path.".to_string()
            }
            Self::InvalidConfiguration { setting, .. } => {
                format!("Invalid setting: {}. Please check your configuration.", setting)
            }
        }
    }

    /// Returns true if this error should be logged at ERROR level
    pub fn is_critical(&self) -> bool {
        self.severity() == ErrorSeverity::Fatal
    }

    /// The catalog performs no automatic retry, whatever the error.
    pub fn is_retryable(&self) -> bool {
        false
    }

    /// Helper to create a storage error from any error type
    pub fn storage<E: std::error::Error + Send + Sync + 'static>(
        message: impl Into<String>,
        source: E,
    ) -> Self {
        Self::StorageUnavailable {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Helper to create a transport error from any error type
    pub fn transport<E: std::error::Error + Send + Sync + 'static>(
        message: impl Into<String>,
        source: E,
    ) -> Self {
        Self::TransportError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Helper to create a decode error from any error type
    pub fn decode<E: std::error::Error + Send + Sync + 'static>(
        message: impl Into<String>,
        source: E,
    ) -> Self {
        Self::DecodeError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

/// Convenience type alias for Results using AppError
pub type Result<T> = std::result::Result<T, AppError>;
