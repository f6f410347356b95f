//! Config errors

use literalura_core::AppError;
use std::path::PathBuf;
use thiserror::Error;

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read {}: {source}", path.display())]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A config file exists but holds nothing; it is never treated as defaults
    #[error("{} is empty; run `literalura config reset` to rewrite it", path.display())]
    EmptyFile { path: PathBuf },

    #[error("{} is not valid TOML: {source}", path.display())]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Cannot render config as TOML: {0}")]
    SerializeError(#[from] toml::ser::Error),

    /// Refused to save a config that fails validation
    #[error("Config has {} invalid value(s): {}", .0.len(), join_errors(.0))]
    Invalid(Vec<ValidationError>),

    #[error("Invalid value '{value}' for {variable}: {reason}")]
    EnvOverride {
        variable: String,
        value: String,
        reason: String,
    },

    /// Creating the directory, the temp file, or the backup copy failed
    #[error("Cannot write {}: {source}", path.display())]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("No config directory available: {reason}")]
    PathResolutionError { reason: String },
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::EnvOverride {
                variable,
                value,
                reason,
            } => AppError::InvalidConfiguration {
                setting: variable,
                value,
                reason,
            },
            ConfigError::Invalid(errors) => {
                let setting = errors
                    .first()
                    .map(|e| e.field.clone())
                    .unwrap_or_else(|| "config".to_string());
                AppError::InvalidConfiguration {
                    setting,
                    value: String::new(),
                    reason: join_errors(&errors),
                }
            }
            other => AppError::InvalidConfiguration {
                setting: "config".to_string(),
                value: String::new(),
                reason: other.to_string(),
            },
        }
    }
}

/// One bad value, named by its dotted path such as `source.timeout_secs`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    pub value: Option<String>,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            value: None,
        }
    }

    pub fn with_value(
        field: impl Into<String>,
        message: impl Into<String>,
        value: impl ToString,
    ) -> Self {
        Self {
            value: Some(value.to_string()),
            ..Self::new(field, message)
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{} {} (got: {})", self.field, self.message, value),
            None => write!(f, "{} {}", self.field, self.message),
        }
    }
}

impl std::error::Error for ValidationError {}
