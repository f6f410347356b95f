//! Configuration manager - main API for config operations

use crate::persistence::ConfigPersistence;
use crate::{Config, ConfigError, ConfigResult, LogLevel};
use directories::ProjectDirs;
use std::path::PathBuf;
use std::str::FromStr;

/// Prefix shared by every environment override
pub const ENV_PREFIX: &str = "LITERALURA_";

/// Main configuration manager
///
/// Primary interface for loading, saving, and resetting the config file.
pub struct ConfigManager {
    persistence: ConfigPersistence,
    config_dir: PathBuf,
}

impl ConfigManager {
    /// Creates a new config manager using the default config directory
    ///
    /// - Linux: `~/.config/literalura/`
    /// - macOS: `~/Library/Application Support/literalura/`
    /// - Windows: `%APPDATA%\literalura\`
    pub fn new() -> ConfigResult<Self> {
        let config_dir = Self::default_config_dir()?;
        Self::with_directory(config_dir)
    }

    /// Creates a config manager with a custom config directory
    pub fn with_directory(config_dir: PathBuf) -> ConfigResult<Self> {
        let config_path = config_dir.join("config.toml");
        let persistence = ConfigPersistence::new(config_path);

        Ok(Self {
            persistence,
            config_dir,
        })
    }

    fn default_config_dir() -> ConfigResult<PathBuf> {
        ProjectDirs::from("", "", "literalura")
            .map(|proj_dirs| proj_dirs.config_dir().to_path_buf())
            .ok_or_else(|| ConfigError::PathResolutionError {
                reason: "Could not determine user config directory".to_string(),
            })
    }

    /// Returns the config directory path
    pub fn config_dir(&self) -> &PathBuf {
        &self.config_dir
    }

    /// Returns the full config file path
    pub fn config_path(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    /// Loads the configuration from file
    ///
    /// If the file doesn't exist, returns default configuration.
    /// If the file is corrupted, returns an error.
    pub fn load(&self) -> ConfigResult<Config> {
        self.persistence.load()
    }

    /// Validates and atomically saves the configuration
    pub fn save(&self, config: &Config) -> ConfigResult<()> {
        self.persistence.save(config)
    }

    /// Loads, applies `update_fn`, and saves the result
    pub fn update<F>(&self, update_fn: F) -> ConfigResult<()>
    where
        F: FnOnce(&mut Config),
    {
        let mut config = self.load()?;
        update_fn(&mut config);
        self.save(&config)
    }

    /// Writes a default config file if one doesn't exist
    ///
    /// Returns Ok(true) if a new file was created, Ok(false) if one already exists.
    pub fn initialize(&self) -> ConfigResult<bool> {
        if self.config_path().exists() {
            log::info!(
                "Config file already exists at {}",
                self.config_path().display()
            );
            return Ok(false);
        }

        self.save(&Config::default())?;
        log::info!("Generated default config at {}", self.config_path().display());
        Ok(true)
    }

    /// Overwrites the config file with default values
    ///
    /// The current file is never parsed, so a corrupt file can be replaced.
    pub fn reset(&self) -> ConfigResult<()> {
        self.save(&Config::default())
    }

    /// Validates the current configuration file
    ///
    /// Returns all validation errors found, or an empty list if valid.
    pub fn validate(&self) -> ConfigResult<Vec<String>> {
        let config = self.load()?;

        match config.validate() {
            Ok(()) => Ok(Vec::new()),
            Err(errors) => Ok(errors.iter().map(|e| e.to_string()).collect()),
        }
    }

    /// Loads the file and applies `LITERALURA_SECTION_FIELD` overrides
    ///
    /// Example: `LITERALURA_SOURCE_TIMEOUT_SECS=10`
    pub fn load_with_env_overrides(&self) -> ConfigResult<Config> {
        let mut config = self.load()?;
        apply_env_overrides(&mut config, |name| std::env::var(name).ok())?;

        if let Err(errors) = config.validate() {
            log::warn!(
                "Config validation warnings after env overrides: {:?}",
                errors
            );
        }

        Ok(config)
    }
}

/// Applies overrides from `lookup`, which maps a variable name to its value
///
/// Unset variables leave the config untouched. A set variable that does not
/// parse is an error rather than being ignored.
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F) -> ConfigResult<()>
where
    F: Fn(&str) -> Option<String>,
{
    let var = |field: &str| {
        let name = format!("{}{}", ENV_PREFIX, field);
        lookup(&name).map(|value| (name, value))
    };

    if let Some((_, value)) = var("APP_DATABASE_PATH") {
        config.app.database_path = PathBuf::from(value);
    }

    if let Some((name, value)) = var("APP_LOG_LEVEL") {
        config.app.log_level = parse_override::<LogLevel>(name, value)?;
    }

    if let Some((_, value)) = var("SOURCE_BASE_URL") {
        config.source.base_url = value;
    }

    if let Some((name, value)) = var("SOURCE_TIMEOUT_SECS") {
        config.source.timeout_secs = parse_override(name, value)?;
    }

    if let Some((name, value)) = var("CATALOG_AUTHOR_POLICY") {
        config.catalog.author_policy = parse_override(name, value)?;
    }

    if let Some((name, value)) = var("CATALOG_MISSING_DOWNLOADS") {
        config.catalog.missing_downloads = parse_override(name, value)?;
    }

    Ok(())
}

fn parse_override<T>(variable: String, value: String) -> ConfigResult<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match value.trim().parse::<T>() {
        Ok(parsed) => {
            log::debug!("{} override applied", variable);
            Ok(parsed)
        }
        Err(e) => Err(ConfigError::EnvOverride {
            variable,
            reason: e.to_string(),
            value,
        }),
    }
}
