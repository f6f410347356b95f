//! Reading and writing `config.toml`
//!
//! A missing file means defaults. Saves go to a temp file in the same
//! directory that is then renamed over `config.toml`, and the file being
//! replaced is first copied to `config.toml.backup`, so a crash mid-save
//! never leaves a half-written config behind.

use crate::{Config, ConfigError, ConfigResult, CONFIG_VERSION};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub struct ConfigPersistence {
    config_path: PathBuf,
}

impl ConfigPersistence {
    pub fn new(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    pub fn load(&self) -> ConfigResult<Config> {
        let path = &self.config_path;
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No config at {}, using defaults", path.display());
                return Ok(Config::default());
            }
            Err(source) => {
                return Err(ConfigError::ReadError {
                    path: path.clone(),
                    source,
                })
            }
        };

        if contents.trim().is_empty() {
            return Err(ConfigError::EmptyFile { path: path.clone() });
        }

        let config: Config = toml::from_str(&contents).map_err(|source| {
            ConfigError::ParseError {
                path: path.clone(),
                source,
            }
        })?;

        if config.version > CONFIG_VERSION {
            log::warn!(
                "{} was written by a newer literalura (format {}, this build reads {})",
                path.display(),
                config.version,
                CONFIG_VERSION
            );
        }

        // Bad values are reported but still loaded; `config validate` lists them
        if let Err(errors) = config.validate() {
            for error in &errors {
                log::warn!("{}: {}", path.display(), error);
            }
        }

        Ok(config)
    }

    pub fn save(&self, config: &Config) -> ConfigResult<()> {
        config.validate().map_err(ConfigError::Invalid)?;
        let rendered = toml::to_string_pretty(config)?;

        let dir = self.parent_dir()?;
        if !dir.exists() {
            fs::create_dir_all(dir).map_err(|source| self.write_error(dir, source))?;
            log::debug!("Created {}", dir.display());
        }

        if self.config_path.exists() {
            let backup = self.backup_path();
            fs::copy(&self.config_path, &backup)
                .map_err(|source| self.write_error(&backup, source))?;
        }

        let mut staged =
            NamedTempFile::new_in(dir).map_err(|source| self.write_error(dir, source))?;
        if let Err(source) = staged
            .write_all(rendered.as_bytes())
            .and_then(|_| staged.flush())
        {
            return Err(self.write_error(staged.path(), source));
        }
        staged
            .persist(&self.config_path)
            .map_err(|e| self.write_error(&self.config_path, e.error))?;

        log::info!("Saved config to {}", self.config_path.display());
        Ok(())
    }

    /// Where the previous `config.toml` is copied before a save replaces it
    pub fn backup_path(&self) -> PathBuf {
        self.config_path.with_extension("toml.backup")
    }

    fn parent_dir(&self) -> ConfigResult<&Path> {
        self.config_path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .ok_or_else(|| ConfigError::PathResolutionError {
                reason: format!("{} has no parent directory", self.config_path.display()),
            })
    }

    fn write_error(&self, path: &Path, source: std::io::Error) -> ConfigError {
        ConfigError::WriteError {
            path: path.to_path_buf(),
            source,
        }
    }
}
