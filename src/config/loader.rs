//! Configuration file discovery and layering
//!
//! The file comes from `--config`, then `MOTDPLAYER_CONFIG`, then
//! `<config_dir>/motdplayer/config.toml`. Environment variables are laid over
//! it; command-line overrides are applied by the caller afterwards.

use crate::{Error, Result, config::Settings};
use std::path::{Path, PathBuf};

/// Environment variable naming the configuration file
pub const CONFIG_ENV_VAR: &str = "MOTDPLAYER_CONFIG";

/// Where the configuration file was found
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Given on the command line
    Flag(PathBuf),
    /// Named by `MOTDPLAYER_CONFIG`
    Env(PathBuf),
    /// Platform configuration directory
    Default(PathBuf),
    /// No file; defaults and environment only
    None,
}

impl ConfigSource {
    /// File to read, if any
    pub fn path(&self) -> Option<&Path> {
        match self {
            ConfigSource::Flag(path) | ConfigSource::Env(path) | ConfigSource::Default(path) => {
                Some(path)
            }
            ConfigSource::None => None,
        }
    }
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Flag(path) => write!(f, "{} (--config)", path.display()),
            ConfigSource::Env(path) => write!(f, "{} ({})", path.display(), CONFIG_ENV_VAR),
            ConfigSource::Default(path) => write!(f, "{}", path.display()),
            ConfigSource::None => write!(f, "defaults and environment"),
        }
    }
}

/// Resolves and loads the layered configuration
#[derive(Debug, Default, Clone)]
pub struct ConfigLoader {
    explicit: Option<PathBuf>,
}

impl ConfigLoader {
    /// Loader that looks the file up through the environment
    pub fn new() -> Self {
        Self::default()
    }

    /// Loader for a file named on the command line
    ///
    /// The file must exist; unlike the environment and default locations
    /// it is never skipped.
    pub fn with_file(path: impl Into<PathBuf>) -> Self {
        Self {
            explicit: Some(path.into()),
        }
    }

    /// Pick the configuration file
    ///
    /// A `MOTDPLAYER_CONFIG` that names a missing file is ignored and the
    /// default location is tried instead.
    pub fn source(&self) -> ConfigSource {
        if let Some(path) = &self.explicit {
            return ConfigSource::Flag(path.clone());
        }

        if let Some(path) = std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from)
            && path.is_file()
        {
            return ConfigSource::Env(path);
        }

        dirs::config_dir()
            .map(|dir| dir.join("motdplayer").join("config.toml"))
            .filter(|path| path.is_file())
            .map_or(ConfigSource::None, ConfigSource::Default)
    }

    /// Defaults, then the file, then the environment, validated
    pub fn load(&self) -> Result<(Settings, ConfigSource)> {
        let source = self.source();

        let settings = match source.path() {
            Some(path) if !path.exists() => {
                return Err(Error::config(
                    "file",
                    &format!("Configuration file not found: {}", path.display()),
                ));
            }
            Some(path) => Settings::from_file(path)?,
            None => Settings::default(),
        };

        let settings = settings.merge_with_env()?;
        settings.validate()?;

        Ok((settings, source))
    }
}
