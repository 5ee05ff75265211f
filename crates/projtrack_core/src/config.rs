//! Runtime configuration.
//!
//! # Responsibility
//! - Resolve port, database location and logging settings.
//!
//! # Invariants
//! - Precedence, highest first: environment, TOML file, built-in defaults.
//! - `PORT` is read without prefix; every other key uses `PROJTRACK_`.
//! - A value that does not parse (for example a non-numeric `PORT`) is an
//!   error, never silently replaced by the default.

use crate::logging::default_log_level;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Port used when `PORT` is not set.
pub const DEFAULT_PORT: u16 = 5000;
/// Database file used when no path is configured.
pub const DEFAULT_DATABASE_FILE: &str = "projects.db";
/// Config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "projtrack.toml";

const ENV_PREFIX: &str = "PROJTRACK_";

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug)]
pub enum ConfigError {
    Load(Box<figment::Error>),
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Load(err) => write!(f, "failed to load configuration: {err}"),
            Self::Invalid(message) => write!(f, "invalid configuration: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Load(err) => Some(err.as_ref()),
            Self::Invalid(_) => None,
        }
    }
}

impl From<figment::Error> for ConfigError {
    fn from(value: figment::Error) -> Self {
        Self::Load(Box::new(value))
    }
}

/// Effective application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Listening port for a hosting front end.
    pub port: u16,
    pub database_path: PathBuf,
    /// One of `trace|debug|info|warn|error`.
    pub log_level: String,
    /// Absolute directory for rolling log files; stderr when unset.
    pub log_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            database_path: PathBuf::from(DEFAULT_DATABASE_FILE),
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl AppConfig {
    /// Loads configuration using `projtrack.toml` from the working directory.
    pub fn load() -> ConfigResult<Self> {
        Self::load_from(None)
    }

    /// Loads configuration with an optional explicit TOML file.
    ///
    /// A missing file is not an error; its layer is simply empty.
    pub fn load_from(config_path: Option<&Path>) -> ConfigResult<Self> {
        let config_file = config_path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
        Self::from_figment(Self::figment(config_file))
    }

    /// Layered figment for `config_file`, before extraction.
    pub fn figment(config_file: &Path) -> Figment {
        Figment::new()
            .merge(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(config_file))
            .merge(Env::prefixed(ENV_PREFIX))
            .merge(Env::raw().only(&["PORT"]))
    }

    /// Extracts and validates configuration from an arbitrary figment.
    pub fn from_figment(figment: Figment) -> ConfigResult<Self> {
        let config: AppConfig = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Checks values that deserialize fine but cannot be used.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.database_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid(
                "database_path cannot be empty".to_string(),
            ));
        }

        if let Some(log_dir) = &self.log_dir {
            if !log_dir.is_absolute() {
                return Err(ConfigError::Invalid(format!(
                    "log_dir must be an absolute path, got `{}`",
                    log_dir.display()
                )));
            }
        }

        Ok(())
    }
}
