mod admin_gate;
pub use self::admin_gate::*;
mod theme;
pub use self::theme::*;

use crate::storage::Storage;

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;
use std::io;
use std::path::Path;
use tracing::debug;

/// Storage slot of the optional settings file (JSON, every entry optional).
pub const CONFIG_KEY: &str = "pdr.json";
pub const DEFAULT_DATABASE_FILE: &str = "pdr_records.sqlite";
pub const DEFAULT_TOP_N: usize = 5;

#[derive(Debug)]
pub enum ConfigError {
    StorageIOError { source: io::Error },
    InvalidConfigFile { source: serde_json::Error },
    InvalidDigest { digest: String },
    UnknownTheme { name: String },
}
pub type Result<T> = std::result::Result<T, ConfigError>;

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StorageIOError { source } => write!(f, "could not read settings: {}", source),
            Self::InvalidConfigFile { source } => write!(f, "invalid {}: {}", CONFIG_KEY, source),
            Self::InvalidDigest { digest } => {
                write!(f, "'{}' is not a hex encoded SHA-256 digest", digest)
            }
            Self::UnknownTheme { name } => write!(
                f,
                "unknown theme '{}' (available: {})",
                name,
                Theme::ALL
                    .iter()
                    .map(|theme| theme.name())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        }
    }
}
impl From<io::Error> for ConfigError {
    fn from(error: io::Error) -> Self {
        Self::StorageIOError { source: error }
    }
}
impl From<serde_json::Error> for ConfigError {
    fn from(error: serde_json::Error) -> Self {
        Self::InvalidConfigFile { source: error }
    }
}
impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::StorageIOError { ref source } => Some(source),
            Self::InvalidConfigFile { ref source } => Some(source),
            Self::InvalidDigest { .. } | Self::UnknownTheme { .. } => None,
        }
    }
}

/// Content of the settings file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub database_url: Option<String>,
    pub admin_digest: Option<String>,
    pub top_n: Option<usize>,
}

/// Values given on the command line (or through their environment variables).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub database_url: Option<String>,
}

/// Effective settings of one workspace: command line over settings file over defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub database_url: String,
    pub admin_digest: String,
    pub top_n: usize,
}

impl Config {
    pub fn defaults(workspace: &Path) -> Self {
        Self {
            database_url: workspace.join(DEFAULT_DATABASE_FILE).to_string_lossy().into_owned(),
            admin_digest: DEFAULT_ADMIN_DIGEST.to_string(),
            top_n: DEFAULT_TOP_N,
        }
    }

    pub fn load<S: Storage>(workspace: &Path, storage: &S, overrides: &Overrides) -> Result<Self> {
        let file_config = match storage.read(CONFIG_KEY)? {
            Some(json) => serde_json::from_str(&json)?,
            None => FileConfig::default(),
        };

        let config = Self::merge(Self::defaults(workspace), file_config, overrides);
        debug!(database_url = %config.database_url, top_n = config.top_n, "configuration loaded");

        Ok(config)
    }

    fn merge(defaults: Self, file: FileConfig, overrides: &Overrides) -> Self {
        Self {
            database_url: overrides
                .database_url
                .clone()
                .or(file.database_url)
                .unwrap_or(defaults.database_url),
            admin_digest: file.admin_digest.unwrap_or(defaults.admin_digest),
            top_n: file.top_n.unwrap_or(defaults.top_n),
        }
    }

    pub fn admin_gate(&self) -> Result<AdminGate> {
        AdminGate::from_hex_digest(&self.admin_digest)
    }
}
