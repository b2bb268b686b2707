//! Configuration loading and root folder resolution
//!
//! Bootstrap configuration comes from a TOML file. Every field has a
//! built-in default, so a missing file is never fatal: the loader warns and
//! carries on with defaults.
//!
//! # Root folder priority
//!
//! 1. Command-line argument (highest priority)
//! 2. `CATSYNC_ROOT_FOLDER` environment variable
//! 3. TOML `root_folder` key
//! 4. OS-dependent compiled default (fallback)

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Environment variable overriding the root folder
pub const ROOT_FOLDER_ENV: &str = "CATSYNC_ROOT_FOLDER";

/// Environment variable overriding the catalog access token
pub const ACCESS_TOKEN_ENV: &str = "CATSYNC_ACCESS_TOKEN";

/// Database file name inside the root folder
pub const DEFAULT_DATABASE_FILE: &str = "catsync.db";

/// Bootstrap configuration loaded from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TomlConfig {
    /// Catalog API host, without trailing slash
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Market passed as `country` for artist top tracks
    #[serde(default = "default_market")]
    pub market: String,

    /// Bearer token sent with catalog requests (optional)
    #[serde(default)]
    pub access_token: Option<String>,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Entry store location; defaults to `<root_folder>/catsync.db`
    #[serde(default)]
    pub database_path: Option<PathBuf>,

    /// Root folder (optional, see module docs for priority)
    #[serde(default)]
    pub root_folder: Option<PathBuf>,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log file path (optional, logs to stderr if not specified)
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            market: default_market(),
            access_token: None,
            request_timeout_secs: default_request_timeout_secs(),
            database_path: None,
            root_folder: None,
            logging: LoggingConfig::default(),
        }
    }
}

fn default_api_base_url() -> String {
    "https://api.spotify.com".to_string()
}

fn default_market() -> String {
    "US".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

impl TomlConfig {
    /// Load configuration from `path`
    ///
    /// A missing or unreadable file yields defaults with a warning.
    /// A file that exists but does not parse is a configuration error.
    pub fn load(path: &Path) -> Result<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                warn!(
                    path = %path.display(),
                    error = %e,
                    "Config file not readable, using built-in defaults"
                );
                return Ok(Self::default());
            }
        };

        let config: TomlConfig = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Parse TOML failed ({}): {}", path.display(), e)))?;

        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Access token with `CATSYNC_ACCESS_TOKEN` taking priority over TOML
    pub fn resolved_access_token(&self) -> Option<String> {
        match std::env::var(ACCESS_TOKEN_ENV) {
            Ok(token) if !token.trim().is_empty() => Some(token),
            _ => self
                .access_token
                .clone()
                .filter(|token| !token.trim().is_empty()),
        }
    }

    /// Entry store path, relative to `root_folder` unless configured
    pub fn database_path(&self, root_folder: &Path) -> PathBuf {
        match &self.database_path {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => root_folder.join(path),
            None => root_folder.join(DEFAULT_DATABASE_FILE),
        }
    }
}

/// Default configuration file path for the platform
///
/// `<config_dir>/catsync/config.toml`, falling back to `./catsync.toml`.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("catsync").join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("catsync.toml"))
}

/// Write configuration to `path` atomically (temp file + rename)
pub fn write_toml_config(config: &TomlConfig, path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(config)
        .map_err(|e| Error::Config(format!("Serialize TOML failed: {}", e)))?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let tmp_path = path.with_extension("toml.tmp");
    std::fs::write(&tmp_path, content)?;
    std::fs::rename(&tmp_path, path)?;

    debug!("Wrote configuration to {}", path.display());
    Ok(())
}

/// Resolves the root folder from CLI, environment, TOML and OS default
pub struct RootFolderResolver<'a> {
    cli_arg: Option<PathBuf>,
    toml_config: Option<&'a TomlConfig>,
}

impl<'a> RootFolderResolver<'a> {
    pub fn new() -> Self {
        Self {
            cli_arg: None,
            toml_config: None,
        }
    }

    /// Command-line value, highest priority
    pub fn with_cli_arg(mut self, path: Option<PathBuf>) -> Self {
        self.cli_arg = path;
        self
    }

    pub fn with_toml_config(mut self, config: &'a TomlConfig) -> Self {
        self.toml_config = Some(config);
        self
    }

    pub fn resolve(&self) -> PathBuf {
        if let Some(path) = &self.cli_arg {
            return path.clone();
        }

        if let Ok(path) = std::env::var(ROOT_FOLDER_ENV) {
            if !path.trim().is_empty() {
                return PathBuf::from(path);
            }
        }

        if let Some(path) = self.toml_config.and_then(|c| c.root_folder.clone()) {
            return path;
        }

        default_root_folder()
    }
}

impl Default for RootFolderResolver<'_> {
    fn default() -> Self {
        Self::new()
    }
}

/// OS-dependent default root folder
pub fn default_root_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("catsync"))
        .unwrap_or_else(|| PathBuf::from("./catsync_data"))
}
