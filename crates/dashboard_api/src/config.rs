//! Configuration loading for the dashboard server.
//!
//! The configuration is stored in TOML format. It is read from the file
//! named by `DASHBOARD_CONFIG`, or from `dashboard.toml` in the working
//! directory if that exists; otherwise every setting takes its default.
//! `API_HOST` and `API_PORT` override the `[server]` section.

use std::{
    fs,
    path::{Path, PathBuf},
};

use issues_topic::{ResolverConfig, DEFAULT_REPOSITORY};
use serde::Deserialize;
use tracing::{debug, info};

use crate::ApiConfig;

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

/// Environment variable naming the configuration file.
pub const CONFIG_PATH_ENV: &str = "DASHBOARD_CONFIG";

/// Configuration file picked up from the working directory.
pub const DEFAULT_CONFIG_FILENAME: &str = "dashboard.toml";

/// Default lifetime of cached organizations, repositories and users.
pub const DEFAULT_CACHE_TTL_SECS: i64 = dashboard_storage::DEFAULT_CACHE_TTL_SECS;

/// Errors raised while loading the configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {}", .path.display())]
    FileNotFound { path: PathBuf },

    #[error("Failed to read configuration file {}: {reason}", .path.display())]
    Read { path: PathBuf, reason: String },

    #[error("Failed to parse configuration file: {0}")]
    Parse(String),

    #[error("Invalid value for {key}: '{value}'")]
    InvalidValue { key: String, value: String },
}

/// Complete configuration of the dashboard server.
///
/// # Example TOML Configuration
///
/// ```toml
/// seed_path = "seed.json"
///
/// [server]
/// host = "127.0.0.1"
/// port = 8080
/// request_timeout_secs = 30
///
/// [cache]
/// ttl_secs = 300
///
/// [issues]
/// repository = "istio"
/// html_default_org = "istio"
/// api_default_org = "istio"
/// scan = "open"
/// projection = "display_resolved"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// HTTP server settings
    pub server: ApiConfig,

    /// Resolution cache settings
    pub cache: CacheConfig,

    /// Issues topic settings
    pub issues: IssuesTopicConfig,

    /// JSON fixture loaded into the in-memory store at startup
    pub seed_path: Option<PathBuf>,
}

/// Resolution cache settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Seconds a cached entity stays valid
    pub ttl_secs: i64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: DEFAULT_CACHE_TTL_SECS,
        }
    }
}

impl CacheConfig {
    /// The TTL as a duration.
    pub fn ttl(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.ttl_secs)
    }
}

/// Issues topic settings.
///
/// The resolver settings sit directly in the `[issues]` section next to the
/// default organizations.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IssuesTopicConfig {
    /// Resolver settings
    #[serde(flatten)]
    pub resolver: ResolverConfig,

    /// Organization shown by the HTML page when `org` is absent
    pub html_default_org: String,

    /// Organization listed by the JSON endpoint when `org` is absent
    pub api_default_org: String,
}

impl Default for IssuesTopicConfig {
    fn default() -> Self {
        Self {
            resolver: ResolverConfig::default(),
            html_default_org: DEFAULT_REPOSITORY.to_string(),
            api_default_org: DEFAULT_REPOSITORY.to_string(),
        }
    }
}

impl DashboardConfig {
    /// Loads configuration from a TOML file at the specified path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist, cannot be read, or does
    /// not match the configuration schema.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        debug!("Loading configuration from {:?}", path);

        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        Self::from_toml_str(&content)
    }

    /// Parses configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Loads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::resolve(|key| std::env::var(key).ok())
    }

    /// Loads configuration using `lookup` to read environment variables.
    ///
    /// The file is chosen as described in the module documentation; host
    /// and port overrides are applied afterwards and the result is
    /// validated.
    pub fn resolve<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let default_path = Path::new(DEFAULT_CONFIG_FILENAME);
        let mut config = match lookup(CONFIG_PATH_ENV) {
            Some(path) => Self::load(Path::new(&path))?,
            None if default_path.exists() => Self::load(default_path)?,
            None => {
                info!("No configuration file found, using defaults");
                Self::default()
            }
        };

        config.apply_overrides(&lookup)?;
        config.validate()?;

        Ok(config)
    }

    /// Applies `API_HOST` and `API_PORT` overrides.
    pub fn apply_overrides<F>(&mut self, lookup: &F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("API_HOST") {
            self.server.host = host;
        }

        if let Some(port) = lookup("API_PORT") {
            self.server.port = port.parse().map_err(|_| ConfigError::InvalidValue {
                key: "API_PORT".to_string(),
                value: port.clone(),
            })?;
        }

        Ok(())
    }

    /// Rejects settings the server cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.request_timeout_secs == 0 {
            return Err(invalid("server.request_timeout_secs", "0"));
        }
        if self.cache.ttl_secs <= 0 {
            return Err(invalid("cache.ttl_secs", self.cache.ttl_secs));
        }
        if self.issues.resolver.repository.trim().is_empty() {
            return Err(invalid(
                "issues.repository",
                &self.issues.resolver.repository,
            ));
        }
        Ok(())
    }
}

fn invalid(key: &str, value: impl ToString) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    }
}
