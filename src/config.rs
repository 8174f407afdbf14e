//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::client::{FileTokenStore, StaticToken, TokenSource};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// CommunityAPI connection settings
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:8084".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

/// Where the bearer token comes from
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    #[serde(default = "default_token_file")]
    pub token_file: PathBuf,

    /// Fixed token; takes precedence over `token_file` when set
    #[serde(default)]
    pub token: Option<String>,
}

fn default_token_file() -> PathBuf {
    dirs::data_local_dir()
        .map(|p| p.join("community-hub").join("token"))
        .unwrap_or_else(|| PathBuf::from("./.community-hub-token"))
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_file: default_token_file(),
            token: None,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    ///
    /// A config file that exists but cannot be read or parsed is an error,
    /// never a silent fallback to defaults.
    pub fn load_default() -> Result<Self, ConfigError> {
        let config_paths: Vec<PathBuf> = [
            dirs::config_dir().map(|p| p.join("community-hub").join("config.toml")),
            Some(PathBuf::from("./community-hub.toml")),
        ]
        .into_iter()
        .flatten()
        .collect();

        Self::load_first(&config_paths)
    }

    /// Load the first existing file among `paths`, else env-only defaults
    pub(crate) fn load_first(paths: &[PathBuf]) -> Result<Self, ConfigError> {
        match paths.iter().find(|path| path.exists()) {
            Some(path) => {
                let config = Self::load_with_env(path)?;
                tracing::info!("Loaded config from {:?}", path);
                Ok(config)
            }
            None => {
                tracing::info!("Using default config with environment overrides");
                Ok(Self::from_env())
            }
        }
    }

    /// Token source for API requests: a fixed token if one is configured,
    /// else the token file
    pub fn token_source(&self) -> Arc<dyn TokenSource> {
        match &self.auth.token {
            Some(token) if !token.trim().is_empty() => Arc::new(StaticToken(Some(token.clone()))),
            _ => Arc::new(FileTokenStore::new(self.auth.token_file.clone())),
        }
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        // API overrides
        if let Some(url) = lookup("COMMUNITY_HUB_API_URL") {
            self.api.base_url = url;
        }
        if let Some(timeout) = lookup("COMMUNITY_HUB_TIMEOUT_SECS") {
            match timeout.parse() {
                Ok(secs) => self.api.request_timeout_secs = secs,
                Err(_) => tracing::warn!("Ignoring invalid COMMUNITY_HUB_TIMEOUT_SECS: {}", timeout),
            }
        }

        // Auth overrides
        if let Some(path) = lookup("COMMUNITY_HUB_TOKEN_FILE") {
            self.auth.token_file = PathBuf::from(path);
        }
        if let Some(token) = lookup("COMMUNITY_HUB_TOKEN") {
            self.auth.token = Some(token);
        }

        // Logging overrides
        if let Some(level) = lookup("COMMUNITY_HUB_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("COMMUNITY_HUB_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Community Hub Configuration
#
# Environment variables override these settings:
# - COMMUNITY_HUB_API_URL
# - COMMUNITY_HUB_TIMEOUT_SECS
# - COMMUNITY_HUB_TOKEN_FILE
# - COMMUNITY_HUB_TOKEN
# - COMMUNITY_HUB_LOG_LEVEL
# - COMMUNITY_HUB_LOG_FORMAT

[api]
# CommunityAPI base URL
base_url = "http://localhost:8084"

# Request timeout in seconds
request_timeout_secs = 30

[auth]
# File holding the bearer token (written by `community-hub login`)
# token_file = "~/.local/share/community-hub/token"

[logging]
# Log level: trace, debug, info, warn, error
level = "warn"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
