//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and `HACKTRACK_*` environment variable overrides.

use crate::timing::Latency;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub latency: LatencyConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where persisted snapshots live
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

fn default_data_dir() -> String {
    dirs::data_local_dir()
        .map(|p| p.join("hacktrack").to_string_lossy().to_string())
        .unwrap_or_else(|| "./hacktrack_data".to_string())
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

impl StorageConfig {
    /// `data_dir` with a leading `~` expanded
    pub fn data_path(&self) -> PathBuf {
        match self.data_dir.strip_prefix("~/") {
            Some(rest) => dirs::home_dir()
                .map(|home| home.join(rest))
                .unwrap_or_else(|| PathBuf::from(&self.data_dir)),
            None => PathBuf::from(&self.data_dir),
        }
    }
}

/// Simulated waits, in milliseconds
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LatencyConfig {
    #[serde(default = "default_login_ms")]
    pub login_ms: u64,

    #[serde(default = "default_logout_ms")]
    pub logout_ms: u64,

    #[serde(default = "default_review_ms")]
    pub review_ms: u64,

    #[serde(default = "default_decision_ms")]
    pub decision_ms: u64,
}

fn default_login_ms() -> u64 {
    1000
}

fn default_logout_ms() -> u64 {
    500
}

fn default_review_ms() -> u64 {
    3000
}

fn default_decision_ms() -> u64 {
    5000
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            login_ms: default_login_ms(),
            logout_ms: default_logout_ms(),
            review_ms: default_review_ms(),
            decision_ms: default_decision_ms(),
        }
    }
}

impl LatencyConfig {
    pub fn to_latency(&self) -> Latency {
        Latency {
            login: Duration::from_millis(self.login_ms),
            logout: Duration::from_millis(self.logout_ms),
            review_after: Duration::from_millis(self.review_ms),
            decision_after: Duration::from_millis(self.decision_ms),
        }
    }
}

/// Local API server configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: vec![
                "http://localhost:5173".to_string(),
                "http://127.0.0.1:5173".to_string(),
            ],
        }
    }
}

impl ApiConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
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

impl LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset
    pub fn default_directive(&self) -> String {
        format!("hacktrack={}", self.level)
    }

    /// Install the global tracing subscriber
    ///
    /// `RUST_LOG` wins over the configured level. Safe to call more than once;
    /// later calls are ignored.
    pub fn init(&self) {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| self.default_directive().into());

        let registry = tracing_subscriber::registry().with(filter);
        let result = if self.format.eq_ignore_ascii_case("json") {
            registry
                .with(tracing_subscriber::fmt::layer().json())
                .try_init()
        } else {
            registry
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .try_init()
        };

        if let Err(e) = result {
            tracing::debug!("Tracing already initialized: {}", e);
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

    /// Candidate config file locations, in lookup order
    pub fn default_paths() -> Vec<PathBuf> {
        [
            dirs::config_dir().map(|p| p.join("hacktrack").join("config.toml")),
            Some(PathBuf::from("/etc/hacktrack/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        for path in Self::default_paths() {
            if path.exists() {
                match Self::load_with_env(&path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        fn millis(value: Option<String>, target: &mut u64) {
            if let Some(ms) = value.and_then(|v| v.parse().ok()) {
                *target = ms;
            }
        }

        // Storage overrides
        if let Some(data_dir) = var("HACKTRACK_DATA_DIR") {
            self.storage.data_dir = data_dir;
        }

        // Latency overrides
        millis(var("HACKTRACK_LOGIN_MS"), &mut self.latency.login_ms);
        millis(var("HACKTRACK_LOGOUT_MS"), &mut self.latency.logout_ms);
        millis(var("HACKTRACK_REVIEW_MS"), &mut self.latency.review_ms);
        millis(var("HACKTRACK_DECISION_MS"), &mut self.latency.decision_ms);

        // API overrides
        if let Some(host) = var("HACKTRACK_API_HOST") {
            self.api.host = host;
        }
        if let Some(port) = var("HACKTRACK_API_PORT") {
            if let Ok(p) = port.parse() {
                self.api.port = p;
            }
        }

        // Logging overrides
        if let Some(level) = var("HACKTRACK_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("HACKTRACK_LOG_FORMAT") {
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
    r#"# HackTrack Configuration
#
# Environment variables override these settings:
# - HACKTRACK_DATA_DIR
# - HACKTRACK_LOGIN_MS, HACKTRACK_LOGOUT_MS
# - HACKTRACK_REVIEW_MS, HACKTRACK_DECISION_MS
# - HACKTRACK_API_HOST
# - HACKTRACK_API_PORT
# - HACKTRACK_LOG_LEVEL
# - HACKTRACK_LOG_FORMAT

[storage]
# Directory holding the persisted session, hackathons and results
data_dir = "~/.local/share/hacktrack"

[latency]
# Simulated wait before a login attempt resolves (ms)
login_ms = 1000

# Simulated wait before a logout resolves (ms)
logout_ms = 500

# Time a submission stays submitted before review starts (ms)
review_ms = 3000

# Time a submission stays under review before the decision (ms)
decision_ms = 5000

[api]
# API server host
host = "127.0.0.1"

# API server port
port = 8080

# Allowed CORS origins
cors_origins = ["http://localhost:5173", "http://127.0.0.1:5173"]

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
