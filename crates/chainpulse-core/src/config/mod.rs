//! Application configuration with layered loading.
//!
//! # Configuration Hierarchy
//!
//! Configuration is loaded in this order (later overrides earlier):
//!
//! 1. **Compiled defaults**: Hardcoded in struct `Default` implementations
//! 2. **Config file**: TOML file specified by `CHAINPULSE_CONFIG` env var
//! 3. **Environment variables**: `CHAINPULSE__*` env vars override specific
//!    fields, with `__` as the nesting separator
//!
//! # Validation
//!
//! Configuration is validated at load time. Invalid configurations (empty
//! candidate lists, zero timeouts) return errors rather than failing
//! silently mid-cycle.
//!
//! # Example
//!
//! ```toml
//! [server]
//! bind_address = "0.0.0.0"
//! bind_port = 3030
//!
//! [explorer]
//! base_url = "https://testnet-explorer.example.io"
//! blocks_window = 100
//! request_timeout_seconds = 5
//! ```

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::{path::Path, time::Duration};

/// HTTP server configuration settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// IP address to bind the server to. Defaults to `127.0.0.1`.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Port number to listen on. Must be greater than 0. Defaults to `3030`.
    #[serde(default = "default_bind_port")]
    pub bind_port: u16,

    /// Maximum number of concurrent inbound requests. Defaults to `100`.
    #[serde(default = "default_max_concurrent_requests")]
    pub max_concurrent_requests: usize,
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_bind_port() -> u16 {
    3030
}

fn default_max_concurrent_requests() -> usize {
    100
}

/// Block-explorer upstream configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplorerConfig {
    /// Base URL of the explorer deployment.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Candidate paths for the network-stats resource, tried in priority
    /// order until one returns HTTP success. Cannot be empty.
    #[serde(default = "default_stats_candidates")]
    pub stats_candidates: Vec<String>,

    /// Size of the recent-blocks sampling window. Must be greater than 0.
    /// Defaults to `100`.
    #[serde(default = "default_blocks_window")]
    pub blocks_window: usize,

    /// Per-call request timeout in seconds. Must be greater than 0.
    /// Defaults to `5`.
    #[serde(default = "default_request_timeout_seconds")]
    pub request_timeout_seconds: u64,

    /// Connection establishment timeout in seconds. Defaults to `5`.
    #[serde(default = "default_connect_timeout_seconds")]
    pub connect_timeout_seconds: u64,
}

fn default_base_url() -> String {
    "https://testnet-blockscout.infra.neuraprotocol.io".to_string()
}

fn default_stats_candidates() -> Vec<String> {
    vec![
        "/api/v2/stats".to_string(),
        "/api/v1/stats".to_string(),
        "/api/stats".to_string(),
        "/stats".to_string(),
    ]
}

fn default_blocks_window() -> usize {
    100
}

fn default_request_timeout_seconds() -> u64 {
    5
}

fn default_connect_timeout_seconds() -> u64 {
    5
}

/// Static placeholder values substituted when a field cannot be computed.
///
/// Injected into the aggregator rather than read from shared state, so a
/// deployment can tune its degraded-mode display without code changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceholderSet {
    #[serde(default = "default_block_time")]
    pub block_time: String,
    #[serde(default = "default_total_blocks")]
    pub total_blocks: String,
    #[serde(default = "default_total_transactions")]
    pub total_transactions: String,
    #[serde(default = "default_total_addresses")]
    pub total_addresses: String,
    #[serde(default = "default_gas_price")]
    pub gas_price: String,
    /// Validator display when only the validator field is missing.
    #[serde(default = "default_validator")]
    pub validator: String,
    /// Validator display on the full-failure path.
    #[serde(default = "default_validator_unavailable")]
    pub validator_unavailable: String,
}

fn default_block_time() -> String {
    "~2.1s".to_string()
}

fn default_total_blocks() -> String {
    "2,845,672+".to_string()
}

fn default_total_transactions() -> String {
    "5.6M+".to_string()
}

fn default_total_addresses() -> String {
    "686K+".to_string()
}

fn default_gas_price() -> String {
    "0.00001".to_string()
}

fn default_validator() -> String {
    "N/A".to_string()
}

fn default_validator_unavailable() -> String {
    "Analyzing...".to_string()
}

/// Application logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (e.g., "trace", "debug", "info", "warn", "error").
    /// Defaults to `"info"`.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: `"json"` or `"pretty"`. Defaults to `"pretty"`.
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

/// Root application configuration containing all subsystem settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Deployment environment (e.g., "development", "production").
    #[serde(default = "default_environment")]
    pub environment: String,

    /// HTTP server configuration.
    #[serde(default)]
    pub server: ServerConfig,

    /// Block-explorer upstream configuration.
    #[serde(default)]
    pub explorer: ExplorerConfig,

    /// Degraded-mode placeholder values.
    #[serde(default)]
    pub placeholders: PlaceholderSet,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_environment() -> String {
    "development".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            bind_port: default_bind_port(),
            max_concurrent_requests: default_max_concurrent_requests(),
        }
    }
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            stats_candidates: default_stats_candidates(),
            blocks_window: default_blocks_window(),
            request_timeout_seconds: default_request_timeout_seconds(),
            connect_timeout_seconds: default_connect_timeout_seconds(),
        }
    }
}

impl Default for PlaceholderSet {
    fn default() -> Self {
        Self {
            block_time: default_block_time(),
            total_blocks: default_total_blocks(),
            total_transactions: default_total_transactions(),
            total_addresses: default_total_addresses(),
            gas_price: default_gas_price(),
            validator: default_validator(),
            validator_unavailable: default_validator_unavailable(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level(), format: default_log_format() }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: default_environment(),
            server: ServerConfig::default(),
            explorer: ExplorerConfig::default(),
            placeholders: PlaceholderSet::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from a TOML file with environment variable
    /// overrides.
    ///
    /// Environment variables with the `CHAINPULSE__` prefix can override any
    /// configuration value, using `__` as the nesting separator (e.g.,
    /// `CHAINPULSE__SERVER__BIND_PORT=8080`). The file is optional; defaults
    /// apply for anything not specified.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be parsed, deserialization
    /// fails, or validation rejects the result.
    pub fn from_file<P: AsRef<Path>>(config_path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name(&config_path.as_ref().to_string_lossy()).required(false))
            .add_source(Environment::with_prefix("CHAINPULSE").separator("__"))
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from `config/config.toml` with fallback to
    /// defaults. The path can be overridden via `CHAINPULSE_CONFIG`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the configuration cannot be loaded,
    /// parsed, or validated.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = std::env::var("CHAINPULSE_CONFIG")
            .unwrap_or_else(|_| "config/config.toml".to_string());
        Self::from_file(&config_path)
    }

    /// Validates the configuration for correctness and consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Message`] naming the first invalid field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.bind_port == 0 {
            return Err(ConfigError::Message("server.bind_port must be greater than 0".into()));
        }
        if self.server.max_concurrent_requests == 0 {
            return Err(ConfigError::Message(
                "server.max_concurrent_requests must be greater than 0".into(),
            ));
        }
        if !self.explorer.base_url.starts_with("http") {
            return Err(ConfigError::Message(
                "explorer.base_url must be an http(s) URL".into(),
            ));
        }
        if self.explorer.stats_candidates.is_empty() {
            return Err(ConfigError::Message(
                "explorer.stats_candidates cannot be empty".into(),
            ));
        }
        if self.explorer.blocks_window == 0 {
            return Err(ConfigError::Message(
                "explorer.blocks_window must be greater than 0".into(),
            ));
        }
        if self.explorer.request_timeout_seconds == 0 ||
            self.explorer.connect_timeout_seconds == 0
        {
            return Err(ConfigError::Message(
                "explorer timeouts must be greater than 0".into(),
            ));
        }
        Ok(())
    }

    /// Returns the bind address and port as a socket address string.
    #[must_use]
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.server.bind_address, self.server.bind_port)
    }

    /// Returns the per-call explorer request timeout as a [`Duration`].
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.explorer.request_timeout_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.server.bind_port, 3030);
        assert_eq!(config.explorer.blocks_window, 100);
        assert_eq!(config.explorer.stats_candidates.len(), 4);
        assert_eq!(config.explorer.stats_candidates[0], "/api/v2/stats");
        assert_eq!(config.placeholders.block_time, "~2.1s");
        assert_eq!(config.placeholders.validator_unavailable, "Analyzing...");
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = AppConfig::from_file("/nonexistent/config.toml").unwrap();
        assert_eq!(config.environment, "development");
        assert_eq!(config.explorer.request_timeout_seconds, 5);
    }

    #[test]
    fn test_toml_file_overrides_defaults() {
        let dir = std::env::temp_dir().join("chainpulse-config-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(
            &path,
            r#"
environment = "production"

[server]
bind_port = 8080

[explorer]
base_url = "https://explorer.example.org/"
blocks_window = 50
"#,
        )
        .unwrap();

        let config = AppConfig::from_file(&path).unwrap();
        assert_eq!(config.environment, "production");
        assert_eq!(config.server.bind_port, 8080);
        assert_eq!(config.explorer.blocks_window, 50);
        // Unspecified sections keep their defaults.
        assert_eq!(config.server.bind_address, "127.0.0.1");
        assert_eq!(config.placeholders.total_blocks, "2,845,672+");
    }

    #[test]
    fn test_validate_rejects_empty_candidates() {
        let mut config = AppConfig::default();
        config.explorer.stats_candidates.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_window_and_timeouts() {
        let mut config = AppConfig::default();
        config.explorer.blocks_window = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.explorer.request_timeout_seconds = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.server.bind_port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_non_http_base_url() {
        let mut config = AppConfig::default();
        config.explorer.base_url = "ftp://example.org".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_socket_addr_rendering() {
        let config = AppConfig::default();
        assert_eq!(config.socket_addr(), "127.0.0.1:3030");
    }
}
