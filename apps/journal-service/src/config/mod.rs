//! Configuration module for the journal service.
//!
//! YAML configuration with `${VAR}` / `${VAR:-default}` environment variable
//! interpolation, validated after parsing.
//!
//! # Usage
//!
//! ```rust,ignore
//! use journal_service::config::load_config;
//!
//! // Load from $JOURNAL_CONFIG, or config.yaml
//! let config = load_config(None)?;
//!
//! // Load from custom path
//! let config = load_config(Some("custom/config.yaml"))?;
//!
//! println!("HTTP port: {}", config.server.http_port);
//! ```

mod backend;
mod observability;
mod server;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use backend::{BackendConfig, BackendMode};
pub use observability::{LoggingConfig, ObservabilityConfig, OtelConfig};
pub use server::ServerConfig;

/// Environment variable naming the config file.
pub const CONFIG_PATH_ENV: &str = "JOURNAL_CONFIG";

const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        /// Path to the config file.
        path: String,
        /// I/O error.
        source: std::io::Error,
    },

    /// The YAML did not match the configuration schema.
    #[error("Failed to parse config YAML: {0}")]
    ParseError(#[from] serde_yaml_bw::Error),

    /// A value is out of range or missing for the selected backend mode.
    #[error("Config validation failed: {0}")]
    ValidationError(String),
}

/// Service configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Backend configuration.
    #[serde(default)]
    pub backend: BackendConfig,
    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// Read, interpolate and validate the service configuration file.
///
/// `path` defaults to `$JOURNAL_CONFIG`, then `config.yaml`.
///
/// # Errors
///
/// `ConfigError::ReadError` when the file is missing; otherwise see
/// [`load_config_from_string`].
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let path = path.map_or_else(
        || std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string()),
        str::to_string,
    );

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        source: e,
    })?;

    load_config_from_string(&contents)
}

/// Parse, interpolate and validate configuration held in memory.
///
/// # Errors
///
/// `ConfigError::ParseError` for malformed YAML or an unknown backend mode,
/// `ConfigError::ValidationError` for out-of-range values.
pub fn load_config_from_string(yaml: &str) -> Result<Config, ConfigError> {
    let interpolated = interpolate_env_vars(yaml);
    let config: Config = serde_yaml_bw::from_str(&interpolated)?;
    validate_config(&config)?;
    Ok(config)
}

/// Expand environment references.
///
/// Accepts both `${VAR}` and `${VAR:-default}` syntax. An unset or empty
/// variable without a default becomes an empty string.
#[allow(clippy::expect_used)] // constant pattern
fn interpolate_env_vars(input: &str) -> String {
    use std::sync::OnceLock;

    static ENV_VAR_REGEX: OnceLock<regex::Regex> = OnceLock::new();

    let re = ENV_VAR_REGEX.get_or_init(|| {
        regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}")
            .expect("env var regex is valid")
    });

    re.replace_all(input, |cap: &regex::Captures<'_>| {
        let default_value = cap.get(2).map_or("", |m| m.as_str());
        match std::env::var(&cap[1]) {
            Ok(v) if !v.is_empty() => v,
            _ => default_value.to_string(),
        }
    })
    .into_owned()
}

/// Reject configurations the service cannot start with.
fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.http_port == 0 {
        return Err(ConfigError::ValidationError(
            "server.http_port must be non-zero".to_string(),
        ));
    }

    let backend = &config.backend;
    if backend.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "backend.timeout_secs must be positive".to_string(),
        ));
    }

    if backend.mode == BackendMode::Hosted {
        if !(backend.url.starts_with("http://") || backend.url.starts_with("https://")) {
            return Err(ConfigError::ValidationError(
                "backend.url must be an http(s) URL in hosted mode".to_string(),
            ));
        }
        if backend.api_key.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "backend.api_key is required in hosted mode".to_string(),
            ));
        }
    }

    let valid_formats = ["json", "pretty"];
    if !valid_formats.contains(&config.observability.logging.format.as_str()) {
        return Err(ConfigError::ValidationError(format!(
            "observability.logging.format must be one of: {valid_formats:?}"
        )));
    }

    Ok(())
}
