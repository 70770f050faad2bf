//! Backend selection and hosted backend connection settings.

use serde::{Deserialize, Serialize};

/// Which adapters back the identity gateway and directory store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendMode {
    /// The hosted auth and table APIs.
    #[default]
    Hosted,
    /// Process-local in-memory adapters. Data is lost on restart.
    Memory,
}

/// Backend configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Adapter selection.
    #[serde(default)]
    pub mode: BackendMode,
    /// Base URL of the hosted backend.
    #[serde(default)]
    pub url: String,
    /// Project API key.
    #[serde(default)]
    pub api_key: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            mode: BackendMode::default(),
            url: String::new(),
            api_key: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl std::fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendConfig")
            .field("mode", &self.mode)
            .field("url", &self.url)
            .field("api_key", &"[REDACTED]")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

const fn default_timeout_secs() -> u64 {
    10
}
