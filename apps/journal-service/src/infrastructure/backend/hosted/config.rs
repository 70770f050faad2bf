//! Hosted backend adapter configuration.

use std::time::Duration;

/// Connection settings for the hosted backend.
#[derive(Clone)]
pub struct HostedBackendConfig {
    /// Base URL, e.g. `https://project.example.co`.
    pub url: String,
    /// Project API key, sent as `apikey` on every request.
    pub api_key: String,
    /// HTTP request timeout.
    pub timeout: Duration,
}

impl HostedBackendConfig {
    /// Create a configuration with a 10 second timeout.
    #[must_use]
    pub fn new(url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            api_key: api_key.into(),
            timeout: Duration::from_secs(10),
        }
    }

    /// Set the HTTP timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Base URL without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }
}

impl std::fmt::Debug for HostedBackendConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostedBackendConfig")
            .field("url", &self.url)
            .field("api_key", &"[REDACTED]")
            .field("timeout", &self.timeout)
            .finish()
    }
}
