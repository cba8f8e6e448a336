//! Client configuration.

use std::time::Duration;

use crate::error::{ClientError, Result};

/// Environment variable holding the API base URL.
pub const API_URL_ENV: &str = "VISADESK_API_URL";

/// Environment variable holding the request timeout in seconds.
pub const API_TIMEOUT_ENV: &str = "VISADESK_API_TIMEOUT_SECS";

/// Base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3001/api";

/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Where the backend lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL every endpoint path is appended to.
    pub base_url: String,
    /// Timeout for a single request.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Creates a configuration for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Reads the configuration from the environment, falling back to defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] when the timeout is not a number.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                config.base_url = url.trim().to_string();
            }
        }
        if let Ok(secs) = std::env::var(API_TIMEOUT_ENV) {
            let secs: u64 = secs
                .trim()
                .parse()
                .map_err(|_| ClientError::Config(format!("{API_TIMEOUT_ENV}={secs}")))?;
            config.timeout = Duration::from_secs(secs);
        }
        Ok(config)
    }

    /// Sets the timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Joins an endpoint path onto the base URL.
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
