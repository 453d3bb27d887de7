//! Client connection settings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Default timeout for HTTP requests.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default target host.
pub const DEFAULT_HOST: &str = "http://localhost:8080";

/// Placeholder shown instead of the bearer token.
pub const REDACTED: &str = "[REDACTED]";

/// Settings for one authenticated client.
///
/// The client copies this at construction and never mutates it.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL every request path is appended to (e.g., "https://api.example.com").
    pub host: String,

    /// Value sent verbatim in the `Authorization` header.
    pub bearer_token: String,

    /// Default per-request timeout in seconds.
    pub timeout_seconds: u64,
}

impl ClientConfig {
    /// Creates a config for the given host and token with the default timeout.
    pub fn new(host: impl Into<String>, bearer_token: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            bearer_token: bearer_token.into(),
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Replaces the default timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_seconds = timeout.as_secs().max(1);
        self
    }

    /// Returns the default timeout as a duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Returns a copy safe to print or serialize.
    pub fn redacted(&self) -> Self {
        Self {
            bearer_token: REDACTED.to_string(),
            ..self.clone()
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_HOST, "")
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("host", &self.host)
            .field("bearer_token", &REDACTED)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}
