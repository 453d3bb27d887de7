//! Configuration module for authhttp.
//!
//! Configuration is loaded from a YAML file and then overridden by
//! environment variables. The CLI applies its own flags on top.

mod client;
mod logging;

pub use client::{ClientConfig, DEFAULT_HOST, DEFAULT_TIMEOUT_SECS, REDACTED};
pub use logging::{LogFormat, LogLevel, LogOutput, LoggingConfig};

use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::error::{AuthHttpError, Result};

/// Default configuration file path.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/authhttp/config.yaml";

/// Environment variable for configuration file path.
pub const ENV_CONFIG_PATH: &str = "AUTHHTTP_CONFIG";

/// Environment variable overriding `client.host`.
pub const ENV_HOST: &str = "AUTHHTTP_HOST";

/// Environment variable overriding `client.bearer_token`.
pub const ENV_TOKEN: &str = "AUTHHTTP_TOKEN";

/// Environment variable overriding `client.timeout_seconds`.
pub const ENV_TIMEOUT: &str = "AUTHHTTP_TIMEOUT";

/// Environment variable overriding `logging.level`.
pub const ENV_LOG_LEVEL: &str = "AUTHHTTP_LOG_LEVEL";

/// Environment variable overriding `logging.format`.
pub const ENV_LOG_FORMAT: &str = "AUTHHTTP_LOG_FORMAT";

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Client configuration.
    pub client: ClientConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

impl Config {
    /// Loads configuration with the following priority:
    /// 1. Explicit path (if provided)
    /// 2. AUTHHTTP_CONFIG environment variable
    /// 3. Default path (/etc/authhttp/config.yaml)
    ///
    /// Environment overrides are applied afterwards, then the result is
    /// validated. Returns the default config (with overrides) if no file
    /// exists at a path that was not explicitly requested.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let config = Self::load_unvalidated(explicit_path)?;
        config.validate()?;
        Ok(config)
    }

    /// Same as [`Config::load`] but skips validation, so callers can layer
    /// further overrides before calling [`Config::validate`] themselves.
    pub fn load_unvalidated(explicit_path: Option<&Path>) -> Result<Self> {
        let path = Self::resolve_config_path(explicit_path);

        let mut config = if path.exists() {
            Self::read_from_path(&path)?
        } else if explicit_path.is_some() {
            return Err(AuthHttpError::config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        } else {
            Config::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Loads configuration from a YAML file, without environment overrides.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let config = Self::read_from_path(path.as_ref())?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML string.
    pub fn load_from_str(content: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(content)
            .map_err(|e| AuthHttpError::config_with_source("Failed to parse config", e))?;

        config.validate()?;
        Ok(config)
    }

    fn read_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            AuthHttpError::config_with_source(
                format!("Failed to read config file: {}", path.display()),
                e,
            )
        })?;

        serde_yaml::from_str(&content).map_err(|e| {
            AuthHttpError::config_with_source(
                format!("Failed to parse config file: {}", path.display()),
                e,
            )
        })
    }

    /// Resolves the configuration file path based on priority.
    fn resolve_config_path(explicit_path: Option<&Path>) -> PathBuf {
        if let Some(path) = explicit_path {
            return path.to_path_buf();
        }

        if let Ok(env_path) = env::var(ENV_CONFIG_PATH) {
            return PathBuf::from(env_path);
        }

        PathBuf::from(DEFAULT_CONFIG_PATH)
    }

    /// Applies environment variable overrides to the configuration.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| env::var(key).ok());
    }

    /// Applies overrides from an arbitrary key lookup.
    ///
    /// Values that fail to parse are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup(ENV_HOST) {
            self.client.host = host;
        }
        if let Some(token) = lookup(ENV_TOKEN) {
            self.client.bearer_token = token;
        }
        if let Some(timeout) = lookup(ENV_TIMEOUT).and_then(|t| t.parse().ok()) {
            self.client.timeout_seconds = timeout;
        }

        if let Some(level) = lookup(ENV_LOG_LEVEL).and_then(|l| l.parse().ok()) {
            self.logging.level = level;
        }
        if let Some(format) = lookup(ENV_LOG_FORMAT).and_then(|f| f.parse().ok()) {
            self.logging.format = format;
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        let host = self.client.host.trim();
        if host.is_empty() {
            return Err(AuthHttpError::config("client.host is required"));
        }
        if !(host.starts_with("http://") || host.starts_with("https://")) {
            return Err(AuthHttpError::config(format!(
                "client.host must start with http:// or https://, got '{}'",
                self.client.host
            )));
        }

        if self.client.timeout_seconds == 0 {
            return Err(AuthHttpError::config(
                "client.timeout_seconds must be > 0",
            ));
        }

        if self.logging.output == LogOutput::File && self.logging.file_path.is_none() {
            return Err(AuthHttpError::config(
                "logging.file_path is required when output is file",
            ));
        }

        Ok(())
    }

    /// Returns a copy with the bearer token masked.
    pub fn redacted(&self) -> Self {
        Self {
            client: self.client.redacted(),
            logging: self.logging.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.client.host, "http://localhost:8080");
        assert!(config.client.bearer_token.is_empty());
        assert_eq!(config.client.timeout_seconds, 30);
        assert_eq!(config.logging.level, LogLevel::Warn);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_yaml() {
        let yaml = r#"
client:
  host: "https://api.example.com"
  bearer_token: "abc123"
  timeout_seconds: 10

logging:
  level: debug
  format: json
"#;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(yaml.as_bytes()).unwrap();

        let config = Config::load_from_path(file.path()).unwrap();

        assert_eq!(config.client.host, "https://api.example.com");
        assert_eq!(config.client.bearer_token, "abc123");
        assert_eq!(config.client.timeout_seconds, 10);
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_load_explicit_missing_file() {
        let result = Config::load(Some(Path::new("/nonexistent/authhttp.yaml")));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("not found"));
    }

    #[test]
    fn test_load_unvalidated_defers_validation() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"client:\n  host: \"api.example.com\"\n").unwrap();

        let config = Config::load_unvalidated(Some(file.path())).unwrap();
        assert_eq!(config.client.host, "api.example.com");
        assert!(config.validate().is_err());

        assert!(Config::load(Some(file.path())).is_err());
    }

    #[test]
    fn test_validation_host_scheme() {
        let result = Config::load_from_str("client:\n  host: \"api.example.com\"\n");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("http://"));

        let result = Config::load_from_str("client:\n  host: \"\"\n");
        assert!(result.unwrap_err().to_string().contains("client.host"));
    }

    #[test]
    fn test_validation_timeout_zero() {
        let result = Config::load_from_str("client:\n  timeout_seconds: 0\n");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("timeout_seconds"));
    }

    #[test]
    fn test_validation_file_output_without_path() {
        let result = Config::load_from_str("logging:\n  output: file\n");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("file_path"));
    }

    #[test]
    fn test_invalid_yaml() {
        let result = Config::load_from_str("client: [unterminated");
        assert!(result.is_err());
    }

    #[test]
    fn test_apply_overrides() {
        let vars: HashMap<&str, &str> = [
            (ENV_HOST, "https://override.example.com"),
            (ENV_TOKEN, "env-token"),
            (ENV_TIMEOUT, "7"),
            (ENV_LOG_LEVEL, "trace"),
            (ENV_LOG_FORMAT, "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.client.host, "https://override.example.com");
        assert_eq!(config.client.bearer_token, "env-token");
        assert_eq!(config.client.timeout_seconds, 7);
        assert_eq!(config.logging.level, LogLevel::Trace);
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_apply_overrides_ignores_unparseable() {
        let mut config = Config::default();
        config.apply_overrides(|key| match key {
            ENV_TIMEOUT => Some("soon".to_string()),
            ENV_LOG_LEVEL => Some("loud".to_string()),
            _ => None,
        });

        assert_eq!(config.client.timeout_seconds, 30);
        assert_eq!(config.logging.level, LogLevel::Warn);
    }

    #[test]
    fn test_redacted_serialization() {
        let mut config = Config::default();
        config.client.bearer_token = "super-secret".to_string();

        let yaml = serde_yaml::to_string(&config.redacted()).unwrap();

        assert!(yaml.contains("host:"));
        assert!(yaml.contains("[REDACTED]"));
        assert!(!yaml.contains("super-secret"));
    }
}
