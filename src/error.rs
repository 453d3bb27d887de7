//! Error types and error handling for authhttp.
//!
//! This module defines the error type returned by every client call, the
//! not-found predicate, and the CLI exit codes derived from each error kind.

use std::fmt;
use thiserror::Error;

/// Error kinds, used for logging and exit code selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Request payload could not be encoded as JSON.
    Serialization,
    /// Request could not be sent or response could not be received.
    Transport,
    /// Response received with a status above 299.
    HttpStatus,
    /// Configuration is invalid or cannot be loaded.
    Config,
    /// Caller input is invalid.
    InvalidRequest,
    /// Local I/O failure.
    Io,
}

impl ErrorKind {
    /// Returns the kind as a short lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Serialization => "serialization",
            ErrorKind::Transport => "transport",
            ErrorKind::HttpStatus => "http_status",
            ErrorKind::Config => "config",
            ErrorKind::InvalidRequest => "invalid_request",
            ErrorKind::Io => "io",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// CLI exit codes.
pub mod exit_code {
    /// Success
    pub const SUCCESS: i32 = 0;
    /// General error
    pub const GENERAL_ERROR: i32 = 1;
    /// Configuration error
    pub const CONFIG_ERROR: i32 = 2;
    /// Transport error
    pub const TRANSPORT_ERROR: i32 = 3;
    /// Server answered with a status above 299
    pub const HTTP_STATUS_ERROR: i32 = 4;
    /// Payload could not be serialized
    pub const SERIALIZATION_ERROR: i32 = 5;
    /// Command line argument error
    pub const CLI_ERROR: i32 = 64;
}

/// The main error type for authhttp.
#[derive(Debug, Error)]
pub enum AuthHttpError {
    /// Payload could not be encoded as JSON.
    #[error("Serialization error: {source}")]
    Serialization {
        #[source]
        source: serde_json::Error,
    },

    /// Request could not be sent or the response could not be received.
    #[error("Transport error: {target}")]
    Transport {
        target: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Server answered with a status above 299.
    ///
    /// Displays as the bare decimal status code.
    #[error("{status}")]
    HttpStatus {
        status: u16,
        message: Option<String>,
    },

    /// Configuration file is invalid or cannot be loaded.
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Caller input is invalid.
    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AuthHttpError {
    /// Returns the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthHttpError::Serialization { .. } => ErrorKind::Serialization,
            AuthHttpError::Transport { .. } => ErrorKind::Transport,
            AuthHttpError::HttpStatus { .. } => ErrorKind::HttpStatus,
            AuthHttpError::Config { .. } => ErrorKind::Config,
            AuthHttpError::InvalidRequest { .. } => ErrorKind::InvalidRequest,
            AuthHttpError::Io(_) => ErrorKind::Io,
        }
    }

    /// Returns the CLI exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self.kind() {
            ErrorKind::Config => exit_code::CONFIG_ERROR,
            ErrorKind::Transport => exit_code::TRANSPORT_ERROR,
            ErrorKind::HttpStatus => exit_code::HTTP_STATUS_ERROR,
            ErrorKind::Serialization => exit_code::SERIALIZATION_ERROR,
            ErrorKind::InvalidRequest | ErrorKind::Io => exit_code::GENERAL_ERROR,
        }
    }

    /// Returns the HTTP status code, if this is a status error.
    pub fn status(&self) -> Option<u16> {
        match self {
            AuthHttpError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the server-supplied message, if this is a status error that carried one.
    pub fn message(&self) -> Option<&str> {
        match self {
            AuthHttpError::HttpStatus { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// Returns true if the server answered 404.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Formats the error for a terminal.
    ///
    /// Status errors show the server message; other errors append their
    /// source chain (e.g. "connection refused").
    pub fn report(&self) -> String {
        if let AuthHttpError::HttpStatus { status, message } = self {
            return match message {
                Some(message) => format!("HTTP {}: {}", status, message),
                None => format!("HTTP {}", status),
            };
        }

        let mut report = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            let cause_text = cause.to_string();
            if !report.ends_with(&cause_text) {
                report.push_str(": ");
                report.push_str(&cause_text);
            }
            source = cause.source();
        }
        report
    }

    /// Creates a configuration error with a message.
    pub fn config(message: impl Into<String>) -> Self {
        AuthHttpError::Config {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a configuration error with a message and source.
    pub fn config_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AuthHttpError::Config {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a transport error.
    pub fn transport(target: impl Into<String>) -> Self {
        AuthHttpError::Transport {
            target: target.into(),
            source: None,
        }
    }

    /// Creates a transport error with a source.
    pub fn transport_with_source(
        target: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AuthHttpError::Transport {
            target: target.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates an invalid request error.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        AuthHttpError::InvalidRequest {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for AuthHttpError {
    fn from(source: serde_json::Error) -> Self {
        AuthHttpError::Serialization { source }
    }
}

/// Reports whether `err` is a 404 status error.
pub fn is_not_found_error(err: &AuthHttpError) -> bool {
    err.is_not_found()
}

/// Result type alias for authhttp operations.
pub type Result<T> = std::result::Result<T, AuthHttpError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    fn status_error(status: u16) -> AuthHttpError {
        AuthHttpError::HttpStatus {
            status,
            message: None,
        }
    }

    fn serialization_error() -> AuthHttpError {
        serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into()
    }

    #[test]
    fn test_http_status_display_is_bare_code() {
        assert_eq!(status_error(404).to_string(), "404");
        assert_eq!(status_error(500).to_string(), "500");

        let err = AuthHttpError::HttpStatus {
            status: 409,
            message: Some("conflict".to_string()),
        };
        assert_eq!(err.to_string(), "409");
        assert_eq!(err.message(), Some("conflict"));
    }

    #[test]
    fn test_is_not_found_only_for_404_status() {
        assert!(is_not_found_error(&status_error(404)));

        for status in [300, 400, 401, 403, 405, 410, 500, 503, 599] {
            assert!(!is_not_found_error(&status_error(status)), "{}", status);
        }

        assert!(!is_not_found_error(&serialization_error()));
        assert!(!is_not_found_error(&AuthHttpError::transport("404")));
        assert!(!is_not_found_error(&AuthHttpError::invalid_request("404")));
        assert!(!is_not_found_error(&AuthHttpError::config("404")));
    }

    #[test]
    fn test_error_kind() {
        assert_eq!(serialization_error().kind(), ErrorKind::Serialization);
        assert_eq!(
            AuthHttpError::transport("localhost:8080").kind(),
            ErrorKind::Transport
        );
        assert_eq!(status_error(502).kind(), ErrorKind::HttpStatus);
        assert_eq!(AuthHttpError::config("bad").kind(), ErrorKind::Config);
        assert_eq!(ErrorKind::HttpStatus.to_string(), "http_status");
    }

    #[test]
    fn test_exit_code() {
        assert_eq!(
            AuthHttpError::config("invalid yaml").exit_code(),
            exit_code::CONFIG_ERROR
        );
        assert_eq!(
            AuthHttpError::transport("localhost:8080").exit_code(),
            exit_code::TRANSPORT_ERROR
        );
        assert_eq!(status_error(404).exit_code(), exit_code::HTTP_STATUS_ERROR);
        assert_eq!(
            serialization_error().exit_code(),
            exit_code::SERIALIZATION_ERROR
        );
        assert_eq!(
            AuthHttpError::invalid_request("bad json").exit_code(),
            exit_code::GENERAL_ERROR
        );
    }

    #[test]
    fn test_status_accessor() {
        assert_eq!(status_error(418).status(), Some(418));
        assert_eq!(AuthHttpError::transport("x").status(), None);
        assert_eq!(AuthHttpError::transport("x").message(), None);
    }

    #[test]
    fn test_report_includes_source_chain() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused");
        let err = AuthHttpError::transport_with_source("http://localhost:1/x", io);
        assert_eq!(
            err.report(),
            "Transport error: http://localhost:1/x: connection refused"
        );

        let yaml = serde_yaml::from_str::<serde_yaml::Value>("a: [").unwrap_err();
        let err = AuthHttpError::config_with_source("Failed to parse config", yaml);
        assert!(err.report().starts_with("Configuration error: Failed to parse config: "));
        assert!(err.report().len() > "Configuration error: Failed to parse config: ".len());

        assert_eq!(
            AuthHttpError::config("client.host is required").report(),
            "Configuration error: client.host is required"
        );
    }

    #[test]
    fn test_report_does_not_repeat_inline_source() {
        // Serialization already prints its source in the top-level message.
        let err = serialization_error();
        assert_eq!(err.report(), err.to_string());
    }

    #[test]
    fn test_report_for_status_errors() {
        assert_eq!(status_error(502).report(), "HTTP 502");

        let err = AuthHttpError::HttpStatus {
            status: 404,
            message: Some("item not found".to_string()),
        };
        assert_eq!(err.report(), "HTTP 404: item not found");
    }

    #[test]
    fn test_transport_error_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = AuthHttpError::transport_with_source("http://localhost:1", io);

        assert_eq!(err.to_string(), "Transport error: http://localhost:1");
        assert!(err.source().unwrap().to_string().contains("refused"));
    }
}
