//! authhttp - Authenticated HTTP client
//!
//! A thin client that sends bearer-token requests to a single host,
//! JSON-encodes request bodies, and turns non-2xx responses into typed
//! errors carrying the status code and the server's `message` field.
//!
//! # Modules
//!
//! - [`client`] - The authenticated client and its transport
//! - [`cli`] - Command-line interface definitions
//! - [`config`] - Configuration file parsing and validation
//! - [`error`] - Error types and error handling
//! - [`logging`] - Tracing subscriber setup

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod logging;

// Re-exports for convenience
pub use cli::Cli;
pub use client::{AuthHttpClient, ReqwestTransport, Request, Transport};
pub use config::{ClientConfig, Config};
pub use error::{is_not_found_error, AuthHttpError, ErrorKind, Result};
