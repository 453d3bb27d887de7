//! Command-line interface definition for authhttp.
//!
//! This module defines the CLI structure using clap derive macros,
//! including all subcommands and their arguments.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{Config, LogLevel};
use crate::error::{AuthHttpError, Result};

/// authhttp - Authenticated HTTP client
///
/// Sends bearer-token requests with JSON bodies and prints the raw
/// response body to stdout.
#[derive(Debug, Parser)]
#[command(name = "authhttp")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, env = "AUTHHTTP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Target host base URL (overrides configuration)
    #[arg(long, global = true)]
    pub host: Option<String>,

    /// Bearer token sent verbatim in the Authorization header
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Increase verbosity (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Returns the effective log level given the configured one.
    pub fn log_level(&self, configured: LogLevel) -> LogLevel {
        if self.quiet {
            return LogLevel::Error;
        }

        configured.more_verbose(self.verbose)
    }

    /// Applies command-line flags on top of the loaded configuration.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(host) = &self.host {
            config.client.host = host.clone();
        }
        if let Some(token) = &self.token {
            config.client.bearer_token = token.clone();
        }
        if let Some(timeout) = self.timeout {
            config.client.timeout_seconds = timeout;
        }

        config.logging.level = self.log_level(config.logging.level);
    }

    /// Loads the configuration file, applies environment and command-line
    /// overrides, then validates the result.
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_unvalidated(self.config.as_deref())?;
        self.apply_overrides(&mut config);
        config.validate()?;
        Ok(config)
    }
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Send a GET request
    Get(PathArgs),

    /// Send a POST request with a JSON body
    Post(BodyArgs),

    /// Send a PUT request with a JSON body
    Put(BodyArgs),

    /// Send a DELETE request
    Delete(PathArgs),

    /// Configuration file operations
    #[command(subcommand)]
    Config(ConfigCommands),
}

/// Arguments for bodyless requests.
#[derive(Debug, Args)]
pub struct PathArgs {
    /// Path appended to the host (e.g., /api/v1/items)
    pub path: String,
}

/// Arguments for requests carrying a JSON body.
#[derive(Debug, Args)]
pub struct BodyArgs {
    /// Path appended to the host (e.g., /api/v1/items)
    pub path: String,

    /// JSON payload
    #[arg(
        short,
        long,
        conflicts_with = "data_file",
        required_unless_present = "data_file"
    )]
    pub data: Option<String>,

    /// File containing the JSON payload
    #[arg(long)]
    pub data_file: Option<PathBuf>,
}

impl BodyArgs {
    /// Reads and parses the JSON payload.
    pub fn payload(&self) -> Result<serde_json::Value> {
        let raw = match (&self.data, &self.data_file) {
            (Some(data), _) => data.clone(),
            (None, Some(path)) => std::fs::read_to_string(path)?,
            (None, None) => {
                return Err(AuthHttpError::invalid_request(
                    "either --data or --data-file is required",
                ))
            }
        };

        serde_json::from_str(&raw).map_err(|e| {
            AuthHttpError::invalid_request(format!("payload is not valid JSON: {}", e))
        })
    }
}

/// Configuration subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Validate the configuration file
    Validate,

    /// Show the current configuration (token redacted)
    Show,
}
