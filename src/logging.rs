//! Tracing subscriber setup.

use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

use crate::config::{LogFormat, LogOutput, LoggingConfig};
use crate::error::{AuthHttpError, Result};

/// Installs the global subscriber described by `config`.
///
/// Fails if a subscriber is already installed or the log file cannot be opened.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let writer = make_writer(config)?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(config.level.as_str()))
        .with_writer(writer)
        .with_ansi(config.output != LogOutput::File)
        .with_target(true);

    let result = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Text => builder.try_init(),
    };

    result.map_err(|e| AuthHttpError::config(format!("Failed to initialize logging: {}", e)))
}

fn make_writer(config: &LoggingConfig) -> Result<BoxMakeWriter> {
    match config.output {
        LogOutput::Stdout => Ok(BoxMakeWriter::new(std::io::stdout)),
        LogOutput::Stderr => Ok(BoxMakeWriter::new(std::io::stderr)),
        LogOutput::File => {
            let path = config.file_path.as_deref().ok_or_else(|| {
                AuthHttpError::config("logging.file_path is required when output is file")
            })?;

            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| {
                    AuthHttpError::config_with_source(
                        format!("Failed to open log file: {}", path),
                        e,
                    )
                })?;

            Ok(BoxMakeWriter::new(Mutex::new(file)))
        }
    }
}
