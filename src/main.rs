//! authhttp - Authenticated HTTP client
//!
//! Entry point for the authhttp command-line tool.

use authhttp::cli::{BodyArgs, Cli, Commands, ConfigCommands};
use authhttp::config::Config;
use authhttp::error::exit_code;
use authhttp::{AuthHttpClient, AuthHttpError, Request};
use clap::Parser;
use std::io::Write;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match cli.load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e.report());
            return ExitCode::from(e.exit_code() as u8);
        }
    };

    if let Err(e) = authhttp::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {}", e.report());
        return ExitCode::from(exit_code::GENERAL_ERROR as u8);
    }

    match run(&cli, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e.report());
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

/// Main application logic.
fn run(cli: &Cli, config: Config) -> authhttp::Result<()> {
    match &cli.command {
        Commands::Get(args) => send(config, Request::get(&args.path)),
        Commands::Delete(args) => send(config, Request::delete(&args.path)),
        Commands::Post(args) => {
            let request = body_request(args, |path, payload| Request::post(path, payload))?;
            send(config, request)
        }
        Commands::Put(args) => {
            let request = body_request(args, |path, payload| Request::put(path, payload))?;
            send(config, request)
        }
        Commands::Config(subcmd) => cmd_config(&config, subcmd),
    }
}

fn body_request<F>(args: &BodyArgs, build: F) -> authhttp::Result<Request>
where
    F: Fn(&str, &serde_json::Value) -> authhttp::Result<Request>,
{
    let payload = args.payload()?;
    build(&args.path, &payload)
}

/// Sends one request and copies the response body to stdout.
fn send(config: Config, request: Request) -> authhttp::Result<()> {
    tracing::info!(
        host = %config.client.host,
        method = %request.method(),
        path = %request.path(),
        "Sending request"
    );

    let runtime = tokio::runtime::Runtime::new().map_err(|e| {
        AuthHttpError::config_with_source("Failed to create async runtime", e)
    })?;

    runtime.block_on(async {
        let client = AuthHttpClient::new(config.client)?;
        let body = client.execute(request).await?;

        let mut stdout = std::io::stdout().lock();
        stdout.write_all(&body)?;
        stdout.flush()?;
        Ok(())
    })
}

/// Handle the `config` subcommand.
fn cmd_config(config: &Config, subcmd: &ConfigCommands) -> authhttp::Result<()> {
    match subcmd {
        ConfigCommands::Validate => {
            // Cli::load_config already validated; reaching here means it passed.
            println!("✓ Configuration is valid");
            tracing::debug!(?config, "Validated configuration");
            Ok(())
        }
        ConfigCommands::Show => {
            let yaml = serde_yaml::to_string(&config.redacted()).map_err(|e| {
                AuthHttpError::config_with_source("Failed to serialize configuration", e)
            })?;
            println!("{}", yaml);
            Ok(())
        }
    }
}

