//! CLI entry point and dispatch logic
//!
//! `run()` parses arguments, discovers configuration, initializes logging,
//! creates the tokio runtime and dispatches to a command handler. It owns all
//! error output; main.rs only maps the returned code to a process exit.

use clap::Parser;
use std::io::Write;

use repoforge_config::{CliArgs, Config};
use repoforge_engine::RepositoryService;
use repoforge_utils::error::{ConfigError, RepoforgeError};
use repoforge_utils::exit_codes::ExitCode;
use repoforge_utils::logging::init_tracing;

use super::args::{Cli, Commands};
use super::commands;
use super::report::render_error_report;

/// Main CLI execution function.
///
/// Returns `Ok(())` only when the command fully succeeded. Partial batches and
/// failures return the matching non-zero `ExitCode` after printing.
pub fn run() -> Result<(), ExitCode> {
    let cli = Cli::parse();
    let operation = cli.command.operation();

    let cli_args = CliArgs {
        config_path: cli.config.clone(),
        api_base_url: cli.api_base_url.clone(),
        access_token_env: cli.token_env.clone(),
        request_timeout_secs: cli.request_timeout,
        // An absent flag must not override `verbose = true` from the file
        verbose: cli.verbose.then_some(true),
    };

    let config = match Config::discover(&cli_args) {
        Ok(config) => config,
        Err(err) => {
            let err = config_error(err);
            eprintln!("{}", render_error_report(&err, operation));
            return Err(err.to_exit_code());
        }
    };

    if let Err(e) = init_tracing(config.verbose()) {
        eprintln!("warning: failed to initialize logging: {e}");
    }

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("✗ Failed to create async runtime: {e}");
            return Err(ExitCode::INTERNAL);
        }
    };

    let mut stdout = std::io::stdout().lock();
    let result = rt.block_on(dispatch(cli.command, &config, &mut stdout));

    match result {
        Ok(ExitCode::SUCCESS) => Ok(()),
        Ok(code) => Err(code),
        Err(err) => {
            eprintln!("{}", render_error_report(&err, operation));
            Err(err.to_exit_code())
        }
    }
}

async fn dispatch(
    command: Commands,
    config: &Config,
    out: &mut dyn Write,
) -> Result<ExitCode, RepoforgeError> {
    match command {
        Commands::Create {
            name,
            description,
            json,
        } => {
            let service = RepositoryService::from_config(config)?;
            commands::execute_create_command(&service, &name, &description, json, out).await
        }
        Commands::CreateBatch { file, json } => {
            let requests = commands::load_requests(&file)?;
            let service = RepositoryService::from_config(config)?;
            commands::execute_create_batch_command(&service, requests, json, out).await
        }
        Commands::Config { json } => commands::execute_config_command(config, json, out),
    }
}

/// Recover the typed error from discovery, which reports through `anyhow`
fn config_error(err: anyhow::Error) -> RepoforgeError {
    match err.downcast::<ConfigError>() {
        Ok(config_err) => RepoforgeError::Config(config_err),
        Err(other) => RepoforgeError::Config(ConfigError::InvalidFile(format!("{other:#}"))),
    }
}
