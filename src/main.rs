use clap::Parser;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use transcript_batch::cli::{
    handle_cookie_command, handle_run_command, handle_transcribe_command, Cli, CliCommand,
};

/// Exit status for setup and configuration failures.
const SETUP_FAILURE: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let log_level = if cli.verbose { "debug" } else { "info" };
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let config_path = cli.config.as_deref();
    let result = match cli.command {
        CliCommand::Transcribe(args) => handle_transcribe_command(args, config_path).await,
        CliCommand::Run(args) => handle_run_command(args, config_path).await,
        CliCommand::Cookie(args) => handle_cookie_command(args, config_path),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            debug!("Aborting: {:?}", err);
            eprintln!("ERROR: {:#}", err);
            ExitCode::from(SETUP_FAILURE)
        }
    }
}
