use crate::app::BatchSettings;
use crate::config::Config;
use crate::error::BatchError;
use crate::global::normalize_base_url;
use anyhow::Result;
use chrono::Local;
use std::path::Path;
use std::time::Duration;

pub mod args;
mod cookie;
mod run;
mod transcribe;

pub use args::{BatchArgs, Cli, CliCommand, CookieCliArgs, RunCliArgs, TranscribeCliArgs};
pub use cookie::{handle_cookie_command, not_found_message, powershell_assignment};
pub use run::handle_run_command;
pub use transcribe::handle_transcribe_command;

use crate::spreadsheet::default_output_path;

/// Load the config from `path`, or from the user config directory.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) if path.exists() => {
            let content = std::fs::read_to_string(path)?;
            Config::from_toml(&content)
        }
        Some(_) => Ok(Config::default()),
        None => Config::load(),
    }
}

fn seconds(value: f64, flag: &str) -> Result<Duration, BatchError> {
    Duration::try_from_secs_f64(value).map_err(|_| {
        BatchError::configuration(format!("--{flag} must be a non-negative number of seconds, got {value}"))
    })
}

impl BatchSettings {
    /// Merge command-line flags over config file values.
    pub fn resolve(args: &BatchArgs, config: &Config) -> Result<Self, BatchError> {
        let base_url = normalize_base_url(args.base_url.as_deref().unwrap_or(&config.base_url));
        let timeout_secs = args.timeout.unwrap_or(config.timeout_seconds);
        if timeout_secs == 0 {
            return Err(BatchError::configuration("--timeout must be at least 1 second"));
        }

        let output = args
            .output
            .clone()
            .unwrap_or_else(|| default_output_path(&config.output_dir, Local::now()));

        Ok(Self {
            input: args.input.clone().unwrap_or_else(|| config.input.clone()),
            output,
            base_url,
            timeout: Duration::from_secs(timeout_secs),
            delay: seconds(args.sleep.unwrap_or(config.sleep_seconds), "sleep")?,
            show_progress: !args.no_progress,
        })
    }
}

/// Shared tail of `transcribe` and `run`: execute and report.
async fn execute(settings: &BatchSettings, cookie: &str) -> Result<()> {
    match crate::app::run_batch_job(settings, cookie).await? {
        None => println!("No valid input rows found."),
        Some(summary) => {
            println!(
                "Done. {} transcribed, {} failed. Output saved to: {}",
                summary.succeeded,
                summary.failed,
                settings.output.display()
            );
        }
    }
    Ok(())
}
