use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

use crate::global::COOKIE_ENV;

#[derive(Parser, Debug)]
#[command(name = "transcript-batch")]
#[command(about = "Batch transcribe spreadsheet video links via the web app API", long_about = None)]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Use this config file instead of the one in the user config directory
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Subcommand, Debug)]
pub enum CliCommand {
    /// Transcribe every link of a spreadsheet using a session cookie
    Transcribe(TranscribeCliArgs),
    /// Extract the cookie from a browser, then transcribe a spreadsheet
    Run(RunCliArgs),
    /// Print the NextAuth session cookie found in a local browser
    Cookie(CookieCliArgs),
}

/// Options shared by every command that performs a batch run.
#[derive(ClapArgs, Debug, Clone, Default)]
pub struct BatchArgs {
    /// Path to the input spreadsheet
    #[arg(long, value_name = "PATH")]
    pub input: Option<PathBuf>,
    /// Path to the output spreadsheet (default: timestamped file in the output dir)
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,
    /// Web app base URL (default: http://localhost:3000)
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,
    /// Timeout in seconds per transcription request
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
    /// Seconds to wait between requests
    #[arg(long, value_name = "SECS")]
    pub sleep: Option<f64>,
    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

#[derive(ClapArgs, Debug)]
pub struct TranscribeCliArgs {
    #[command(flatten)]
    pub batch: BatchArgs,
    /// Session cookie string or bare token
    #[arg(long, env = COOKIE_ENV, hide_env_values = true)]
    pub cookie: Option<String>,
}

#[derive(ClapArgs, Debug)]
pub struct RunCliArgs {
    #[command(flatten)]
    pub batch: BatchArgs,
    /// Browser used to sign in: auto, edge, chrome, firefox, brave, chromium, opera
    #[arg(long)]
    pub browser: Option<String>,
}

#[derive(ClapArgs, Debug)]
pub struct CookieCliArgs {
    /// Web app base URL (default: http://localhost:3000)
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,
    /// Browser to read cookies from: auto, edge, chrome, firefox, brave, chromium, opera
    #[arg(long)]
    pub browser: Option<String>,
    /// Print a PowerShell environment assignment instead of the raw cookie
    #[arg(long)]
    pub powershell_env: bool,
}
