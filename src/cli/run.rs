//! CLI handler for the one-command flow: browser cookie, then batch run.

use anyhow::Result;
use std::path::Path;

use super::args::RunCliArgs;
use super::cookie::locate_cookie;
use super::{execute, load_config};
use crate::app::BatchSettings;

/// Handle the run CLI command.
pub async fn handle_run_command(args: RunCliArgs, config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let settings = BatchSettings::resolve(&args.batch, &config)?;
    let browser = args.browser.unwrap_or_else(|| config.browser.clone());

    let found = locate_cookie(
        &settings.base_url,
        &browser,
        "Unable to extract NextAuth cookie from browser.",
        "Sign in to the app in your browser first, then re-run this command.",
    )?;
    println!("Cookie found from browser: {}", found.browser);

    execute(&settings, &found.header()).await
}
