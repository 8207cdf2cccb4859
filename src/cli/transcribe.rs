//! CLI handler for a batch run with an explicitly supplied cookie.

use anyhow::Result;
use std::path::Path;

use super::args::TranscribeCliArgs;
use super::{execute, load_config};
use crate::app::BatchSettings;
use crate::error::BatchError;

/// Handle the transcribe CLI command.
pub async fn handle_transcribe_command(args: TranscribeCliArgs, config_path: Option<&Path>) -> Result<()> {
    let cookie = args.cookie.unwrap_or_default();
    if cookie.trim().is_empty() {
        return Err(BatchError::configuration(
            "Missing cookie. Provide --cookie or set NEXTAUTH_COOKIE environment variable.",
        )
        .into());
    }

    let config = load_config(config_path)?;
    let settings = BatchSettings::resolve(&args.batch, &config)?;

    execute(&settings, &cookie).await
}
