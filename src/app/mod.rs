use crate::batch::{run_batch, BatchOptions, BatchSummary};
use crate::session::build_session;
use crate::spreadsheet::{read_input_rows, write_output};
use crate::transcription::ApiTranscriber;
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

/// Everything one batch run needs, after flags and config are merged.
#[derive(Debug, Clone)]
pub struct BatchSettings {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Normalized, without trailing slash
    pub base_url: String,
    pub timeout: Duration,
    pub delay: Duration,
    pub show_progress: bool,
}

/// Read the input, authenticate, transcribe every row and write the output.
///
/// Returns `None` when the input holds no usable rows; in that case the
/// server is never contacted and nothing is written.
pub async fn run_batch_job(settings: &BatchSettings, cookie: &str) -> Result<Option<BatchSummary>> {
    info!("Reading input from {}", settings.input.display());
    let records = read_input_rows(&settings.input).context("Failed to read input")?;

    if records.is_empty() {
        info!("No valid input rows found in {}", settings.input.display());
        return Ok(None);
    }

    let session = build_session(&settings.base_url, cookie)
        .await
        .context("Failed to create authenticated session")?;
    let transcriber = ApiTranscriber::new(session, settings.timeout);

    let options = BatchOptions {
        delay: settings.delay,
        show_progress: settings.show_progress,
    };
    let summary = run_batch(records, &transcriber, &options).await;

    write_output(&settings.output, &summary.rows).context("Failed to write output")?;
    Ok(Some(summary))
}
