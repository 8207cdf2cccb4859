//! Sequential per-row driver.
//!
//! Rows are sent one at a time, in input order, with a fixed pause between
//! consecutive requests. A row that fails, whether the server rejected it or
//! the request never completed, becomes an `ERROR: ` cell and the run moves on.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

use crate::spreadsheet::{InputRecord, OutputRecord};
use crate::transcription::{TranscribeOutcome, Transcriber};

#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Pause between two consecutive requests
    pub delay: Duration,
    pub show_progress: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(500),
            show_progress: true,
        }
    }
}

#[derive(Debug, Default)]
pub struct BatchSummary {
    pub rows: Vec<OutputRecord>,
    pub succeeded: usize,
    pub failed: usize,
}

fn create_progress_bar(total: usize, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(total as u64);
    if let Ok(style) =
        ProgressStyle::default_bar().template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
    {
        pb.set_style(style.progress_chars("━╸━"));
    }
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Transcribe every record and collect the output rows in input order.
pub async fn run_batch<T>(
    records: Vec<InputRecord>,
    transcriber: &T,
    options: &BatchOptions,
) -> BatchSummary
where
    T: Transcriber + ?Sized,
{
    let total = records.len();
    let pb = create_progress_bar(total, options.show_progress);
    let mut summary = BatchSummary {
        rows: Vec::with_capacity(total),
        ..Default::default()
    };

    info!("Transcribing {} row(s) via {}", total, transcriber.name());

    for (index, record) in records.into_iter().enumerate() {
        let position = index + 1;
        pb.set_message(record.display_name().to_string());
        pb.suspend(|| info!("[{}/{}] Processing: {}", position, total, record.display_name()));

        let cell = match transcriber.transcribe(&record.video_link).await {
            Ok(TranscribeOutcome::Transcript(text)) => {
                summary.succeeded += 1;
                text
            }
            Ok(failed) => {
                summary.failed += 1;
                failed.into_cell()
            }
            Err(err) => {
                pb.suspend(|| warn!("Request for row {} did not complete: {:#}", position, err));
                summary.failed += 1;
                TranscribeOutcome::Failed(format!("Request failed: {err:#}")).into_cell()
            }
        };

        summary.rows.push(OutputRecord::new(record, cell));
        pb.inc(1);

        if position < total && !options.delay.is_zero() {
            sleep(options.delay).await;
        }
    }

    pb.finish_and_clear();
    info!(
        "Batch finished: {} succeeded, {} failed",
        summary.succeeded, summary.failed
    );
    summary
}
