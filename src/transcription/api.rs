use anyhow::{Context, Result};
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use serde_json::{json, Value};
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::extract::{error_message, extract_transcript_text};
use super::{TranscribeOutcome, Transcriber};
use crate::session::AuthSession;

pub const TRANSCRIBE_PATH: &str = "/api/transcribe";

/// Request body for the transcribe endpoint
#[derive(Debug, Serialize)]
struct TranscribeRequest<'a> {
    #[serde(rename = "driveUrl")]
    drive_url: &'a str,
}

/// Classify a transcribe response that has already been read off the wire.
pub fn interpret_response(status: u16, content_type: &str, body: &str) -> TranscribeOutcome {
    let payload = if content_type.to_lowercase().contains("application/json") {
        match serde_json::from_str::<Value>(body) {
            Ok(value) => value,
            Err(err) if status == 200 => {
                return TranscribeOutcome::Failed(format!("Malformed JSON response: {err}"));
            }
            Err(_) => json!({ "error": body }),
        }
    } else {
        json!({ "error": body })
    };

    if status != 200 {
        return TranscribeOutcome::Failed(format!("HTTP {}: {}", status, error_message(&payload)));
    }

    match extract_transcript_text(&payload) {
        Some(text) => TranscribeOutcome::Transcript(text),
        None => TranscribeOutcome::Failed("No transcript text returned.".to_string()),
    }
}

/// Transcriber backed by the web app's `/api/transcribe` endpoint.
pub struct ApiTranscriber {
    session: AuthSession,
    timeout: Duration,
}

impl ApiTranscriber {
    pub fn new(session: AuthSession, timeout: Duration) -> Self {
        info!(
            "Initialized transcriber for {} (timeout {}s)",
            session.base_url(),
            timeout.as_secs()
        );
        Self { session, timeout }
    }

    /// POST one link and classify the answer.
    pub async fn transcribe_link(&self, link: &str) -> Result<TranscribeOutcome> {
        let url = self.session.endpoint(TRANSCRIBE_PATH);
        debug!("POST {} driveUrl={}", url, link);

        let response = self
            .session
            .client()
            .post(&url)
            .json(&TranscribeRequest { drive_url: link })
            .timeout(self.timeout)
            .send()
            .await
            .context("Failed to send transcription request")?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("")
            .to_string();
        let body = response
            .text()
            .await
            .context("Failed to read transcription response body")?;

        let outcome = interpret_response(status.as_u16(), &content_type, &body);
        match &outcome {
            TranscribeOutcome::Transcript(text) => {
                info!("Transcription complete: {} chars", text.len());
            }
            TranscribeOutcome::Failed(message) => {
                warn!("Transcription failed for {}: {}", link, message);
            }
        }
        Ok(outcome)
    }
}

impl Transcriber for ApiTranscriber {
    fn name(&self) -> &'static str {
        "web app API"
    }

    fn transcribe<'a>(
        &'a self,
        link: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<TranscribeOutcome>> + Send + 'a>> {
        Box::pin(self.transcribe_link(link))
    }
}
