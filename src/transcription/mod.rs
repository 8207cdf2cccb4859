use anyhow::Result;
use std::future::Future;
use std::pin::Pin;

mod api;
mod extract;

pub use api::{interpret_response, ApiTranscriber, TRANSCRIBE_PATH};
pub use extract::{error_message, extract_transcript_text};

/// Result of one transcription call that reached the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscribeOutcome {
    /// Non-empty transcript text
    Transcript(String),
    /// Non-empty description of why no transcript was produced
    Failed(String),
}

impl TranscribeOutcome {
    /// Text for the output spreadsheet cell.
    pub fn into_cell(self) -> String {
        match self {
            TranscribeOutcome::Transcript(text) => text,
            TranscribeOutcome::Failed(message) => format!("ERROR: {message}"),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, TranscribeOutcome::Transcript(_))
    }
}

/// Something that turns a video link into a transcript.
///
/// `Err` is reserved for transport failures (timeouts, refused connections);
/// anything the server answered is reported through [`TranscribeOutcome`].
pub trait Transcriber: Send + Sync {
    fn name(&self) -> &'static str;

    fn transcribe<'a>(
        &'a self,
        link: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<TranscribeOutcome>> + Send + 'a>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_cell() {
        assert_eq!(
            TranscribeOutcome::Transcript("hello".to_string()).into_cell(),
            "hello"
        );
        assert_eq!(
            TranscribeOutcome::Failed("HTTP 500: boom".to_string()).into_cell(),
            "ERROR: HTTP 500: boom"
        );
    }
}
