//! Setup-time errors.
//!
//! Anything that surfaces as a [`BatchError`] aborts the run before a single
//! row is sent to the transcription endpoint. Per-row failures never use this
//! type; they are recorded as text in the output spreadsheet instead.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("Input file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("{0}")]
    Configuration(String),

    #[error("{0}")]
    Auth(String),

    #[error("spreadsheet error: {0}")]
    Spreadsheet(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl BatchError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth(message.into())
    }
}

pub type Result<T> = std::result::Result<T, BatchError>;
