pub mod app;
pub mod batch;
pub mod browser;
pub mod cli;
pub mod config;
pub mod error;
pub mod global;
pub mod session;
pub mod spreadsheet;
pub mod transcription;

pub use error::{BatchError, Result};
