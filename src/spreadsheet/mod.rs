//! Spreadsheet input and output.
//!
//! The input side detects the member-name and link columns from the header
//! row and yields one [`InputRecord`] per row that carries a link. The output
//! side writes the fixed three-column result sheet in a single atomic step.

mod reader;
mod writer;

pub use reader::{detect_columns, read_input_rows, ColumnLayout, LINK_COLUMN_NAMES, NAME_COLUMN_NAMES};
pub use writer::{default_output_path, write_output, MAX_CELL_CHARS, OUTPUT_HEADERS, OUTPUT_SHEET};

/// One row of the input sheet that will be sent for transcription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputRecord {
    /// Team member label, possibly empty
    pub member_name: String,
    /// Link forwarded untouched to the transcription endpoint, never empty
    pub video_link: String,
}

impl InputRecord {
    pub fn new(member_name: impl Into<String>, video_link: impl Into<String>) -> Self {
        Self {
            member_name: member_name.into(),
            video_link: video_link.into(),
        }
    }

    /// Name shown in progress output.
    pub fn display_name(&self) -> &str {
        if self.member_name.is_empty() {
            "(blank name)"
        } else {
            &self.member_name
        }
    }
}

/// One row of the result sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRecord {
    pub member_name: String,
    pub video_link: String,
    /// Transcript text, or `ERROR: <cause>`
    pub transcript: String,
}

impl OutputRecord {
    pub fn new(record: InputRecord, transcript: impl Into<String>) -> Self {
        Self {
            member_name: record.member_name,
            video_link: record.video_link,
            transcript: transcript.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.transcript.starts_with("ERROR: ")
    }
}
