use chrono::{DateTime, Local};
use rust_xlsxwriter::Workbook;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::OutputRecord;
use crate::error::{BatchError, Result};

pub const OUTPUT_SHEET: &str = "Output";
pub const OUTPUT_HEADERS: [&str; 3] = ["CSM Team Member", "Video Link", "Transcript"];

/// Upper bound on characters in a single spreadsheet cell.
pub const MAX_CELL_CHARS: usize = 32_767;

fn xlsx_error(err: rust_xlsxwriter::XlsxError) -> BatchError {
    BatchError::Spreadsheet(err.to_string())
}

fn fit_cell(text: &str, row: u32) -> String {
    if text.chars().count() <= MAX_CELL_CHARS {
        return text.to_string();
    }
    warn!(
        "Row {} exceeds {} characters, truncating cell",
        row, MAX_CELL_CHARS
    );
    text.chars().take(MAX_CELL_CHARS).collect()
}

fn build_workbook(rows: &[OutputRecord]) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(OUTPUT_SHEET).map_err(xlsx_error)?;

    for (col, title) in OUTPUT_HEADERS.iter().enumerate() {
        sheet.write_string(0, col as u16, *title).map_err(xlsx_error)?;
    }

    for (index, record) in rows.iter().enumerate() {
        let row = index as u32 + 1;
        let cells = [&record.member_name, &record.video_link, &record.transcript];
        for (col, value) in cells.into_iter().enumerate() {
            sheet
                .write_string(row, col as u16, fit_cell(value, row))
                .map_err(xlsx_error)?;
        }
    }

    workbook.save_to_buffer().map_err(xlsx_error)
}

/// Write the result sheet to `path`, replacing any existing file atomically.
pub fn write_output(path: &Path, rows: &[OutputRecord]) -> Result<()> {
    let buffer = build_workbook(rows)?;

    let parent = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)?;

    let mut staged = tempfile::NamedTempFile::new_in(parent)?;
    staged.write_all(&buffer)?;
    staged.flush()?;
    staged.persist(path).map_err(|e| BatchError::Io(e.error))?;

    info!("Wrote {} row(s) to {}", rows.len(), path.display());
    Ok(())
}

/// `<dir>/transcripts_output_<YYYYmmdd_HHMMSS>.xlsx`
pub fn default_output_path(dir: &Path, now: DateTime<Local>) -> PathBuf {
    dir.join(format!(
        "transcripts_output_{}.xlsx",
        now.format("%Y%m%d_%H%M%S")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spreadsheet::InputRecord;
    use calamine::{open_workbook_auto, Reader};
    use chrono::TimeZone;

    fn read_back(path: &Path) -> (Vec<String>, Vec<Vec<String>>) {
        let mut workbook = open_workbook_auto(path).unwrap();
        let names = workbook.sheet_names().to_vec();
        let range = workbook.worksheet_range_at(0).unwrap().unwrap();
        let rows = range
            .rows()
            .map(|row| row.iter().map(|c| c.to_string()).collect())
            .collect();
        (names, rows)
    }

    #[test]
    fn test_write_output_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out.xlsx");
        let rows = vec![
            OutputRecord::new(InputRecord::new("Alice", "https://a"), "hello"),
            OutputRecord::new(InputRecord::new("", "https://b"), "ERROR: HTTP 500: boom"),
        ];

        write_output(&path, &rows).unwrap();

        let (names, read) = read_back(&path);
        assert_eq!(names, vec![OUTPUT_SHEET.to_string()]);
        assert_eq!(read.len(), 3);
        assert_eq!(read[0], OUTPUT_HEADERS.map(String::from).to_vec());
        assert_eq!(read[1], vec!["Alice", "https://a", "hello"]);
        assert_eq!(read[2], vec!["", "https://b", "ERROR: HTTP 500: boom"]);
    }

    #[test]
    fn test_write_output_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.xlsx");
        std::fs::write(&path, b"stale").unwrap();

        write_output(&path, &[]).unwrap();

        let (_, read) = read_back(&path);
        assert_eq!(read.len(), 1);
        let leftovers: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(leftovers.len(), 1);
    }

    #[test]
    fn test_oversized_cell_is_truncated() {
        let long = "x".repeat(MAX_CELL_CHARS + 10);
        assert_eq!(fit_cell(&long, 1).chars().count(), MAX_CELL_CHARS);
        assert_eq!(fit_cell("short", 1), "short");
    }

    #[test]
    fn test_default_output_path_uses_timestamp() {
        let now = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        assert_eq!(
            default_output_path(Path::new("Data"), now),
            PathBuf::from("Data").join("transcripts_output_20240309_140507.xlsx")
        );
    }
}
