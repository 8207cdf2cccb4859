use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;
use tracing::{debug, info};

use super::InputRecord;
use crate::error::{BatchError, Result};

/// Header texts accepted for the member-name column (compared lowercased and trimmed)
pub const NAME_COLUMN_NAMES: &[&str] = &[
    "name",
    "csm",
    "csm team member",
    "csm_member",
    "csm team members",
];

/// Header texts accepted for the video link column
pub const LINK_COLUMN_NAMES: &[&str] = &[
    "video link",
    "video url",
    "drive link",
    "google drive link",
    "link",
    "url",
];

/// Zero-based positions of the two columns the reader cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    pub name: usize,
    pub link: usize,
}

fn normalize_header(value: &str) -> String {
    value.trim().to_lowercase()
}

fn find_column(headers: &[String], candidates: &[&str]) -> Option<usize> {
    headers
        .iter()
        .position(|header| candidates.contains(&normalize_header(header).as_str()))
}

/// Locate the name and link columns in a header row.
///
/// The first matching header wins for each column.
pub fn detect_columns(headers: &[String]) -> Result<ColumnLayout> {
    let name = find_column(headers, NAME_COLUMN_NAMES).ok_or_else(|| {
        BatchError::configuration("Could not find Name/CSM column in input sheet headers.")
    })?;
    let link = find_column(headers, LINK_COLUMN_NAMES).ok_or_else(|| {
        BatchError::configuration("Could not find Video Link column in input sheet headers.")
    })?;

    debug!("Detected columns: name={}, link={}", name, link);
    Ok(ColumnLayout { name, link })
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        other => other.to_string().trim().to_string(),
    }
}

fn cell_at(row: &[String], index: usize) -> &str {
    row.get(index).map(String::as_str).unwrap_or("")
}

/// Turn already-stringified rows into records. `rows[0]` is the header row.
pub(crate) fn records_from_rows(rows: &[Vec<String>]) -> Result<Vec<InputRecord>> {
    let Some((headers, data)) = rows.split_first() else {
        return Ok(Vec::new());
    };

    let layout = detect_columns(headers)?;

    let records = data
        .iter()
        .filter_map(|row| {
            let link = cell_at(row, layout.link);
            if link.is_empty() {
                return None;
            }
            Some(InputRecord::new(cell_at(row, layout.name), link))
        })
        .collect();

    Ok(records)
}

/// Read `(name, link)` records from the first worksheet of `path`.
pub fn read_input_rows(path: &Path) -> Result<Vec<InputRecord>> {
    if !path.exists() {
        return Err(BatchError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let mut workbook = open_workbook_auto(path)
        .map_err(|e| BatchError::Spreadsheet(format!("{}: {}", path.display(), e)))?;

    let range = match workbook.worksheet_range_at(0) {
        Some(range) => range.map_err(|e| BatchError::Spreadsheet(e.to_string()))?,
        None => return Ok(Vec::new()),
    };

    let rows: Vec<Vec<String>> = range
        .rows()
        .map(|row| row.iter().map(cell_text).collect())
        .collect();

    let records = records_from_rows(&rows)?;
    info!(
        "Read {} record(s) from {} ({} data row(s))",
        records.len(),
        path.display(),
        rows.len().saturating_sub(1)
    );
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_detect_columns_any_position_and_case() {
        let headers = strings(&["Date", "  VIDEO Link ", "Notes", "CSM Team Member"]);
        let layout = detect_columns(&headers).unwrap();
        assert_eq!(layout, ColumnLayout { name: 3, link: 1 });
    }

    #[test]
    fn test_detect_columns_every_synonym() {
        for name in NAME_COLUMN_NAMES {
            for link in LINK_COLUMN_NAMES {
                let upper = name.to_uppercase();
                let headers = strings(&["id", upper.as_str(), *link]);
                let layout = detect_columns(&headers).unwrap();
                assert_eq!(layout, ColumnLayout { name: 1, link: 2 });
            }
        }
    }

    #[test]
    fn test_detect_columns_first_match_wins() {
        let headers = strings(&["URL", "Name", "Drive Link", "CSM"]);
        let layout = detect_columns(&headers).unwrap();
        assert_eq!(layout, ColumnLayout { name: 1, link: 0 });
    }

    #[test]
    fn test_detect_columns_missing_name() {
        let err = detect_columns(&strings(&["Owner", "Link"])).unwrap_err();
        assert!(matches!(err, BatchError::Configuration(_)));
        assert!(err.to_string().contains("Name/CSM"));
    }

    #[test]
    fn test_detect_columns_missing_link() {
        let err = detect_columns(&strings(&["Name", "Recording"])).unwrap_err();
        assert!(matches!(err, BatchError::Configuration(_)));
        assert!(err.to_string().contains("Video Link"));
    }

    #[test]
    fn test_rows_without_link_are_dropped() {
        let rows = vec![
            strings(&["Name", "Link"]),
            strings(&["Alice", "https://drive.example.com/a"]),
            strings(&["Bob", ""]),
            strings(&["", ""]),
            strings(&["Carol"]),
            strings(&["", "https://drive.example.com/d"]),
        ];

        let records = records_from_rows(&rows).unwrap();
        assert_eq!(
            records,
            vec![
                InputRecord::new("Alice", "https://drive.example.com/a"),
                InputRecord::new("", "https://drive.example.com/d"),
            ]
        );
    }

    #[test]
    fn test_no_rows_is_empty() {
        assert!(records_from_rows(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_header_only_is_empty() {
        let rows = vec![strings(&["Name", "URL"])];
        assert!(records_from_rows(&rows).unwrap().is_empty());
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let err = read_input_rows(Path::new("/nonexistent/input.xlsx")).unwrap_err();
        assert!(matches!(err, BatchError::NotFound { .. }));
    }

    #[test]
    fn test_read_xlsx_trims_and_stringifies() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.xlsx");

        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "Video URL").unwrap();
        sheet.write_string(0, 1, " Name ").unwrap();
        sheet.write_string(1, 0, "  https://drive.example.com/x  ").unwrap();
        sheet.write_number(1, 1, 42.0).unwrap();
        sheet.write_string(2, 1, "No link here").unwrap();
        workbook.save(&path).unwrap();

        let records = read_input_rows(&path).unwrap();
        assert_eq!(
            records,
            vec![InputRecord::new("42", "https://drive.example.com/x")]
        );
    }
}
