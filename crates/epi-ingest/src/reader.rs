//! Delimited file reading with raw-dataset validation.

use std::fs;
use std::io;
use std::path::Path;

use epi_model::missing_required_columns;
use polars::prelude::*;
use tracing::{debug, info};

use crate::error::{IngestError, Result};

/// Field separator of raw source files.
pub const RAW_SEPARATOR: u8 = b'|';

/// Header and record count from a structural pass over a delimited file.
#[derive(Debug, Clone)]
struct TableLayout {
    columns: Vec<String>,
    records: usize,
}

/// Checks the path resolves to a regular file.
fn probe_file(path: &Path) -> Result<()> {
    match fs::metadata(path) {
        Ok(metadata) if metadata.is_file() => Ok(()),
        Ok(_) => Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        }),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        }),
        Err(e) => Err(IngestError::Io(e)),
    }
}

fn csv_error(path: &Path, err: csv::Error) -> IngestError {
    let message = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(source) => IngestError::Io(source),
        _ => IngestError::CsvParse {
            path: path.to_path_buf(),
            message,
        },
    }
}

/// Reads the header and checks every record has as many fields as it.
fn scan_layout(path: &Path, separator: u8) -> Result<TableLayout> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(separator)
        .has_headers(true)
        .flexible(false)
        .from_path(path)
        .map_err(|e| csv_error(path, e))?;

    let columns: Vec<String> = reader
        .headers()
        .map_err(|e| csv_error(path, e))?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
        .collect();
    if columns.iter().all(String::is_empty) {
        return Err(IngestError::EmptyInput {
            path: path.to_path_buf(),
        });
    }

    let mut records = 0usize;
    for record in reader.records() {
        record.map_err(|e| csv_error(path, e))?;
        records += 1;
    }

    Ok(TableLayout { columns, records })
}

fn parse_frame(path: &Path, separator: u8) -> Result<DataFrame> {
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .map_parse_options(|opts| opts.with_separator(separator))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
}

/// Reads any delimited file into a DataFrame without schema checks.
///
/// Used for inspection; fails only on missing, empty or malformed files.
pub fn read_delimited(path: &Path, separator: u8) -> Result<DataFrame> {
    probe_file(path)?;
    let layout = scan_layout(path, separator)?;
    debug!(
        path = %path.display(),
        columns = layout.columns.len(),
        records = layout.records,
        "delimited layout scanned"
    );
    parse_frame(path, separator)
}

/// Reads and validates a raw dataset file.
///
/// Checks run in order: existence, parse, row count, required columns.
pub fn read_raw_dataset(path: &Path) -> Result<DataFrame> {
    probe_file(path)?;
    let layout = scan_layout(path, RAW_SEPARATOR)?;
    if layout.records == 0 {
        return Err(IngestError::NoRows {
            path: path.to_path_buf(),
        });
    }

    let df = parse_frame(path, RAW_SEPARATOR)?;
    if df.height() == 0 {
        return Err(IngestError::NoRows {
            path: path.to_path_buf(),
        });
    }

    let names = df.get_column_names();
    let missing = missing_required_columns(names.iter().map(|name| name.as_str()));
    if !missing.is_empty() {
        return Err(IngestError::MissingColumns {
            path: path.to_path_buf(),
            columns: missing.into_iter().map(str::to_string).collect(),
        });
    }

    info!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "raw dataset loaded"
    );
    Ok(df)
}

/// Extracts `file_name` from the raw-data directory.
pub fn extract_dataset(raw_dir: &Path, file_name: &str) -> Result<DataFrame> {
    read_raw_dataset(&raw_dir.join(file_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_scan_layout_counts_records() {
        let file = create_temp_csv("A|B|C\n1|2|3\n4|5|6\n");
        let layout = scan_layout(file.path(), RAW_SEPARATOR).unwrap();

        assert_eq!(layout.columns, vec!["A", "B", "C"]);
        assert_eq!(layout.records, 2);
    }

    #[test]
    fn test_scan_layout_strips_bom() {
        let file = create_temp_csv("\u{feff}A|B\n1|2\n");
        let layout = scan_layout(file.path(), RAW_SEPARATOR).unwrap();

        assert_eq!(layout.columns, vec!["A", "B"]);
    }

    #[test]
    fn test_scan_layout_empty_file() {
        let file = create_temp_csv("");
        let result = scan_layout(file.path(), RAW_SEPARATOR);

        assert!(matches!(result, Err(IngestError::EmptyInput { .. })));
    }

    #[test]
    fn test_scan_layout_ragged_record() {
        let file = create_temp_csv("A|B\n1|2\n3|4|5\n");
        let result = scan_layout(file.path(), RAW_SEPARATOR);

        assert!(matches!(result, Err(IngestError::CsvParse { .. })));
    }

    #[test]
    fn test_probe_rejects_directory() {
        let dir = tempfile::tempdir().unwrap();
        let result = probe_file(dir.path());

        assert!(matches!(result, Err(IngestError::FileNotFound { .. })));
    }

    #[test]
    fn test_read_delimited_accepts_any_columns() {
        let file = create_temp_csv("X|Y\n1|a\n2|b\n");
        let df = read_delimited(file.path(), RAW_SEPARATOR).unwrap();

        assert_eq!(df.height(), 2);
        assert_eq!(df.width(), 2);
    }
}
