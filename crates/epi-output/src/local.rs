//! Local CSV writer.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use polars::prelude::*;
use tracing::info;

use crate::error::{OutputError, Result};

/// Field separator of written CSV files.
pub const OUTPUT_SEPARATOR: u8 = b',';

/// Writes `df` to `dir/file_name` as a comma-separated file with a header.
///
/// The frame is checked before anything touches the filesystem, so an
/// invalid or empty frame leaves no directory or file behind. An existing
/// file is overwritten.
pub fn write_dataset_csv(df: &DataFrame, dir: &Path, file_name: &str) -> Result<PathBuf> {
    if df.width() == 0 {
        return Err(OutputError::InvalidDataset);
    }
    if df.height() == 0 {
        return Err(OutputError::EmptyDataset);
    }

    fs::create_dir_all(dir)?;
    let path = dir.join(file_name);
    let mut file = File::create(&path)?;

    let mut out = df.clone();
    CsvWriter::new(&mut file)
        .include_header(true)
        .with_separator(OUTPUT_SEPARATOR)
        .finish(&mut out)?;

    info!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "dataset written"
    );
    Ok(path)
}
