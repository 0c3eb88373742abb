//! Error types for raw-data extraction.

use std::path::PathBuf;

use epi_model::ErrorKind;
use thiserror::Error;

/// Errors that can occur while extracting a raw dataset.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Source file missing or not a regular file.
    #[error("raw file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Any other I/O failure (permissions, interrupted reads), passed through.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    // === Parsing Errors ===
    /// File has no bytes or no header line.
    #[error("raw file is empty: {path}")]
    EmptyInput { path: PathBuf },

    /// Content is not a consistent delimited table.
    #[error("failed to parse delimited file {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    // === Schema Errors ===
    /// Header present but no data rows.
    #[error("raw file has a header but no data rows: {path}")]
    NoRows { path: PathBuf },

    /// Required columns absent from the header.
    #[error("raw file {path} is missing required columns: {}", columns.join(", "))]
    MissingColumns { path: PathBuf, columns: Vec<String> },

    // === DataFrame Errors ===
    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl IngestError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::FileNotFound { .. } => ErrorKind::NotFound,
            Self::EmptyInput { .. } | Self::CsvParse { .. } => ErrorKind::MalformedInput,
            Self::NoRows { .. } | Self::MissingColumns { .. } => ErrorKind::SchemaInvalid,
            Self::Io(_) | Self::DataFrame { .. } => ErrorKind::Upstream,
        }
    }
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, IngestError>;
