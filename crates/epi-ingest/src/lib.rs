//! Extraction of the raw epidemiological-week dataset.
//!
//! This crate loads `|`-delimited source files into Polars DataFrames and
//! enforces the raw-dataset contract:
//!
//! - the file exists and is a regular file
//! - it parses as a delimited table with a header line
//! - it has at least one data row
//! - it carries every required column
//!
//! It also profiles arbitrary delimited files for the `inspect` command.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use epi_ingest::extract_dataset;
//!
//! let df = extract_dataset(Path::new("data/raw"), "def_semana_epidemiologica.csv")?;
//! ```

mod error;
mod profile;
mod reader;

// === Error Types ===
pub use error::{IngestError, Result};

// === Reading ===
pub use reader::{RAW_SEPARATOR, extract_dataset, read_delimited, read_raw_dataset};

// === Profiling ===
pub use profile::{ColumnProfile, DatasetProfile, NumericSummary, profile_dataset};
