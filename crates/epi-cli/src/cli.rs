//! CLI argument definitions for the ETL runner.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use colorchoice_clap::Color;
use epi_cli::config::{
    DEFAULT_BUCKET, DEFAULT_CREDENTIALS_VAR, DEFAULT_DATA_DIR, DEFAULT_INPUT_FILE,
    DEFAULT_OUTPUT_BASE,
};
use epi_ingest::RAW_SEPARATOR;
use epi_output::DEFAULT_LAYER;

#[derive(Parser)]
#[command(
    name = "epi-etl",
    version,
    about = "Epidemiological-week ETL: extract, transform and load weekly mortality data",
    long_about = "Reads the pipe-delimited weekly dataset, validates its schema, derives\n\
                  age bounds and a load date, writes a local CSV and uploads a dated copy\n\
                  to the object store."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q to quieten).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the full pipeline: transform, write locally, upload.
    Run(RunArgs),

    /// Profile a delimited file without validating or transforming it.
    Inspect(InspectArgs),
}

#[derive(Parser)]
pub struct RunArgs {
    /// Root data directory holding `raw/` and `transformed/`.
    #[arg(long = "data-dir", value_name = "DIR", default_value = DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,

    /// Raw input directory (default: <DATA_DIR>/raw).
    #[arg(long = "raw-dir", value_name = "DIR")]
    pub raw_dir: Option<PathBuf>,

    /// Transformed output directory (default: <DATA_DIR>/transformed).
    #[arg(long = "transformed-dir", value_name = "DIR")]
    pub transformed_dir: Option<PathBuf>,

    /// Raw file name inside the raw directory.
    #[arg(long = "input", value_name = "FILE", default_value = DEFAULT_INPUT_FILE)]
    pub input: String,

    /// Base name of the transformed file, without extension.
    #[arg(long = "output-name", value_name = "NAME", default_value = DEFAULT_OUTPUT_BASE)]
    pub output_name: String,

    /// Destination bucket.
    #[arg(long = "bucket", default_value = DEFAULT_BUCKET)]
    pub bucket: String,

    /// Key prefix inside the bucket.
    #[arg(long = "layer", default_value = DEFAULT_LAYER)]
    pub layer: String,

    /// Environment variable holding the credentials file path.
    #[arg(long = "credentials-env", value_name = "VAR", default_value = DEFAULT_CREDENTIALS_VAR)]
    pub credentials_env: String,

    /// Load date (YYYY-MM-DD) instead of today's local date.
    #[arg(long = "load-date", value_name = "DATE")]
    pub load_date: Option<NaiveDate>,
}

#[derive(Parser)]
pub struct InspectArgs {
    /// Delimited file to profile.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Field separator (single ASCII character).
    #[arg(long = "separator", default_value_t = RAW_SEPARATOR as char, value_parser = parse_separator)]
    pub separator: char,

    /// Number of rows to preview.
    #[arg(long = "rows", default_value_t = 5)]
    pub rows: usize,
}

fn parse_separator(value: &str) -> Result<char, String> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii() => Ok(c),
        _ => Err(format!("separator must be one ASCII character, got '{value}'")),
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
