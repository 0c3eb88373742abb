//! Subcommand handlers for the `epi-etl` binary.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use epi_cli::config::{PipelineConfig, check_credentials, open_store};
use epi_cli::pipeline::{PipelineError, RunSummary, Stage, run_pipeline};
use epi_ingest::{DatasetProfile, profile_dataset, read_delimited};
use epi_output::RemoteTarget;
use tracing::{error, info};

use crate::cli::{InspectArgs, RunArgs};

/// Exit code when the environment is not ready to run.
pub const EXIT_PRECONDITION: i32 = 2;

/// Exit code when a stage fails.
pub const EXIT_FAILURE: i32 = 1;

/// Process exit code for a failed run.
pub fn exit_code(err: &PipelineError) -> i32 {
    match err.stage {
        Stage::Precondition => EXIT_PRECONDITION,
        _ => EXIT_FAILURE,
    }
}

pub fn report_failure(err: &PipelineError) {
    error!(stage = %err.stage, kind = %err.kind(), "{}", err.source);
    eprintln!("error: {err}");
}

fn pipeline_config(args: &RunArgs) -> PipelineConfig {
    let defaults = PipelineConfig::from_data_dir(&args.data_dir);
    PipelineConfig {
        raw_dir: args.raw_dir.clone().unwrap_or(defaults.raw_dir),
        transformed_dir: args
            .transformed_dir
            .clone()
            .unwrap_or(defaults.transformed_dir),
        input_file: args.input.clone(),
        output_base: args.output_name.clone(),
        target: RemoteTarget::new(args.bucket.clone()).with_layer(args.layer.clone()),
    }
}

pub fn run_etl(args: &RunArgs) -> std::result::Result<RunSummary, PipelineError> {
    let config = pipeline_config(args);
    let store = check_credentials(&args.credentials_env, |name| std::env::var_os(name))
        .and_then(|credentials| open_store(&credentials, &config.target.bucket))
        .map_err(|err| PipelineError::new(Stage::Precondition, err))?;

    let run_date = args
        .load_date
        .unwrap_or_else(|| Local::now().date_naive());
    info!(%run_date, bucket = %config.target.bucket, "starting run");

    run_pipeline(&config, &store, run_date)
}

pub fn run_inspect(args: &InspectArgs) -> Result<(PathBuf, DatasetProfile)> {
    let separator = u8::try_from(args.separator).context("separator must be ASCII")?;
    let df = read_delimited(&args.file, separator)
        .with_context(|| format!("read {}", args.file.display()))?;
    Ok((args.file.clone(), profile_dataset(&df, args.rows)))
}
