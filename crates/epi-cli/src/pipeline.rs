//! Stage sequencing for one ETL run.
//!
//! `run_pipeline` drives transform, local load and remote load in order and
//! stops at the first failure, tagging it with the stage that produced it.
//! Nothing is retried and a local file written before a failed upload is
//! left in place.

use std::fmt;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use chrono::NaiveDate;
use epi_model::ErrorKind;
use epi_output::{ObjectStore, OutputError, UploadReceipt, upload_transformed, write_dataset_csv};
use epi_transform::{TransformError, transform_dataset};
use thiserror::Error;
use tracing::{info, info_span};

use crate::config::{PipelineConfig, PreconditionError};

/// Pipeline stages in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Precondition,
    Transform,
    LoadLocal,
    LoadRemote,
    Done,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Precondition => "precondition",
            Self::Transform => "transform",
            Self::LoadLocal => "load_local",
            Self::LoadRemote => "load_remote",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error raised inside a stage.
#[derive(Debug, Error)]
pub enum StageError {
    #[error(transparent)]
    Precondition(#[from] PreconditionError),

    #[error(transparent)]
    Transform(#[from] TransformError),

    #[error(transparent)]
    Output(#[from] OutputError),
}

impl StageError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Precondition(err) => err.kind(),
            Self::Transform(err) => err.kind(),
            Self::Output(err) => err.kind(),
        }
    }
}

/// A stage failure.
#[derive(Debug, Error)]
#[error("{stage} stage failed: {source}")]
pub struct PipelineError {
    pub stage: Stage,
    pub source: StageError,
}

impl PipelineError {
    pub fn new(stage: Stage, source: impl Into<StageError>) -> Self {
        Self {
            stage,
            source: source.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.source.kind()
    }
}

/// Result of a successful run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub run_date: NaiveDate,
    pub rows: usize,
    pub columns: usize,
    pub local_path: PathBuf,
    pub upload: UploadReceipt,
    /// Wall time of each completed stage, in execution order.
    pub timings: Vec<(Stage, Duration)>,
}

impl RunSummary {
    pub fn total_duration(&self) -> Duration {
        self.timings.iter().map(|(_, duration)| *duration).sum()
    }
}

/// Runs transform, local load and remote load.
///
/// `run_date` stamps `FECHA_CARGA` and versions the uploaded object, so both
/// always agree.
pub fn run_pipeline<S: ObjectStore>(
    config: &PipelineConfig,
    store: &S,
    run_date: NaiveDate,
) -> Result<RunSummary, PipelineError> {
    let run_span = info_span!("etl", %run_date, input = %config.input_file);
    let _run_guard = run_span.enter();
    let mut timings = Vec::with_capacity(3);

    let start = Instant::now();
    let df = info_span!("transform", raw_dir = %config.raw_dir.display())
        .in_scope(|| transform_dataset(&config.raw_dir, &config.input_file, run_date))
        .map_err(|err| PipelineError::new(Stage::Transform, err))?;
    timings.push((Stage::Transform, start.elapsed()));

    let start = Instant::now();
    let file_name = config.output_file_name();
    let local_path = info_span!("load_local", dir = %config.transformed_dir.display())
        .in_scope(|| write_dataset_csv(&df, &config.transformed_dir, &file_name))
        .map_err(|err| PipelineError::new(Stage::LoadLocal, err))?;
    timings.push((Stage::LoadLocal, start.elapsed()));

    let start = Instant::now();
    let upload = info_span!("load_remote", bucket = %config.target.bucket)
        .in_scope(|| {
            upload_transformed(
                store,
                &config.target,
                &config.transformed_dir,
                &config.output_base,
                run_date,
            )
        })
        .map_err(|err| PipelineError::new(Stage::LoadRemote, err))?;
    timings.push((Stage::LoadRemote, start.elapsed()));

    let summary = RunSummary {
        run_date,
        rows: df.height(),
        columns: df.width(),
        local_path,
        upload,
        timings,
    };
    info!(
        stage = %Stage::Done,
        rows = summary.rows,
        uri = %summary.upload.uri,
        duration_ms = summary.total_duration().as_millis(),
        "pipeline finished"
    );
    Ok(summary)
}
