//! Error types for the transform stage.

use epi_ingest::IngestError;
use epi_model::{AgeBoundError, ErrorKind};
use polars::prelude::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransformError {
    /// Extraction failed; the ingest error is passed through untouched.
    #[error(transparent)]
    Ingest(#[from] IngestError),

    /// The frame handed to the transformer lacks required columns.
    #[error("dataset is missing required columns: {}", columns.join(", "))]
    MissingColumns { columns: Vec<String> },

    /// A recognized age-range label with a non-integer bound.
    #[error(transparent)]
    AgeBound(#[from] AgeBoundError),

    #[error(transparent)]
    Polars(#[from] PolarsError),
}

impl TransformError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Ingest(err) => err.kind(),
            Self::MissingColumns { .. } | Self::AgeBound(_) => ErrorKind::ContractViolation,
            Self::Polars(_) => ErrorKind::Upstream,
        }
    }
}

pub type Result<T> = std::result::Result<T, TransformError>;
