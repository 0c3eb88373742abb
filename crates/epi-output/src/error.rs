//! Error types for the loaders and the object-store client.

use std::io;
use std::path::PathBuf;

use epi_model::ErrorKind;
use polars::prelude::PolarsError;
use thiserror::Error;

/// Failures talking to the object store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read credentials file {}", path.display())]
    CredentialsIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid object key '{key}': {source}")]
    InvalidKey {
        key: String,
        #[source]
        source: object_store::path::Error,
    },

    #[error("{operation} of {location} failed: {source}")]
    Backend {
        operation: &'static str,
        location: String,
        #[source]
        source: object_store::Error,
    },

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Failures of the local and remote load stages.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("dataset has no columns")]
    InvalidDataset,

    #[error("dataset has no rows; refusing to write an empty file")]
    EmptyDataset,

    #[error("transformed file not found: {}", path.display())]
    LocalFileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Polars(#[from] PolarsError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl OutputError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidDataset | Self::EmptyDataset => ErrorKind::ContractViolation,
            Self::LocalFileNotFound { .. } => ErrorKind::NotFound,
            Self::Io(_) | Self::Polars(_) | Self::Store(_) => ErrorKind::Upstream,
        }
    }
}

pub type Result<T> = std::result::Result<T, OutputError>;
