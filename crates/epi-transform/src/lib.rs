//! Transformation of the raw epidemiological-week dataset.
//!
//! - **executors**: column-level operations (trimming, `SEXO` decoding,
//!   age-range derivation, load-date stamping)
//! - **pipeline**: the fixed sequence applied to an extracted dataset

pub mod error;
pub mod executors;
pub mod pipeline;

pub use error::{Result, TransformError};
pub use executors::{derive_age_columns, map_sex_column, stamp_load_date, trim_string_column};
pub use pipeline::{transform_dataset, transform_frame};
