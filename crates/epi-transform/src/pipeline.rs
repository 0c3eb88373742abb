//! Full transformation of the raw weekly dataset.

use std::path::Path;

use chrono::NaiveDate;
use epi_ingest::extract_dataset;
use epi_model::{GRUPO_EDAD, REGION, missing_required_columns};
use polars::prelude::DataFrame;
use tracing::{debug, info};

use crate::error::{Result, TransformError};
use crate::executors::{derive_age_columns, map_sex_column, stamp_load_date, trim_string_column};

/// Applies every column rule to an already-extracted frame.
///
/// Rows are neither dropped nor reordered. Raw columns keep their position;
/// `EDAD_MIN`, `EDAD_MAX`, `EDAD_PROMEDIO` and `FECHA_CARGA` are appended in
/// that order. Running it twice with the same `load_date` yields the same
/// frame.
pub fn transform_frame(mut df: DataFrame, load_date: NaiveDate) -> Result<DataFrame> {
    let names = df.get_column_names();
    let missing = missing_required_columns(names.iter().map(|name| name.as_str()));
    if !missing.is_empty() {
        return Err(TransformError::MissingColumns {
            columns: missing.into_iter().map(str::to_string).collect(),
        });
    }

    let trimmed_age = trim_string_column(&mut df, GRUPO_EDAD)?;
    let trimmed_region = trim_string_column(&mut df, REGION)?;
    debug!(trimmed_age, trimmed_region, "string columns trimmed");

    let unmapped_sex = map_sex_column(&mut df)?;
    let unknown_age_groups = derive_age_columns(&mut df)?;
    stamp_load_date(&mut df, load_date)?;

    info!(
        rows = df.height(),
        columns = df.width(),
        unmapped_sex,
        unknown_age_groups,
        %load_date,
        "dataset transformed"
    );
    Ok(df)
}

/// Extracts `file_name` from `raw_dir` and transforms it.
///
/// Extraction errors surface unchanged as [`TransformError::Ingest`].
pub fn transform_dataset(
    raw_dir: &Path,
    file_name: &str,
    load_date: NaiveDate,
) -> Result<DataFrame> {
    let df = extract_dataset(raw_dir, file_name)?;
    transform_frame(df, load_date)
}
