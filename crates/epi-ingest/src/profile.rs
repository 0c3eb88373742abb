//! Exploratory profiling of a loaded dataset.
//!
//! Produces the figures shown by `inspect`: shape, dtypes, null counts,
//! numeric summaries and a short preview of the first rows.

use epi_model::cell::{cell_f64, cell_text};
use polars::prelude::{AnyValue, Column, DataFrame, DataType};

/// Summary statistics of a numeric column, ignoring nulls.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericSummary {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation; absent with fewer than two values.
    pub std: Option<f64>,
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnProfile {
    pub name: String,
    pub dtype: String,
    pub null_count: usize,
    pub numeric: Option<NumericSummary>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DatasetProfile {
    pub rows: usize,
    pub columns: Vec<ColumnProfile>,
    /// Header followed by up to `preview_rows` rendered rows.
    pub preview: Vec<Vec<String>>,
}

fn is_numeric(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

fn numeric_summary(column: &Column) -> Option<NumericSummary> {
    let values: Vec<f64> = (0..column.len())
        .filter_map(|idx| cell_f64(&column.get(idx).unwrap_or(AnyValue::Null)))
        .collect();
    if values.is_empty() {
        return None;
    }
    let count = values.len();
    let mean = values.iter().sum::<f64>() / count as f64;
    let std = (count > 1).then(|| {
        let variance =
            values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (count - 1) as f64;
        variance.sqrt()
    });
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    Some(NumericSummary {
        count,
        mean,
        std,
        min,
        max,
    })
}

/// Profiles every column of `df`.
pub fn profile_dataset(df: &DataFrame, preview_rows: usize) -> DatasetProfile {
    let columns = df
        .get_columns()
        .iter()
        .map(|column| ColumnProfile {
            name: column.name().to_string(),
            dtype: column.dtype().to_string(),
            null_count: column.null_count(),
            numeric: if is_numeric(column.dtype()) {
                numeric_summary(column)
            } else {
                None
            },
        })
        .collect();

    let mut preview = Vec::with_capacity(preview_rows.min(df.height()) + 1);
    preview.push(
        df.get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect(),
    );
    for idx in 0..preview_rows.min(df.height()) {
        preview.push(
            df.get_columns()
                .iter()
                .map(|column| cell_text(&column.get(idx).unwrap_or(AnyValue::Null)))
                .collect(),
        );
    }

    DatasetProfile {
        rows: df.height(),
        columns,
        preview,
    }
}
