//! Column-level transformation functions.
//!
//! Each function rewrites or appends one group of columns in place and
//! returns a count describing what it did, for logging. None of them drop
//! or reorder rows.

use chrono::{DateTime, NaiveDate, Utc};
use epi_model::{
    AgeRange, EDAD_MAX, EDAD_MIN, EDAD_PROMEDIO, FECHA_CARGA, GRUPO_EDAD, SEXO, Sex,
    parse_age_range,
};
use polars::prelude::*;

use crate::error::Result;

/// Trim leading/trailing whitespace from every value of a string column.
///
/// Non-string columns are cast to strings first. Nulls stay null.
///
/// # Returns
///
/// Number of values that changed.
pub fn trim_string_column(df: &mut DataFrame, column_name: &str) -> Result<usize> {
    let column = df.column(column_name)?.cast(&DataType::String)?;
    let str_ca = column.str()?;

    let mut builder = StringChunkedBuilder::new(column_name.into(), df.height());
    let mut trimmed_count = 0;

    for opt_val in str_ca.into_iter() {
        match opt_val {
            Some(value) => {
                let trimmed = value.trim();
                if trimmed.len() != value.len() {
                    trimmed_count += 1;
                }
                builder.append_value(trimmed);
            }
            None => builder.append_null(),
        }
    }

    df.with_column(builder.finish().into_series())?;
    Ok(trimmed_count)
}

/// Decode `SEXO` into `"M"`/`"F"`, leaving unknown codes null.
///
/// # Returns
///
/// Number of rows whose code was not recognized (nulls included).
pub fn map_sex_column(df: &mut DataFrame) -> Result<usize> {
    let column = df.column(SEXO)?;

    let decoded: Vec<Sex> = (0..column.len())
        .map(|idx| Sex::from_value(&column.get(idx).unwrap_or(AnyValue::Null)))
        .collect();
    let unspecified = decoded
        .iter()
        .filter(|sex| matches!(sex, Sex::Unspecified(_)))
        .count();
    let codes: Vec<Option<&str>> = decoded.iter().map(Sex::code).collect();

    df.with_column(Series::new(SEXO.into(), codes))?;
    Ok(unspecified)
}

/// Derive `EDAD_MIN`, `EDAD_MAX` and `EDAD_PROMEDIO` from `GRUPO_EDAD`.
///
/// Unrecognized or null labels produce nulls in all three columns.
///
/// # Errors
///
/// Fails on the first recognized label with a non-integer bound.
///
/// # Returns
///
/// Number of rows whose label was not recognized.
pub fn derive_age_columns(df: &mut DataFrame) -> Result<usize> {
    let labels = df.column(GRUPO_EDAD)?.cast(&DataType::String)?;
    let str_ca = labels.str()?;

    let height = df.height();
    let mut mins: Vec<Option<i64>> = Vec::with_capacity(height);
    let mut maxs: Vec<Option<i64>> = Vec::with_capacity(height);
    let mut midpoints: Vec<Option<f64>> = Vec::with_capacity(height);
    let mut unknown_count = 0;

    for opt_label in str_ca.into_iter() {
        let range = match opt_label {
            Some(label) => parse_age_range(label)?,
            None => AgeRange::UNKNOWN,
        };
        if !range.is_known() {
            unknown_count += 1;
        }
        mins.push(range.min);
        maxs.push(range.max);
        midpoints.push(range.midpoint());
    }

    df.with_column(Series::new(EDAD_MIN.into(), mins))?;
    df.with_column(Series::new(EDAD_MAX.into(), maxs))?;
    df.with_column(Series::new(EDAD_PROMEDIO.into(), midpoints))?;
    Ok(unknown_count)
}

/// Stamp every row's `FECHA_CARGA` with `load_date`.
pub fn stamp_load_date(df: &mut DataFrame, load_date: NaiveDate) -> Result<usize> {
    let height = df.height();
    // Date columns are physically days since the Unix epoch.
    let days = load_date
        .signed_duration_since(DateTime::<Utc>::UNIX_EPOCH.date_naive())
        .num_days() as i32;

    let col = Series::new(FECHA_CARGA.into(), vec![days; height]).cast(&DataType::Date)?;
    df.with_column(col)?;
    Ok(height)
}
