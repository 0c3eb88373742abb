//! Reading single cells whatever dtype polars inferred for the column.
//!
//! The raw file is read with full schema inference, so a numeric column can
//! arrive as integers, floats or text depending on its contents.

use polars::prelude::AnyValue;

/// Numeric reading of a cell, keeping integers exact.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Number {
    Int(i64),
    Float(f64),
}

fn number(value: &AnyValue<'_>) -> Option<Number> {
    let number = match *value {
        AnyValue::Int8(v) => Number::Int(v.into()),
        AnyValue::Int16(v) => Number::Int(v.into()),
        AnyValue::Int32(v) => Number::Int(v.into()),
        AnyValue::Int64(v) => Number::Int(v),
        AnyValue::UInt8(v) => Number::Int(v.into()),
        AnyValue::UInt16(v) => Number::Int(v.into()),
        AnyValue::UInt32(v) => Number::Int(v.into()),
        AnyValue::UInt64(v) => i64::try_from(v).map_or(Number::Float(v as f64), Number::Int),
        AnyValue::Float32(v) => Number::Float(v.into()),
        AnyValue::Float64(v) => Number::Float(v),
        AnyValue::String(text) => return number_from_text(text),
        AnyValue::StringOwned(ref text) => return number_from_text(text.as_str()),
        _ => return None,
    };
    Some(number)
}

fn number_from_text(text: &str) -> Option<Number> {
    let text = text.trim();
    match text.parse::<i64>() {
        Ok(int) => Some(Number::Int(int)),
        Err(_) => text.parse::<f64>().ok().map(Number::Float),
    }
}

/// Display text of a cell; null renders as the empty string.
///
/// ```
/// use epi_model::cell::cell_text;
/// use polars::prelude::AnyValue;
///
/// assert_eq!(cell_text(&AnyValue::Null), "");
/// assert_eq!(cell_text(&AnyValue::Float64(7.0)), "7");
/// assert_eq!(cell_text(&AnyValue::String("Maule")), "Maule");
/// ```
pub fn cell_text(value: &AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::String(text) => (*text).to_string(),
        AnyValue::StringOwned(text) => text.to_string(),
        AnyValue::Boolean(flag) => flag.to_string(),
        other => match number(other) {
            Some(Number::Int(int)) => int.to_string(),
            // `Display` for f64 already drops a trailing `.0`.
            Some(Number::Float(float)) => float.to_string(),
            None => other.to_string(),
        },
    }
}

/// Cell as a float, for summary statistics.
pub fn cell_f64(value: &AnyValue<'_>) -> Option<f64> {
    match number(value)? {
        Number::Int(int) => Some(int as f64),
        Number::Float(float) => Some(float),
    }
}

/// Cell as an exact integer; floats only qualify when they are whole.
pub(crate) fn cell_i64(value: &AnyValue<'_>) -> Option<i64> {
    match number(value)? {
        Number::Int(int) => Some(int),
        Number::Float(float)
            if float.fract() == 0.0 && float >= i64::MIN as f64 && float < i64::MAX as f64 =>
        {
            Some(float as i64)
        }
        Number::Float(_) => None,
    }
}
