//! `SEXO` categorical code.

use polars::prelude::AnyValue;

use crate::cell::{cell_i64, cell_text};

/// Sex as recorded in the source dataset.
///
/// The source encodes male as `1` and female as `2`. Any other value,
/// including a missing one, is kept as [`Sex::Unspecified`] with its raw text
/// rather than being coerced to one of the known codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sex {
    Male,
    Female,
    Unspecified(Option<String>),
}

impl Sex {
    /// Decodes a raw numeric code.
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => Self::Male,
            2 => Self::Female,
            other => Self::Unspecified(Some(other.to_string())),
        }
    }

    /// Decodes a raw cell value.
    ///
    /// Integer, float and numeric-string cells are accepted; `1.0` decodes
    /// like `1`, while `1.5` stays unspecified.
    pub fn from_value(value: &AnyValue<'_>) -> Self {
        if matches!(value, AnyValue::Null) {
            return Self::Unspecified(None);
        }
        match cell_i64(value) {
            Some(code) => Self::from_code(code),
            None => Self::Unspecified(Some(cell_text(value))),
        }
    }

    /// Output code: `"M"`, `"F"`, or `None` when unspecified.
    pub fn code(&self) -> Option<&'static str> {
        match self {
            Self::Male => Some("M"),
            Self::Female => Some("F"),
            Self::Unspecified(_) => None,
        }
    }
}
