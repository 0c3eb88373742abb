//! Age-range parsing for `GRUPO_EDAD` labels.
//!
//! Labels come in two shapes:
//!
//! - closed ranges, `"<min> a <max>"` (e.g. `"0 a 14"`)
//! - open-ended ranges, `"<min> +"` (e.g. `"80 +"`), capped at
//!   [`OPEN_ENDED_MAX_AGE`]
//!
//! Anything else yields an [`AgeRange`] with both bounds absent. Only the
//! exact separator `" a "` is recognized, so `"0  a 14"` or `"0 a14"` fall
//! through to the absent case.

use std::num::ParseIntError;

use thiserror::Error;

/// Upper bound assigned to open-ended labels such as `"80 +"`.
pub const OPEN_ENDED_MAX_AGE: i64 = 100;

const RANGE_SEPARATOR: &str = " a ";

/// Bounds derived from an age-range label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AgeRange {
    pub min: Option<i64>,
    pub max: Option<i64>,
}

impl AgeRange {
    /// Range with both bounds absent.
    pub const UNKNOWN: Self = Self {
        min: None,
        max: None,
    };

    pub fn new(min: i64, max: i64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    /// Midpoint of the bounds, absent unless both bounds are present.
    pub fn midpoint(&self) -> Option<f64> {
        match (self.min, self.max) {
            (Some(min), Some(max)) => Some((min as f64 + max as f64) / 2.0),
            _ => None,
        }
    }

    pub fn is_known(&self) -> bool {
        self.min.is_some() && self.max.is_some()
    }
}

/// A recognized label whose bound is not an integer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid age bound '{bound}' in age group '{label}'")]
pub struct AgeBoundError {
    pub label: String,
    pub bound: String,
    #[source]
    pub source: ParseIntError,
}

fn parse_bound(label: &str, bound: &str) -> Result<i64, AgeBoundError> {
    let bound = bound.trim();
    bound.parse::<i64>().map_err(|source| AgeBoundError {
        label: label.to_string(),
        bound: bound.to_string(),
        source,
    })
}

/// Parses an age-range label into its bounds.
///
/// # Examples
///
/// ```
/// use epi_model::{AgeRange, parse_age_range};
///
/// assert_eq!(parse_age_range("0 a 14").unwrap(), AgeRange::new(0, 14));
/// assert_eq!(parse_age_range("80 +").unwrap(), AgeRange::new(80, 100));
/// assert_eq!(parse_age_range("desconocido").unwrap(), AgeRange::UNKNOWN);
/// ```
///
/// # Errors
///
/// Returns [`AgeBoundError`] when the label matches one of the two shapes
/// but a bound is not an integer (e.g. `"0 a catorce"`).
pub fn parse_age_range(label: &str) -> Result<AgeRange, AgeBoundError> {
    let trimmed = label.trim();

    if let Some(lower) = trimmed.strip_suffix('+') {
        let min = parse_bound(trimmed, lower)?;
        return Ok(AgeRange {
            min: Some(min),
            max: Some(OPEN_ENDED_MAX_AGE),
        });
    }

    if let Some((lower, upper)) = trimmed.split_once(RANGE_SEPARATOR) {
        let min = parse_bound(trimmed, lower)?;
        let max = parse_bound(trimmed, upper)?;
        return Ok(AgeRange::new(min, max));
    }

    Ok(AgeRange::UNKNOWN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closed_range() {
        assert_eq!(parse_age_range("0 a 14").unwrap(), AgeRange::new(0, 14));
        assert_eq!(parse_age_range("15 a 29").unwrap(), AgeRange::new(15, 29));
    }

    #[test]
    fn closed_range_ignores_outer_whitespace() {
        assert_eq!(parse_age_range(" 15 a 29 ").unwrap(), AgeRange::new(15, 29));
        assert_eq!(parse_age_range("\t65 a 79\n").unwrap(), AgeRange::new(65, 79));
    }

    #[test]
    fn open_ended_range_is_capped() {
        assert_eq!(parse_age_range("80 +").unwrap(), AgeRange::new(80, 100));
        assert_eq!(parse_age_range("80+").unwrap(), AgeRange::new(80, 100));
        assert_eq!(parse_age_range("  90   + ").unwrap(), AgeRange::new(90, 100));
    }

    #[test]
    fn unrecognized_label_is_unknown() {
        assert_eq!(parse_age_range("desconocido").unwrap(), AgeRange::UNKNOWN);
        assert_eq!(parse_age_range("").unwrap(), AgeRange::UNKNOWN);
        assert_eq!(parse_age_range("nan").unwrap(), AgeRange::UNKNOWN);
    }

    // Known limitation: only the exact " a " separator is recognized.
    #[test]
    fn irregular_separator_spacing_is_unknown() {
        assert_eq!(parse_age_range("0  a14").unwrap(), AgeRange::UNKNOWN);
        assert_eq!(parse_age_range("0 a14").unwrap(), AgeRange::UNKNOWN);
        assert_eq!(parse_age_range("0-14").unwrap(), AgeRange::UNKNOWN);
        assert_eq!(parse_age_range("0 A 14").unwrap(), AgeRange::UNKNOWN);
    }

    #[test]
    fn split_happens_on_first_separator() {
        let err = parse_age_range("1 a 2 a 3").unwrap_err();
        assert_eq!(err.bound, "2 a 3");
    }

    #[test]
    fn non_numeric_bound_is_an_error() {
        let err = parse_age_range("0 a catorce").unwrap_err();
        assert_eq!(err.label, "0 a catorce");
        assert_eq!(err.bound, "catorce");

        let err = parse_age_range("ochenta +").unwrap_err();
        assert_eq!(err.bound, "ochenta");
    }

    #[test]
    fn midpoint_requires_both_bounds() {
        assert_eq!(AgeRange::new(0, 14).midpoint(), Some(7.0));
        assert_eq!(AgeRange::new(15, 29).midpoint(), Some(22.0));
        assert_eq!(AgeRange::new(80, 100).midpoint(), Some(90.0));
        assert_eq!(AgeRange::UNKNOWN.midpoint(), None);
        let partial = AgeRange {
            min: Some(3),
            max: None,
        };
        assert_eq!(partial.midpoint(), None);
        assert!(!partial.is_known());
    }

    #[test]
    fn midpoint_of_extreme_bounds_does_not_overflow() {
        let open = parse_age_range("9223372036854775807 +").unwrap();
        assert_eq!(open.midpoint(), Some((i64::MAX as f64 + 100.0) / 2.0));

        let closed = AgeRange::new(i64::MAX, i64::MAX);
        assert_eq!(closed.midpoint(), Some(i64::MAX as f64));

        let negative = AgeRange::new(i64::MIN, i64::MIN);
        assert_eq!(negative.midpoint(), Some(i64::MIN as f64));
    }
}
