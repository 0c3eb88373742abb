//! Property and snapshot tests for the age-range rule.

use epi_model::{AgeRange, OPEN_ENDED_MAX_AGE, parse_age_range};
use proptest::prelude::*;

fn padding() -> impl Strategy<Value = String> {
    prop::collection::vec(prop_oneof![Just(' '), Just('\t')], 0..3)
        .prop_map(|chars| chars.into_iter().collect())
}

proptest! {
    #[test]
    fn closed_ranges_round_trip(
        min in 0i64..120,
        max in 0i64..120,
        left in padding(),
        right in padding(),
    ) {
        let label = format!("{left}{min} a {max}{right}");
        let range = parse_age_range(&label).unwrap();
        prop_assert_eq!(range, AgeRange::new(min, max));
        prop_assert_eq!(range.midpoint(), Some((min + max) as f64 / 2.0));
    }

    #[test]
    fn open_ranges_cap_at_fixed_max(min in 0i64..120, gap in padding()) {
        let label = format!("{min}{gap}+");
        let range = parse_age_range(&label).unwrap();
        prop_assert_eq!(range.min, Some(min));
        prop_assert_eq!(range.max, Some(OPEN_ENDED_MAX_AGE));
    }

    #[test]
    fn labels_without_markers_are_unknown(label in "[b-z]{0,12}") {
        prop_assert_eq!(parse_age_range(&label).unwrap(), AgeRange::UNKNOWN);
    }
}

#[test]
fn bound_error_message() {
    let err = parse_age_range("0 a catorce").unwrap_err();
    insta::assert_snapshot!(err, @"invalid age bound 'catorce' in age group '0 a catorce'");
}

#[test]
fn dataset_labels() {
    let labels = ["0 a 14", "15 a 29", "30 a 44", "45 a 64", "65 a 79", "80 +"];
    let parsed: Vec<String> = labels
        .iter()
        .map(|label| {
            let range = parse_age_range(label).unwrap();
            format!("{label} -> {:?}..{:?}", range.min, range.max)
        })
        .collect();
    insta::assert_snapshot!(parsed.join("\n"), @r"
    0 a 14 -> Some(0)..Some(14)
    15 a 29 -> Some(15)..Some(29)
    30 a 44 -> Some(30)..Some(44)
    45 a 64 -> Some(45)..Some(64)
    65 a 79 -> Some(65)..Some(79)
    80 + -> Some(80)..Some(100)
    ");
}
