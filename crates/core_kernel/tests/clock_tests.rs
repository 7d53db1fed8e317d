//! Property tests for calendar arithmetic and code enumerations

use chrono::{Datelike, Duration, NaiveDate};
use core_kernel::{define_code_enum, whole_years_between, CodeEnum, CodeError};
use proptest::prelude::*;

define_code_enum! {
    /// Small enumeration used by the property tests
    enum Size: "Size" {
        Small = 1 => "S",
        Medium = 2 => "M",
        Large = 3 => "L",
    }
}

fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (1900i32..2100, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

// ============================================================================
// whole_years_between
// ============================================================================

mod whole_years_tests {
    use super::*;

    proptest! {
        /// Verifies that the anniversary itself always yields the exact year delta
        #[test]
        fn anniversary_yields_exact_years(birth in arb_date(), years in 0i32..120) {
            let anniversary = birth.with_year(birth.year() + years).unwrap();
            prop_assert_eq!(whole_years_between(birth, anniversary), years);
        }

        /// Verifies that the day before an anniversary is one year short
        #[test]
        fn day_before_anniversary_is_one_short(birth in arb_date(), years in 1i32..120) {
            let anniversary = birth.with_year(birth.year() + years).unwrap();
            let eve = anniversary - Duration::days(1);
            prop_assert_eq!(whole_years_between(birth, eve), years - 1);
        }

        /// Verifies that age never decreases as time moves forward
        #[test]
        fn age_is_monotonic(birth in arb_date(), a in 0i64..40_000, b in 0i64..40_000) {
            let (early, late) = if a <= b { (a, b) } else { (b, a) };
            let first = whole_years_between(birth, birth + Duration::days(early));
            let second = whole_years_between(birth, birth + Duration::days(late));
            prop_assert!(first <= second);
        }
    }
}

// ============================================================================
// CodeEnum
// ============================================================================

mod code_enum_tests {
    use super::*;

    #[test]
    fn test_find_str_reports_expression() {
        let error = Size::find_str("x").unwrap_err();
        assert!(matches!(error, CodeError::NotFound { enumeration: "Size", ref code } if code == "x"));
    }

    #[test]
    fn test_value_pairs_code_and_label() {
        let value = Size::Medium.value();
        assert_eq!(value.code, 2);
        assert_eq!(value.label, "M");
    }

    proptest! {
        /// Verifies that matches agrees with the declared code set for any integer
        #[test]
        fn matches_agrees_with_members(code in -10i32..10) {
            let expected = (1..=3).contains(&code);
            prop_assert_eq!(Size::matches(&code.to_string()), expected);
            prop_assert_eq!(Size::find(code).is_ok(), expected);
        }

        /// Verifies that arbitrary non-numeric text never matches
        #[test]
        fn non_numeric_never_matches(text in "[a-zA-Z ]{0,6}") {
            prop_assert!(!Size::matches(&text));
        }
    }
}
