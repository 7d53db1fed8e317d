//! Property-Based Test Generators
//!
//! Proptest strategies for submissions that pass static validation, and
//! `fake`-backed contact data for tests that only need plausible values.

use chrono::{Duration, NaiveDate};
use fake::faker::internet::en::SafeEmail;
use fake::Fake;
use proptest::prelude::*;
use rust_decimal::Decimal;

use domain_quote::{Field, RawFields};

use crate::builders::RawFieldsBuilder;

/// Strategy for full-width katakana names, optionally split by an
/// ideographic space
pub fn katakana_name_strategy() -> impl Strategy<Value = String> {
    let syllable = prop::char::range('\u{30A1}', '\u{30F6}');
    (
        prop::collection::vec(syllable.clone(), 1..10),
        prop::collection::vec(syllable, 0..10),
    )
        .prop_map(|(family, given)| {
            let family: String = family.into_iter().collect();
            if given.is_empty() {
                family
            } else {
                format!("{}\u{3000}{}", family, given.into_iter().collect::<String>())
            }
        })
}

/// Strategy for digit-only phone numbers of 10 to 13 digits
pub fn phone_strategy() -> impl Strategy<Value = String> {
    "[0-9]{10,13}"
}

/// Strategy for income in ten-thousand-yen units, up to nine digits
pub fn income_strategy() -> impl Strategy<Value = String> {
    (0u32..1_000_000_000u32).prop_map(|n| n.to_string())
}

/// Strategy for birth dates of applicants aged 20 to 100 on the pinned day
pub fn eligible_birth_date_strategy() -> impl Strategy<Value = NaiveDate> {
    let oldest = NaiveDate::from_ymd_opt(1923, 4, 2).unwrap();
    let youngest = NaiveDate::from_ymd_opt(2004, 4, 1).unwrap();
    let span = (youngest - oldest).num_days();
    (0..=span).prop_map(move |offset| oldest + Duration::days(offset))
}

/// Strategy for adjustment rates between 0.5 and 3.0 with up to five decimals
pub fn adjustment_rate_strategy() -> impl Strategy<Value = Decimal> {
    (50_000i64..=300_000i64).prop_map(|n| Decimal::new(n, 5))
}

/// Strategy for one of the sample catalog codes
pub fn insurance_type_strategy() -> impl Strategy<Value = i32> {
    prop_oneof![Just(1), Just(2), Just(3)]
}

/// Strategy for complete submissions that pass every validation
pub fn valid_raw_fields_strategy() -> impl Strategy<Value = RawFields> {
    (
        insurance_type_strategy(),
        katakana_name_strategy(),
        eligible_birth_date_strategy(),
        phone_strategy(),
        income_strategy(),
        1i32..=11,
        prop::bool::ANY,
    )
        .prop_map(
            |(insurance_type, kana, birth, phone, income, occupation, married)| {
                RawFieldsBuilder::new()
                    .with_insurance_type(insurance_type.to_string())
                    .with(Field::KanaName, kana)
                    .with_date_of_birth(birth.format("%Y/%m/%d").to_string())
                    .with(Field::Phone, phone)
                    .with(Field::Income, income)
                    .with(Field::Occupation, occupation.to_string())
                    .with(Field::MaritalStatus, if married { "1" } else { "0" })
                    .build()
            },
        )
}

/// A plausible email address
pub fn fake_email() -> String {
    SafeEmail().fake()
}

/// Standard submission with a generated email address
pub fn raw_fields_with_fake_email() -> RawFields {
    RawFieldsBuilder::new().with(Field::Email, fake_email()).build()
}
