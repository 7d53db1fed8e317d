//! Quote form snapshot
//!
//! A [`QuoteForm`] holds the raw strings the applicant submitted, verbatim.
//! Construction never fails; validation runs separately and produces an
//! [`ErrorSet`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use core_kernel::{whole_years_between, CodeEnum};

use crate::codes::{EnumId, MaritalStatus, Occupation, TreatmentHistory};
use crate::messages::{MessageCatalog, MessageRenderer};
use crate::validation::{conditional_required, parse_date, ErrorSet, FieldError, Rule, Violation};

/// Raw submitted fields keyed by camelCase field name
pub type RawFields = HashMap<String, String>;

/// Fields of the quote form, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    InsuranceType,
    KanjiName,
    KanaName,
    DateOfBirth,
    Address,
    Phone,
    Email,
    MaritalStatus,
    Occupation,
    Income,
    TreatmentHistory,
    MedicalHistoryText,
}

impl Field {
    /// All fields in form order
    pub const ALL: [Field; 12] = [
        Field::InsuranceType,
        Field::KanjiName,
        Field::KanaName,
        Field::DateOfBirth,
        Field::Address,
        Field::Phone,
        Field::Email,
        Field::MaritalStatus,
        Field::Occupation,
        Field::Income,
        Field::TreatmentHistory,
        Field::MedicalHistoryText,
    ];

    /// Submitted field name
    pub fn name(&self) -> &'static str {
        match self {
            Field::InsuranceType => "insuranceType",
            Field::KanjiName => "kanjiName",
            Field::KanaName => "kanaName",
            Field::DateOfBirth => "dateOfBirth",
            Field::Address => "address",
            Field::Phone => "phone",
            Field::Email => "email",
            Field::MaritalStatus => "maritalStatus",
            Field::Occupation => "occupation",
            Field::Income => "income",
            Field::TreatmentHistory => "treatmentHistory",
            Field::MedicalHistoryText => "medicalHistoryText",
        }
    }

    /// Declared rules, in the order they are reported
    pub fn rules(&self) -> &'static [Rule] {
        match self {
            Field::InsuranceType => &[Rule::NotBlank, Rule::Numeric],
            Field::KanjiName => &[Rule::NotBlank, Rule::MaxChars(60)],
            Field::KanaName => &[Rule::NotBlank, Rule::Katakana, Rule::MaxChars(90)],
            Field::DateOfBirth => &[Rule::NotBlank, Rule::DateFormat],
            Field::Address => &[Rule::NotBlank, Rule::MaxChars(255)],
            Field::Phone => &[Rule::NotBlank, Rule::Numeric, Rule::MaxChars(13)],
            Field::Email => &[Rule::NotBlank, Rule::Email, Rule::MaxChars(255)],
            Field::MaritalStatus => &[Rule::NotBlank, Rule::Code(EnumId::MaritalStatus)],
            Field::Occupation => &[Rule::NotBlank, Rule::Code(EnumId::Occupation)],
            Field::Income => &[Rule::NotBlank, Rule::Numeric, Rule::MaxChars(9)],
            Field::TreatmentHistory => &[Rule::NotBlank, Rule::Code(EnumId::TreatmentHistory)],
            Field::MedicalHistoryText => &[Rule::MaxChars(120)],
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Snapshot of the submitted quote data
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuoteForm {
    pub insurance_type: String,
    pub kanji_name: String,
    pub kana_name: String,
    pub date_of_birth: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub marital_status: String,
    pub occupation: String,
    pub income: String,
    pub treatment_history: String,
    pub medical_history_text: String,
}

impl QuoteForm {
    /// An empty form with the initial radio selections
    pub fn with_defaults() -> Self {
        Self {
            marital_status: MaritalStatus::Married.code().to_string(),
            occupation: Occupation::Manager.code().to_string(),
            treatment_history: TreatmentHistory::Treated.code().to_string(),
            ..Self::default()
        }
    }

    /// Copies the raw fields without validating them
    ///
    /// Missing keys become empty strings; unknown keys are ignored.
    pub fn capture(raw: &RawFields) -> Self {
        let take = |field: Field| raw.get(field.name()).cloned().unwrap_or_default();
        Self {
            insurance_type: take(Field::InsuranceType),
            kanji_name: take(Field::KanjiName),
            kana_name: take(Field::KanaName),
            date_of_birth: take(Field::DateOfBirth),
            address: take(Field::Address),
            phone: take(Field::Phone),
            email: take(Field::Email),
            marital_status: take(Field::MaritalStatus),
            occupation: take(Field::Occupation),
            income: take(Field::Income),
            treatment_history: take(Field::TreatmentHistory),
            medical_history_text: take(Field::MedicalHistoryText),
        }
    }

    /// Captures and statically validates the raw fields
    pub fn parse(raw: &RawFields, messages: &MessageCatalog) -> (Self, ErrorSet) {
        let form = Self::capture(raw);
        let errors = form.validate(&messages.renderer());
        (form, errors)
    }

    /// Returns the raw value of a field
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::InsuranceType => &self.insurance_type,
            Field::KanjiName => &self.kanji_name,
            Field::KanaName => &self.kana_name,
            Field::DateOfBirth => &self.date_of_birth,
            Field::Address => &self.address,
            Field::Phone => &self.phone,
            Field::Email => &self.email,
            Field::MaritalStatus => &self.marital_status,
            Field::Occupation => &self.occupation,
            Field::Income => &self.income,
            Field::TreatmentHistory => &self.treatment_history,
            Field::MedicalHistoryText => &self.medical_history_text,
        }
    }

    /// Runs every field rule and the medical history rule
    pub fn validate(&self, messages: &MessageRenderer) -> ErrorSet {
        let mut errors = ErrorSet::new();
        for field in Field::ALL {
            let value = self.get(field);
            for rule in field.rules() {
                if let Some(violation) = rule.check(value) {
                    errors.push(error(field, violation, messages));
                }
            }
        }
        if let Some(violation) =
            conditional_required(&self.treatment_history, &self.medical_history_text)
        {
            errors.push(error(Field::MedicalHistoryText, violation, messages));
        }
        errors
    }

    /// Parsed date of birth, if it is a strict `yyyy/MM/dd` date
    pub fn birth_date(&self) -> Option<NaiveDate> {
        if Rule::DateFormat.check(&self.date_of_birth).is_some() {
            return None;
        }
        parse_date(&self.date_of_birth)
    }

    /// Checks the applicant's age on `today` against an inclusive range
    ///
    /// Returns `None` when the date of birth is not a valid date; that case
    /// is already reported by static validation.
    pub fn check_age(
        &self,
        today: NaiveDate,
        min: i32,
        max: i32,
        messages: &MessageRenderer,
    ) -> Option<FieldError> {
        let birth = self.birth_date()?;
        let age = whole_years_between(birth, today);
        if (min..=max).contains(&age) {
            None
        } else {
            Some(error(
                Field::DateOfBirth,
                Violation::AgeOutOfRange { min, max },
                messages,
            ))
        }
    }
}

fn error(field: Field, violation: Violation, messages: &MessageRenderer) -> FieldError {
    FieldError {
        field,
        violation,
        message: messages.render(&violation),
    }
}
