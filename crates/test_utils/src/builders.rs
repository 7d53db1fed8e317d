//! Test Data Builders
//!
//! Raw submissions start from the standard applicant so a test only names
//! the fields it cares about.

use serde_json::{Map, Value};

use domain_quote::{Field, RawFields};

use crate::fixtures::ApplicantFixtures as A;

/// Builder for raw form submissions
#[derive(Debug, Clone)]
pub struct RawFieldsBuilder {
    fields: RawFields,
}

impl Default for RawFieldsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RawFieldsBuilder {
    /// Starts from the standard applicant, which passes every validation
    pub fn new() -> Self {
        let fields = [
            (Field::InsuranceType, A::INSURANCE_TYPE),
            (Field::KanjiName, A::KANJI_NAME),
            (Field::KanaName, A::KANA_NAME),
            (Field::DateOfBirth, A::DATE_OF_BIRTH),
            (Field::Address, A::ADDRESS),
            (Field::Phone, A::PHONE),
            (Field::Email, A::EMAIL),
            (Field::MaritalStatus, A::MARITAL_STATUS),
            (Field::Occupation, A::OCCUPATION),
            (Field::Income, A::INCOME),
            (Field::TreatmentHistory, A::TREATMENT_HISTORY),
            (Field::MedicalHistoryText, ""),
        ]
        .into_iter()
        .map(|(field, value)| (field.name().to_string(), value.to_string()))
        .collect();
        Self { fields }
    }

    /// Starts from a submission with no fields at all
    pub fn empty() -> Self {
        Self {
            fields: RawFields::new(),
        }
    }

    /// Sets a field
    pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
        self.fields.insert(field.name().to_string(), value.into());
        self
    }

    /// Removes a field from the submission
    pub fn without(mut self, field: Field) -> Self {
        self.fields.remove(field.name());
        self
    }

    /// Sets the insurance type code
    pub fn with_insurance_type(self, code: impl Into<String>) -> Self {
        self.with(Field::InsuranceType, code)
    }

    /// Sets the birth date
    pub fn with_date_of_birth(self, date: impl Into<String>) -> Self {
        self.with(Field::DateOfBirth, date)
    }

    /// Sets the treatment history code and medical history text together
    pub fn with_medical_history(self, treated: bool, text: impl Into<String>) -> Self {
        self.with(Field::TreatmentHistory, if treated { "1" } else { "0" })
            .with(Field::MedicalHistoryText, text)
    }

    /// Builds the raw field map
    pub fn build(self) -> RawFields {
        self.fields
    }

    /// Builds a JSON object body for HTTP tests
    pub fn build_json(self) -> Value {
        let map: Map<String, Value> = self
            .fields
            .into_iter()
            .map(|(name, value)| (name, Value::String(value)))
            .collect();
        Value::Object(map)
    }
}
