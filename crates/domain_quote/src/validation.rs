//! Field validation rules
//!
//! Each rule is a pure predicate over a raw string. Format rules (numeric,
//! katakana, e-mail, date, code membership) accept the empty string so that
//! a blank field reports only its not-blank violation.
//!
//! Failures are collected into an [`ErrorSet`], ordered by form field and,
//! within a field, by rule declaration.

use chrono::NaiveDate;
use serde::ser::{Serialize, SerializeMap, Serializer};
use validator::ValidateEmail;

use crate::codes::{CodeRegistry, EnumId, TreatmentHistory};
use crate::form::Field;
use core_kernel::CodeEnum;

/// Date pattern accepted for the date of birth, in chrono syntax
pub const DATE_FORMAT: &str = "%Y/%m/%d";

/// Date pattern as shown to the applicant
pub const DATE_PATTERN_DISPLAY: &str = "yyyy/MM/dd";

/// Returns false when the value is empty after trimming whitespace
pub fn not_blank(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Returns true when the value has at most `max` characters
pub fn max_chars(value: &str, max: usize) -> bool {
    value.chars().count() <= max
}

/// Returns true when the value is empty or ASCII digits only
pub fn numeric_only(value: &str) -> bool {
    value.chars().all(|c| c.is_ascii_digit())
}

/// Returns true when the value is empty or a strict date under `format`
///
/// The parsed date must format back to exactly the input, which rejects
/// unpadded fields ("2024/2/3") as well as impossible dates ("2024/02/30").
pub fn date_format(value: &str, format: &str) -> bool {
    if value.is_empty() {
        return true;
    }
    match NaiveDate::parse_from_str(value, format) {
        Ok(date) => date.format(format).to_string() == value,
        Err(_) => false,
    }
}

/// Parses a date that passed [`date_format`]
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

/// Returns true when the value is empty or full-width katakana
///
/// Allowed characters are ァ through ヶ, the long vowel mark ー and the
/// ideographic space.
pub fn katakana(value: &str) -> bool {
    value
        .chars()
        .all(|c| matches!(c, '\u{30A1}'..='\u{30F6}' | 'ー' | '\u{3000}'))
}

/// Returns true when the value is empty or a syntactically valid address
pub fn email(value: &str) -> bool {
    value.is_empty() || value.validate_email()
}

/// Returns true when the value is empty or a member code of the enumeration
pub fn code_membership(value: &str, enum_id: EnumId) -> bool {
    value.is_empty() || CodeRegistry::matches(enum_id, value)
}

/// Checks that the medical history matches the treatment answer
///
/// A treated applicant must describe their history; an untreated applicant
/// must leave it blank. Any other treatment value imposes nothing.
pub fn conditional_required(treatment: &str, history: &str) -> Option<Violation> {
    if TreatmentHistory::Treated.has_code(treatment) && !not_blank(history) {
        return Some(Violation::MedicalHistoryRequired);
    }
    if TreatmentHistory::Untreated.has_code(treatment) && not_blank(history) {
        return Some(Violation::MedicalHistoryNotRequired);
    }
    None
}

/// A declared rule on a single field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    NotBlank,
    MaxChars(usize),
    Numeric,
    Katakana,
    Email,
    DateFormat,
    Code(EnumId),
}

impl Rule {
    /// Applies the rule, returning the violation on failure
    pub fn check(&self, value: &str) -> Option<Violation> {
        let passed = match *self {
            Rule::NotBlank => not_blank(value),
            Rule::MaxChars(max) => max_chars(value, max),
            Rule::Numeric => numeric_only(value),
            Rule::Katakana => katakana(value),
            Rule::Email => email(value),
            Rule::DateFormat => date_format(value, DATE_FORMAT),
            Rule::Code(enum_id) => code_membership(value, enum_id),
        };
        if passed {
            None
        } else {
            Some(self.violation())
        }
    }

    fn violation(&self) -> Violation {
        match *self {
            Rule::NotBlank => Violation::NotBlank,
            Rule::MaxChars(max) => Violation::MaxLength { max },
            Rule::Numeric => Violation::Numeric,
            Rule::Katakana => Violation::Katakana,
            Rule::Email => Violation::Email,
            Rule::DateFormat => Violation::DateFormat {
                pattern: DATE_PATTERN_DISPLAY,
            },
            Rule::Code(enum_id) => Violation::CodeValue { enum_id },
        }
    }
}

/// Why a field failed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    NotBlank,
    MaxLength { max: usize },
    Numeric,
    Katakana,
    Email,
    DateFormat { pattern: &'static str },
    CodeValue { enum_id: EnumId },
    MedicalHistoryRequired,
    MedicalHistoryNotRequired,
    AgeOutOfRange { min: i32, max: i32 },
}

impl Violation {
    /// Message identifier in the Fluent resources
    pub fn message_id(&self) -> &'static str {
        match self {
            Violation::NotBlank => "not-blank",
            Violation::MaxLength { .. } => "max-length",
            Violation::Numeric => "numeric",
            Violation::Katakana => "katakana",
            Violation::Email => "email",
            Violation::DateFormat { .. } => "date-format",
            Violation::CodeValue { .. } => "code-value",
            Violation::MedicalHistoryRequired => "medical-history-required",
            Violation::MedicalHistoryNotRequired => "medical-history-not-required",
            Violation::AgeOutOfRange { .. } => "age-out-of-range",
        }
    }

    /// Named arguments substituted into the message
    pub fn args(&self) -> Vec<(&'static str, String)> {
        match self {
            Violation::MaxLength { max } => vec![("max", max.to_string())],
            Violation::DateFormat { pattern } => vec![("pattern", pattern.to_string())],
            Violation::CodeValue { enum_id } => vec![("enumeration", enum_id.to_string())],
            Violation::AgeOutOfRange { min, max } => {
                vec![("min", min.to_string()), ("max", max.to_string())]
            }
            _ => Vec::new(),
        }
    }
}

/// A single validation failure with its rendered message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub violation: Violation,
    pub message: String,
}

/// Ordered collection of validation failures
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorSet {
    errors: Vec<FieldError>,
}

impl ErrorSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a failure
    pub fn push(&mut self, error: FieldError) {
        self.errors.push(error);
    }

    /// Returns true if nothing failed
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Iterates failures in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    /// Returns the failures attached to one field
    pub fn for_field(&self, field: Field) -> Vec<&FieldError> {
        self.errors.iter().filter(|e| e.field == field).collect()
    }

    /// Returns true if the field has at least one failure
    pub fn has_field(&self, field: Field) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    /// Returns the violations attached to one field
    pub fn violations(&self, field: Field) -> Vec<Violation> {
        self.errors
            .iter()
            .filter(|e| e.field == field)
            .map(|e| e.violation)
            .collect()
    }
}

impl<'a> IntoIterator for &'a ErrorSet {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

/// Serialized as `{fieldName: [message, ...]}` in form field order
impl Serialize for ErrorSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let fields: Vec<Field> = Field::ALL
            .iter()
            .copied()
            .filter(|field| self.has_field(*field))
            .collect();
        let mut map = serializer.serialize_map(Some(fields.len()))?;
        for field in fields {
            let messages: Vec<&str> = self
                .for_field(field)
                .into_iter()
                .map(|e| e.message.as_str())
                .collect();
            map.serialize_entry(field.name(), &messages)?;
        }
        map.end()
    }
}
