//! Code enumerations submitted by the quote form
//!
//! Radio-button inputs arrive as the string form of an integer code. The
//! three enumerations below are fixed at compile time; [`CodeRegistry`]
//! resolves a code when only the enumeration's identity is known, which is
//! how the form rules refer to them.

use core_kernel::{define_code_enum, CodeEnum, CodeError, CodeValue};
use serde::Serialize;
use std::fmt;

define_code_enum! {
    /// Whether the applicant has a spouse
    pub enum MaritalStatus: "MaritalStatus" {
        Married = 1 => "配偶者あり",
        Unmarried = 0 => "配偶者なし",
    }
}

define_code_enum! {
    /// Applicant occupation
    pub enum Occupation: "Occupation" {
        /// Company executive or self-employed
        Manager = 1 => "経営・自営業",
        CompanyEmployee = 2 => "会社員",
        ContractEmployee = 3 => "契約・派遣社員",
        PublicServant = 4 => "公務員",
        PrivateOrganization = 5 => "民間団体",
        Homemaker = 6 => "主婦",
        Student = 7 => "学生",
        Pensioner = 8 => "年金受給者の方",
        PartTime = 9 => "パート・アルバイト",
        OtherEmployed = 10 => "その他 (有職）",
        OtherUnemployed = 11 => "その他 (無職）",
    }
}

define_code_enum! {
    /// Whether the applicant has received medical treatment
    pub enum TreatmentHistory: "TreatmentHistory" {
        Treated = 1 => "はい",
        Untreated = 0 => "いいえ",
    }
}

/// Identity of a code enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EnumId {
    MaritalStatus,
    Occupation,
    TreatmentHistory,
}

impl EnumId {
    /// Returns the enumeration name
    pub fn name(&self) -> &'static str {
        match self {
            EnumId::MaritalStatus => MaritalStatus::ENUMERATION,
            EnumId::Occupation => Occupation::ENUMERATION,
            EnumId::TreatmentHistory => TreatmentHistory::ENUMERATION,
        }
    }
}

impl fmt::Display for EnumId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Lookup of code values by enumeration identity
pub struct CodeRegistry;

impl CodeRegistry {
    /// Finds the `{code, label}` pair for a code
    ///
    /// # Errors
    ///
    /// Returns `CodeError::NotFound` if the enumeration has no such code
    pub fn find(enum_id: EnumId, code: i32) -> Result<CodeValue, CodeError> {
        match enum_id {
            EnumId::MaritalStatus => MaritalStatus::find(code).map(|m| m.value()),
            EnumId::Occupation => Occupation::find(code).map(|m| m.value()),
            EnumId::TreatmentHistory => TreatmentHistory::find(code).map(|m| m.value()),
        }
    }

    /// Returns true if the raw string denotes a member of the enumeration
    ///
    /// Empty and non-integer input never matches.
    pub fn matches(enum_id: EnumId, raw: &str) -> bool {
        match enum_id {
            EnumId::MaritalStatus => MaritalStatus::matches(raw),
            EnumId::Occupation => Occupation::matches(raw),
            EnumId::TreatmentHistory => TreatmentHistory::matches(raw),
        }
    }

    /// Returns the select-list options of the enumeration
    pub fn options(enum_id: EnumId) -> Vec<CodeValue> {
        match enum_id {
            EnumId::MaritalStatus => MaritalStatus::options(),
            EnumId::Occupation => Occupation::options(),
            EnumId::TreatmentHistory => TreatmentHistory::options(),
        }
    }

    /// Returns the label for a raw code string, if it denotes a member
    pub fn label_of(enum_id: EnumId, raw: &str) -> Option<&'static str> {
        let code = core_kernel::codes::parse_code(raw)?;
        Self::find(enum_id, code).ok().map(|value| value.label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_find() {
        let value = CodeRegistry::find(EnumId::Occupation, 10).unwrap();
        assert_eq!(value.label, "その他 (有職）");

        let error = CodeRegistry::find(EnumId::MaritalStatus, 2).unwrap_err();
        assert!(matches!(error, CodeError::NotFound { enumeration: "MaritalStatus", .. }));
    }

    #[test]
    fn test_registry_matches() {
        assert!(CodeRegistry::matches(EnumId::TreatmentHistory, "0"));
        assert!(CodeRegistry::matches(EnumId::Occupation, "011"));
        assert!(!CodeRegistry::matches(EnumId::Occupation, "12"));
        assert!(!CodeRegistry::matches(EnumId::MaritalStatus, ""));
        assert!(!CodeRegistry::matches(EnumId::MaritalStatus, "yes"));
    }

    #[test]
    fn test_occupation_options_in_declaration_order() {
        let options = CodeRegistry::options(EnumId::Occupation);
        assert_eq!(options.len(), 11);
        assert_eq!(options[0].code, 1);
        assert_eq!(options[10].code, 11);
    }

    #[test]
    fn test_has_code() {
        assert!(TreatmentHistory::Treated.has_code("1"));
        assert!(!TreatmentHistory::Treated.has_code("0"));
        assert!(TreatmentHistory::Untreated.has_code("00"));
    }

    #[test]
    fn test_label_of() {
        assert_eq!(CodeRegistry::label_of(EnumId::MaritalStatus, "1"), Some("配偶者あり"));
        assert_eq!(CodeRegistry::label_of(EnumId::MaritalStatus, "x"), None);
    }
}
