//! Insurance orders
//!
//! An order is the validated form with its code fields and income converted
//! to integers. The receipt number stays empty until the store assigns it.

use serde::{Deserialize, Serialize};

use core_kernel::ReceiptNo;

use crate::error::QuoteError;
use crate::form::{Field, QuoteForm};

/// A persisted (or about to be persisted) application
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsuranceOrder {
    pub receipt_no: Option<ReceiptNo>,
    pub insurance_type: i32,
    pub kanji_name: String,
    pub kana_name: String,
    pub date_of_birth: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub marital_status: i32,
    pub occupation: i32,
    pub income: i32,
    pub treatment_history: i32,
    pub medical_history_text: String,
}

impl InsuranceOrder {
    /// Builds an order from a form that passed validation
    ///
    /// # Errors
    ///
    /// Returns `QuoteError::InvalidField` if an integer field does not fit
    /// in 32 bits, which static validation does not bound for every field.
    pub fn from_form(form: &QuoteForm) -> Result<Self, QuoteError> {
        Ok(Self {
            receipt_no: None,
            insurance_type: integer(form, Field::InsuranceType)?,
            kanji_name: form.kanji_name.clone(),
            kana_name: form.kana_name.clone(),
            date_of_birth: form.date_of_birth.clone(),
            address: form.address.clone(),
            phone: form.phone.clone(),
            email: form.email.clone(),
            marital_status: integer(form, Field::MaritalStatus)?,
            occupation: integer(form, Field::Occupation)?,
            income: integer(form, Field::Income)?,
            treatment_history: integer(form, Field::TreatmentHistory)?,
            medical_history_text: form.medical_history_text.clone(),
        })
    }

    /// Returns a copy carrying the assigned receipt number
    pub fn with_receipt(mut self, receipt_no: ReceiptNo) -> Self {
        self.receipt_no = Some(receipt_no);
        self
    }
}

fn integer(form: &QuoteForm, field: Field) -> Result<i32, QuoteError> {
    let value = form.get(field);
    value.parse().map_err(|_| QuoteError::InvalidField {
        field,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> QuoteForm {
        QuoteForm {
            insurance_type: "2".into(),
            kanji_name: "山田花子".into(),
            kana_name: "ヤマダ\u{3000}ハナコ".into(),
            date_of_birth: "1985/12/24".into(),
            address: "大阪府大阪市北区1-1".into(),
            phone: "0612345678".into(),
            email: "hanako@example.com".into(),
            marital_status: "0".into(),
            occupation: "06".into(),
            income: "000300".into(),
            treatment_history: "1".into(),
            medical_history_text: "虫垂炎".into(),
        }
    }

    #[test]
    fn test_from_form_converts_codes() {
        let order = InsuranceOrder::from_form(&form()).unwrap();
        assert_eq!(order.receipt_no, None);
        assert_eq!(order.insurance_type, 2);
        assert_eq!(order.occupation, 6);
        assert_eq!(order.income, 300);
        assert_eq!(order.treatment_history, 1);
        assert_eq!(order.kana_name, "ヤマダ\u{3000}ハナコ");
        assert_eq!(order.medical_history_text, "虫垂炎");
    }

    #[test]
    fn test_from_form_rejects_oversized_insurance_type() {
        let mut form = form();
        form.insurance_type = "99999999999".into();
        let error = InsuranceOrder::from_form(&form).unwrap_err();
        assert!(matches!(
            error,
            QuoteError::InvalidField { field: Field::InsuranceType, .. }
        ));
    }

    #[test]
    fn test_with_receipt() {
        let order = InsuranceOrder::from_form(&form())
            .unwrap()
            .with_receipt(ReceiptNo::new(5));
        assert_eq!(order.receipt_no, Some(ReceiptNo::new(5)));
    }
}
