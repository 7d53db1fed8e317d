//! Receipt mail for completed orders

use std::sync::Arc;
use tracing::{info, warn};

use core_kernel::{PortError, ReceiptNo};

use crate::order::InsuranceOrder;
use crate::ports::OrderNotifier;

/// Default sender address of receipt mail
pub const DEFAULT_FROM_ADDRESS: &str = "mitsumori@example.com";

const SUBJECT: &str = "お見積もり依頼を受け付けました";

/// Composes and sends the receipt mail for an order
#[derive(Clone)]
pub struct OrderMailer {
    notifier: Arc<dyn OrderNotifier>,
}

impl OrderMailer {
    pub fn new(notifier: Arc<dyn OrderNotifier>) -> Self {
        Self { notifier }
    }

    /// Sends the receipt mail to the applicant
    pub async fn send_receipt(
        &self,
        receipt_no: ReceiptNo,
        order: &InsuranceOrder,
        insurance_name: &str,
    ) -> Result<(), PortError> {
        let body = receipt_body(receipt_no, order, insurance_name);
        match self.notifier.send(&order.email, SUBJECT, &body).await {
            Ok(()) => {
                info!(%receipt_no, "Receipt mail sent");
                Ok(())
            }
            Err(e) => {
                warn!(%receipt_no, error = %e, "Receipt mail failed");
                Err(e)
            }
        }
    }
}

/// Body of the receipt mail
pub fn receipt_body(receipt_no: ReceiptNo, order: &InsuranceOrder, insurance_name: &str) -> String {
    format!(
        "{name} 様\n\n\
         お見積もり依頼を受け付けました。\n\n\
         受付番号: {receipt_no}\n\
         保険種別: {insurance_name}\n\n\
         担当者より改めてご連絡いたします。\n",
        name = order.kanji_name,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_receipt_body_mentions_receipt_and_insurance() {
        let order = InsuranceOrder {
            receipt_no: None,
            insurance_type: 1,
            kanji_name: "山田太郎".into(),
            kana_name: "ヤマダ\u{3000}タロウ".into(),
            date_of_birth: "1990/04/01".into(),
            address: "東京都".into(),
            phone: "0312345678".into(),
            email: "taro@example.com".into(),
            marital_status: 1,
            occupation: 2,
            income: 500,
            treatment_history: 0,
            medical_history_text: String::new(),
        };
        let body = receipt_body(ReceiptNo::new(12), &order, "医療保険");
        assert!(body.starts_with("山田太郎 様"));
        assert!(body.contains("受付番号: 12"));
        assert!(body.contains("保険種別: 医療保険"));
    }
}
