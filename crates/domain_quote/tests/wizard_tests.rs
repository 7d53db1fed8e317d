//! Wizard Controller Tests
//!
//! Drives every transition of the quote wizard over the in-memory adapters
//! with the clock pinned to 2024-04-01.
//!
//! # Test Organization
//!
//! - `start_tests` - Entry step and input redisplay
//! - `confirm_tests` - Input → Confirm and Order → Confirm
//! - `estimate_tests` - Confirm → Estimate including the age boundary
//! - `order_tests` - Order → Complete and persistence failures
//! - `call_order_tests` - Outcomes depend on the submitted fields alone

use async_trait::async_trait;
use chrono::NaiveDate;
use core_kernel::{
    DomainPort, FixedClock, HealthCheckResult, HealthCheckable, PortError, ReceiptNo,
};
use domain_quote::memory::{InMemoryCatalog, InMemoryOrderStore, InMemoryRateTable};
use domain_quote::{
    AgeRange, Field, InsuranceOrder, OrderStore, QuoteError, RawFields, StepView, Violation,
    WizardController, WizardStep,
};
use rust_decimal_macros::dec;
use std::sync::Arc;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 4, 1).unwrap()
}

fn valid_raw() -> RawFields {
    [
        ("insuranceType", "1"),
        ("kanjiName", "山田太郎"),
        ("kanaName", "ヤマダ\u{3000}タロウ"),
        ("dateOfBirth", "1990/04/01"),
        ("address", "東京都江東区豊洲2-2-1"),
        ("phone", "0312345678"),
        ("email", "taro@example.com"),
        ("maritalStatus", "1"),
        ("occupation", "2"),
        ("income", "500"),
        ("treatmentHistory", "0"),
        ("medicalHistoryText", ""),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

fn with(field: &str, value: &str) -> RawFields {
    let mut raw = valid_raw();
    raw.insert(field.to_string(), value.to_string());
    raw
}

struct Harness {
    controller: WizardController,
    orders: Arc<InMemoryOrderStore>,
}

fn harness() -> Harness {
    let orders = Arc::new(InMemoryOrderStore::new());
    let controller = WizardController::new(
        Arc::new(InMemoryCatalog::sample()),
        Arc::new(InMemoryRateTable::sample()),
        orders.clone(),
        Arc::new(FixedClock(today())),
    );
    Harness { controller, orders }
}

/// Order store that always fails
struct BrokenOrderStore;

impl DomainPort for BrokenOrderStore {}

#[async_trait]
impl HealthCheckable for BrokenOrderStore {
    async fn health_check(&self) -> HealthCheckResult {
        HealthCheckResult::unhealthy("broken", "disk full")
    }
}

#[async_trait]
impl OrderStore for BrokenOrderStore {
    async fn insert(&self, _: &InsuranceOrder) -> Result<ReceiptNo, PortError> {
        Err(PortError::internal("disk full"))
    }
}

// ============================================================================
// START TESTS
// ============================================================================

mod start_tests {
    use super::*;

    /// Verifies the entry step offers defaults, catalog and option lists
    #[tokio::test]
    async fn test_start() {
        let view = harness().controller.start().await.unwrap();
        assert_eq!(view.step(), WizardStep::Input);

        let StepView::Input {
            form,
            insurance_types,
            marital_statuses,
            occupations,
            treatment_histories,
        } = view
        else {
            panic!("expected input view");
        };
        assert_eq!(form.marital_status, "1");
        assert_eq!(form.occupation, "1");
        assert_eq!(form.treatment_history, "1");
        assert_eq!(insurance_types.len(), 3);
        assert_eq!(marital_statuses.len(), 2);
        assert_eq!(occupations.len(), 11);
        assert_eq!(treatment_histories.len(), 2);
    }

    /// Verifies going back to input echoes data without validating it
    #[tokio::test]
    async fn test_back_to_input_skips_validation() {
        let raw = with("email", "bad");
        let view = harness().controller.back_to_input(&raw).await.unwrap();
        assert_eq!(view.step(), WizardStep::Input);
        assert_eq!(view.form().unwrap().email, "bad");
    }
}

// ============================================================================
// CONFIRM TESTS
// ============================================================================

mod confirm_tests {
    use super::*;

    /// Verifies submit resolves the insurance name without validating
    #[tokio::test]
    async fn test_submit_resolves_name() {
        let view = harness()
            .controller
            .submit(&with("kanjiName", ""))
            .await
            .unwrap();
        match view {
            StepView::Confirm {
                insurance_name,
                errors,
                labels,
                ..
            } => {
                assert_eq!(insurance_name.as_deref(), Some("医療保険"));
                assert!(errors.is_empty());
                assert_eq!(labels.occupation_label, Some("会社員"));
            }
            other => panic!("expected confirm view, got {:?}", other),
        }
    }

    /// Verifies submit fails hard on an unknown insurance type
    #[tokio::test]
    async fn test_submit_unknown_type() {
        let error = harness()
            .controller
            .submit(&with("insuranceType", "99"))
            .await
            .unwrap_err();
        assert!(matches!(error, QuoteError::UnknownInsuranceType(ref t) if t == "99"));

        let error = harness()
            .controller
            .submit(&with("insuranceType", ""))
            .await
            .unwrap_err();
        assert!(error.is_lookup_failure());
    }

    /// Verifies Confirm → Input → Confirm with unchanged input is stable
    #[tokio::test]
    async fn test_round_trip_through_input() {
        let h = harness();
        let raw = with("phone", "03-1234");
        let first = h.controller.estimate(&raw).await.unwrap();
        let input = h.controller.back_to_input(&raw).await.unwrap();
        assert_eq!(input.form(), first.form());
        let second = h.controller.estimate(&raw).await.unwrap();
        assert_eq!(first, second);
    }

    /// Verifies back to confirm re-resolves the name with no errors
    #[tokio::test]
    async fn test_back_to_confirm() {
        let view = harness()
            .controller
            .back_to_confirm(&with("insuranceType", "3"))
            .await
            .unwrap();
        assert_eq!(view.step(), WizardStep::Confirm);
        assert!(view.errors().unwrap().is_empty());
        assert!(matches!(view, StepView::Confirm { insurance_name: Some(ref n), .. } if n == "終身保険"));
    }
}

// ============================================================================
// ESTIMATE TESTS
// ============================================================================

mod estimate_tests {
    use super::*;

    /// Verifies a valid form produces a quote
    #[tokio::test]
    async fn test_estimate() {
        let view = harness().controller.estimate(&valid_raw()).await.unwrap();
        match view {
            StepView::Estimate {
                insurance_name,
                quote,
                ..
            } => {
                assert_eq!(insurance_name, "医療保険");
                assert_eq!(quote.age, 34);
                assert_eq!(quote.age_adjustment_rate, dec!(0.95));
                assert_eq!(quote.annual_fee, 34200);
            }
            other => panic!("expected estimate view, got {:?}", other),
        }
    }

    /// Verifies the twentieth birthday is eligible
    #[tokio::test]
    async fn test_age_twenty_passes() {
        let view = harness()
            .controller
            .estimate(&with("dateOfBirth", "2004/04/01"))
            .await
            .unwrap();
        assert_eq!(view.step(), WizardStep::Estimate);
    }

    /// Verifies one day short of twenty returns to confirm with a date of birth error
    #[tokio::test]
    async fn test_age_nineteen_fails() {
        let view = harness()
            .controller
            .estimate(&with("dateOfBirth", "2004/04/02"))
            .await
            .unwrap();
        assert_eq!(view.step(), WizardStep::Confirm);

        let errors = view.errors().unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.violations(Field::DateOfBirth),
            vec![Violation::AgeOutOfRange { min: 20, max: 100 }]
        );
        assert_eq!(
            errors.iter().next().unwrap().message,
            "年齢は20歳以上100歳以下である必要があります"
        );
    }

    /// Verifies the age error follows static errors and does not replace them
    #[tokio::test]
    async fn test_age_error_appended_after_static_errors() {
        let mut raw = with("dateOfBirth", "1900/01/01");
        raw.insert("kanjiName".into(), "".into());
        raw.insert("income".into(), "abc".into());

        let view = harness().controller.estimate(&raw).await.unwrap();
        let fields: Vec<Field> = view.errors().unwrap().iter().map(|e| e.field).collect();
        assert_eq!(fields, vec![Field::KanjiName, Field::Income, Field::DateOfBirth]);
    }

    /// Verifies an invalid insurance type is reported leniently on confirm
    #[tokio::test]
    async fn test_invalid_type_redisplays_without_name() {
        let view = harness()
            .controller
            .estimate(&with("insuranceType", "X"))
            .await
            .unwrap();
        assert!(matches!(view, StepView::Confirm { insurance_name: None, .. }));
        assert!(view.errors().unwrap().has_field(Field::InsuranceType));
    }

    /// Verifies a narrower configured age range is enforced
    #[tokio::test]
    async fn test_custom_age_range() {
        let controller = harness()
            .controller
            .with_age_range(AgeRange { min: 20, max: 30 });
        let view = controller.estimate(&valid_raw()).await.unwrap();
        assert_eq!(
            view.errors().unwrap().violations(Field::DateOfBirth),
            vec![Violation::AgeOutOfRange { min: 20, max: 30 }]
        );
    }

    /// Verifies an unknown but numeric insurance type aborts the estimate
    #[tokio::test]
    async fn test_unknown_type_aborts() {
        let error = harness()
            .controller
            .estimate(&with("insuranceType", "42"))
            .await
            .unwrap_err();
        assert!(matches!(error, QuoteError::UnknownInsuranceType(_)));
    }
}

// ============================================================================
// ORDER TESTS
// ============================================================================

mod order_tests {
    use super::*;

    /// Verifies a valid order is stored once with every field copied
    #[tokio::test]
    async fn test_order_round_trip() {
        let h = harness();
        let mut raw = valid_raw();
        raw.insert("treatmentHistory".into(), "1".into());
        raw.insert("medicalHistoryText".into(), "胃潰瘍".into());
        raw.insert("occupation".into(), "10".into());

        let view = h.controller.order(&raw).await.unwrap();
        let StepView::Complete {
            receipt_no,
            insurance_name,
            order,
        } = view
        else {
            panic!("expected complete view");
        };

        assert_eq!(receipt_no, ReceiptNo::new(1));
        assert_eq!(insurance_name.as_deref(), Some("医療保険"));
        assert_eq!(order.receipt_no, Some(receipt_no));

        let stored = h.orders.orders().await;
        assert_eq!(stored.len(), 1);
        let stored = &stored[0];
        assert_eq!(stored, &order);
        assert_eq!(stored.insurance_type, 1);
        assert_eq!(stored.kanji_name, "山田太郎");
        assert_eq!(stored.kana_name, "ヤマダ\u{3000}タロウ");
        assert_eq!(stored.date_of_birth, "1990/04/01");
        assert_eq!(stored.address, "東京都江東区豊洲2-2-1");
        assert_eq!(stored.phone, "0312345678");
        assert_eq!(stored.email, "taro@example.com");
        assert_eq!(stored.marital_status, 1);
        assert_eq!(stored.occupation, 10);
        assert_eq!(stored.income, 500);
        assert_eq!(stored.treatment_history, 1);
        assert_eq!(stored.medical_history_text, "胃潰瘍");
    }

    /// Verifies an invalid order returns to confirm and stores nothing
    #[tokio::test]
    async fn test_invalid_order_stores_nothing() {
        let h = harness();
        let view = h
            .controller
            .order(&with("medicalHistoryText", "胃潰瘍"))
            .await
            .unwrap();
        assert_eq!(view.step(), WizardStep::Confirm);
        assert_eq!(
            view.errors().unwrap().violations(Field::MedicalHistoryText),
            vec![Violation::MedicalHistoryNotRequired]
        );
        assert!(h.orders.is_empty().await);
    }

    /// Verifies the age is re-checked at the order step
    #[tokio::test]
    async fn test_order_rechecks_age() {
        let h = harness();
        let view = h
            .controller
            .order(&with("dateOfBirth", "1923/04/01"))
            .await
            .unwrap();
        assert!(view.errors().unwrap().has_field(Field::DateOfBirth));
        assert!(h.orders.is_empty().await);
    }

    /// Verifies persistence failures propagate unchanged
    #[tokio::test]
    async fn test_persistence_failure() {
        let controller = WizardController::new(
            Arc::new(InMemoryCatalog::sample()),
            Arc::new(InMemoryRateTable::sample()),
            Arc::new(BrokenOrderStore),
            Arc::new(FixedClock(today())),
        );
        let error = controller.order(&valid_raw()).await.unwrap_err();
        match error {
            QuoteError::Persistence(PortError::Internal { message, .. }) => {
                assert_eq!(message, "disk full")
            }
            other => panic!("expected persistence error, got {:?}", other),
        }
    }

    /// Verifies consecutive orders receive distinct receipt numbers
    #[tokio::test]
    async fn test_sequential_receipts() {
        let h = harness();
        h.controller.order(&valid_raw()).await.unwrap();
        let view = h.controller.order(&valid_raw()).await.unwrap();
        assert!(matches!(view, StepView::Complete { receipt_no, .. } if receipt_no == ReceiptNo::new(2)));
        assert_eq!(h.orders.len().await, 2);
    }
}

// ============================================================================
// CALL ORDER TESTS
// ============================================================================

mod call_order_tests {
    use super::*;

    /// Verifies each transition's outcome depends only on its input, whatever ran before
    #[tokio::test]
    async fn test_outcome_independent_of_previous_calls() {
        let inputs = [
            RawFields::new(),
            valid_raw(),
            with("dateOfBirth", "2004/04/02"),
            with("phone", "03-1234-5678"),
        ];

        for raw in &inputs {
            let fresh = harness();
            let expected_estimate = fresh.controller.estimate(raw).await.map(|v| v.step());
            let expected_order = fresh.controller.order(raw).await.map(|v| v.step());

            let h = harness();
            let _ = h.controller.order(raw).await;
            let _ = h.controller.back_to_confirm(raw).await;
            let _ = h.controller.back_to_input(raw).await;
            let estimate = h.controller.estimate(raw).await.map(|v| v.step());
            let _ = h.controller.submit(raw).await;
            let order = h.controller.order(raw).await.map(|v| v.step());

            assert_eq!(estimate.ok(), expected_estimate.ok());
            assert_eq!(order.ok(), expected_order.ok());
        }
    }

    /// Verifies an order can be placed without a prior submit or estimate
    #[tokio::test]
    async fn test_order_without_prior_steps() {
        let h = harness();
        let view = h.controller.order(&valid_raw()).await.unwrap();
        assert_eq!(view.step(), WizardStep::Complete);
        assert_eq!(h.orders.len().await, 1);
    }
}
