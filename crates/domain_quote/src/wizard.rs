//! Quote wizard state machine
//!
//! The wizard walks an applicant through five steps:
//!
//! ```text
//!   Input ──submit──▶ Confirm ──proceed──▶ Estimate ──order──▶ Order ──proceed──▶ Complete
//!     ▲                 │  ▲                                     │
//!     └──backToInput────┘  └──────────backToConfirm / invalid────┘
//! ```
//!
//! No state is kept between transitions: every call receives the raw
//! submitted fields and returns the [`StepView`] to display next.
//! Validation failures land back on `Confirm` with the collected errors;
//! lookup and persistence failures abort the transition with a
//! [`QuoteError`].

use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, instrument};

use core_kernel::{Clock, CodeValue, ReceiptNo};

use crate::codes::{CodeRegistry, EnumId};
use crate::error::QuoteError;
use crate::fee::{FeeCalculator, QuoteResult};
use crate::form::{Field, QuoteForm, RawFields};
use crate::messages::MessageCatalog;
use crate::order::InsuranceOrder;
use crate::ports::{AgeRateTable, InsuranceCatalog, InsuranceType, OrderStore};
use crate::validation::ErrorSet;

/// Steps of the wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum WizardStep {
    Input,
    Confirm,
    Estimate,
    /// Submission of the estimate screen
    Order,
    Complete,
}

impl WizardStep {
    /// Returns true if the wizard may move from this step to `next`
    ///
    /// `Confirm → Confirm` and `Order → Confirm` are the validation-failure
    /// edges. The controller keeps no current step, so this table describes
    /// the navigation a client offers rather than a check on each call.
    pub fn can_transition_to(&self, next: WizardStep) -> bool {
        use WizardStep::*;
        matches!(
            (self, next),
            (Input, Confirm)
                | (Confirm, Input)
                | (Confirm, Confirm)
                | (Confirm, Estimate)
                | (Estimate, Order)
                | (Order, Complete)
                | (Order, Confirm)
        )
    }

    /// Returns true if no transition leaves this step
    pub fn is_terminal(&self) -> bool {
        matches!(self, WizardStep::Complete)
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Inclusive age range eligible for a quote
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgeRange {
    pub min: i32,
    pub max: i32,
}

impl Default for AgeRange {
    fn default() -> Self {
        Self { min: 20, max: 100 }
    }
}

/// Display labels of the selected codes on the confirm screen
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmLabels {
    pub marital_status_label: Option<&'static str>,
    pub occupation_label: Option<&'static str>,
    pub treatment_history_label: Option<&'static str>,
}

impl ConfirmLabels {
    pub fn from_form(form: &QuoteForm) -> Self {
        Self {
            marital_status_label: CodeRegistry::label_of(EnumId::MaritalStatus, &form.marital_status),
            occupation_label: CodeRegistry::label_of(EnumId::Occupation, &form.occupation),
            treatment_history_label: CodeRegistry::label_of(
                EnumId::TreatmentHistory,
                &form.treatment_history,
            ),
        }
    }
}

/// What the presentation layer renders after a transition
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "step", rename_all = "camelCase")]
pub enum StepView {
    #[serde(rename_all = "camelCase")]
    Input {
        form: QuoteForm,
        insurance_types: Vec<InsuranceType>,
        marital_statuses: Vec<CodeValue>,
        occupations: Vec<CodeValue>,
        treatment_histories: Vec<CodeValue>,
    },
    #[serde(rename_all = "camelCase")]
    Confirm {
        form: QuoteForm,
        insurance_name: Option<String>,
        labels: ConfirmLabels,
        errors: ErrorSet,
    },
    #[serde(rename_all = "camelCase")]
    Estimate {
        form: QuoteForm,
        insurance_name: String,
        quote: QuoteResult,
    },
    #[serde(rename_all = "camelCase")]
    Complete {
        receipt_no: ReceiptNo,
        insurance_name: Option<String>,
        order: InsuranceOrder,
    },
}

impl StepView {
    /// The step this view belongs to
    pub fn step(&self) -> WizardStep {
        match self {
            StepView::Input { .. } => WizardStep::Input,
            StepView::Confirm { .. } => WizardStep::Confirm,
            StepView::Estimate { .. } => WizardStep::Estimate,
            StepView::Complete { .. } => WizardStep::Complete,
        }
    }

    /// Validation errors shown on the confirm step, if any
    pub fn errors(&self) -> Option<&ErrorSet> {
        match self {
            StepView::Confirm { errors, .. } => Some(errors),
            _ => None,
        }
    }

    /// The form echoed back by the view, if any
    pub fn form(&self) -> Option<&QuoteForm> {
        match self {
            StepView::Input { form, .. }
            | StepView::Confirm { form, .. }
            | StepView::Estimate { form, .. } => Some(form),
            StepView::Complete { .. } => None,
        }
    }
}

/// Orchestrates the wizard transitions
#[derive(Clone)]
pub struct WizardController {
    catalog: Arc<dyn InsuranceCatalog>,
    orders: Arc<dyn OrderStore>,
    clock: Arc<dyn Clock>,
    fees: FeeCalculator,
    messages: MessageCatalog,
    age_range: AgeRange,
}

impl WizardController {
    pub fn new(
        catalog: Arc<dyn InsuranceCatalog>,
        rates: Arc<dyn AgeRateTable>,
        orders: Arc<dyn OrderStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let fees = FeeCalculator::new(catalog.clone(), rates, clock.clone());
        Self {
            catalog,
            orders,
            clock,
            fees,
            messages: MessageCatalog::default(),
            age_range: AgeRange::default(),
        }
    }

    /// Sets the message locale
    pub fn with_messages(mut self, messages: MessageCatalog) -> Self {
        self.messages = messages;
        self
    }

    /// Sets the eligible age range
    pub fn with_age_range(mut self, age_range: AgeRange) -> Self {
        self.age_range = age_range;
        self
    }

    /// Entry: an empty form with default selections
    #[instrument(skip(self))]
    pub async fn start(&self) -> Result<StepView, QuoteError> {
        self.input_view(QuoteForm::with_defaults()).await
    }

    /// `Input → Confirm`: resolves the insurance name, no validation
    #[instrument(skip(self, raw))]
    pub async fn submit(&self, raw: &RawFields) -> Result<StepView, QuoteError> {
        let form = QuoteForm::capture(raw);
        let insurance_name = self.resolve_name(&form.insurance_type).await?;
        Ok(confirm_view(form, Some(insurance_name), ErrorSet::new()))
    }

    /// `Confirm → Input`: echoes the entered data, no validation
    #[instrument(skip(self, raw))]
    pub async fn back_to_input(&self, raw: &RawFields) -> Result<StepView, QuoteError> {
        self.input_view(QuoteForm::capture(raw)).await
    }

    /// `Confirm → Estimate`, or back to `Confirm` with errors
    #[instrument(skip(self, raw))]
    pub async fn estimate(&self, raw: &RawFields) -> Result<StepView, QuoteError> {
        let (form, errors) = self.validate(raw);
        if !errors.is_empty() {
            return self.invalid(form, errors).await;
        }

        let insurance_type = insurance_code(&form)?;
        let date_of_birth = form.birth_date().ok_or_else(|| QuoteError::InvalidField {
            field: Field::DateOfBirth,
            value: form.date_of_birth.clone(),
        })?;
        let insurance_name = self.resolve_name(&form.insurance_type).await?;
        let quote = self.fees.calculate(insurance_type, date_of_birth).await?;

        info!(insurance_type, annual_fee = quote.annual_fee, age = quote.age, "Quote estimated");
        Ok(StepView::Estimate {
            form,
            insurance_name,
            quote,
        })
    }

    /// `Order → Complete`, or back to `Confirm` with errors
    #[instrument(skip(self, raw))]
    pub async fn order(&self, raw: &RawFields) -> Result<StepView, QuoteError> {
        let (form, errors) = self.validate(raw);
        if !errors.is_empty() {
            return self.invalid(form, errors).await;
        }

        let order = InsuranceOrder::from_form(&form)?;
        let receipt_no = self
            .orders
            .insert(&order)
            .await
            .map_err(QuoteError::Persistence)?;
        let insurance_name = self.lenient_name(&form.insurance_type).await?;

        info!(%receipt_no, insurance_type = order.insurance_type, "Order registered");
        Ok(StepView::Complete {
            receipt_no,
            insurance_name,
            order: order.with_receipt(receipt_no),
        })
    }

    /// `Order → Confirm`: re-resolves the insurance name, no validation
    #[instrument(skip(self, raw))]
    pub async fn back_to_confirm(&self, raw: &RawFields) -> Result<StepView, QuoteError> {
        let form = QuoteForm::capture(raw);
        let insurance_name = self.resolve_name(&form.insurance_type).await?;
        Ok(confirm_view(form, Some(insurance_name), ErrorSet::new()))
    }

    /// Static validation followed by the age check
    fn validate(&self, raw: &RawFields) -> (QuoteForm, ErrorSet) {
        let renderer = self.messages.renderer();
        let form = QuoteForm::capture(raw);
        let mut errors = form.validate(&renderer);
        let AgeRange { min, max } = self.age_range;
        if let Some(age_error) = form.check_age(self.clock.today(), min, max, &renderer) {
            errors.push(age_error);
        }
        (form, errors)
    }

    async fn invalid(&self, form: QuoteForm, errors: ErrorSet) -> Result<StepView, QuoteError> {
        debug!(error_count = errors.len(), "Validation failed, returning to confirm");
        let insurance_name = self.lenient_name(&form.insurance_type).await?;
        Ok(confirm_view(form, insurance_name, errors))
    }

    async fn input_view(&self, form: QuoteForm) -> Result<StepView, QuoteError> {
        let insurance_types = self
            .catalog
            .list_insurance_types()
            .await
            .map_err(QuoteError::Lookup)?;
        Ok(StepView::Input {
            form,
            insurance_types,
            marital_statuses: CodeRegistry::options(EnumId::MaritalStatus),
            occupations: CodeRegistry::options(EnumId::Occupation),
            treatment_histories: CodeRegistry::options(EnumId::TreatmentHistory),
        })
    }

    /// Resolves the display name; an unknown or malformed type is an error
    async fn resolve_name(&self, raw_type: &str) -> Result<String, QuoteError> {
        let code = raw_type
            .parse::<i32>()
            .map_err(|_| QuoteError::UnknownInsuranceType(raw_type.to_string()))?;
        self.catalog.find_name(code).await.map_err(|e| {
            if e.is_not_found() {
                QuoteError::UnknownInsuranceType(raw_type.to_string())
            } else {
                QuoteError::Lookup(e)
            }
        })
    }

    /// Resolves the display name; an unknown or malformed type yields `None`
    async fn lenient_name(&self, raw_type: &str) -> Result<Option<String>, QuoteError> {
        let Ok(code) = raw_type.parse::<i32>() else {
            return Ok(None);
        };
        match self.catalog.find_name(code).await {
            Ok(name) => Ok(Some(name)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(QuoteError::Lookup(e)),
        }
    }
}

fn confirm_view(form: QuoteForm, insurance_name: Option<String>, errors: ErrorSet) -> StepView {
    StepView::Confirm {
        labels: ConfirmLabels::from_form(&form),
        form,
        insurance_name,
        errors,
    }
}

fn insurance_code(form: &QuoteForm) -> Result<i32, QuoteError> {
    form.insurance_type
        .parse()
        .map_err(|_| QuoteError::UnknownInsuranceType(form.insurance_type.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_edges() {
        assert!(WizardStep::Input.can_transition_to(WizardStep::Confirm));
        assert!(WizardStep::Confirm.can_transition_to(WizardStep::Estimate));
        assert!(WizardStep::Estimate.can_transition_to(WizardStep::Order));
        assert!(WizardStep::Order.can_transition_to(WizardStep::Complete));
    }

    #[test]
    fn test_backward_edges() {
        assert!(WizardStep::Confirm.can_transition_to(WizardStep::Input));
        assert!(WizardStep::Order.can_transition_to(WizardStep::Confirm));
        assert!(!WizardStep::Estimate.can_transition_to(WizardStep::Input));
        assert!(!WizardStep::Complete.can_transition_to(WizardStep::Input));
    }

    #[test]
    fn test_no_skipping() {
        assert!(!WizardStep::Input.can_transition_to(WizardStep::Estimate));
        assert!(!WizardStep::Input.can_transition_to(WizardStep::Complete));
        assert!(!WizardStep::Confirm.can_transition_to(WizardStep::Complete));
        assert!(WizardStep::Complete.is_terminal());
    }

    #[test]
    fn test_confirm_labels() {
        let form = QuoteForm::with_defaults();
        let labels = ConfirmLabels::from_form(&form);
        assert_eq!(labels.marital_status_label, Some("配偶者あり"));
        assert_eq!(labels.occupation_label, Some("経営・自営業"));
        assert_eq!(labels.treatment_history_label, Some("はい"));
        assert_eq!(ConfirmLabels::from_form(&QuoteForm::default()), ConfirmLabels::default());
    }
}
