//! Quote Wizard Domain
//!
//! This crate implements the core of the insurance quote wizard:
//!
//! - **Codes**: Marital status, occupation and treatment history enumerations
//! - **Validation**: Field predicates and the ordered error set they produce
//! - **Form**: Capture and validation of raw submitted fields
//! - **Messages**: Localized validation messages rendered with Fluent
//! - **Fees**: Annual premium calculation from catalog fees and age rates
//! - **Orders**: Conversion of a validated form into a persisted order
//! - **Wizard**: The input → confirm → estimate → order → complete state machine
//!
//! Persistence and notification are reached through the ports in [`ports`];
//! [`memory`] provides in-memory adapters for local runs and tests.

pub mod codes;
pub mod error;
pub mod fee;
pub mod form;
pub mod memory;
pub mod messages;
pub mod notify;
pub mod order;
pub mod ports;
pub mod validation;
pub mod wizard;

pub use codes::{CodeRegistry, EnumId, MaritalStatus, Occupation, TreatmentHistory};
pub use error::QuoteError;
pub use fee::{FeeCalculator, QuoteResult};
pub use form::{Field, QuoteForm, RawFields};
pub use messages::{Locale, MessageCatalog, MessageRenderer};
pub use notify::OrderMailer;
pub use order::InsuranceOrder;
pub use ports::{AgeRateTable, InsuranceCatalog, InsuranceType, OrderNotifier, OrderStore};
pub use validation::{ErrorSet, FieldError, Violation};
pub use wizard::{AgeRange, ConfirmLabels, StepView, WizardController, WizardStep};
