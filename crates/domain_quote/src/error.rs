//! Quote domain errors
//!
//! Validation failures are not errors here; they are collected into an
//! `ErrorSet` and routed back to the confirm step. The variants below abort
//! the current transition.

use core_kernel::PortError;
use thiserror::Error;

use crate::form::Field;

/// Errors that abort a wizard transition
#[derive(Debug, Error)]
pub enum QuoteError {
    /// The insurance type is not in the catalog or is not an integer
    #[error("Unknown insurance type: {0}")]
    UnknownInsuranceType(String),

    /// The rate table has no entry for the applicant's age
    #[error("No adjustment rate for age {0}")]
    NoRateForAge(i32),

    /// A catalog or rate lookup failed for a reason other than absence
    #[error("Lookup failed: {0}")]
    Lookup(#[source] PortError),

    /// The order store rejected the insert
    #[error("Persistence failed: {0}")]
    Persistence(#[source] PortError),

    /// A validated field could not be converted to its order type
    #[error("Field {field} cannot be stored: {value}")]
    InvalidField { field: Field, value: String },

    /// The premium does not fit in the result type
    #[error("Fee calculation overflowed")]
    CalculationOverflow,
}

impl QuoteError {
    /// Returns true for failures caused by missing reference data
    pub fn is_lookup_failure(&self) -> bool {
        matches!(
            self,
            QuoteError::UnknownInsuranceType(_) | QuoteError::NoRateForAge(_) | QuoteError::Lookup(_)
        )
    }
}
