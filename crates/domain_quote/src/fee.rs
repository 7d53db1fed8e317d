//! Annual premium calculation
//!
//! The annual fee is the catalog's monthly fee for twelve months, scaled by
//! the adjustment rate for the applicant's age and truncated toward zero.
//! All arithmetic is exact decimal arithmetic.

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, instrument};

use core_kernel::{whole_years_between, Clock, PortError};

use crate::error::QuoteError;
use crate::ports::{AgeRateTable, InsuranceCatalog};

const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Outcome of a fee calculation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResult {
    pub annual_fee: i64,
    pub age_adjustment_rate: Decimal,
    pub age: i32,
    /// Reported only; never deducted from `annual_fee`
    pub rebate_amount: Decimal,
}

/// Computes annual fees from the catalog and rate table
#[derive(Clone)]
pub struct FeeCalculator {
    catalog: Arc<dyn InsuranceCatalog>,
    rates: Arc<dyn AgeRateTable>,
    clock: Arc<dyn Clock>,
}

impl FeeCalculator {
    pub fn new(
        catalog: Arc<dyn InsuranceCatalog>,
        rates: Arc<dyn AgeRateTable>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self { catalog, rates, clock }
    }

    /// Calculates the quote for an insurance type and date of birth
    ///
    /// # Errors
    ///
    /// - `UnknownInsuranceType` if the catalog has no such type
    /// - `NoRateForAge` if the rate table has no entry for the age
    /// - `Lookup` for any other collaborator failure
    #[instrument(skip(self))]
    pub async fn calculate(
        &self,
        insurance_type: i32,
        date_of_birth: NaiveDate,
    ) -> Result<QuoteResult, QuoteError> {
        let monthly_fee = self
            .catalog
            .find_monthly_fee(insurance_type)
            .await
            .map_err(|e| lookup_error(e, || QuoteError::UnknownInsuranceType(insurance_type.to_string())))?;

        let age = whole_years_between(date_of_birth, self.clock.today());

        let rate = self
            .rates
            .find_adjustment_rate(age)
            .await
            .map_err(|e| lookup_error(e, || QuoteError::NoRateForAge(age)))?;

        let annual_fee = annual_fee(monthly_fee, rate)?;
        debug!(monthly_fee, age, %rate, annual_fee, "Calculated annual fee");

        Ok(QuoteResult {
            annual_fee,
            age_adjustment_rate: rate,
            age,
            rebate_amount: Decimal::ZERO,
        })
    }
}

/// trunc(monthly_fee × 12 × rate)
pub fn annual_fee(monthly_fee: i32, rate: Decimal) -> Result<i64, QuoteError> {
    Decimal::from(monthly_fee)
        .checked_mul(MONTHS_PER_YEAR)
        .and_then(|yearly| yearly.checked_mul(rate))
        .and_then(|fee| fee.trunc().to_i64())
        .ok_or(QuoteError::CalculationOverflow)
}

fn lookup_error(error: PortError, not_found: impl FnOnce() -> QuoteError) -> QuoteError {
    if error.is_not_found() {
        not_found()
    } else {
        QuoteError::Lookup(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_annual_fee_exact() {
        assert_eq!(annual_fee(3000, dec!(0.95)).unwrap(), 34200);
        assert_eq!(annual_fee(3000, dec!(1)).unwrap(), 36000);
    }

    #[test]
    fn test_annual_fee_truncates() {
        assert_eq!(annual_fee(3000, dec!(0.95005)).unwrap(), 34201);
        assert_eq!(annual_fee(1, dec!(0.0833)).unwrap(), 0);
    }

    #[test]
    fn test_annual_fee_negative_truncates_toward_zero() {
        assert_eq!(annual_fee(-3000, dec!(0.95005)).unwrap(), -34201);
    }
}
