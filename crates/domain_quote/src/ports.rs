//! Quote Domain Ports
//!
//! The wizard reaches its collaborators through these traits:
//!
//! - **InsuranceCatalog**: insurance types with display name and monthly fee
//! - **AgeRateTable**: premium adjustment rate per age
//! - **OrderStore**: append-only order persistence assigning receipt numbers
//! - **OrderNotifier**: outbound mail after a completed order
//!
//! `infra_db` implements the first three over PostgreSQL and
//! [`crate::memory`] implements all four in memory.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{DomainPort, HealthCheckable, PortError, ReceiptNo};

use crate::order::InsuranceOrder;

/// A catalog row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsuranceType {
    pub insurance_type: i32,
    pub insurance_name: String,
    pub monthly_fee: i32,
}

impl InsuranceType {
    pub fn new(insurance_type: i32, insurance_name: impl Into<String>, monthly_fee: i32) -> Self {
        Self {
            insurance_type,
            insurance_name: insurance_name.into(),
            monthly_fee,
        }
    }
}

/// Insurance type catalog
#[async_trait]
pub trait InsuranceCatalog: DomainPort + HealthCheckable {
    /// Lists every insurance type ordered by code
    async fn list_insurance_types(&self) -> Result<Vec<InsuranceType>, PortError>;

    /// Returns the display name, or `PortError::NotFound`
    async fn find_name(&self, insurance_type: i32) -> Result<String, PortError>;

    /// Returns the monthly fee, or `PortError::NotFound`
    async fn find_monthly_fee(&self, insurance_type: i32) -> Result<i32, PortError>;
}

/// Age to adjustment rate table
#[async_trait]
pub trait AgeRateTable: DomainPort + HealthCheckable {
    /// Returns the rate for an age, or `PortError::NotFound`
    async fn find_adjustment_rate(&self, age: i32) -> Result<Decimal, PortError>;
}

/// Order persistence
#[async_trait]
pub trait OrderStore: DomainPort + HealthCheckable {
    /// Inserts the order atomically and returns its new receipt number
    async fn insert(&self, order: &InsuranceOrder) -> Result<ReceiptNo, PortError>;
}

/// Outbound mail
#[async_trait]
pub trait OrderNotifier: DomainPort {
    async fn send(&self, address: &str, subject: &str, body: &str) -> Result<(), PortError>;
}
