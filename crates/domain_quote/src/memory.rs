//! In-memory adapters
//!
//! Implement every quote port over `tokio::sync::RwLock`-guarded maps. The
//! server uses them when configured with `storage = memory`; tests use them
//! to drive the wizard without a database.

use async_trait::async_trait;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use core_kernel::{DomainPort, HealthCheckResult, HealthCheckable, PortError, ReceiptNo};

use crate::order::InsuranceOrder;
use crate::ports::{AgeRateTable, InsuranceCatalog, InsuranceType, OrderNotifier, OrderStore};

/// Catalog rows seeded for local runs
pub fn sample_insurance_types() -> Vec<InsuranceType> {
    vec![
        InsuranceType::new(1, "医療保険", 3000),
        InsuranceType::new(2, "がん保険", 2500),
        InsuranceType::new(3, "終身保険", 5000),
    ]
}

/// Rates for ages 20 through 100 seeded for local runs
pub fn sample_adjustment_rates() -> BTreeMap<i32, Decimal> {
    (20..=100)
        .map(|age| {
            let rate = match age {
                20..=29 => dec!(0.80),
                30..=39 => dec!(0.95),
                40..=49 => dec!(1.10),
                50..=59 => dec!(1.30),
                60..=69 => dec!(1.60),
                70..=79 => dec!(2.00),
                _ => dec!(2.50),
            };
            (age, rate)
        })
        .collect()
}

/// In-memory insurance catalog
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    types: RwLock<BTreeMap<i32, InsuranceType>>,
}

impl InMemoryCatalog {
    pub fn new(types: Vec<InsuranceType>) -> Self {
        Self {
            types: RwLock::new(types.into_iter().map(|t| (t.insurance_type, t)).collect()),
        }
    }

    /// Catalog preloaded with [`sample_insurance_types`]
    pub fn sample() -> Self {
        Self::new(sample_insurance_types())
    }

    async fn find(&self, insurance_type: i32) -> Result<InsuranceType, PortError> {
        self.types
            .read()
            .await
            .get(&insurance_type)
            .cloned()
            .ok_or_else(|| PortError::not_found("InsuranceType", insurance_type))
    }
}

impl DomainPort for InMemoryCatalog {}

#[async_trait]
impl HealthCheckable for InMemoryCatalog {
    async fn health_check(&self) -> HealthCheckResult {
        HealthCheckResult::healthy("memory-insurance-catalog")
    }
}

#[async_trait]
impl InsuranceCatalog for InMemoryCatalog {
    async fn list_insurance_types(&self) -> Result<Vec<InsuranceType>, PortError> {
        Ok(self.types.read().await.values().cloned().collect())
    }

    async fn find_name(&self, insurance_type: i32) -> Result<String, PortError> {
        Ok(self.find(insurance_type).await?.insurance_name)
    }

    async fn find_monthly_fee(&self, insurance_type: i32) -> Result<i32, PortError> {
        Ok(self.find(insurance_type).await?.monthly_fee)
    }
}

/// In-memory age rate table
#[derive(Debug, Default)]
pub struct InMemoryRateTable {
    rates: RwLock<BTreeMap<i32, Decimal>>,
}

impl InMemoryRateTable {
    pub fn new(rates: BTreeMap<i32, Decimal>) -> Self {
        Self {
            rates: RwLock::new(rates),
        }
    }

    /// Table preloaded with [`sample_adjustment_rates`]
    pub fn sample() -> Self {
        Self::new(sample_adjustment_rates())
    }

    /// Replaces the rate for one age
    pub async fn set_rate(&self, age: i32, rate: Decimal) {
        self.rates.write().await.insert(age, rate);
    }
}

impl DomainPort for InMemoryRateTable {}

#[async_trait]
impl HealthCheckable for InMemoryRateTable {
    async fn health_check(&self) -> HealthCheckResult {
        HealthCheckResult::healthy("memory-age-rate-table")
    }
}

#[async_trait]
impl AgeRateTable for InMemoryRateTable {
    async fn find_adjustment_rate(&self, age: i32) -> Result<Decimal, PortError> {
        self.rates
            .read()
            .await
            .get(&age)
            .copied()
            .ok_or_else(|| PortError::not_found("AgeAdjustmentRate", age))
    }
}

/// In-memory order store assigning sequential receipt numbers from 1
#[derive(Debug, Default)]
pub struct InMemoryOrderStore {
    orders: RwLock<BTreeMap<ReceiptNo, InsuranceOrder>>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every stored order in receipt order
    pub async fn orders(&self) -> Vec<InsuranceOrder> {
        self.orders.read().await.values().cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.orders.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.orders.read().await.is_empty()
    }
}

impl DomainPort for InMemoryOrderStore {}

#[async_trait]
impl HealthCheckable for InMemoryOrderStore {
    async fn health_check(&self) -> HealthCheckResult {
        HealthCheckResult::healthy("memory-order-store")
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn insert(&self, order: &InsuranceOrder) -> Result<ReceiptNo, PortError> {
        let mut orders = self.orders.write().await;
        let receipt_no = orders
            .keys()
            .next_back()
            .map(|last| last.next())
            .unwrap_or_else(|| ReceiptNo::new(1));
        orders.insert(receipt_no, order.clone().with_receipt(receipt_no));
        Ok(receipt_no)
    }
}

/// A mail recorded by [`RecordingNotifier`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMail {
    pub address: String,
    pub subject: String,
    pub body: String,
}

/// Notifier that keeps sent mail in memory
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    sent: RwLock<Vec<SentMail>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the mail sent so far
    pub async fn sent(&self) -> Vec<SentMail> {
        self.sent.read().await.clone()
    }
}

impl DomainPort for RecordingNotifier {}

#[async_trait]
impl OrderNotifier for RecordingNotifier {
    async fn send(&self, address: &str, subject: &str, body: &str) -> Result<(), PortError> {
        self.sent.write().await.push(SentMail {
            address: address.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        });
        Ok(())
    }
}
