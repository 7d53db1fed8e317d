//! PostgreSQL adapters for the quote wizard ports

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;
use std::time::Instant;
use tracing::{debug, instrument};

use core_kernel::{DomainPort, HealthCheckResult, HealthCheckable, PortError, ReceiptNo};
use domain_quote::{AgeRateTable, InsuranceCatalog, InsuranceOrder, InsuranceType, OrderStore};

use crate::error::db_to_port_error;
use crate::repositories::{
    AgeAdjustmentRateRepository, InsuranceOrderRepository, InsuranceTypeRepository,
    InsuranceTypeRow, NewInsuranceOrder,
};

/// Runs `SELECT 1` and reports latency
async fn ping(pool: &PgPool, adapter_id: &str) -> HealthCheckResult {
    let start = Instant::now();
    let result = sqlx::query_scalar::<_, i32>("SELECT 1").fetch_one(pool).await;
    let latency_ms = start.elapsed().as_millis() as u64;

    match result {
        Ok(_) => HealthCheckResult::healthy(adapter_id).with_latency(latency_ms),
        Err(e) => HealthCheckResult::unhealthy(adapter_id, format!("Database error: {}", e))
            .with_latency(latency_ms),
    }
}

/// Insurance catalog backed by the `insurance_type` table
#[derive(Debug, Clone)]
pub struct PostgresInsuranceCatalog {
    repository: InsuranceTypeRepository,
    pool: PgPool,
}

impl PostgresInsuranceCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: InsuranceTypeRepository::new(pool.clone()),
            pool,
        }
    }
}

impl DomainPort for PostgresInsuranceCatalog {}

#[async_trait]
impl HealthCheckable for PostgresInsuranceCatalog {
    async fn health_check(&self) -> HealthCheckResult {
        ping(&self.pool, "postgres-insurance-catalog").await
    }
}

#[async_trait]
impl InsuranceCatalog for PostgresInsuranceCatalog {
    #[instrument(skip(self))]
    async fn list_insurance_types(&self) -> Result<Vec<InsuranceType>, PortError> {
        let rows = self.repository.list().await.map_err(db_to_port_error)?;
        debug!(count = rows.len(), "Listed insurance types");
        Ok(rows.into_iter().map(row_to_insurance_type).collect())
    }

    #[instrument(skip(self))]
    async fn find_name(&self, insurance_type: i32) -> Result<String, PortError> {
        let row = self
            .repository
            .get(insurance_type)
            .await
            .map_err(db_to_port_error)?;
        Ok(row.insurance_name)
    }

    #[instrument(skip(self))]
    async fn find_monthly_fee(&self, insurance_type: i32) -> Result<i32, PortError> {
        let row = self
            .repository
            .get(insurance_type)
            .await
            .map_err(db_to_port_error)?;
        Ok(row.monthly_fee)
    }
}

/// Age rate table backed by the `age_adjustment_rate` table
#[derive(Debug, Clone)]
pub struct PostgresAgeRateTable {
    repository: AgeAdjustmentRateRepository,
    pool: PgPool,
}

impl PostgresAgeRateTable {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: AgeAdjustmentRateRepository::new(pool.clone()),
            pool,
        }
    }
}

impl DomainPort for PostgresAgeRateTable {}

#[async_trait]
impl HealthCheckable for PostgresAgeRateTable {
    async fn health_check(&self) -> HealthCheckResult {
        ping(&self.pool, "postgres-age-rate-table").await
    }
}

#[async_trait]
impl AgeRateTable for PostgresAgeRateTable {
    #[instrument(skip(self))]
    async fn find_adjustment_rate(&self, age: i32) -> Result<Decimal, PortError> {
        let row = self.repository.get(age).await.map_err(db_to_port_error)?;
        Ok(row.adjustment_rate)
    }
}

/// Order store backed by the `insurance_order` table
#[derive(Debug, Clone)]
pub struct PostgresOrderStore {
    repository: InsuranceOrderRepository,
    pool: PgPool,
}

impl PostgresOrderStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: InsuranceOrderRepository::new(pool.clone()),
            pool,
        }
    }
}

impl DomainPort for PostgresOrderStore {}

#[async_trait]
impl HealthCheckable for PostgresOrderStore {
    async fn health_check(&self) -> HealthCheckResult {
        ping(&self.pool, "postgres-order-store").await
    }
}

#[async_trait]
impl OrderStore for PostgresOrderStore {
    #[instrument(skip(self, order), fields(insurance_type = order.insurance_type))]
    async fn insert(&self, order: &InsuranceOrder) -> Result<ReceiptNo, PortError> {
        let receipt_no = self
            .repository
            .insert(&to_new_order(order))
            .await
            .map_err(db_to_port_error)?;
        Ok(ReceiptNo::new(receipt_no))
    }
}

// =============================================================================
// Conversion Functions
// =============================================================================

fn row_to_insurance_type(row: InsuranceTypeRow) -> InsuranceType {
    InsuranceType {
        insurance_type: row.insurance_type,
        insurance_name: row.insurance_name,
        monthly_fee: row.monthly_fee,
    }
}

fn to_new_order(order: &InsuranceOrder) -> NewInsuranceOrder {
    NewInsuranceOrder {
        insurance_type: order.insurance_type,
        kanji_name: order.kanji_name.clone(),
        kana_name: order.kana_name.clone(),
        date_of_birth: order.date_of_birth.clone(),
        address: order.address.clone(),
        phone: order.phone.clone(),
        email: order.email.clone(),
        marital_status: order.marital_status,
        occupation: order.occupation,
        income: order.income,
        treatment_history: order.treatment_history,
        medical_history_text: order.medical_history_text.clone(),
    }
}
