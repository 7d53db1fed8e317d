//! Insurance order repository
//!
//! Orders are append-only. The database assigns the receipt number from
//! the `insurance_order.receipt_no` sequence inside the single insert.

use sqlx::PgPool;
use tracing::debug;

use crate::error::DatabaseError;

/// Values of a new `insurance_order` row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewInsuranceOrder {
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

/// Write access to the `insurance_order` table
#[derive(Debug, Clone)]
pub struct InsuranceOrderRepository {
    pool: PgPool,
}

impl InsuranceOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts an order and returns its receipt number
    pub async fn insert(&self, order: &NewInsuranceOrder) -> Result<i64, DatabaseError> {
        let receipt_no: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO insurance_order (
                insurance_type, kanji_name, kana_name, date_of_birth, address,
                phone, email, marital_status, occupation, income,
                treatment_history, medical_history_text
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING receipt_no
            "#,
        )
        .bind(order.insurance_type)
        .bind(&order.kanji_name)
        .bind(&order.kana_name)
        .bind(&order.date_of_birth)
        .bind(&order.address)
        .bind(&order.phone)
        .bind(&order.email)
        .bind(order.marital_status)
        .bind(order.occupation)
        .bind(order.income)
        .bind(order.treatment_history)
        .bind(&order.medical_history_text)
        .fetch_one(&self.pool)
        .await?;

        debug!(receipt_no, "Inserted insurance order");
        Ok(receipt_no)
    }
}
