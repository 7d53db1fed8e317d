//! Age adjustment rate repository

use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};

use crate::error::DatabaseError;

/// Row of the `age_adjustment_rate` table
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct AgeAdjustmentRateRow {
    pub age: i32,
    pub adjustment_rate: Decimal,
}

/// Read access to the `age_adjustment_rate` table
#[derive(Debug, Clone)]
pub struct AgeAdjustmentRateRepository {
    pool: PgPool,
}

impl AgeAdjustmentRateRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Retrieves the rate row for an age
    pub async fn get(&self, age: i32) -> Result<AgeAdjustmentRateRow, DatabaseError> {
        sqlx::query_as::<_, AgeAdjustmentRateRow>(
            "SELECT age, adjustment_rate FROM age_adjustment_rate WHERE age = $1",
        )
        .bind(age)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("AgeAdjustmentRate", age))
    }
}
