//! Insurance type catalog repository

use sqlx::{FromRow, PgPool};

use crate::error::DatabaseError;

/// Row of the `insurance_type` table
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct InsuranceTypeRow {
    pub insurance_type: i32,
    pub insurance_name: String,
    pub monthly_fee: i32,
}

/// Read access to the `insurance_type` table
#[derive(Debug, Clone)]
pub struct InsuranceTypeRepository {
    pool: PgPool,
}

impl InsuranceTypeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Lists every insurance type ordered by code
    pub async fn list(&self) -> Result<Vec<InsuranceTypeRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, InsuranceTypeRow>(
            r#"
            SELECT insurance_type, insurance_name, monthly_fee
            FROM insurance_type
            ORDER BY insurance_type
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Retrieves one insurance type by code
    pub async fn get(&self, insurance_type: i32) -> Result<InsuranceTypeRow, DatabaseError> {
        sqlx::query_as::<_, InsuranceTypeRow>(
            r#"
            SELECT insurance_type, insurance_name, monthly_fee
            FROM insurance_type
            WHERE insurance_type = $1
            "#,
        )
        .bind(insurance_type)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("InsuranceType", insurance_type))
    }
}
