//! Repository implementations
//!
//! Each repository owns the SQL for one table and maps rows to plain
//! structs. Queries are checked at runtime with `sqlx::query_as` so the
//! crate builds without a live database.

pub mod catalog;
pub mod orders;
pub mod rates;

pub use catalog::{InsuranceTypeRepository, InsuranceTypeRow};
pub use orders::{InsuranceOrderRepository, NewInsuranceOrder};
pub use rates::{AgeAdjustmentRateRepository, AgeAdjustmentRateRow};
