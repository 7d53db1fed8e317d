//! Infrastructure Database Layer
//!
//! PostgreSQL persistence for the quote wizard using SQLx:
//!
//! - `repositories`: SQL for the `insurance_type`, `age_adjustment_rate`
//!   and `insurance_order` tables
//! - `adapters`: implementations of the `domain_quote` ports on top of the
//!   repositories
//! - `pool`: connection pool configuration and embedded migrations
//!
//! ```rust,ignore
//! use infra_db::{create_pool, run_migrations, DatabaseConfig};
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/quote_wizard")).await?;
//! run_migrations(&pool).await?;
//! ```

pub mod adapters;
pub mod error;
pub mod pool;
pub mod repositories;

pub use adapters::{PostgresAgeRateTable, PostgresInsuranceCatalog, PostgresOrderStore};
pub use error::DatabaseError;
pub use pool::{create_pool, run_migrations, DatabaseConfig, DatabasePool};
