//! Domain Adapters
//!
//! PostgreSQL implementations of the quote domain ports. Each adapter wraps
//! a repository and translates `DatabaseError` into `PortError`.
//!
//! ```rust,ignore
//! use infra_db::adapters::PostgresInsuranceCatalog;
//! use domain_quote::InsuranceCatalog;
//! use std::sync::Arc;
//!
//! let catalog: Arc<dyn InsuranceCatalog> = Arc::new(PostgresInsuranceCatalog::new(pool));
//! let name = catalog.find_name(1).await?;
//! ```

pub mod quote;

pub use quote::{PostgresAgeRateTable, PostgresInsuranceCatalog, PostgresOrderStore};
