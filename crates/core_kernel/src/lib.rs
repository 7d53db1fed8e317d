//! Core Kernel - Foundational types shared by the quote wizard crates
//!
//! This crate provides the building blocks used across the workspace:
//! - Closed code enumerations (`{code, label}` pairs) and their lookups
//! - An explicit clock so "today" can be fixed in tests
//! - The port error type and marker traits for collaborator adapters
//! - Strongly-typed identifiers

pub mod clock;
pub mod codes;
pub mod error;
pub mod identifiers;
pub mod ports;

pub use clock::{Clock, FixedClock, SystemClock, Timezone, whole_years_between};
pub use codes::{CodeEnum, CodeError, CodeValue};
pub use error::CoreError;
pub use identifiers::ReceiptNo;
pub use ports::{AdapterHealth, DomainPort, HealthCheckResult, HealthCheckable, PortError};
