//! Test Utilities Crate
//!
//! Provides shared test infrastructure for the quote wizard test suite.
//!
//! # Modules
//!
//! - `fixtures`: A valid application, the pinned clock and in-memory backends
//! - `builders`: Builder for raw form submissions
//! - `assertions`: Assertion helpers for step views and error sets
//! - `generators`: Property-based test data generators

pub mod assertions;
pub mod builders;
pub mod fixtures;
pub mod generators;

pub use assertions::*;
pub use builders::*;
pub use fixtures::*;
pub use generators::*;
