//! Gross-to-net salary calculation for the Netherlands and Cyprus.
//!
//! The crate is a pure function of its inputs and the immutable
//! [`TaxTables`] for a jurisdiction: no I/O, no shared mutable state. Loading
//! the tables is the job of the `salary-data` crate.

pub mod calculations;
pub mod models;

pub use calculations::{CalculationError, calculate};
pub use models::*;
