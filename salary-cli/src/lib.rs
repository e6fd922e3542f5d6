//! Command-line host for the salary calculator.

pub mod cli;
pub mod logging;
