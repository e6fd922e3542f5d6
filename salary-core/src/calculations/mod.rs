//! Gross-to-net calculations for the supported jurisdictions.
//!
//! [`calculate`] dispatches a [`CalculationInput`] to the pipeline of its
//! jurisdiction. Each pipeline annualizes the quoted salary with
//! [`annualize`], resolves its bracket tables with [`RateResolver`] and
//! returns a complete result record.

pub mod common;
pub mod cyprus;
pub mod netherlands;
pub mod period;
pub mod rates;

#[cfg(test)]
pub(crate) mod fixtures;

pub use cyprus::CyprusTaxPipeline;
pub use netherlands::DutchTaxPipeline;
pub use period::annualize;
pub use rates::RateResolver;

use thiserror::Error;

use crate::models::{CalculationInput, Jurisdiction, LookupError, TaxResult, TaxTables};

/// Errors that can occur while computing a result.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CalculationError {
    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// The input's flags belong to another jurisdiction than the tables.
    #[error("input is for {found}, tables are for {expected}")]
    JurisdictionMismatch {
        expected: Jurisdiction,
        found: Jurisdiction,
    },

    /// An intermediate figure does not fit in a `Decimal`.
    #[error("{figure} is too large to compute")]
    Overflow { figure: &'static str },
}

/// Computes the net income of `input` against `tables`.
///
/// # Arguments
///
/// * `tables` - Settings and brackets of one jurisdiction
/// * `input` - The quoted salary, period, tax year and flags
///
/// # Returns
///
/// The result record of the jurisdiction the tables belong to.
///
/// # Errors
///
/// Returns [`CalculationError::JurisdictionMismatch`] when the input flags do
/// not match the tables, [`CalculationError::Lookup`] when the tax year
/// or ruling is not configured, and [`CalculationError::Overflow`] when the
/// salary or working hours are too large to compute with.
pub fn calculate(
    tables: &TaxTables,
    input: &CalculationInput,
) -> Result<TaxResult, CalculationError> {
    match tables.jurisdiction() {
        Jurisdiction::Netherlands => {
            DutchTaxPipeline::new(tables).calculate(input).map(TaxResult::Netherlands)
        }
        Jurisdiction::Cyprus => {
            CyprusTaxPipeline::new(tables).calculate(input).map(TaxResult::Cyprus)
        }
    }
}
