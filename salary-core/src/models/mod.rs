mod bracket;
mod bracket_table;
mod input;
mod jurisdiction;
mod tax_result;

pub use bracket::{Bracket, RateField, RateValue};
pub use bracket_table::{BracketTable, BracketTableError, LookupError, TaxKind};
pub use input::{
    CalculationInput, CyprusFlags, CyprusRuling, DutchFlags, DutchRuling, JurisdictionFlags,
    Period,
};
pub use jurisdiction::{Jurisdiction, JurisdictionSettings, RulingThresholds, TaxTables};
pub use tax_result::{CyprusTaxResult, DutchTaxResult, TaxResult};
