use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::jurisdiction::Jurisdiction;

/// Outcome of the Dutch pipeline. Taxes are negative, credits positive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DutchTaxResult {
    pub year_net_income: Decimal,
    pub month_net_income: Decimal,
    pub day_net_income: Decimal,
    pub hour_net_income: Decimal,
    pub taxable_income: Decimal,
    pub payroll_tax: Decimal,
    pub social_security_tax: Decimal,
    pub general_tax_credit: Decimal,
    pub labour_tax_credit: Decimal,
    /// Sum of the four lines above, floored and never positive.
    pub income_tax: Decimal,
    /// Factor applied to both credits when contributions are (partly) absent.
    pub social_credit_scale: Decimal,

    pub gross_year_income: Decimal,
    pub gross_month_income: Decimal,
    pub gross_day_income: Decimal,
    pub gross_hour_income: Decimal,
    /// Holiday allowance carved out of the quoted gross.
    pub gross_holiday_allowance: Decimal,
    /// Holiday allowance share of the net income.
    pub holiday_allowance_net: Decimal,
    /// Income exempted by the 30% facility.
    pub tax_free_income: Decimal,
    pub ruling_percentage: Decimal,
}

/// Outcome of the Cyprus pipeline. Taxes are negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CyprusTaxResult {
    pub year_net_income: Decimal,
    pub month_net_income: Decimal,
    pub day_net_income: Decimal,
    pub hour_net_income: Decimal,
    pub taxable_income: Decimal,
    pub payroll_tax: Decimal,
    pub social_tax: Decimal,
    pub nhs_tax: Decimal,

    pub gross_year_income: Decimal,
    pub gross_month_income: Decimal,
    pub gross_day_income: Decimal,
    pub gross_hour_income: Decimal,
    /// Income exempted by the first-employment exemption.
    pub tax_free_income: Decimal,
    pub ruling_percentage: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "jurisdiction", rename_all = "lowercase")]
pub enum TaxResult {
    Netherlands(DutchTaxResult),
    Cyprus(CyprusTaxResult),
}

impl TaxResult {
    pub fn jurisdiction(&self) -> Jurisdiction {
        match self {
            Self::Netherlands(_) => Jurisdiction::Netherlands,
            Self::Cyprus(_) => Jurisdiction::Cyprus,
        }
    }

    pub fn year_net_income(&self) -> Decimal {
        match self {
            Self::Netherlands(r) => r.year_net_income,
            Self::Cyprus(r) => r.year_net_income,
        }
    }

    pub fn month_net_income(&self) -> Decimal {
        match self {
            Self::Netherlands(r) => r.month_net_income,
            Self::Cyprus(r) => r.month_net_income,
        }
    }

    pub fn hour_net_income(&self) -> Decimal {
        match self {
            Self::Netherlands(r) => r.hour_net_income,
            Self::Cyprus(r) => r.hour_net_income,
        }
    }

    pub fn taxable_income(&self) -> Decimal {
        match self {
            Self::Netherlands(r) => r.taxable_income,
            Self::Cyprus(r) => r.taxable_income,
        }
    }

    pub fn payroll_tax(&self) -> Decimal {
        match self {
            Self::Netherlands(r) => r.payroll_tax,
            Self::Cyprus(r) => r.payroll_tax,
        }
    }

    /// Itemised yearly lines in display order.
    pub fn lines(&self) -> Vec<(&'static str, Decimal)> {
        match self {
            Self::Netherlands(r) => vec![
                ("Taxable Income", r.taxable_income),
                ("Payroll Tax", r.payroll_tax),
                ("Social Security Tax", r.social_security_tax),
                ("General Tax Credit", r.general_tax_credit),
                ("Labour Tax Credit", r.labour_tax_credit),
                ("Tax Free Income", r.tax_free_income),
            ],
            Self::Cyprus(r) => vec![
                ("Social Insurance Tax", r.social_tax),
                ("National Health Services Tax", r.nhs_tax),
                ("Taxable Income", r.taxable_income),
                ("Payroll Tax", r.payroll_tax),
                ("Tax Free Income", r.tax_free_income),
            ],
        }
    }
}

impl fmt::Display for TaxResult {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "Net income ({})", self.jurisdiction())?;
        writeln!(f, "  {:<30} {:>14.2}", "Per Year", self.year_net_income())?;
        writeln!(f, "  {:<30} {:>14.2}", "Per Month", self.month_net_income())?;
        writeln!(f, "  {:<30} {:>14.2}", "Per Hour", self.hour_net_income())?;
        writeln!(f, "Breakdown (EUR / year)")?;
        for (label, amount) in self.lines() {
            writeln!(f, "  {label:<30} {amount:>14.2}")?;
        }
        Ok(())
    }
}
