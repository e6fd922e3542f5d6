//! Cyprus gross-to-net pipeline.
//!
//! Social insurance and the NHS contribution are charged on the floored
//! gross and deducted before income tax. The first-employment exemption then
//! takes 20% or 50% of what is left out of the income tax base.

use rust_decimal::Decimal;
use tracing::debug;

use super::CalculationError;
use super::common::{checked, floor, floor_div, non_positive, ruling_percentage};
use super::period::annualize;
use super::rates::RateResolver;
use crate::models::{
    CalculationInput, CyprusFlags, CyprusTaxResult, Jurisdiction, JurisdictionFlags, RateField,
    TaxKind, TaxTables,
};

/// Calculator for Cypriot employment income.
#[derive(Debug, Clone, Copy)]
pub struct CyprusTaxPipeline<'a> {
    tables: &'a TaxTables,
}

impl<'a> CyprusTaxPipeline<'a> {
    pub fn new(tables: &'a TaxTables) -> Self {
        Self { tables }
    }

    /// Runs the full pipeline for `input`.
    ///
    /// # Errors
    ///
    /// Returns [`CalculationError::JurisdictionMismatch`] if either the tables
    /// or the input flags are not Cypriot, [`CalculationError::Lookup`] if
    /// the tax year is not configured, and [`CalculationError::Overflow`] if
    /// the salary is too large to compute.
    pub fn calculate(
        &self,
        input: &CalculationInput,
    ) -> Result<CyprusTaxResult, CalculationError> {
        let flags = self.flags(input)?;
        let settings = &self.tables.settings;
        let year = input.tax_year;

        let payroll = self.tables.brackets.get(TaxKind::Payroll, year)?;
        let social = self.tables.brackets.get(TaxKind::Social, year)?;
        let nhs = self.tables.brackets.get(TaxKind::Nhs, year)?;

        let gross = annualize(
            input.salary,
            input.period,
            input.working_hours,
            settings.working_days,
            settings.working_weeks,
        )?;
        let floored = floor(gross);

        let social_tax = -RateResolver::new(social).resolve(floored, RateField::Standard);
        let nhs_tax = -RateResolver::new(nhs).resolve(floored, RateField::Standard);
        let after_contributions = floored + social_tax + nhs_tax;

        let exempt = after_contributions * flags.ruling.exempt_share();
        let taxable = after_contributions - exempt;
        debug!(%gross, %social_tax, %nhs_tax, %exempt, %taxable, "taxable income");

        let payroll_tax = non_positive(floor(
            -RateResolver::new(payroll).resolve(taxable, RateField::Standard),
        ));
        let year_net_income = taxable + payroll_tax + exempt;
        debug!(%payroll_tax, %year_net_income, "net income");

        let hours_per_year = checked(
            settings.working_weeks.checked_mul(input.working_hours),
            "working hours per year",
        )?;

        Ok(CyprusTaxResult {
            year_net_income,
            month_net_income: floor(year_net_income / Decimal::from(12)),
            day_net_income: floor_div(year_net_income, settings.working_days, "day net income"),
            hour_net_income: floor_div(year_net_income, hours_per_year, "hour net income"),
            taxable_income: taxable,
            payroll_tax,
            social_tax,
            nhs_tax,
            gross_year_income: floored,
            gross_month_income: floor(gross / Decimal::from(12)),
            gross_day_income: floor_div(gross, settings.working_days, "day gross income"),
            gross_hour_income: floor_div(gross, hours_per_year, "hour gross income"),
            tax_free_income: floor(exempt),
            ruling_percentage: ruling_percentage(exempt, gross),
        })
    }

    fn flags(
        &self,
        input: &CalculationInput,
    ) -> Result<CyprusFlags, CalculationError> {
        let expected = self.tables.jurisdiction();
        match input.flags {
            JurisdictionFlags::Cyprus(flags) if expected == Jurisdiction::Cyprus => Ok(flags),
            other => Err(CalculationError::JurisdictionMismatch {
                expected,
                found: other.jurisdiction(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::calculations::fixtures;
    use crate::models::{CyprusRuling, DutchFlags, LookupError, Period};

    fn run(
        salary: Decimal,
        period: Period,
        ruling: CyprusRuling,
    ) -> CyprusTaxResult {
        let tables = fixtures::cyprus_tables();
        let input =
            CalculationInput::cyprus(salary, period, 2023, dec!(40), CyprusFlags { ruling });
        CyprusTaxPipeline::new(&tables).calculate(&input).unwrap()
    }

    // =========================================================================
    // reference scenario
    // =========================================================================

    #[test]
    fn yearly_36000_without_exemption() {
        let result = run(dec!(36000), Period::Year, CyprusRuling::None);

        assert_eq!(result.social_tax, dec!(-2988.00));
        assert_eq!(result.nhs_tax, dec!(-954.00));
        assert_eq!(result.taxable_income, dec!(32058.00));
        assert_eq!(result.payroll_tax, dec!(-2715));
        assert_eq!(result.year_net_income, dec!(29343.00));
        assert_eq!(result.month_net_income, dec!(2445));
        assert_eq!(result.day_net_income, dec!(115));
        assert_eq!(result.hour_net_income, dec!(14));
    }

    #[test]
    fn yearly_36000_supplementary_lines() {
        let result = run(dec!(36000), Period::Year, CyprusRuling::None);

        assert_eq!(result.gross_year_income, dec!(36000));
        assert_eq!(result.gross_month_income, dec!(3000));
        assert_eq!(result.gross_day_income, dec!(141));
        assert_eq!(result.gross_hour_income, dec!(17));
        assert_eq!(result.tax_free_income, dec!(0));
        assert_eq!(result.ruling_percentage, dec!(0));
    }

    // =========================================================================
    // exemptions
    // =========================================================================

    #[test]
    fn twenty_percent_exemption() {
        let result = run(dec!(36000), Period::Year, CyprusRuling::TwentyPercent);

        assert_eq!(result.taxable_income, dec!(25646.4));
        assert_eq!(result.tax_free_income, dec!(6411));
        assert_eq!(result.payroll_tax, dec!(-1230));
        assert_eq!(result.year_net_income, dec!(30828));
        assert_eq!(result.month_net_income, dec!(2569));
        assert_eq!(result.ruling_percentage, dec!(17));
    }

    #[test]
    fn fifty_percent_exemption_with_capped_social() {
        let result = run(dec!(80000), Period::Year, CyprusRuling::FiftyPercent);

        assert_eq!(result.social_tax, dec!(-4820.64));
        assert_eq!(result.nhs_tax, dec!(-2120));
        assert_eq!(result.taxable_income, dec!(36529.68));
        assert_eq!(result.tax_free_income, dec!(36529));
        assert_eq!(result.payroll_tax, dec!(-3845));
        assert_eq!(result.year_net_income, dec!(69214.36));
        assert_eq!(result.ruling_percentage, dec!(45));
    }

    // =========================================================================
    // periods and limits
    // =========================================================================

    #[test]
    fn monthly_salary_is_annualized() {
        let result = run(dec!(5000), Period::Month, CyprusRuling::None);

        assert_eq!(result.gross_year_income, dec!(60000));
        assert_eq!(result.social_tax, dec!(-4820.64));
        assert_eq!(result.nhs_tax, dec!(-1590));
        assert_eq!(result.payroll_tax, dec!(-8962));
        assert_eq!(result.year_net_income, dec!(44627.36));
    }

    #[test]
    fn income_below_first_band_pays_no_income_tax() {
        let result = run(dec!(15000), Period::Year, CyprusRuling::None);

        assert_eq!(result.payroll_tax, dec!(0));
        assert_eq!(result.year_net_income, dec!(13357.5));
    }

    #[test]
    fn social_contribution_is_capped() {
        let low = run(dec!(70000), Period::Year, CyprusRuling::None);
        let high = run(dec!(250000), Period::Year, CyprusRuling::None);

        assert_eq!(low.social_tax, dec!(-4820.64));
        assert_eq!(high.social_tax, dec!(-4820.64));
    }

    #[test]
    fn payroll_tax_is_never_positive() {
        for step in 0..=100 {
            let salary = Decimal::from(step * 1500);
            for ruling in CyprusRuling::ALL {
                let result = run(salary, Period::Year, ruling);
                assert!(result.payroll_tax <= Decimal::ZERO, "{salary} {ruling:?}");
            }
        }
    }

    // =========================================================================
    // errors
    // =========================================================================

    #[test]
    fn missing_year_is_a_lookup_error() {
        let tables = fixtures::cyprus_tables();
        let input =
            CalculationInput::cyprus(dec!(36000), Period::Year, 2021, dec!(40), CyprusFlags::default());

        assert_eq!(
            CyprusTaxPipeline::new(&tables).calculate(&input),
            Err(CalculationError::Lookup(LookupError::MissingTable {
                kind: TaxKind::Payroll,
                year: 2021,
            }))
        );
    }

    #[test]
    fn overflowing_monthly_salary_is_an_error() {
        let tables = fixtures::cyprus_tables();
        let input =
            CalculationInput::cyprus(Decimal::MAX, Period::Month, 2023, dec!(40), CyprusFlags::default());

        assert_eq!(
            CyprusTaxPipeline::new(&tables).calculate(&input),
            Err(CalculationError::Overflow {
                figure: "annual gross"
            })
        );
    }

    #[test]
    fn overflowing_working_hours_is_an_error() {
        let tables = fixtures::cyprus_tables();
        let input = CalculationInput::cyprus(
            dec!(36000),
            Period::Year,
            2023,
            Decimal::MAX,
            CyprusFlags::default(),
        );

        assert_eq!(
            CyprusTaxPipeline::new(&tables).calculate(&input),
            Err(CalculationError::Overflow {
                figure: "working hours per year"
            })
        );
    }

    #[test]
    fn huge_yearly_salary_is_computed() {
        let result = run(dec!(10000000000000000000000000000), Period::Year, CyprusRuling::FiftyPercent);

        assert_eq!(result.gross_year_income, dec!(10000000000000000000000000000));
        assert_eq!(result.social_tax, dec!(-4820.64));
        assert!(result.payroll_tax < Decimal::ZERO);
        assert_eq!(result.ruling_percentage, dec!(48));
    }

    #[test]
    fn dutch_tables_are_rejected() {
        let tables = fixtures::dutch_tables();
        let input =
            CalculationInput::cyprus(dec!(36000), Period::Year, 2023, dec!(40), CyprusFlags::default());

        assert_eq!(
            CyprusTaxPipeline::new(&tables).calculate(&input),
            Err(CalculationError::JurisdictionMismatch {
                expected: Jurisdiction::Netherlands,
                found: Jurisdiction::Cyprus,
            })
        );
    }

    #[test]
    fn dutch_flags_are_rejected() {
        let tables = fixtures::cyprus_tables();
        let input = CalculationInput::netherlands(
            dec!(36000),
            Period::Year,
            2023,
            dec!(40),
            DutchFlags::default(),
        );

        assert!(matches!(
            CyprusTaxPipeline::new(&tables).calculate(&input),
            Err(CalculationError::JurisdictionMismatch { .. })
        ));
    }
}
