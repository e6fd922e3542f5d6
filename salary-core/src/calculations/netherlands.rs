//! Dutch gross-to-net pipeline.
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Annualize the quoted salary |
//! | 2    | Carve the 8% holiday allowance out of gross (`gross * 8 / 108`, floored) |
//! | 3    | 30% facility: exempt 30% of taxable income above the ruling threshold |
//! | 4    | Floor taxable income |
//! | 5    | Payroll tax on taxable income |
//! | 6    | Social security contributions (`social` or `older` column) |
//! | 7    | Social credit scale |
//! | 8    | General and labour tax credits, both scaled |
//! | 9    | Income tax: floor of 5 + 6 + 8, never positive |
//! | 10   | Net = taxable + income tax + exempt |
//! | 11   | Month, day and hour figures |
//!
//! Taxes are reported as negative amounts and credits as positive ones.

use rust_decimal::Decimal;
use tracing::{debug, warn};

use super::CalculationError;
use super::common::{checked, floor, floor_div, non_positive, ruling_percentage};
use super::period::annualize;
use super::rates::RateResolver;
use crate::models::{
    Bracket, CalculationInput, DutchFlags, DutchRuling, DutchTaxResult, Jurisdiction,
    JurisdictionFlags, RateField, TaxKind, TaxTables,
};

/// Calculator for Dutch employment income.
#[derive(Debug, Clone, Copy)]
pub struct DutchTaxPipeline<'a> {
    tables: &'a TaxTables,
}

impl<'a> DutchTaxPipeline<'a> {
    pub fn new(tables: &'a TaxTables) -> Self {
        Self { tables }
    }

    /// Runs the full pipeline for `input`.
    ///
    /// # Errors
    ///
    /// Returns [`CalculationError::JurisdictionMismatch`] if either the tables
    /// or the input flags are not Dutch, [`CalculationError::Lookup`] if
    /// the tax year or the ruling threshold is not configured, and
    /// [`CalculationError::Overflow`] if the salary is too large to compute.
    pub fn calculate(
        &self,
        input: &CalculationInput,
    ) -> Result<DutchTaxResult, CalculationError> {
        let flags = self.flags(input)?;
        let settings = &self.tables.settings;
        let year = input.tax_year;

        let payroll = self.tables.brackets.get(TaxKind::Payroll, year)?;
        let social = self.tables.brackets.get(TaxKind::Social, year)?;
        let general = self.tables.brackets.get(TaxKind::GeneralCredit, year)?;
        let labour = self.tables.brackets.get(TaxKind::LabourCredit, year)?;

        let gross = annualize(
            input.salary,
            input.period,
            input.working_hours,
            settings.working_days,
            settings.working_weeks,
        )?;
        let holiday_allowance = self.holiday_allowance(gross, flags.holiday_allowance)?;
        let (taxable, exempt) = self.apply_ruling(gross - holiday_allowance, year, flags.ruling)?;
        let taxable = floor(taxable);
        debug!(%gross, %holiday_allowance, %exempt, %taxable, "taxable income");

        let payroll_tax = -RateResolver::new(payroll).resolve(taxable, RateField::Standard);
        let social_security_tax = self.social_security_tax(social, taxable, &flags);
        let social_credit_scale = self.social_credit_scale(social, &flags);
        let general_tax_credit = checked(
            social_credit_scale
                .checked_mul(RateResolver::new(general).resolve(taxable, RateField::Standard)),
            "general tax credit",
        )?;
        let labour_tax_credit = checked(
            social_credit_scale
                .checked_mul(RateResolver::new(labour).resolve(taxable, RateField::Standard)),
            "labour tax credit",
        )?;
        debug!(
            %payroll_tax,
            %social_security_tax,
            %social_credit_scale,
            %general_tax_credit,
            %labour_tax_credit,
            "tax lines"
        );

        let income_tax = payroll_tax
            .checked_add(social_security_tax)
            .and_then(|sum| sum.checked_add(general_tax_credit))
            .and_then(|sum| sum.checked_add(labour_tax_credit));
        let income_tax = non_positive(floor(checked(income_tax, "income tax")?));
        let year_net_income = taxable + income_tax + exempt;
        debug!(%income_tax, %year_net_income, "net income");

        let hours_per_year = checked(
            settings.working_weeks.checked_mul(input.working_hours),
            "working hours per year",
        )?;

        Ok(DutchTaxResult {
            year_net_income,
            month_net_income: floor(year_net_income / Decimal::from(12)),
            day_net_income: floor_div(year_net_income, settings.working_days, "day net income"),
            hour_net_income: floor_div(year_net_income, hours_per_year, "hour net income"),
            taxable_income: taxable,
            payroll_tax,
            social_security_tax,
            general_tax_credit,
            labour_tax_credit,
            income_tax,
            social_credit_scale,
            gross_year_income: floor(gross),
            gross_month_income: floor(gross / Decimal::from(12)),
            gross_day_income: floor_div(gross, settings.working_days, "day gross income"),
            gross_hour_income: floor_div(gross, hours_per_year, "hour gross income"),
            gross_holiday_allowance: holiday_allowance,
            holiday_allowance_net: self
                .holiday_allowance(year_net_income, flags.holiday_allowance)?,
            tax_free_income: floor(exempt),
            ruling_percentage: ruling_percentage(exempt, gross),
        })
    }

    fn flags(
        &self,
        input: &CalculationInput,
    ) -> Result<DutchFlags, CalculationError> {
        let expected = self.tables.jurisdiction();
        match input.flags {
            JurisdictionFlags::Netherlands(flags) if expected == Jurisdiction::Netherlands => {
                Ok(flags)
            }
            other => Err(CalculationError::JurisdictionMismatch {
                expected,
                found: other.jurisdiction(),
            }),
        }
    }

    /// Holiday allowance contained in `amount` when the salary includes it.
    fn holiday_allowance(
        &self,
        amount: Decimal,
        included: bool,
    ) -> Result<Decimal, CalculationError> {
        if !included {
            return Ok(Decimal::ZERO);
        }
        let eightfold = checked(amount.checked_mul(Decimal::from(8)), "holiday allowance")?;
        Ok(floor(eightfold / Decimal::from(108)))
    }

    /// Splits `taxable` into the taxed part and the 30% exempt part.
    ///
    /// Income at or below the ruling's threshold gets no exemption.
    fn apply_ruling(
        &self,
        taxable: Decimal,
        year: i32,
        ruling: DutchRuling,
    ) -> Result<(Decimal, Decimal), CalculationError> {
        if ruling == DutchRuling::None {
            return Ok((taxable, Decimal::ZERO));
        }

        let threshold = self.tables.settings.ruling_threshold(year, ruling)?;
        if taxable > threshold {
            let exempt = taxable * Decimal::new(3, 1);
            Ok((taxable - exempt, exempt))
        } else {
            Ok((taxable, Decimal::ZERO))
        }
    }

    fn social_security_tax(
        &self,
        social: &[Bracket],
        taxable: Decimal,
        flags: &DutchFlags,
    ) -> Decimal {
        if !flags.social_security {
            return Decimal::ZERO;
        }
        let field = if flags.old_age {
            RateField::OlderAge
        } else {
            RateField::SocialExcl
        };
        -RateResolver::new(social).resolve(taxable, field)
    }

    /// Share of the credits left once contributions that are not paid are
    /// taken out, read from the first social bracket.
    ///
    /// Without social security the credit excludes the whole `social` share;
    /// at state-pension age only the pension part of it.
    fn social_credit_scale(
        &self,
        social: &[Bracket],
        flags: &DutchFlags,
    ) -> Decimal {
        if flags.social_security && !flags.old_age {
            return Decimal::ONE;
        }
        let Some(bracket) = social.first() else {
            return Decimal::ONE;
        };

        let rate = bracket.rate.value();
        let social_share = bracket.value(RateField::SocialExcl).value();
        let numerator = if flags.social_security {
            rate + bracket.value(RateField::OlderAge).value() - social_share
        } else {
            rate - social_share
        };

        numerator.checked_div(rate).unwrap_or_else(|| {
            warn!(%rate, "standard social rate is zero, credits left unscaled");
            Decimal::ONE
        })
    }
}
