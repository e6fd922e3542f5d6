//! Progressive (marginal) bracket resolution.
//!
//! Every tax and credit line of both jurisdictions is computed by walking a
//! bracket table with [`RateResolver`]. A rate bracket contributes
//! `span * rate`, or `remaining * rate` rounded to cents for the last bracket
//! the base reaches. A fixed bracket sets the running amount to its flat
//! value: that value is the credit for the whole band, whatever part of the
//! band the base covers.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use salary_core::calculations::RateResolver;
//! use salary_core::{Bracket, RateField};
//!
//! let payroll = vec![
//!     Bracket::new(dec!(0), Some(dec!(37149)), dec!(0.0928)),
//!     Bracket::new(dec!(37150), Some(dec!(73031)), dec!(0.3693)),
//!     Bracket::new(dec!(73032), None, dec!(0.495)),
//! ];
//!
//! let tax = RateResolver::new(&payroll).resolve(dec!(38889), RateField::Standard);
//!
//! // 37149 * 0.0928 + round(1740 * 0.3693, 2)
//! assert_eq!(tax, dec!(4090.0072));
//! ```

use rust_decimal::Decimal;

use crate::calculations::common::round_cents;
use crate::models::{Bracket, RateField, RateValue};

#[derive(Debug, Clone, Copy)]
pub struct RateResolver<'a> {
    brackets: &'a [Bracket],
}

impl<'a> RateResolver<'a> {
    /// `brackets` must be in ascending order, as [`crate::BracketTable`]
    /// guarantees.
    pub fn new(brackets: &'a [Bracket]) -> Self {
        Self { brackets }
    }

    /// Accumulated amount for `base`, reading the `field` column.
    ///
    /// A base of zero or below is resolved against the first bracket only.
    /// A base beyond the last bounded bracket stops accumulating there.
    ///
    /// # Arguments
    ///
    /// * `base` - The income the table is applied to
    /// * `field` - The bracket column to read
    ///
    /// # Returns
    ///
    /// The tax or credit amount, positive for a positive rate table.
    pub fn resolve(
        &self,
        base: Decimal,
        field: RateField,
    ) -> Decimal {
        let mut amount = Decimal::ZERO;
        let mut remaining = base;

        for bracket in self.brackets {
            let value = bracket.value(field);

            match bracket.span() {
                Some(span) if remaining > span => {
                    amount = match value {
                        RateValue::Rate(rate) => amount + span * rate,
                        RateValue::Fixed(fixed) => fixed,
                    };
                    remaining -= span;
                }
                _ => {
                    amount = match value {
                        RateValue::Rate(rate) => amount + round_cents(remaining * rate),
                        RateValue::Fixed(fixed) => fixed,
                    };
                    break;
                }
            }
        }

        amount
    }
}
