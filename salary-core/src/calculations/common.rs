//! Rounding helpers shared by the rate resolver and both pipelines.

use rust_decimal::{Decimal, RoundingStrategy};
use tracing::warn;

use super::CalculationError;

/// Rounds to two decimal places, ties to even.
///
/// This is the rounding applied to the partial amount of the last bracket a
/// base reaches. Ties are decided on the exact decimal value, so `43043.715`
/// becomes `43043.72`. Binary floating point would see that value as slightly
/// below the midpoint and round it down.
///
/// # Arguments
///
/// * `value` - The decimal value to round
///
/// # Returns
///
/// The value rounded to two decimal places.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use salary_core::calculations::common::round_cents;
///
/// assert_eq!(round_cents(dec!(642.582)), dec!(642.58));
/// assert_eq!(round_cents(dec!(0.125)), dec!(0.12));
/// assert_eq!(round_cents(dec!(0.135)), dec!(0.14));
/// assert_eq!(round_cents(dec!(-77.9247)), dec!(-77.92));
/// ```
pub fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven)
}

/// Rounds toward negative infinity to a whole amount.
///
/// ```
/// use rust_decimal_macros::dec;
/// use salary_core::calculations::common::floor;
///
/// assert_eq!(floor(dec!(38889.2)), dec!(38889));
/// assert_eq!(floor(dec!(-7307.18)), dec!(-7308));
/// ```
pub fn floor(value: Decimal) -> Decimal {
    value.floor()
}

/// `floor(numerator / denominator)`, or zero when the denominator is zero.
///
/// `what` names the figure for the warning logged in the zero case.
pub fn floor_div(
    numerator: Decimal,
    denominator: Decimal,
    what: &'static str,
) -> Decimal {
    match numerator.checked_div(denominator) {
        Some(quotient) => quotient.floor(),
        None => {
            warn!(%numerator, %denominator, figure = what, "division failed, reporting zero");
            Decimal::ZERO
        }
    }
}

/// Unwraps a checked operation, reporting `figure` when it overflowed.
///
/// ```
/// use rust_decimal::Decimal;
/// use rust_decimal_macros::dec;
/// use salary_core::CalculationError;
/// use salary_core::calculations::common::checked;
///
/// assert_eq!(checked(dec!(3000).checked_mul(dec!(12)), "annual gross"), Ok(dec!(36000)));
/// assert_eq!(
///     checked(Decimal::MAX.checked_mul(dec!(12)), "annual gross"),
///     Err(CalculationError::Overflow { figure: "annual gross" })
/// );
/// ```
pub fn checked(
    value: Option<Decimal>,
    figure: &'static str,
) -> Result<Decimal, CalculationError> {
    value.ok_or(CalculationError::Overflow { figure })
}

/// Clamps a tax total so it never turns into a payment to the taxpayer.
pub fn non_positive(value: Decimal) -> Decimal {
    value.min(Decimal::ZERO)
}

/// Exempt income as a whole percentage of gross, zero without exemption.
pub fn ruling_percentage(
    exempt: Decimal,
    gross: Decimal,
) -> Decimal {
    if exempt.is_zero() {
        return Decimal::ZERO;
    }
    floor_div(exempt, gross / Decimal::ONE_HUNDRED, "ruling percentage")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // round_cents tests
    // =========================================================================

    #[test]
    fn round_cents_rounds_down_below_midpoint() {
        assert_eq!(round_cents(dec!(123.454)), dec!(123.45));
    }

    #[test]
    fn round_cents_rounds_up_above_midpoint() {
        assert_eq!(round_cents(dec!(123.456)), dec!(123.46));
    }

    #[test]
    fn round_cents_ties_go_to_even() {
        assert_eq!(round_cents(dec!(123.445)), dec!(123.44));
        assert_eq!(round_cents(dec!(123.455)), dec!(123.46));
    }

    #[test]
    fn round_cents_decides_ties_on_exact_decimal() {
        assert_eq!(round_cents(dec!(43043.715)), dec!(43043.72));
        assert_eq!(round_cents(dec!(43043.725)), dec!(43043.72));
    }

    #[test]
    fn round_cents_handles_negative_values() {
        assert_eq!(round_cents(dec!(-989.0966)), dec!(-989.10));
    }

    #[test]
    fn round_cents_preserves_already_rounded_values() {
        assert_eq!(round_cents(dec!(2988.00)), dec!(2988.00));
    }

    // =========================================================================
    // floor tests
    // =========================================================================

    #[test]
    fn floor_truncates_positive_fraction() {
        assert_eq!(floor(dec!(4444.444)), dec!(4444));
    }

    #[test]
    fn floor_moves_negative_fraction_down() {
        assert_eq!(floor(dec!(-2714.55)), dec!(-2715));
    }

    #[test]
    fn floor_keeps_whole_values() {
        assert_eq!(floor(dec!(-2988)), dec!(-2988));
    }

    // =========================================================================
    // floor_div tests
    // =========================================================================

    #[test]
    fn floor_div_divides_and_floors() {
        assert_eq!(floor_div(dec!(48247.8), dec!(12), "month"), dec!(4020));
    }

    #[test]
    fn floor_div_by_zero_is_zero() {
        assert_eq!(floor_div(dec!(48247.8), dec!(0), "hour"), dec!(0));
    }

    // =========================================================================
    // checked tests
    // =========================================================================

    #[test]
    fn checked_passes_value_through() {
        assert_eq!(checked(Some(dec!(36000)), "annual gross"), Ok(dec!(36000)));
    }

    #[test]
    fn checked_reports_overflowed_figure() {
        assert_eq!(
            checked(Decimal::MAX.checked_add(Decimal::ONE), "income tax"),
            Err(CalculationError::Overflow {
                figure: "income tax"
            })
        );
    }

    // =========================================================================
    // non_positive tests
    // =========================================================================

    #[test]
    fn non_positive_keeps_negative() {
        assert_eq!(non_positive(dec!(-7308)), dec!(-7308));
    }

    #[test]
    fn non_positive_clamps_positive_to_zero() {
        assert_eq!(non_positive(dec!(1200)), dec!(0));
    }

    // =========================================================================
    // ruling_percentage tests
    // =========================================================================

    #[test]
    fn ruling_percentage_floors_share_of_gross() {
        assert_eq!(ruling_percentage(dec!(16666.8), dec!(60000)), dec!(27));
    }

    #[test]
    fn ruling_percentage_without_exemption_is_zero() {
        assert_eq!(ruling_percentage(dec!(0), dec!(0)), dec!(0));
        assert_eq!(ruling_percentage(dec!(0), dec!(60000)), dec!(0));
    }

    #[test]
    fn ruling_percentage_of_largest_gross() {
        assert_eq!(
            ruling_percentage(dec!(24000000000000000000000000000), Decimal::MAX),
            dec!(30)
        );
    }
}
