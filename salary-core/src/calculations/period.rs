//! Conversion of a quoted salary to an annual gross amount.

use rust_decimal::Decimal;

use super::CalculationError;
use super::common::checked;
use crate::models::Period;

/// Annual gross for a salary quoted in one `period` unit.
///
/// | Period | Annual gross |
/// |--------|--------------|
/// | Year   | `salary` |
/// | Month  | `salary * 12` |
/// | Day    | `salary * working_days` |
/// | Hour   | `salary * working_weeks * working_hours` |
///
/// A negative result is clamped to zero.
///
/// # Arguments
///
/// * `salary` - The quoted salary
/// * `period` - The unit the salary is quoted in
/// * `working_hours` - Working hours per week
/// * `working_days` - Working days per year
/// * `working_weeks` - Working weeks per year
///
/// # Returns
///
/// The annual gross amount, never negative.
///
/// # Errors
///
/// Returns [`CalculationError::Overflow`] when the annual amount does not fit
/// in a `Decimal`.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use salary_core::Period;
/// use salary_core::calculations::annualize;
///
/// let gross = annualize(dec!(3000), Period::Month, dec!(40), dec!(255), dec!(52));
/// assert_eq!(gross, Ok(dec!(36000)));
/// ```
pub fn annualize(
    salary: Decimal,
    period: Period,
    working_hours: Decimal,
    working_days: Decimal,
    working_weeks: Decimal,
) -> Result<Decimal, CalculationError> {
    let annual = match period {
        Period::Year => Some(salary),
        Period::Month => salary.checked_mul(Decimal::from(12)),
        Period::Day => salary.checked_mul(working_days),
        Period::Hour => salary
            .checked_mul(working_weeks)
            .and_then(|weekly| weekly.checked_mul(working_hours)),
    };

    Ok(checked(annual, "annual gross")?.max(Decimal::ZERO))
}
