//! Employee superannuation contribution.
//!
//! A flat configured percentage of gross earnings (6% under the Nasfund
//! scheme), applied only when the worker's eligibility flag is set.

use rust_decimal::{Decimal, RoundingStrategy};

/// Calculates the employee superannuation contribution for a period.
///
/// Returns zero for workers without superannuation; otherwise the
/// configured rate applied to gross earnings, rounded to two decimal
/// places.
///
/// # Example
///
/// ```
/// use sitepay_engine::calculation::calculate_employee_super;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let rate = Decimal::from_str("0.06").unwrap();
/// let gross = Decimal::from_str("2000.00").unwrap();
/// assert_eq!(
///     calculate_employee_super(gross, true, rate),
///     Decimal::from_str("120.00").unwrap(),
/// );
/// assert_eq!(calculate_employee_super(gross, false, rate), Decimal::ZERO);
/// ```
pub fn calculate_employee_super(gross: Decimal, super_enabled: bool, rate: Decimal) -> Decimal {
    if !super_enabled {
        return Decimal::ZERO;
    }
    (gross * rate).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
