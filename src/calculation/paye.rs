//! Fortnightly PAYE calculation.
//!
//! Tax is computed from gross earnings via a progressive bracket table
//! that differs by residency. The table is data (see `config/png/tax.yaml`):
//! tax = base amount of the matching bracket + marginal rate × (gross −
//! bracket lower bound).

use rust_decimal::{Decimal, RoundingStrategy};

use crate::config::TaxTable;
use crate::error::{EngineError, EngineResult};

/// Calculates the PAYE withholding for one period's gross earnings.
///
/// The result is rounded to the toea (two decimal places) as the final
/// step; nothing inside the bracket formula is rounded.
///
/// # Arguments
///
/// * `gross` - Gross earnings for the period
/// * `table` - The bracket table for the worker's residency state
///
/// # Errors
///
/// Returns a validation error for negative gross earnings, or a
/// misconfiguration error when the table does not cover the amount
/// (impossible for a table that passed validation).
///
/// # Example
///
/// ```
/// use sitepay_engine::calculation::calculate_paye;
/// use sitepay_engine::config::{TaxBracket, TaxTable};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let table = TaxTable {
///     brackets: vec![
///         TaxBracket {
///             lower: Decimal::ZERO,
///             upper: Some(Decimal::from_str("1000").unwrap()),
///             rate: Decimal::ZERO,
///             base: Decimal::ZERO,
///         },
///         TaxBracket {
///             lower: Decimal::from_str("1000").unwrap(),
///             upper: None,
///             rate: Decimal::from_str("0.22").unwrap(),
///             base: Decimal::ZERO,
///         },
///     ],
/// };
///
/// let tax = calculate_paye(Decimal::from_str("2000").unwrap(), &table).unwrap();
/// assert_eq!(tax, Decimal::from_str("220.00").unwrap());
/// ```
pub fn calculate_paye(gross: Decimal, table: &TaxTable) -> EngineResult<Decimal> {
    if gross < Decimal::ZERO {
        return Err(EngineError::validation(
            "gross_earnings",
            format!("must not be negative, got {}", gross),
        ));
    }

    let bracket = table.bracket_for(gross)?;
    let tax = bracket.base + bracket.rate * (gross - bracket.lower);
    Ok(tax.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
}
