//! Pay period model.
//!
//! This module contains the [`PayPeriod`] type used to define the date
//! window for payroll runs and payslips.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Represents a pay period with an inclusive date range.
///
/// A pay period defines the time window for a payroll run. The start date
/// must not fall after the end date; [`PayPeriod::new`] enforces this
/// before any record is written.
///
/// # Example
///
/// ```
/// use sitepay_engine::models::PayPeriod;
/// use chrono::NaiveDate;
///
/// let period = PayPeriod::new(
///     NaiveDate::from_ymd_opt(2026, 1, 12).unwrap(),
///     NaiveDate::from_ymd_opt(2026, 1, 25).unwrap(),
/// ).unwrap();
///
/// assert!(period.contains(NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayPeriod {
    /// The start date of the pay period (inclusive).
    pub start: NaiveDate,
    /// The end date of the pay period (inclusive).
    pub end: NaiveDate,
}

impl PayPeriod {
    /// Creates a pay period, rejecting a window whose end precedes its start.
    pub fn new(start: NaiveDate, end: NaiveDate) -> EngineResult<Self> {
        if end < start {
            return Err(EngineError::validation(
                "period_end",
                format!("end date {} precedes start date {}", end, start),
            ));
        }
        Ok(Self { start, end })
    }

    /// Checks if a given date falls within this pay period.
    ///
    /// The check is inclusive of both start and end dates.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Checks whether two pay periods share at least one day.
    ///
    /// Used as the double-payment guard: a worker may not receive two
    /// payslips whose periods overlap.
    ///
    /// # Example
    ///
    /// ```
    /// use sitepay_engine::models::PayPeriod;
    /// use chrono::NaiveDate;
    ///
    /// let first = PayPeriod::new(
    ///     NaiveDate::from_ymd_opt(2026, 1, 12).unwrap(),
    ///     NaiveDate::from_ymd_opt(2026, 1, 25).unwrap(),
    /// ).unwrap();
    /// let second = PayPeriod::new(
    ///     NaiveDate::from_ymd_opt(2026, 1, 25).unwrap(),
    ///     NaiveDate::from_ymd_opt(2026, 2, 7).unwrap(),
    /// ).unwrap();
    /// assert!(first.overlaps(&second));
    /// ```
    pub fn overlaps(&self, other: &PayPeriod) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}
