//! Approved-hours summation and overtime split.
//!
//! This module turns a worker's verified timesheets for a period into
//! the hour totals the wage calculation runs on. The overtime threshold
//! is jurisdiction configuration, not business knowledge baked into the
//! algorithm.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::WorkerTimesheet;

/// Hour totals for one worker over one pay period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoursBreakdown {
    /// Sum of `total_hours` over the supplied timesheets.
    pub approved_hours: Decimal,
    /// Hours paid at the base rate.
    pub regular_hours: Decimal,
    /// Hours beyond the standard threshold, paid at the overtime rate.
    pub overtime_hours: Decimal,
}

/// Splits a worker's period hours into regular and overtime components.
///
/// The caller is responsible for having filtered the timesheets to the
/// desired period and verification status; this function trusts its
/// input list. Summation is order-independent, so permuting the list
/// never changes the result.
///
/// # Arguments
///
/// * `timesheets` - The verified timesheets for the period
/// * `standard_hours` - Hours per period before overtime applies
///
/// # Example
///
/// ```
/// use sitepay_engine::calculation::split_hours;
/// use sitepay_engine::models::WorkerTimesheet;
/// use chrono::{NaiveDate, NaiveTime};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
/// use uuid::Uuid;
///
/// let worker = Uuid::new_v4();
/// let entry = WorkerTimesheet::clock_entry(
///     worker,
///     None,
///     NaiveDate::from_ymd_opt(2026, 1, 12).unwrap(),
///     NaiveTime::from_hms_opt(7, 0, 0).unwrap(),
///     NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
///     None,
///     None,
/// ).unwrap();
///
/// let hours = split_hours(&[entry], Decimal::from_str("8").unwrap());
/// assert_eq!(hours.regular_hours, Decimal::from_str("8").unwrap());
/// assert_eq!(hours.overtime_hours, Decimal::from_str("2").unwrap());
/// ```
pub fn split_hours(timesheets: &[WorkerTimesheet], standard_hours: Decimal) -> HoursBreakdown {
    let approved_hours: Decimal = timesheets.iter().map(|t| t.total_hours).sum();

    let overtime_hours = if approved_hours > standard_hours {
        approved_hours - standard_hours
    } else {
        Decimal::ZERO
    };

    HoursBreakdown {
        approved_hours,
        regular_hours: approved_hours - overtime_hours,
        overtime_hours,
    }
}
