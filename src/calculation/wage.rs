//! Wage computation for one worker over one pay period.
//!
//! This module composes the hour split, PAYE, and superannuation
//! calculations into a full pay breakdown. The function is pure: the
//! same worker attributes, timesheets, and configuration always produce
//! byte-identical output, and the order of the timesheet list is
//! irrelevant.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::config::PayrollConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{Worker, WorkerTimesheet};

use super::hours::split_hours;
use super::paye::calculate_paye;
use super::superannuation::calculate_employee_super;

/// The complete pay breakdown for one worker over one period.
///
/// Monetary fields are rounded to two decimal places individually, and
/// `net_pay` is derived from the rounded components, so
/// `net_pay = gross_earnings − fortnightly_paye − employee_super −
/// other_deductions` holds exactly at cent precision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WageBreakdown {
    /// Sum of verified hours over the supplied timesheets.
    pub approved_hours: Decimal,
    /// Hours paid at the base rate.
    pub regular_hours: Decimal,
    /// Hours paid at the overtime rate.
    pub overtime_hours: Decimal,
    /// Base-rate component of gross pay.
    pub regular_pay: Decimal,
    /// Overtime component of gross pay.
    pub overtime_pay: Decimal,
    /// Allowance component of gross pay, pre-summed by the caller.
    pub allowance_pay: Decimal,
    /// Total gross earnings.
    pub gross_earnings: Decimal,
    /// PAYE withheld for the period.
    pub fortnightly_paye: Decimal,
    /// Employee superannuation contribution.
    pub employee_super: Decimal,
    /// Caller-supplied other deductions, passed through.
    pub other_deductions: Decimal,
    /// Net pay after all deductions.
    pub net_pay: Decimal,
}

fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Calculates the full pay breakdown for one worker.
///
/// The caller supplies the worker's verified timesheets for the period
/// (already filtered by date and status), the pre-summed allowance
/// total, and any other deductions. Rate, residency, and
/// superannuation eligibility are read from the worker profile; the
/// overtime threshold, overtime multiplier, PAYE tables, and super rate
/// come from configuration.
///
/// # Errors
///
/// Returns a validation error for a negative rate, allowance total, or
/// deduction total, and a misconfiguration error when the configured
/// brackets and deductions would drive net pay below zero; that is a
/// deployment defect, never a payslip.
///
/// # Example
///
/// ```
/// use sitepay_engine::calculation::calculate_worker_pay;
/// use sitepay_engine::config::ConfigLoader;
/// use sitepay_engine::models::{AccountStatus, EmploymentType, Worker, WorkerTimesheet};
/// use chrono::{NaiveDate, NaiveTime};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
/// use uuid::Uuid;
///
/// let config = ConfigLoader::load("config/png").unwrap();
/// let worker = Worker {
///     id: Uuid::new_v4(),
///     full_name: "Kila Aihi".to_string(),
///     employee_no: None,
///     position: None,
///     employment_type: EmploymentType::FullTime,
///     hourly_rate: Decimal::from_str("25.00").unwrap(),
///     is_resident: true,
///     super_enabled: true,
///     account_status: AccountStatus::Active,
/// };
/// let entry = WorkerTimesheet::clock_entry(
///     worker.id,
///     None,
///     NaiveDate::from_ymd_opt(2026, 1, 12).unwrap(),
///     NaiveTime::from_hms_opt(7, 0, 0).unwrap(),
///     NaiveTime::from_hms_opt(15, 0, 0).unwrap(),
///     None,
///     None,
/// ).unwrap();
///
/// let pay = calculate_worker_pay(
///     &worker,
///     &[entry],
///     Decimal::ZERO,
///     Decimal::ZERO,
///     config.config(),
/// ).unwrap();
/// assert_eq!(pay.gross_earnings, Decimal::from_str("200.00").unwrap());
/// ```
pub fn calculate_worker_pay(
    worker: &Worker,
    timesheets: &[WorkerTimesheet],
    allowances: Decimal,
    other_deductions: Decimal,
    config: &PayrollConfig,
) -> EngineResult<WageBreakdown> {
    if worker.hourly_rate < Decimal::ZERO {
        return Err(EngineError::validation(
            "hourly_rate",
            format!("must not be negative, got {}", worker.hourly_rate),
        ));
    }
    if allowances < Decimal::ZERO {
        return Err(EngineError::validation("allowances", "must not be negative"));
    }
    if other_deductions < Decimal::ZERO {
        return Err(EngineError::validation(
            "other_deductions",
            "must not be negative",
        ));
    }

    let hours = split_hours(timesheets, config.standard_hours());

    let regular_pay = round_money(hours.regular_hours * worker.hourly_rate);
    let overtime_pay = round_money(
        hours.overtime_hours * worker.hourly_rate * config.overtime_multiplier(),
    );
    let allowance_pay = round_money(allowances);
    let gross_earnings = regular_pay + overtime_pay + allowance_pay;

    let fortnightly_paye = calculate_paye(gross_earnings, config.tax_table(worker.is_resident))?;
    let employee_super =
        calculate_employee_super(gross_earnings, worker.super_enabled, config.super_rate());
    let other_deductions = round_money(other_deductions);

    let net_pay = gross_earnings - fortnightly_paye - employee_super - other_deductions;
    if net_pay < Decimal::ZERO {
        return Err(EngineError::Misconfiguration {
            message: format!(
                "deductions of {} exceed gross earnings of {}",
                fortnightly_paye + employee_super + other_deductions,
                gross_earnings
            ),
        });
    }

    Ok(WageBreakdown {
        approved_hours: hours.approved_hours,
        regular_hours: hours.regular_hours,
        overtime_hours: hours.overtime_hours,
        regular_pay,
        overtime_pay,
        allowance_pay,
        gross_earnings,
        fortnightly_paye,
        employee_super,
        other_deductions,
        net_pay,
    })
}
