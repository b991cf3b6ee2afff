//! Payslip model.
//!
//! A payslip is the frozen, per-worker output of a payroll cycle. Every
//! monetary field is a snapshot taken at generation time, so a later rate
//! change on the worker profile never alters an existing payslip, and
//! the engine offers no in-place edit. Correcting a payslip means
//! voiding the cycle and running a new one.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::PayPeriod;

/// Status of a payslip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayslipStatus {
    /// Generated by a finalized payroll run.
    Generated,
    /// Paid out.
    Paid,
}

/// The frozen, per-worker output of a payroll cycle.
///
/// Holds the identities `gross_pay = regular + overtime + allowance`
/// and `net_pay = gross_pay − tax − nasfund − other` to cent precision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payslip {
    /// Unique identifier for the payslip.
    pub id: Uuid,
    /// The payroll cycle this payslip belongs to.
    pub cycle_id: Uuid,
    /// The worker being paid.
    pub worker_id: Uuid,
    /// The pay period covered.
    pub period: PayPeriod,
    /// Verified hours paid in this period.
    pub total_hours: Decimal,
    /// Hourly rate snapshot at generation time, not a live reference.
    pub hourly_rate: Decimal,
    /// Total gross pay.
    pub gross_pay: Decimal,
    /// Overtime component of gross pay.
    pub overtime_pay: Decimal,
    /// Allowance component of gross pay.
    pub allowance_pay: Decimal,
    /// PAYE tax withheld.
    pub tax_deduction: Decimal,
    /// Nasfund employee superannuation contribution.
    pub nasfund_deduction: Decimal,
    /// Other caller-supplied deductions.
    pub other_deductions: Decimal,
    /// Net pay after all deductions.
    pub net_pay: Decimal,
    /// Payslip status.
    pub status: PayslipStatus,
    /// The payroll officer who generated the payslip.
    pub generated_by: Uuid,
}

impl Payslip {
    /// Sum of all deductions on the payslip.
    pub fn deductions_total(&self) -> Decimal {
        self.tax_deduction + self.nasfund_deduction + self.other_deductions
    }
}
