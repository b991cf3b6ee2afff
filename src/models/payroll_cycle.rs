//! Payroll cycle model and its status progression.
//!
//! A payroll cycle is one payroll run for a defined period. It is born
//! at `pending_approval`, because its inputs were already individually
//! verified, and its totals are frozen at creation. Advancement beyond
//! `pending_approval` is an administrative action; nothing in the
//! engine assumes it ever happens.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};

use super::PayPeriod;

/// Status of a payroll cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CycleStatus {
    /// Being assembled.
    Draft,
    /// Source data under verification.
    Verification,
    /// Awaiting finance approval.
    PendingApproval,
    /// Approved for payment.
    Approved,
    /// Paid out. Terminal.
    Paid,
}

impl CycleStatus {
    /// Canonical lowercase name, used in error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            CycleStatus::Draft => "draft",
            CycleStatus::Verification => "verification",
            CycleStatus::PendingApproval => "pending_approval",
            CycleStatus::Approved => "approved",
            CycleStatus::Paid => "paid",
        }
    }
}

/// One payroll run for a defined period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollCycle {
    /// Unique identifier for the cycle.
    pub id: Uuid,
    /// The pay period the cycle covers.
    pub period: PayPeriod,
    /// Current status.
    pub status: CycleStatus,
    /// Number of workers paid in this cycle.
    pub total_workers: u32,
    /// Sum of gross pay across all payslips.
    pub total_gross: Decimal,
    /// Sum of all deductions across all payslips.
    pub total_deductions: Decimal,
    /// Sum of net pay across all payslips.
    pub total_net: Decimal,
    /// The payroll officer who finalized the run.
    pub created_by: Uuid,
    /// When the cycle was created.
    pub created_at: DateTime<Utc>,
}

impl PayrollCycle {
    /// Creates a finalized cycle at `pending_approval` with frozen totals.
    pub fn finalized(
        period: PayPeriod,
        total_workers: u32,
        total_gross: Decimal,
        total_deductions: Decimal,
        total_net: Decimal,
        created_by: Uuid,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            period,
            status: CycleStatus::PendingApproval,
            total_workers,
            total_gross,
            total_deductions,
            total_net,
            created_by,
            created_at: Utc::now(),
        }
    }

    /// Advances the cycle one step along
    /// `draft → verification → pending_approval → approved → paid`.
    ///
    /// # Errors
    ///
    /// Returns an invalid-transition error when the cycle is already paid.
    pub fn advance(mut self) -> EngineResult<Self> {
        self.status = match self.status {
            CycleStatus::Draft => CycleStatus::Verification,
            CycleStatus::Verification => CycleStatus::PendingApproval,
            CycleStatus::PendingApproval => CycleStatus::Approved,
            CycleStatus::Approved => CycleStatus::Paid,
            CycleStatus::Paid => {
                return Err(EngineError::InvalidTransition {
                    record: "payroll cycle".to_string(),
                    from: "paid".to_string(),
                    action: "advance".to_string(),
                });
            }
        };
        Ok(self)
    }
}
