//! Individual worker timesheet model and its review lifecycle.
//!
//! A worker timesheet is one clock-in/clock-out record for one worker on
//! one date. It is created on clock-out, mutated only by review
//! transitions, and never deleted.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};

/// Review status of a worker timesheet.
///
/// `pending` is the only state that permits a transition; `approved`,
/// `rejected`, and `flagged` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkerTimesheetStatus {
    /// Awaiting review.
    Pending,
    /// Verified; eligible for payroll.
    Approved,
    /// Rejected by a reviewer.
    Rejected,
    /// Held out for follow-up.
    Flagged,
}

impl WorkerTimesheetStatus {
    /// Canonical lowercase name, used in error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkerTimesheetStatus::Pending => "pending",
            WorkerTimesheetStatus::Approved => "approved",
            WorkerTimesheetStatus::Rejected => "rejected",
            WorkerTimesheetStatus::Flagged => "flagged",
        }
    }
}

/// One clock-in/clock-out record for one worker on one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerTimesheet {
    /// Unique identifier for the record.
    pub id: Uuid,
    /// The worker the hours belong to.
    pub worker_id: Uuid,
    /// The supervisor who recorded the entry, if not self-recorded.
    #[serde(default)]
    pub supervisor_id: Option<Uuid>,
    /// The work date.
    pub date: NaiveDate,
    /// Clock-in time.
    pub clock_in: NaiveTime,
    /// Clock-out time. Must not precede clock-in.
    pub clock_out: NaiveTime,
    /// Hours worked, derived from the clock times. Non-negative.
    pub total_hours: Decimal,
    /// What the worker was doing.
    #[serde(default)]
    pub task_description: Option<String>,
    /// Per-record allowance in kina, summed by the payroll run.
    #[serde(default)]
    pub allowance_amount: Option<Decimal>,
    /// Review status.
    pub status: WorkerTimesheetStatus,
    /// The reviewer who approved, rejected, or flagged the record.
    #[serde(default)]
    pub reviewed_by: Option<Uuid>,
    /// Optional reviewer-supplied reason on rejection.
    #[serde(default)]
    pub rejection_reason: Option<String>,
}

impl WorkerTimesheet {
    /// Creates a pending clock entry, deriving `total_hours` from the
    /// clock times.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the clock-out precedes the
    /// clock-in or the allowance is negative.
    ///
    /// # Example
    ///
    /// ```
    /// use sitepay_engine::models::WorkerTimesheet;
    /// use chrono::{NaiveDate, NaiveTime};
    /// use rust_decimal::Decimal;
    /// use uuid::Uuid;
    ///
    /// let entry = WorkerTimesheet::clock_entry(
    ///     Uuid::new_v4(),
    ///     None,
    ///     NaiveDate::from_ymd_opt(2026, 1, 12).unwrap(),
    ///     NaiveTime::from_hms_opt(7, 0, 0).unwrap(),
    ///     NaiveTime::from_hms_opt(15, 30, 0).unwrap(),
    ///     Some("Formwork, block B".to_string()),
    ///     None,
    /// ).unwrap();
    /// assert_eq!(entry.total_hours, Decimal::new(85, 1)); // 8.5
    /// ```
    pub fn clock_entry(
        worker_id: Uuid,
        supervisor_id: Option<Uuid>,
        date: NaiveDate,
        clock_in: NaiveTime,
        clock_out: NaiveTime,
        task_description: Option<String>,
        allowance_amount: Option<Decimal>,
    ) -> EngineResult<Self> {
        let worked_minutes = (clock_out - clock_in).num_minutes();
        if worked_minutes < 0 {
            return Err(EngineError::validation(
                "clock_out",
                format!("{} precedes clock_in {}", clock_out, clock_in),
            ));
        }
        if let Some(allowance) = allowance_amount {
            if allowance < Decimal::ZERO {
                return Err(EngineError::validation(
                    "allowance_amount",
                    "must not be negative",
                ));
            }
        }

        Ok(Self {
            id: Uuid::new_v4(),
            worker_id,
            supervisor_id,
            date,
            clock_in,
            clock_out,
            total_hours: Decimal::new(worked_minutes, 0) / Decimal::new(60, 0),
            task_description,
            allowance_amount,
            status: WorkerTimesheetStatus::Pending,
            reviewed_by: None,
            rejection_reason: None,
        })
    }

    /// Approves a pending record, attaching the reviewer identity.
    ///
    /// # Errors
    ///
    /// Returns an invalid-transition error unless the record is pending.
    pub fn approve(mut self, reviewer: Uuid) -> EngineResult<Self> {
        self.require_pending("approve")?;
        self.status = WorkerTimesheetStatus::Approved;
        self.reviewed_by = Some(reviewer);
        Ok(self)
    }

    /// Rejects a pending record. A reason may be supplied but is not
    /// mandatory for worker timesheets.
    ///
    /// # Errors
    ///
    /// Returns an invalid-transition error unless the record is pending.
    pub fn reject(mut self, reviewer: Uuid, reason: Option<String>) -> EngineResult<Self> {
        self.require_pending("reject")?;
        self.status = WorkerTimesheetStatus::Rejected;
        self.reviewed_by = Some(reviewer);
        self.rejection_reason = reason.filter(|r| !r.trim().is_empty());
        Ok(self)
    }

    /// Flags a pending record for follow-up.
    ///
    /// # Errors
    ///
    /// Returns an invalid-transition error unless the record is pending.
    pub fn flag(mut self, reviewer: Uuid) -> EngineResult<Self> {
        self.require_pending("flag")?;
        self.status = WorkerTimesheetStatus::Flagged;
        self.reviewed_by = Some(reviewer);
        Ok(self)
    }

    fn require_pending(&self, action: &str) -> EngineResult<()> {
        if self.status != WorkerTimesheetStatus::Pending {
            return Err(EngineError::InvalidTransition {
                record: "worker timesheet".to_string(),
                from: self.status.as_str().to_string(),
                action: action.to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn entry() -> WorkerTimesheet {
        WorkerTimesheet::clock_entry(
            Uuid::new_v4(),
            None,
            NaiveDate::from_ymd_opt(2026, 1, 12).unwrap(),
            time(7, 0),
            time(15, 0),
            Some("Trenching".to_string()),
            None,
        )
        .unwrap()
    }

    #[test]
    fn test_total_hours_derived_from_clock_times() {
        let e = entry();
        assert_eq!(e.total_hours, dec("8"));
        assert_eq!(e.status, WorkerTimesheetStatus::Pending);
    }

    #[test]
    fn test_fractional_hours() {
        let e = WorkerTimesheet::clock_entry(
            Uuid::new_v4(),
            None,
            NaiveDate::from_ymd_opt(2026, 1, 12).unwrap(),
            time(7, 0),
            time(16, 45),
            None,
            None,
        )
        .unwrap();
        assert_eq!(e.total_hours, dec("9.75"));
    }

    #[test]
    fn test_zero_duration_entry_is_valid() {
        let e = WorkerTimesheet::clock_entry(
            Uuid::new_v4(),
            None,
            NaiveDate::from_ymd_opt(2026, 1, 12).unwrap(),
            time(7, 0),
            time(7, 0),
            None,
            None,
        )
        .unwrap();
        assert_eq!(e.total_hours, Decimal::ZERO);
    }

    #[test]
    fn test_clock_out_before_clock_in_is_rejected() {
        let result = WorkerTimesheet::clock_entry(
            Uuid::new_v4(),
            None,
            NaiveDate::from_ymd_opt(2026, 1, 12).unwrap(),
            time(15, 0),
            time(7, 0),
            None,
            None,
        );
        assert!(matches!(result, Err(EngineError::Validation { .. })));
    }

    #[test]
    fn test_negative_allowance_is_rejected() {
        let result = WorkerTimesheet::clock_entry(
            Uuid::new_v4(),
            None,
            NaiveDate::from_ymd_opt(2026, 1, 12).unwrap(),
            time(7, 0),
            time(15, 0),
            None,
            Some(dec("-5")),
        );
        assert!(matches!(result, Err(EngineError::Validation { .. })));
    }

    #[test]
    fn test_approve_attaches_reviewer() {
        let reviewer = Uuid::new_v4();
        let approved = entry().approve(reviewer).unwrap();
        assert_eq!(approved.status, WorkerTimesheetStatus::Approved);
        assert_eq!(approved.reviewed_by, Some(reviewer));
    }

    #[test]
    fn test_reject_keeps_optional_reason() {
        let rejected = entry()
            .reject(Uuid::new_v4(), Some("Clocked out early".to_string()))
            .unwrap();
        assert_eq!(rejected.status, WorkerTimesheetStatus::Rejected);
        assert_eq!(
            rejected.rejection_reason,
            Some("Clocked out early".to_string())
        );
    }

    #[test]
    fn test_reject_without_reason_is_allowed() {
        let rejected = entry().reject(Uuid::new_v4(), None).unwrap();
        assert_eq!(rejected.status, WorkerTimesheetStatus::Rejected);
        assert_eq!(rejected.rejection_reason, None);
    }

    #[test]
    fn test_blank_reason_is_dropped() {
        let rejected = entry()
            .reject(Uuid::new_v4(), Some("   ".to_string()))
            .unwrap();
        assert_eq!(rejected.rejection_reason, None);
    }

    #[test]
    fn test_flag_is_terminal() {
        let flagged = entry().flag(Uuid::new_v4()).unwrap();
        assert_eq!(flagged.status, WorkerTimesheetStatus::Flagged);
        let result = flagged.approve(Uuid::new_v4());
        assert!(matches!(
            result,
            Err(EngineError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_approved_record_cannot_be_reviewed_again() {
        let approved = entry().approve(Uuid::new_v4()).unwrap();
        for result in [
            approved.clone().approve(Uuid::new_v4()),
            approved.clone().reject(Uuid::new_v4(), None),
            approved.clone().flag(Uuid::new_v4()),
        ] {
            match result {
                Err(EngineError::InvalidTransition { from, .. }) => {
                    assert_eq!(from, "approved");
                }
                other => panic!("expected invalid transition, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_serde_round_trip() {
        let e = entry();
        let json = serde_json::to_string(&e).unwrap();
        assert!(json.contains("\"status\":\"pending\""));
        let back: WorkerTimesheet = serde_json::from_str(&json).unwrap();
        assert_eq!(e, back);
    }
}
