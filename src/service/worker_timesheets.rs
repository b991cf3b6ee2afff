//! Worker timesheet operations: clock entry and review.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{Actor, Role, WorkerTimesheet};
use crate::store::Store;

/// The review outcome a reviewer selects for a pending record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewAction {
    /// Verify the hours for payroll.
    Approve,
    /// Reject the record, optionally with a reason.
    Reject,
    /// Hold the record out for follow-up.
    Flag,
}

/// Stores a clock entry for a worker.
///
/// Workers record their own entries; a supervisor may record one on a
/// worker's behalf, in which case the supervisor is noted on the record.
///
/// # Errors
///
/// Returns a forbidden error for any other role, a not-found error for
/// an unknown worker, and validation errors from the clock times.
pub fn record_clock_entry(
    store: &dyn Store,
    actor: Actor,
    worker_id: Uuid,
    date: chrono::NaiveDate,
    clock_in: chrono::NaiveTime,
    clock_out: chrono::NaiveTime,
    task_description: Option<String>,
    allowance_amount: Option<rust_decimal::Decimal>,
) -> EngineResult<WorkerTimesheet> {
    let supervisor_id = match actor.role {
        Role::Worker if actor.id == worker_id => None,
        Role::Supervisor => Some(actor.id),
        _ => {
            return Err(EngineError::Forbidden {
                role: actor.role.as_str().to_string(),
                action: "record clock entries for this worker".to_string(),
            });
        }
    };

    // The worker must exist before hours can be booked against them.
    store.worker(worker_id)?;

    let entry = WorkerTimesheet::clock_entry(
        worker_id,
        supervisor_id,
        date,
        clock_in,
        clock_out,
        task_description,
        allowance_amount,
    )?;
    let stored = store.insert_worker_timesheet(entry)?;
    info!(
        worker_timesheet_id = %stored.id,
        worker_id = %worker_id,
        hours = %stored.total_hours,
        "Clock entry recorded"
    );
    Ok(stored)
}

/// Reviews a pending worker timesheet: approve, reject, or flag.
///
/// # Errors
///
/// Returns a forbidden error unless the actor may review worker
/// timesheets, a not-found error for an unknown id, and an
/// invalid-transition error when the record is no longer pending.
pub fn review_worker_timesheet(
    store: &dyn Store,
    actor: Actor,
    id: Uuid,
    action: ReviewAction,
    reason: Option<String>,
) -> EngineResult<WorkerTimesheet> {
    if !actor.role.can_review_worker_timesheets() {
        return Err(EngineError::Forbidden {
            role: actor.role.as_str().to_string(),
            action: "review worker timesheets".to_string(),
        });
    }

    let result = store.transition_worker_timesheet(id, &|ts| match action {
        ReviewAction::Approve => ts.approve(actor.id),
        ReviewAction::Reject => ts.reject(actor.id, reason.clone()),
        ReviewAction::Flag => ts.flag(actor.id),
    });
    match &result {
        Ok(sheet) => info!(
            worker_timesheet_id = %sheet.id,
            reviewer_id = %actor.id,
            status = sheet.status.as_str(),
            "Worker timesheet reviewed"
        ),
        Err(err) => warn!(worker_timesheet_id = %id, error = %err, "Review failed"),
    }
    result
}
