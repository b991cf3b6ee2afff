//! Site timesheet operations: recording, submission, authorization,
//! rejection.
//!
//! Every operation takes the acting identity explicitly and checks its
//! role before touching the store. Transitions run under the store's
//! lock, so a record that was already processed by another clerk
//! surfaces as an invalid-transition error rather than a lost update.

use chrono::Utc;
use tracing::{info, warn};

use crate::error::{EngineError, EngineResult};
use crate::models::{Actor, SiteTimesheet, SiteTimesheetDraft};
use crate::store::Store;

/// Records a new site timesheet for one of the supervisor's assigned
/// projects, either kept as a draft or submitted for authorization.
///
/// # Errors
///
/// Returns a forbidden error unless the actor is a supervisor, a
/// validation error when the supervisor holds no assignment for the
/// project or a line item is negative, and storage errors unchanged.
pub fn record_site_timesheet(
    store: &dyn Store,
    actor: Actor,
    draft: SiteTimesheetDraft,
    submit: bool,
) -> EngineResult<SiteTimesheet> {
    if !matches!(actor.role, crate::models::Role::Supervisor) {
        return Err(EngineError::Forbidden {
            role: actor.role.as_str().to_string(),
            action: "record site timesheets".to_string(),
        });
    }

    let assigned = store
        .assignments_for(actor.id)?
        .iter()
        .any(|a| a.project_id == draft.project_id);
    if !assigned {
        return Err(EngineError::validation(
            "project_id",
            "supervisor is not assigned to this project",
        ));
    }

    let mut sheet = SiteTimesheet::record(SiteTimesheetDraft {
        foreman_id: actor.id,
        ..draft
    })?;
    if submit {
        sheet = sheet.submit()?;
    }

    let stored = store.insert_site_timesheet(sheet)?;
    info!(
        site_timesheet_id = %stored.id,
        project_id = %stored.project_id,
        status = stored.status.as_str(),
        "Site timesheet recorded"
    );
    Ok(stored)
}

/// Authorizes a submitted site timesheet, stamping the clerk identity
/// and the authorization time.
///
/// # Errors
///
/// Returns a forbidden error unless the actor may authorize sites, a
/// not-found error for an unknown id, and an invalid-transition error
/// ("already processed") when the record is not in submitted status.
pub fn authorize_site_timesheet(
    store: &dyn Store,
    actor: Actor,
    id: uuid::Uuid,
) -> EngineResult<SiteTimesheet> {
    if !actor.role.can_authorize_sites() {
        return Err(EngineError::Forbidden {
            role: actor.role.as_str().to_string(),
            action: "authorize site timesheets".to_string(),
        });
    }

    let result = store.transition_site_timesheet(id, &|ts| ts.authorize(actor.id, Utc::now()));
    match &result {
        Ok(sheet) => info!(
            site_timesheet_id = %sheet.id,
            clerk_id = %actor.id,
            "Site timesheet authorized"
        ),
        Err(err) => warn!(site_timesheet_id = %id, error = %err, "Authorization failed"),
    }
    result
}

/// Rejects a submitted site timesheet with a mandatory reason. The
/// rejecting clerk is recorded as the accountable identity.
///
/// The reason is validated before the store is touched, so a rejection
/// without a reason never mutates the record.
///
/// # Errors
///
/// Returns a forbidden error unless the actor may authorize sites, a
/// validation error for an empty reason, a not-found error for an
/// unknown id, and an invalid-transition error when the record is not
/// in submitted status.
pub fn reject_site_timesheet(
    store: &dyn Store,
    actor: Actor,
    id: uuid::Uuid,
    reason: &str,
) -> EngineResult<SiteTimesheet> {
    if !actor.role.can_authorize_sites() {
        return Err(EngineError::Forbidden {
            role: actor.role.as_str().to_string(),
            action: "reject site timesheets".to_string(),
        });
    }
    if reason.trim().is_empty() {
        return Err(EngineError::validation(
            "rejection_reason",
            "must not be empty",
        ));
    }

    let result = store.transition_site_timesheet(id, &|ts| ts.reject(actor.id, reason));
    match &result {
        Ok(sheet) => info!(
            site_timesheet_id = %sheet.id,
            clerk_id = %actor.id,
            "Site timesheet rejected"
        ),
        Err(err) => warn!(site_timesheet_id = %id, error = %err, "Rejection failed"),
    }
    result
}
