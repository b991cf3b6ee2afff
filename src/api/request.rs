//! Request types for the timesheet and payroll API.
//!
//! Every mutating request carries the acting identity explicitly; the
//! engine trusts the session collaborator to have authenticated it.

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{
    AccountStatus, Actor, EmploymentType, EquipmentLine, MaterialLine, ProductionLine, Role,
    ShiftPeriod, Worker,
};
use crate::service::ReviewAction;

/// The acting identity attached to a request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ActorRequest {
    /// The caller's user id.
    pub id: Uuid,
    /// The role the caller acts under.
    pub role: Role,
}

impl From<ActorRequest> for Actor {
    fn from(req: ActorRequest) -> Self {
        Actor {
            id: req.id,
            role: req.role,
        }
    }
}

/// Request body for `POST /site-timesheets`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSiteTimesheetRequest {
    /// The recording supervisor.
    pub actor: ActorRequest,
    /// The project worked on.
    pub project_id: Uuid,
    /// The work date.
    pub date: NaiveDate,
    /// The shift covered.
    pub shift: ShiftPeriod,
    /// Headcount on site.
    pub number_of_workers: u32,
    /// Equipment usage lines.
    #[serde(default)]
    pub equipment: Vec<EquipmentLine>,
    /// Material consumption lines.
    #[serde(default)]
    pub materials: Vec<MaterialLine>,
    /// Production output lines.
    #[serde(default)]
    pub production: Vec<ProductionLine>,
    /// Free-text remarks.
    #[serde(default)]
    pub remarks: Option<String>,
    /// Submit for authorization (`true`) or keep as a draft (`false`).
    #[serde(default = "default_submit")]
    pub submit: bool,
}

fn default_submit() -> bool {
    true
}

/// Request body for `POST /site-timesheets/{id}/authorize`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorizeRequest {
    /// The authorizing clerk.
    pub actor: ActorRequest,
}

/// Request body for `POST /site-timesheets/{id}/reject`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RejectRequest {
    /// The rejecting clerk.
    pub actor: ActorRequest,
    /// The mandatory rejection reason.
    pub reason: String,
}

/// Request body for `POST /worker-timesheets`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClockEntryRequest {
    /// The caller (the worker themselves, or a supervisor).
    pub actor: ActorRequest,
    /// The worker the hours belong to.
    pub worker_id: Uuid,
    /// The work date.
    pub date: NaiveDate,
    /// Clock-in time.
    pub clock_in: NaiveTime,
    /// Clock-out time.
    pub clock_out: NaiveTime,
    /// What the worker was doing.
    #[serde(default)]
    pub task_description: Option<String>,
    /// Per-record allowance in kina.
    #[serde(default)]
    pub allowance_amount: Option<Decimal>,
}

/// Request body for `POST /worker-timesheets/{id}/review`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewRequest {
    /// The reviewer.
    pub actor: ActorRequest,
    /// Approve, reject, or flag.
    pub action: ReviewAction,
    /// Optional reason, recorded on rejection.
    #[serde(default)]
    pub reason: Option<String>,
}

/// Worker attributes for the pure wage-calculation endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WageWorkerRequest {
    /// Worker id (defaults to a fresh id; the endpoint stores nothing).
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    /// The worker's display name.
    pub full_name: String,
    /// The type of employment arrangement.
    pub employment_type: EmploymentType,
    /// The hourly rate in kina.
    pub hourly_rate: Decimal,
    /// Whether the worker is a tax resident.
    pub is_resident: bool,
    /// Whether the worker contributes to superannuation.
    pub super_enabled: bool,
}

impl From<WageWorkerRequest> for Worker {
    fn from(req: WageWorkerRequest) -> Self {
        Worker {
            id: req.id,
            full_name: req.full_name,
            employee_no: None,
            position: None,
            employment_type: req.employment_type,
            hourly_rate: req.hourly_rate,
            is_resident: req.is_resident,
            super_enabled: req.super_enabled,
            account_status: AccountStatus::Active,
        }
    }
}

/// One verified clock entry supplied to the wage-calculation endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WageEntryRequest {
    /// The work date.
    pub date: NaiveDate,
    /// Clock-in time.
    pub clock_in: NaiveTime,
    /// Clock-out time.
    pub clock_out: NaiveTime,
    /// Per-record allowance in kina.
    #[serde(default)]
    pub allowance_amount: Option<Decimal>,
}

/// Request body for `POST /wages/calculate`.
///
/// A pure computation: the endpoint persists nothing and trusts the
/// caller to have supplied verified, period-filtered entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WageCalculationRequest {
    /// The worker attributes the computation runs on.
    pub worker: WageWorkerRequest,
    /// The verified entries for the period.
    pub entries: Vec<WageEntryRequest>,
    /// Other deductions to pass through.
    #[serde(default)]
    pub other_deductions: Option<Decimal>,
}

/// Request body for `POST /payroll/preview` and `POST /payroll/finalize`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollRunRequest {
    /// The payroll officer running the cycle.
    pub actor: ActorRequest,
    /// Start of the pay period (inclusive).
    pub period_start: NaiveDate,
    /// End of the pay period (inclusive).
    pub period_end: NaiveDate,
    /// Other deductions per worker, passed through to the computation.
    #[serde(default)]
    pub other_deductions: HashMap<Uuid, Decimal>,
}
