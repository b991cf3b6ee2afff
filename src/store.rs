//! Record store contract and in-memory implementation.
//!
//! The engine consumes persistent storage through the narrow [`Store`]
//! trait: typed finds and inserts, plus transition updates that apply a
//! pure lifecycle method under the store's lock. Two callers racing on
//! the same record serialize there; the loser observes the new status
//! and receives the invalid-transition error ("already processed")
//! instead of silently clobbering the first write.
//!
//! [`MemoryStore`] is the in-process implementation: per-kind maps
//! behind mutexes, read-your-writes, and an on-write change event per
//! record kind.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    PayrollCycle, Payslip, Project, ProjectAssignment, SiteTimesheet, SiteTimesheetStatus, Worker,
    WorkerTimesheet, WorkerTimesheetStatus,
};
use crate::notify::{ChangeHub, RecordKind};

/// Filter for worker-timesheet queries. Unset fields match everything.
#[derive(Debug, Clone, Default)]
pub struct WorkerTimesheetFilter {
    /// Restrict to one worker.
    pub worker_id: Option<Uuid>,
    /// Restrict to one review status.
    pub status: Option<WorkerTimesheetStatus>,
    /// Earliest date (inclusive).
    pub from: Option<NaiveDate>,
    /// Latest date (inclusive).
    pub to: Option<NaiveDate>,
}

/// Filter for site-timesheet queries. Unset fields match everything.
#[derive(Debug, Clone, Default)]
pub struct SiteTimesheetFilter {
    /// Restrict to one project.
    pub project_id: Option<Uuid>,
    /// Restrict to one recording foreman.
    pub foreman_id: Option<Uuid>,
    /// Restrict to one authorization status.
    pub status: Option<SiteTimesheetStatus>,
}

/// The persistence contract the engine is written against.
///
/// Implementations must guarantee that a successful write is visible to
/// every subsequent read (read-your-writes), and that transition updates
/// are atomic: the lifecycle method either applies entirely or the
/// record is left untouched.
pub trait Store: Send + Sync {
    /// Stores a worker profile.
    fn insert_worker(&self, worker: Worker) -> EngineResult<Worker>;
    /// Fetches a worker profile by id.
    fn worker(&self, id: Uuid) -> EngineResult<Worker>;
    /// Returns all worker profiles.
    fn workers(&self) -> EngineResult<Vec<Worker>>;
    /// Replaces a worker's hourly rate.
    fn update_worker_rate(&self, id: Uuid, rate: Decimal) -> EngineResult<Worker>;

    /// Stores a project.
    fn insert_project(&self, project: Project) -> EngineResult<Project>;
    /// Returns all projects.
    fn projects(&self) -> EngineResult<Vec<Project>>;
    /// Stores a project assignment.
    fn insert_assignment(&self, assignment: ProjectAssignment)
    -> EngineResult<ProjectAssignment>;
    /// Returns all assignments held by one user.
    fn assignments_for(&self, user_id: Uuid) -> EngineResult<Vec<ProjectAssignment>>;

    /// Stores a worker timesheet.
    fn insert_worker_timesheet(&self, timesheet: WorkerTimesheet)
    -> EngineResult<WorkerTimesheet>;
    /// Returns worker timesheets matching the filter, newest date first.
    fn worker_timesheets(
        &self,
        filter: &WorkerTimesheetFilter,
    ) -> EngineResult<Vec<WorkerTimesheet>>;
    /// Applies a lifecycle transition to one worker timesheet under the
    /// store's lock.
    fn transition_worker_timesheet(
        &self,
        id: Uuid,
        apply: &dyn Fn(WorkerTimesheet) -> EngineResult<WorkerTimesheet>,
    ) -> EngineResult<WorkerTimesheet>;

    /// Stores a site timesheet.
    fn insert_site_timesheet(&self, timesheet: SiteTimesheet) -> EngineResult<SiteTimesheet>;
    /// Fetches a site timesheet by id.
    fn site_timesheet(&self, id: Uuid) -> EngineResult<SiteTimesheet>;
    /// Returns site timesheets matching the filter, newest date first.
    fn site_timesheets(&self, filter: &SiteTimesheetFilter) -> EngineResult<Vec<SiteTimesheet>>;
    /// Applies a lifecycle transition to one site timesheet under the
    /// store's lock.
    fn transition_site_timesheet(
        &self,
        id: Uuid,
        apply: &dyn Fn(SiteTimesheet) -> EngineResult<SiteTimesheet>,
    ) -> EngineResult<SiteTimesheet>;

    /// Stores a payroll cycle.
    fn insert_cycle(&self, cycle: PayrollCycle) -> EngineResult<PayrollCycle>;
    /// Returns all payroll cycles, newest first.
    fn cycles(&self) -> EngineResult<Vec<PayrollCycle>>;
    /// Applies a lifecycle transition to one payroll cycle under the
    /// store's lock.
    fn transition_cycle(
        &self,
        id: Uuid,
        apply: &dyn Fn(PayrollCycle) -> EngineResult<PayrollCycle>,
    ) -> EngineResult<PayrollCycle>;
    /// Deletes a payroll cycle. Compensating rollback only.
    fn delete_cycle(&self, id: Uuid) -> EngineResult<()>;

    /// Stores a payslip.
    fn insert_payslip(&self, payslip: Payslip) -> EngineResult<Payslip>;
    /// Returns all payslips held by one worker.
    fn payslips_for_worker(&self, worker_id: Uuid) -> EngineResult<Vec<Payslip>>;
    /// Returns all payslips belonging to one cycle.
    fn payslips_for_cycle(&self, cycle_id: Uuid) -> EngineResult<Vec<Payslip>>;
    /// Deletes every payslip belonging to one cycle, returning the
    /// count removed. Compensating rollback only.
    fn delete_payslips_for_cycle(&self, cycle_id: Uuid) -> EngineResult<usize>;
}

/// In-memory [`Store`] implementation.
#[derive(Debug, Default)]
pub struct MemoryStore {
    workers: Mutex<HashMap<Uuid, Worker>>,
    projects: Mutex<HashMap<Uuid, Project>>,
    assignments: Mutex<Vec<ProjectAssignment>>,
    worker_timesheets: Mutex<HashMap<Uuid, WorkerTimesheet>>,
    site_timesheets: Mutex<HashMap<Uuid, SiteTimesheet>>,
    cycles: Mutex<HashMap<Uuid, PayrollCycle>>,
    payslips: Mutex<HashMap<Uuid, Payslip>>,
    hub: ChangeHub,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// The change hub this store publishes to after every write.
    pub fn hub(&self) -> &ChangeHub {
        &self.hub
    }

    fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
        mutex.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn duplicate(record: &str, id: Uuid) -> EngineError {
        EngineError::Storage {
            message: format!("duplicate {} id: {}", record, id),
        }
    }
}

impl Store for MemoryStore {
    fn insert_worker(&self, worker: Worker) -> EngineResult<Worker> {
        let mut workers = Self::lock(&self.workers);
        if workers.contains_key(&worker.id) {
            return Err(Self::duplicate("worker", worker.id));
        }
        workers.insert(worker.id, worker.clone());
        Ok(worker)
    }

    fn worker(&self, id: Uuid) -> EngineResult<Worker> {
        Self::lock(&self.workers)
            .get(&id)
            .cloned()
            .ok_or(EngineError::NotFound {
                record: "worker".to_string(),
                id,
            })
    }

    fn workers(&self) -> EngineResult<Vec<Worker>> {
        let mut all: Vec<Worker> = Self::lock(&self.workers).values().cloned().collect();
        all.sort_by(|a, b| a.full_name.cmp(&b.full_name));
        Ok(all)
    }

    fn update_worker_rate(&self, id: Uuid, rate: Decimal) -> EngineResult<Worker> {
        let mut workers = Self::lock(&self.workers);
        let worker = workers.get_mut(&id).ok_or(EngineError::NotFound {
            record: "worker".to_string(),
            id,
        })?;
        worker.hourly_rate = rate;
        Ok(worker.clone())
    }

    fn insert_project(&self, project: Project) -> EngineResult<Project> {
        let mut projects = Self::lock(&self.projects);
        if projects.contains_key(&project.id) {
            return Err(Self::duplicate("project", project.id));
        }
        projects.insert(project.id, project.clone());
        drop(projects);
        self.hub.publish(RecordKind::Projects);
        Ok(project)
    }

    fn projects(&self) -> EngineResult<Vec<Project>> {
        let mut all: Vec<Project> = Self::lock(&self.projects).values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all)
    }

    fn insert_assignment(
        &self,
        assignment: ProjectAssignment,
    ) -> EngineResult<ProjectAssignment> {
        Self::lock(&self.assignments).push(assignment.clone());
        self.hub.publish(RecordKind::Projects);
        Ok(assignment)
    }

    fn assignments_for(&self, user_id: Uuid) -> EngineResult<Vec<ProjectAssignment>> {
        Ok(Self::lock(&self.assignments)
            .iter()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect())
    }

    fn insert_worker_timesheet(
        &self,
        timesheet: WorkerTimesheet,
    ) -> EngineResult<WorkerTimesheet> {
        let mut sheets = Self::lock(&self.worker_timesheets);
        if sheets.contains_key(&timesheet.id) {
            return Err(Self::duplicate("worker timesheet", timesheet.id));
        }
        sheets.insert(timesheet.id, timesheet.clone());
        drop(sheets);
        self.hub.publish(RecordKind::WorkerTimesheets);
        Ok(timesheet)
    }

    fn worker_timesheets(
        &self,
        filter: &WorkerTimesheetFilter,
    ) -> EngineResult<Vec<WorkerTimesheet>> {
        let mut matched: Vec<WorkerTimesheet> = Self::lock(&self.worker_timesheets)
            .values()
            .filter(|t| filter.worker_id.is_none_or(|w| t.worker_id == w))
            .filter(|t| filter.status.is_none_or(|s| t.status == s))
            .filter(|t| filter.from.is_none_or(|d| t.date >= d))
            .filter(|t| filter.to.is_none_or(|d| t.date <= d))
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(matched)
    }

    fn transition_worker_timesheet(
        &self,
        id: Uuid,
        apply: &dyn Fn(WorkerTimesheet) -> EngineResult<WorkerTimesheet>,
    ) -> EngineResult<WorkerTimesheet> {
        let mut sheets = Self::lock(&self.worker_timesheets);
        let current = sheets.get(&id).cloned().ok_or(EngineError::NotFound {
            record: "worker timesheet".to_string(),
            id,
        })?;
        let updated = apply(current)?;
        sheets.insert(id, updated.clone());
        drop(sheets);
        self.hub.publish(RecordKind::WorkerTimesheets);
        Ok(updated)
    }

    fn insert_site_timesheet(&self, timesheet: SiteTimesheet) -> EngineResult<SiteTimesheet> {
        let mut sheets = Self::lock(&self.site_timesheets);
        if sheets.contains_key(&timesheet.id) {
            return Err(Self::duplicate("site timesheet", timesheet.id));
        }
        sheets.insert(timesheet.id, timesheet.clone());
        drop(sheets);
        self.hub.publish(RecordKind::SiteTimesheets);
        Ok(timesheet)
    }

    fn site_timesheet(&self, id: Uuid) -> EngineResult<SiteTimesheet> {
        Self::lock(&self.site_timesheets)
            .get(&id)
            .cloned()
            .ok_or(EngineError::NotFound {
                record: "site timesheet".to_string(),
                id,
            })
    }

    fn site_timesheets(&self, filter: &SiteTimesheetFilter) -> EngineResult<Vec<SiteTimesheet>> {
        let mut matched: Vec<SiteTimesheet> = Self::lock(&self.site_timesheets)
            .values()
            .filter(|t| filter.project_id.is_none_or(|p| t.project_id == p))
            .filter(|t| filter.foreman_id.is_none_or(|f| t.foreman_id == f))
            .filter(|t| filter.status.is_none_or(|s| t.status == s))
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(matched)
    }

    fn transition_site_timesheet(
        &self,
        id: Uuid,
        apply: &dyn Fn(SiteTimesheet) -> EngineResult<SiteTimesheet>,
    ) -> EngineResult<SiteTimesheet> {
        let mut sheets = Self::lock(&self.site_timesheets);
        let current = sheets.get(&id).cloned().ok_or(EngineError::NotFound {
            record: "site timesheet".to_string(),
            id,
        })?;
        let updated = apply(current)?;
        sheets.insert(id, updated.clone());
        drop(sheets);
        self.hub.publish(RecordKind::SiteTimesheets);
        Ok(updated)
    }

    fn insert_cycle(&self, cycle: PayrollCycle) -> EngineResult<PayrollCycle> {
        let mut cycles = Self::lock(&self.cycles);
        if cycles.contains_key(&cycle.id) {
            return Err(Self::duplicate("payroll cycle", cycle.id));
        }
        cycles.insert(cycle.id, cycle.clone());
        drop(cycles);
        self.hub.publish(RecordKind::PayrollCycles);
        Ok(cycle)
    }

    fn cycles(&self) -> EngineResult<Vec<PayrollCycle>> {
        let mut all: Vec<PayrollCycle> = Self::lock(&self.cycles).values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all)
    }

    fn transition_cycle(
        &self,
        id: Uuid,
        apply: &dyn Fn(PayrollCycle) -> EngineResult<PayrollCycle>,
    ) -> EngineResult<PayrollCycle> {
        let mut cycles = Self::lock(&self.cycles);
        let current = cycles.get(&id).cloned().ok_or(EngineError::NotFound {
            record: "payroll cycle".to_string(),
            id,
        })?;
        let updated = apply(current)?;
        cycles.insert(id, updated.clone());
        drop(cycles);
        self.hub.publish(RecordKind::PayrollCycles);
        Ok(updated)
    }

    fn delete_cycle(&self, id: Uuid) -> EngineResult<()> {
        let removed = Self::lock(&self.cycles).remove(&id);
        if removed.is_none() {
            return Err(EngineError::NotFound {
                record: "payroll cycle".to_string(),
                id,
            });
        }
        self.hub.publish(RecordKind::PayrollCycles);
        Ok(())
    }

    fn insert_payslip(&self, payslip: Payslip) -> EngineResult<Payslip> {
        let mut payslips = Self::lock(&self.payslips);
        if payslips.contains_key(&payslip.id) {
            return Err(Self::duplicate("payslip", payslip.id));
        }
        payslips.insert(payslip.id, payslip.clone());
        drop(payslips);
        self.hub.publish(RecordKind::Payslips);
        Ok(payslip)
    }

    fn payslips_for_worker(&self, worker_id: Uuid) -> EngineResult<Vec<Payslip>> {
        let mut matched: Vec<Payslip> = Self::lock(&self.payslips)
            .values()
            .filter(|p| p.worker_id == worker_id)
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.period.start.cmp(&a.period.start));
        Ok(matched)
    }

    fn payslips_for_cycle(&self, cycle_id: Uuid) -> EngineResult<Vec<Payslip>> {
        Ok(Self::lock(&self.payslips)
            .values()
            .filter(|p| p.cycle_id == cycle_id)
            .cloned()
            .collect())
    }

    fn delete_payslips_for_cycle(&self, cycle_id: Uuid) -> EngineResult<usize> {
        let mut payslips = Self::lock(&self.payslips);
        let doomed: Vec<Uuid> = payslips
            .values()
            .filter(|p| p.cycle_id == cycle_id)
            .map(|p| p.id)
            .collect();
        for id in &doomed {
            payslips.remove(id);
        }
        drop(payslips);
        if !doomed.is_empty() {
            self.hub.publish(RecordKind::Payslips);
        }
        Ok(doomed.len())
    }
}
