//! Core data models for the timesheet and payroll engine.
//!
//! This module contains all the domain records used throughout the
//! engine: worker profiles and roles, projects and assignments, the two
//! timesheet kinds with their lifecycle transitions, pay periods,
//! payroll cycles, and payslips.

mod pay_period;
mod payroll_cycle;
mod payslip;
mod project;
mod site_timesheet;
mod worker;
mod worker_timesheet;

pub use pay_period::PayPeriod;
pub use payroll_cycle::{CycleStatus, PayrollCycle};
pub use payslip::{Payslip, PayslipStatus};
pub use project::{Project, ProjectAssignment, ProjectStatus};
pub use site_timesheet::{
    EquipmentLine, MaterialLine, ProductionLine, ShiftPeriod, SiteTimesheet, SiteTimesheetDraft,
    SiteTimesheetStatus,
};
pub use worker::{AccountStatus, Actor, EmploymentType, Role, Worker};
pub use worker_timesheet::{WorkerTimesheet, WorkerTimesheetStatus};
