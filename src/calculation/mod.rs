//! Wage calculation logic for the payroll engine.
//!
//! This module contains the pure calculation functions that turn a
//! worker's verified hours into a pay breakdown: approved-hours
//! summation with the overtime split, progressive fortnightly PAYE by
//! residency, the employee superannuation contribution, and the
//! composition of all three into a [`WageBreakdown`].

mod hours;
mod paye;
mod superannuation;
mod wage;

pub use hours::{HoursBreakdown, split_hours};
pub use paye::calculate_paye;
pub use superannuation::calculate_employee_super;
pub use wage::{WageBreakdown, calculate_worker_pay};
