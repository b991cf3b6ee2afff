//! Role-gated operations over the record store.
//!
//! Each function takes the acting identity explicitly, checks its role,
//! runs the pure model transitions or calculations, and writes through
//! the [`crate::store::Store`] contract. This is the layer API handlers
//! and event-driven callers invoke.

mod payroll;
mod site_timesheets;
mod worker_timesheets;

pub use payroll::{
    FinalizedPayroll, PayrollLine, PayrollPreview, advance_cycle, finalize_payroll,
    preview_payroll,
};
pub use site_timesheets::{
    authorize_site_timesheet, record_site_timesheet, reject_site_timesheet,
};
pub use worker_timesheets::{ReviewAction, record_clock_entry, review_worker_timesheet};
