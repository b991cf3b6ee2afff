//! HTTP API module for the timesheet and payroll engine.
//!
//! This module provides the REST endpoints over the service layer:
//! site-timesheet recording and authorization, worker-timesheet review,
//! pure wage calculation, payroll runs, and project summaries.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    ActorRequest, AuthorizeRequest, ClockEntryRequest, CreateSiteTimesheetRequest,
    PayrollRunRequest, RejectRequest, ReviewRequest, WageCalculationRequest, WageEntryRequest,
    WageWorkerRequest,
};
pub use response::{ApiError, ApiErrorResponse, ProjectSummariesResponse};
pub use state::AppState;
