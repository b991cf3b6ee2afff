//! HTTP request handlers for the timesheet and payroll API.
//!
//! This module contains the handler functions for all API endpoints and
//! the router wiring them together.

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::aggregation::{fleet_summary, summarize_projects};
use crate::calculation::calculate_worker_pay;
use crate::error::EngineResult;
use crate::models::{PayPeriod, SiteTimesheetDraft, Worker, WorkerTimesheet};
use crate::service;
use crate::store::{SiteTimesheetFilter, Store};

use super::request::{
    AuthorizeRequest, ClockEntryRequest, CreateSiteTimesheetRequest, PayrollRunRequest,
    RejectRequest, ReviewRequest, WageCalculationRequest,
};
use super::response::{ApiError, ApiErrorResponse, ProjectSummariesResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/site-timesheets", post(create_site_timesheet))
        .route("/site-timesheets/:id/authorize", post(authorize_site_timesheet))
        .route("/site-timesheets/:id/reject", post(reject_site_timesheet))
        .route("/worker-timesheets", post(record_clock_entry))
        .route("/worker-timesheets/:id/review", post(review_worker_timesheet))
        .route("/wages/calculate", post(calculate_wages))
        .route("/payroll/preview", post(preview_payroll))
        .route("/payroll/finalize", post(finalize_payroll))
        .route("/projects/summary", get(project_summaries))
        .with_state(state)
}

fn respond<T: Serialize>(status: StatusCode, result: EngineResult<T>) -> Response {
    match result {
        Ok(value) => (status, Json(value)).into_response(),
        Err(err) => ApiErrorResponse::from(err).into_response(),
    }
}

/// Handler for `POST /site-timesheets`.
async fn create_site_timesheet(
    State(state): State<AppState>,
    Json(request): Json<CreateSiteTimesheetRequest>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        project_id = %request.project_id,
        submit = request.submit,
        "Recording site timesheet"
    );

    let draft = SiteTimesheetDraft {
        project_id: request.project_id,
        foreman_id: request.actor.id,
        date: request.date,
        shift: request.shift,
        number_of_workers: request.number_of_workers,
        equipment: request.equipment,
        materials: request.materials,
        production: request.production,
        remarks: request.remarks,
    };
    let result = service::record_site_timesheet(
        state.store(),
        request.actor.into(),
        draft,
        request.submit,
    );
    respond(StatusCode::CREATED, result)
}

/// Handler for `POST /site-timesheets/{id}/authorize`.
async fn authorize_site_timesheet(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<AuthorizeRequest>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, site_timesheet_id = %id, "Authorizing site timesheet");
    respond(
        StatusCode::OK,
        service::authorize_site_timesheet(state.store(), request.actor.into(), id),
    )
}

/// Handler for `POST /site-timesheets/{id}/reject`.
async fn reject_site_timesheet(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<RejectRequest>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, site_timesheet_id = %id, "Rejecting site timesheet");
    respond(
        StatusCode::OK,
        service::reject_site_timesheet(state.store(), request.actor.into(), id, &request.reason),
    )
}

/// Handler for `POST /worker-timesheets`.
async fn record_clock_entry(
    State(state): State<AppState>,
    Json(request): Json<ClockEntryRequest>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        worker_id = %request.worker_id,
        "Recording clock entry"
    );
    respond(
        StatusCode::CREATED,
        service::record_clock_entry(
            state.store(),
            request.actor.into(),
            request.worker_id,
            request.date,
            request.clock_in,
            request.clock_out,
            request.task_description,
            request.allowance_amount,
        ),
    )
}

/// Handler for `POST /worker-timesheets/{id}/review`.
async fn review_worker_timesheet(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<ReviewRequest>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        worker_timesheet_id = %id,
        action = ?request.action,
        "Reviewing worker timesheet"
    );
    respond(
        StatusCode::OK,
        service::review_worker_timesheet(
            state.store(),
            request.actor.into(),
            id,
            request.action,
            request.reason,
        ),
    )
}

/// Handler for `POST /wages/calculate`.
///
/// A pure computation endpoint: accepts worker attributes plus verified
/// clock entries and returns the pay breakdown without persisting
/// anything.
async fn calculate_wages(
    State(state): State<AppState>,
    payload: Result<Json<WageCalculationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    // Handle JSON parsing errors with a structured body.
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    if body_text.contains("missing field") {
                        ApiError::new("VALIDATION_ERROR", body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(correlation_id = %correlation_id, error = %err, "JSON syntax error");
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            return (StatusCode::BAD_REQUEST, Json(error)).into_response();
        }
    };

    let worker: Worker = request.worker.into();
    let mut entries = Vec::with_capacity(request.entries.len());
    for entry in request.entries {
        let timesheet = WorkerTimesheet::clock_entry(
            worker.id,
            None,
            entry.date,
            entry.clock_in,
            entry.clock_out,
            None,
            entry.allowance_amount,
        );
        match timesheet {
            Ok(t) => entries.push(t),
            Err(err) => {
                warn!(correlation_id = %correlation_id, error = %err, "Invalid clock entry");
                return ApiErrorResponse::from(err).into_response();
            }
        }
    }
    let allowances: Decimal = entries
        .iter()
        .map(|t| t.allowance_amount.unwrap_or(Decimal::ZERO))
        .sum();

    let result = calculate_worker_pay(
        &worker,
        &entries,
        allowances,
        request.other_deductions.unwrap_or(Decimal::ZERO),
        state.config().config(),
    );
    match &result {
        Ok(pay) => info!(
            correlation_id = %correlation_id,
            worker_id = %worker.id,
            entries = entries.len(),
            gross = %pay.gross_earnings,
            net = %pay.net_pay,
            "Wage calculation completed"
        ),
        Err(err) => warn!(correlation_id = %correlation_id, error = %err, "Wage calculation failed"),
    }
    respond(StatusCode::OK, result)
}

fn run_period(request: &PayrollRunRequest) -> EngineResult<PayPeriod> {
    PayPeriod::new(request.period_start, request.period_end)
}

/// Handler for `POST /payroll/preview`.
async fn preview_payroll(
    State(state): State<AppState>,
    Json(request): Json<PayrollRunRequest>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        period_start = %request.period_start,
        period_end = %request.period_end,
        "Previewing payroll"
    );
    let result = run_period(&request).and_then(|period| {
        service::preview_payroll(
            state.store(),
            state.config().config(),
            request.actor.into(),
            period,
            &request.other_deductions,
        )
    });
    respond(StatusCode::OK, result)
}

/// Handler for `POST /payroll/finalize`.
async fn finalize_payroll(
    State(state): State<AppState>,
    Json(request): Json<PayrollRunRequest>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        period_start = %request.period_start,
        period_end = %request.period_end,
        "Finalizing payroll"
    );
    let result = run_period(&request).and_then(|period| {
        service::finalize_payroll(
            state.store(),
            state.config().config(),
            request.actor.into(),
            period,
            &request.other_deductions,
        )
    });
    respond(StatusCode::CREATED, result)
}

/// Handler for `GET /projects/summary`.
///
/// Recomputes the aggregates on every call; only authorized site
/// timesheets contribute.
async fn project_summaries(State(state): State<AppState>) -> Response {
    let store = state.store();
    let result: EngineResult<ProjectSummariesResponse> = (|| {
        let projects = store.projects()?;
        let timesheets = store.site_timesheets(&SiteTimesheetFilter::default())?;
        let workers = store.workers()?;
        let summaries = summarize_projects(&projects, &timesheets, &workers);
        Ok(ProjectSummariesResponse {
            fleet: fleet_summary(&summaries),
            projects: summaries,
        })
    })();
    respond(StatusCode::OK, result)
}
