//! Payroll run orchestration.
//!
//! Groups verified worker timesheets by worker for a chosen period,
//! invokes the wage computation per worker, and on finalization writes
//! one payroll cycle plus one payslip per worker as a single logical
//! unit. A partial failure triggers a compensating rollback so the
//! store is never left with a cycle referencing an incomplete set of
//! payslips.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{WageBreakdown, calculate_worker_pay};
use crate::config::PayrollConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    Actor, PayPeriod, PayrollCycle, Payslip, PayslipStatus, WorkerTimesheet,
    WorkerTimesheetStatus,
};
use crate::store::{Store, WorkerTimesheetFilter};

/// One worker's line in a payroll run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollLine {
    /// The worker being paid.
    pub worker_id: Uuid,
    /// The worker's display name at run time.
    pub worker_name: String,
    /// Hourly rate snapshot at run time.
    pub hourly_rate: Decimal,
    /// The computed pay breakdown.
    pub breakdown: WageBreakdown,
}

/// A computed payroll run before finalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollPreview {
    /// The pay period the run covers.
    pub period: PayPeriod,
    /// One line per worker with verified hours in the period, ordered
    /// by worker name.
    pub lines: Vec<PayrollLine>,
    /// Sum of gross earnings across all lines.
    pub total_gross: Decimal,
    /// Sum of all deductions across all lines.
    pub total_deductions: Decimal,
    /// Sum of net pay across all lines.
    pub total_net: Decimal,
}

/// The outcome of a finalized payroll run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalizedPayroll {
    /// The created payroll cycle.
    pub cycle: PayrollCycle,
    /// One payslip per included worker.
    pub payslips: Vec<Payslip>,
}

/// Computes a payroll run for the period without writing anything.
///
/// Fetches approved worker timesheets dated within the period, groups
/// them by worker, and computes a wage breakdown per worker from the
/// worker's current rate, residency, and superannuation flags.
/// Allowances are summed from the per-record amounts; other deductions
/// come from the caller-supplied map. Workers with no verified hours in
/// the period get no line.
///
/// # Errors
///
/// Returns a forbidden error unless the actor is a payroll officer, and
/// propagates wage-computation and storage errors unchanged.
pub fn preview_payroll(
    store: &dyn Store,
    config: &PayrollConfig,
    actor: Actor,
    period: PayPeriod,
    other_deductions: &HashMap<Uuid, Decimal>,
) -> EngineResult<PayrollPreview> {
    if !actor.role.can_run_payroll() {
        return Err(EngineError::Forbidden {
            role: actor.role.as_str().to_string(),
            action: "run payroll".to_string(),
        });
    }

    let verified = store.worker_timesheets(&WorkerTimesheetFilter {
        status: Some(WorkerTimesheetStatus::Approved),
        from: Some(period.start),
        to: Some(period.end),
        ..Default::default()
    })?;

    let mut by_worker: HashMap<Uuid, Vec<WorkerTimesheet>> = HashMap::new();
    for sheet in verified {
        by_worker.entry(sheet.worker_id).or_default().push(sheet);
    }

    let mut lines = Vec::with_capacity(by_worker.len());
    for (worker_id, sheets) in by_worker {
        let worker = store.worker(worker_id)?;
        let allowances: Decimal = sheets
            .iter()
            .map(|t| t.allowance_amount.unwrap_or(Decimal::ZERO))
            .sum();
        let deductions = other_deductions
            .get(&worker_id)
            .copied()
            .unwrap_or(Decimal::ZERO);

        let breakdown = calculate_worker_pay(&worker, &sheets, allowances, deductions, config)?;
        lines.push(PayrollLine {
            worker_id,
            worker_name: worker.full_name.clone(),
            hourly_rate: worker.hourly_rate,
            breakdown,
        });
    }
    lines.sort_by(|a, b| {
        a.worker_name
            .cmp(&b.worker_name)
            .then(a.worker_id.cmp(&b.worker_id))
    });

    let total_gross: Decimal = lines.iter().map(|l| l.breakdown.gross_earnings).sum();
    let total_deductions: Decimal = lines
        .iter()
        .map(|l| {
            l.breakdown.fortnightly_paye + l.breakdown.employee_super + l.breakdown.other_deductions
        })
        .sum();
    let total_net: Decimal = lines.iter().map(|l| l.breakdown.net_pay).sum();

    Ok(PayrollPreview {
        period,
        lines,
        total_gross,
        total_deductions,
        total_net,
    })
}

/// Finalizes a payroll run: creates the cycle and one payslip per
/// included worker.
///
/// Hard precondition: no included worker may already hold a payslip
/// whose period overlaps the requested one. A second overlapping run
/// is rejected rather than double-paying anyone. The cycle is created
/// at `pending_approval`; each payslip snapshots the worker's rate and
/// is immutable from then on. If any payslip insert fails the cycle and
/// any payslips already written for it are deleted before the error is
/// propagated.
///
/// # Errors
///
/// Returns a forbidden error for a non-payroll-officer, a validation
/// error when no worker has verified hours in the period, a conflict
/// error on period overlap, and storage errors after rollback.
pub fn finalize_payroll(
    store: &dyn Store,
    config: &PayrollConfig,
    actor: Actor,
    period: PayPeriod,
    other_deductions: &HashMap<Uuid, Decimal>,
) -> EngineResult<FinalizedPayroll> {
    let preview = preview_payroll(store, config, actor, period, other_deductions)?;
    if preview.lines.is_empty() {
        return Err(EngineError::validation(
            "period",
            "no verified worker timesheets fall within the period",
        ));
    }

    // Double-payment guard, checked before anything is written.
    for line in &preview.lines {
        let overlapping = store
            .payslips_for_worker(line.worker_id)?
            .iter()
            .any(|p| p.period.overlaps(&period));
        if overlapping {
            return Err(EngineError::Conflict {
                message: format!(
                    "worker {} already has a payslip for a period overlapping {} – {}",
                    line.worker_name, period.start, period.end
                ),
            });
        }
    }

    let cycle = store.insert_cycle(PayrollCycle::finalized(
        period,
        preview.lines.len() as u32,
        preview.total_gross,
        preview.total_deductions,
        preview.total_net,
        actor.id,
    ))?;

    let mut payslips = Vec::with_capacity(preview.lines.len());
    for line in &preview.lines {
        let payslip = Payslip {
            id: Uuid::new_v4(),
            cycle_id: cycle.id,
            worker_id: line.worker_id,
            period,
            total_hours: line.breakdown.approved_hours,
            hourly_rate: line.hourly_rate,
            gross_pay: line.breakdown.gross_earnings,
            overtime_pay: line.breakdown.overtime_pay,
            allowance_pay: line.breakdown.allowance_pay,
            tax_deduction: line.breakdown.fortnightly_paye,
            nasfund_deduction: line.breakdown.employee_super,
            other_deductions: line.breakdown.other_deductions,
            net_pay: line.breakdown.net_pay,
            status: PayslipStatus::Generated,
            generated_by: actor.id,
        };
        match store.insert_payslip(payslip) {
            Ok(stored) => payslips.push(stored),
            Err(err) => {
                // Compensating rollback: no cycle may reference a
                // partial set of payslips.
                warn!(
                    cycle_id = %cycle.id,
                    error = %err,
                    "Payslip insert failed; rolling back cycle"
                );
                if let Err(cleanup) = store.delete_payslips_for_cycle(cycle.id) {
                    warn!(cycle_id = %cycle.id, error = %cleanup, "Payslip rollback failed");
                }
                if let Err(cleanup) = store.delete_cycle(cycle.id) {
                    warn!(cycle_id = %cycle.id, error = %cleanup, "Cycle rollback failed");
                }
                return Err(err);
            }
        }
    }

    info!(
        cycle_id = %cycle.id,
        workers = cycle.total_workers,
        total_gross = %cycle.total_gross,
        total_net = %cycle.total_net,
        "Payroll cycle finalized"
    );
    Ok(FinalizedPayroll { cycle, payslips })
}

/// Advances a payroll cycle one status step. Administrative action for
/// finance-level roles; the engine never advances cycles on its own.
///
/// # Errors
///
/// Returns a forbidden error unless the actor may advance cycles, a
/// not-found error for an unknown cycle, and an invalid-transition
/// error when the cycle is already paid.
pub fn advance_cycle(store: &dyn Store, actor: Actor, id: Uuid) -> EngineResult<PayrollCycle> {
    if !actor.role.can_advance_cycles() {
        return Err(EngineError::Forbidden {
            role: actor.role.as_str().to_string(),
            action: "advance payroll cycles".to_string(),
        });
    }

    store.transition_cycle(id, &|cycle| cycle.advance())
}
