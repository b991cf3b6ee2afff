//! Payslip document rendering contract.
//!
//! PDF generation and durable document storage live outside the engine.
//! The engine only ever renders an existing, immutable payslip, and a
//! rendering failure must never roll back the payslip itself; callers
//! retry rendering independently of payroll finalization.

use crate::error::EngineResult;
use crate::models::{Payslip, Worker};

/// A retrievable link to a rendered payslip document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayslipLink {
    /// URL the document can be fetched from.
    pub url: String,
}

/// Renders payslips into retrievable documents.
///
/// Implemented by the document collaborator; the crate ships only the
/// contract and test stubs.
pub trait PayslipRenderer: Send + Sync {
    /// Renders one payslip for one worker and stores the document,
    /// returning a retrievable link.
    ///
    /// # Errors
    ///
    /// Returns a render error on failure. The stored payslip is
    /// unaffected either way.
    fn render_payslip(&self, payslip: &Payslip, worker: &Worker) -> EngineResult<PayslipLink>;
}
