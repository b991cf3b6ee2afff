//! Error types for the timesheet and payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure path in the engine. Each variant maps to one class of
//! the error taxonomy: bad input, an illegal lifecycle transition, a
//! concurrent-modification conflict, a missing record, a role gate, a
//! deployment misconfiguration, or a collaborator failure.

use thiserror::Error;
use uuid::Uuid;

/// The main error type for the timesheet and payroll engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use sitepay_engine::error::EngineError;
///
/// let error = EngineError::Validation {
///     field: "rejection_reason".to_string(),
///     message: "must not be empty".to_string(),
/// };
/// assert_eq!(error.to_string(), "Invalid field 'rejection_reason': must not be empty");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A tax bracket table is malformed (gap, overlap, or bounded top bracket).
    #[error("Invalid {residency} tax table: {message}")]
    InvalidTaxTable {
        /// Which table is broken ("resident" or "non-resident").
        residency: String,
        /// A description of the defect.
        message: String,
    },

    /// A deployment-level rule is misconfigured (overtime threshold,
    /// superannuation rate, or a bracket setup that produces negative pay).
    ///
    /// Distinct from [`EngineError::Validation`]: this indicates a setup
    /// defect, not bad caller input.
    #[error("Payroll configuration error: {message}")]
    Misconfiguration {
        /// A description of the misconfiguration.
        message: String,
    },

    /// Caller-supplied input failed validation. Rejected before any write.
    #[error("Invalid field '{field}': {message}")]
    Validation {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// The requested lifecycle action is not legal from the record's
    /// current status. Surfaced to callers as "already processed".
    #[error("Cannot {action} {record} in status '{from}': already processed")]
    InvalidTransition {
        /// The record kind (e.g. "site timesheet").
        record: String,
        /// The status the record was found in.
        from: String,
        /// The action that was attempted.
        action: String,
    },

    /// The acting role is not permitted to perform the action.
    #[error("Role '{role}' is not permitted to {action}")]
    Forbidden {
        /// The role of the caller.
        role: String,
        /// The action that was attempted.
        action: String,
    },

    /// A record was not found in the store.
    #[error("{record} not found: {id}")]
    NotFound {
        /// The record kind.
        record: String,
        /// The id that was looked up.
        id: Uuid,
    },

    /// A concurrent run or a duplicate would violate a payroll invariant.
    /// Safe to retry after re-reading current state.
    #[error("Conflict: {message}")]
    Conflict {
        /// A description of the conflicting state.
        message: String,
    },

    /// The record store rejected an operation (constraint violation or
    /// unreachable backend).
    #[error("Storage error: {message}")]
    Storage {
        /// A description of the storage failure.
        message: String,
    },

    /// The payslip document renderer failed. Never affects the stored
    /// payslip; rendering is retryable on its own.
    #[error("Payslip rendering failed: {message}")]
    Render {
        /// A description of the rendering failure.
        message: String,
    },
}

impl EngineError {
    /// Shorthand for a validation error.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
