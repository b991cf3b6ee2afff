//! Worker profile, roles, and acting identity.
//!
//! This module defines the [`Worker`] struct read by the payroll engine,
//! the [`Role`] enum used to gate lifecycle actions, and the [`Actor`]
//! identity passed explicitly into every state-transition and finalize
//! call.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents the type of employment arrangement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentType {
    /// Full-time employment.
    FullTime,
    /// Part-time employment.
    PartTime,
    /// Casual employment (no guaranteed hours).
    Casual,
}

/// Account standing of a worker profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountStatus {
    /// Active and eligible for payroll.
    Active,
    /// Temporarily suspended.
    Suspended,
    /// Archived; retained for history only.
    Archived,
}

/// The role a caller acts under.
///
/// The engine gates authorize, reject, review, and finalize actions by
/// role. It does not authenticate anyone; identity and role arrive
/// already trusted from the session collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// A site worker clocking their own time.
    Worker,
    /// A site supervisor (foreman) recording site timesheets and
    /// reviewing worker clock entries.
    Supervisor,
    /// A clerk authorizing or rejecting submitted site timesheets.
    Clerk,
    /// A payroll officer previewing and finalizing payroll runs.
    PayrollOfficer,
    /// Finance staff advancing payroll cycles to approved/paid.
    Finance,
    /// Executive with finance-level access.
    Ceo,
}

impl Role {
    /// Canonical lowercase name, used in error messages and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Worker => "worker",
            Role::Supervisor => "supervisor",
            Role::Clerk => "clerk",
            Role::PayrollOfficer => "payroll_officer",
            Role::Finance => "finance",
            Role::Ceo => "ceo",
        }
    }

    /// True for roles allowed to authorize or reject site timesheets.
    pub fn can_authorize_sites(&self) -> bool {
        matches!(self, Role::Clerk)
    }

    /// True for roles allowed to review individual worker timesheets.
    pub fn can_review_worker_timesheets(&self) -> bool {
        matches!(self, Role::Supervisor | Role::Clerk)
    }

    /// True for roles allowed to preview and finalize payroll runs.
    pub fn can_run_payroll(&self) -> bool {
        matches!(self, Role::PayrollOfficer)
    }

    /// True for roles allowed to advance a payroll cycle after creation.
    pub fn can_advance_cycles(&self) -> bool {
        matches!(self, Role::Finance | Role::Ceo)
    }
}

/// The identity performing an operation.
///
/// Passed explicitly into every state-transition and finalize call so the
/// engine stays testable without a simulated session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// The caller's user id.
    pub id: Uuid,
    /// The role the caller acts under.
    pub role: Role,
}

/// A worker profile as read by the payroll engine.
///
/// Owned by the identity collaborator; the engine only reads it. The
/// `hourly_rate`, `is_resident`, and `super_enabled` fields drive the
/// wage computation; a payslip snapshots the rate at generation time, so
/// later profile edits never alter existing payslips.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Worker {
    /// Unique identifier for the worker.
    pub id: Uuid,
    /// The worker's display name.
    pub full_name: String,
    /// Payroll employee number, if issued.
    #[serde(default)]
    pub employee_no: Option<String>,
    /// Position title (e.g. "Steel fixer").
    #[serde(default)]
    pub position: Option<String>,
    /// The type of employment arrangement.
    pub employment_type: EmploymentType,
    /// The hourly rate in kina. Non-negative.
    pub hourly_rate: Decimal,
    /// Whether the worker is a PNG tax resident. Selects the PAYE table.
    pub is_resident: bool,
    /// Whether the worker contributes to superannuation.
    pub super_enabled: bool,
    /// Account standing.
    pub account_status: AccountStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn sample_worker() -> Worker {
        Worker {
            id: Uuid::new_v4(),
            full_name: "Kila Aihi".to_string(),
            employee_no: Some("EMP-0042".to_string()),
            position: Some("Steel fixer".to_string()),
            employment_type: EmploymentType::FullTime,
            hourly_rate: Decimal::from_str("25.00").unwrap(),
            is_resident: true,
            super_enabled: true,
            account_status: AccountStatus::Active,
        }
    }

    #[test]
    fn test_role_serialization_is_snake_case() {
        assert_eq!(
            serde_json::to_string(&Role::PayrollOfficer).unwrap(),
            "\"payroll_officer\""
        );
        assert_eq!(serde_json::to_string(&Role::Ceo).unwrap(), "\"ceo\"");
    }

    #[test]
    fn test_only_clerk_authorizes_sites() {
        assert!(Role::Clerk.can_authorize_sites());
        for role in [
            Role::Worker,
            Role::Supervisor,
            Role::PayrollOfficer,
            Role::Finance,
            Role::Ceo,
        ] {
            assert!(!role.can_authorize_sites(), "{:?}", role);
        }
    }

    #[test]
    fn test_supervisor_and_clerk_review_worker_timesheets() {
        assert!(Role::Supervisor.can_review_worker_timesheets());
        assert!(Role::Clerk.can_review_worker_timesheets());
        assert!(!Role::Worker.can_review_worker_timesheets());
        assert!(!Role::PayrollOfficer.can_review_worker_timesheets());
    }

    #[test]
    fn test_only_payroll_officer_runs_payroll() {
        assert!(Role::PayrollOfficer.can_run_payroll());
        assert!(!Role::Finance.can_run_payroll());
        assert!(!Role::Clerk.can_run_payroll());
    }

    #[test]
    fn test_finance_and_ceo_advance_cycles() {
        assert!(Role::Finance.can_advance_cycles());
        assert!(Role::Ceo.can_advance_cycles());
        assert!(!Role::PayrollOfficer.can_advance_cycles());
    }

    #[test]
    fn test_deserialize_worker() {
        let json = r#"{
            "id": "6dd6bb6a-7b4f-49e9-a3be-94bee54fee81",
            "full_name": "Kila Aihi",
            "employment_type": "full_time",
            "hourly_rate": "25.00",
            "is_resident": true,
            "super_enabled": false,
            "account_status": "active"
        }"#;

        let worker: Worker = serde_json::from_str(json).unwrap();
        assert_eq!(worker.full_name, "Kila Aihi");
        assert_eq!(worker.hourly_rate, Decimal::from_str("25.00").unwrap());
        assert!(worker.is_resident);
        assert!(!worker.super_enabled);
        assert_eq!(worker.employee_no, None);
        assert_eq!(worker.position, None);
    }

    #[test]
    fn test_worker_serde_round_trip() {
        let worker = sample_worker();
        let json = serde_json::to_string(&worker).unwrap();
        let back: Worker = serde_json::from_str(&json).unwrap();
        assert_eq!(worker, back);
    }

    #[test]
    fn test_actor_round_trip() {
        let actor = Actor {
            id: Uuid::nil(),
            role: Role::Clerk,
        };
        let json = serde_json::to_string(&actor).unwrap();
        assert!(json.contains("\"role\":\"clerk\""));
        let back: Actor = serde_json::from_str(&json).unwrap();
        assert_eq!(actor, back);
    }
}
