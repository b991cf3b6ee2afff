//! Site timesheet model and its authorization lifecycle.
//!
//! A site timesheet is one daily record for an entire site/shift:
//! headcount, equipment hours, material quantities, production output,
//! and free-text remarks. It moves `draft → submitted → authorized |
//! rejected`; only authorized records are ever rolled into project
//! summaries.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};

/// The shift a site timesheet covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftPeriod {
    /// Morning shift.
    Morning,
    /// Afternoon shift.
    Afternoon,
    /// Night shift.
    Night,
}

/// Authorization status of a site timesheet.
///
/// `authorized` and `rejected` are terminal; there is no transition out
/// of either.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SiteTimesheetStatus {
    /// Saved by the submitter without submitting.
    Draft,
    /// Awaiting clerk authorization.
    Submitted,
    /// Authorized; eligible for project aggregation.
    Authorized,
    /// Rejected with a recorded reason.
    Rejected,
}

impl SiteTimesheetStatus {
    /// Canonical lowercase name, used in error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            SiteTimesheetStatus::Draft => "draft",
            SiteTimesheetStatus::Submitted => "submitted",
            SiteTimesheetStatus::Authorized => "authorized",
            SiteTimesheetStatus::Rejected => "rejected",
        }
    }
}

/// One piece of equipment used on site for a number of hours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentLine {
    /// Equipment name (e.g. "Excavator").
    pub name: String,
    /// Hours the equipment ran. Non-negative.
    pub hours_used: Decimal,
}

/// One material consumed on site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialLine {
    /// Item name as recorded by the submitter (e.g. "Cement").
    pub item: String,
    /// Quantity consumed in `unit`. Non-negative.
    pub quantity: Decimal,
    /// Unit the quantity was recorded in (e.g. "bags").
    pub unit: String,
    /// Material type key into the unit-weight conversion table
    /// (e.g. "cement_bag"). Drives the advisory kilogram figure.
    #[serde(default)]
    pub material_type: Option<String>,
    /// Weight in kilograms. Advisory; a submitter-entered value is never
    /// overwritten by the conversion table.
    #[serde(default)]
    pub calculated_kg: Option<Decimal>,
    /// Free-text note (e.g. "50kg per bag").
    #[serde(default)]
    pub notes: Option<String>,
}

/// One production activity and its measured output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionLine {
    /// Activity name (e.g. "Soil compaction").
    pub activity: String,
    /// Output quantity in `unit`. Non-negative.
    pub quantity: Decimal,
    /// Unit the output was measured in (e.g. "m³").
    pub unit: String,
}

/// One daily record for an entire site/shift.
///
/// Invariants maintained by the lifecycle methods:
/// `rejection_reason` is set if and only if the record is rejected;
/// `authorized_at` is set if and only if the record is authorized;
/// `clerk_id` names the accountable clerk on both outcomes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteTimesheet {
    /// Unique identifier for the record.
    pub id: Uuid,
    /// The project the work was performed on.
    pub project_id: Uuid,
    /// The supervisor (foreman) who recorded the day.
    pub foreman_id: Uuid,
    /// The work date.
    pub date: NaiveDate,
    /// The shift covered.
    pub shift: ShiftPeriod,
    /// Headcount on site for the shift.
    pub number_of_workers: u32,
    /// Equipment usage lines.
    #[serde(default)]
    pub equipment: Vec<EquipmentLine>,
    /// Material consumption lines.
    #[serde(default)]
    pub materials: Vec<MaterialLine>,
    /// Production output lines.
    #[serde(default)]
    pub production: Vec<ProductionLine>,
    /// Free-text remarks from the foreman.
    #[serde(default)]
    pub remarks: Option<String>,
    /// Reason recorded on rejection. Set iff rejected.
    #[serde(default)]
    pub rejection_reason: Option<String>,
    /// Authorization status.
    pub status: SiteTimesheetStatus,
    /// The clerk who authorized or rejected the record.
    #[serde(default)]
    pub clerk_id: Option<Uuid>,
    /// When the record was authorized. Set iff authorized.
    #[serde(default)]
    pub authorized_at: Option<DateTime<Utc>>,
}

/// Field bundle for creating a site timesheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteTimesheetDraft {
    /// The project the work was performed on.
    pub project_id: Uuid,
    /// The recording foreman.
    pub foreman_id: Uuid,
    /// The work date.
    pub date: NaiveDate,
    /// The shift covered.
    pub shift: ShiftPeriod,
    /// Headcount on site for the shift.
    pub number_of_workers: u32,
    /// Equipment usage lines.
    #[serde(default)]
    pub equipment: Vec<EquipmentLine>,
    /// Material consumption lines.
    #[serde(default)]
    pub materials: Vec<MaterialLine>,
    /// Production output lines.
    #[serde(default)]
    pub production: Vec<ProductionLine>,
    /// Free-text remarks.
    #[serde(default)]
    pub remarks: Option<String>,
}

impl SiteTimesheet {
    /// Creates a draft record, validating every line item.
    ///
    /// # Errors
    ///
    /// Returns a validation error when any equipment hours, material
    /// quantity, weight, or production quantity is negative.
    pub fn record(draft: SiteTimesheetDraft) -> EngineResult<Self> {
        for line in &draft.equipment {
            if line.hours_used < Decimal::ZERO {
                return Err(EngineError::validation(
                    "equipment.hours_used",
                    format!("'{}' has negative hours", line.name),
                ));
            }
        }
        for line in &draft.materials {
            if line.quantity < Decimal::ZERO {
                return Err(EngineError::validation(
                    "materials.quantity",
                    format!("'{}' has negative quantity", line.item),
                ));
            }
            if let Some(kg) = line.calculated_kg {
                if kg < Decimal::ZERO {
                    return Err(EngineError::validation(
                        "materials.calculated_kg",
                        format!("'{}' has negative weight", line.item),
                    ));
                }
            }
        }
        for line in &draft.production {
            if line.quantity < Decimal::ZERO {
                return Err(EngineError::validation(
                    "production.quantity",
                    format!("'{}' has negative quantity", line.activity),
                ));
            }
        }

        Ok(Self {
            id: Uuid::new_v4(),
            project_id: draft.project_id,
            foreman_id: draft.foreman_id,
            date: draft.date,
            shift: draft.shift,
            number_of_workers: draft.number_of_workers,
            equipment: draft.equipment,
            materials: draft.materials,
            production: draft.production,
            remarks: draft.remarks,
            rejection_reason: None,
            status: SiteTimesheetStatus::Draft,
            clerk_id: None,
            authorized_at: None,
        })
    }

    /// Submits a draft for clerk authorization.
    ///
    /// # Errors
    ///
    /// Returns an invalid-transition error unless the record is a draft.
    pub fn submit(mut self) -> EngineResult<Self> {
        if self.status != SiteTimesheetStatus::Draft {
            return Err(self.invalid_transition("submit"));
        }
        self.status = SiteTimesheetStatus::Submitted;
        Ok(self)
    }

    /// Authorizes a submitted record, stamping the clerk and time.
    ///
    /// # Errors
    ///
    /// Returns an invalid-transition error unless the record is
    /// submitted; an already-processed record reports its current
    /// status to the caller.
    pub fn authorize(mut self, clerk: Uuid, at: DateTime<Utc>) -> EngineResult<Self> {
        if self.status != SiteTimesheetStatus::Submitted {
            return Err(self.invalid_transition("authorize"));
        }
        self.status = SiteTimesheetStatus::Authorized;
        self.clerk_id = Some(clerk);
        self.authorized_at = Some(at);
        Ok(self)
    }

    /// Rejects a submitted record. The reason is mandatory and is
    /// checked before any field changes; the rejecting clerk is recorded
    /// as the accountable party.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty reason, or an
    /// invalid-transition error unless the record is submitted.
    pub fn reject(mut self, clerk: Uuid, reason: &str) -> EngineResult<Self> {
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(EngineError::validation(
                "rejection_reason",
                "must not be empty",
            ));
        }
        if self.status != SiteTimesheetStatus::Submitted {
            return Err(self.invalid_transition("reject"));
        }
        self.status = SiteTimesheetStatus::Rejected;
        self.rejection_reason = Some(reason.to_string());
        self.clerk_id = Some(clerk);
        Ok(self)
    }

    fn invalid_transition(&self, action: &str) -> EngineError {
        EngineError::InvalidTransition {
            record: "site timesheet".to_string(),
            from: self.status.as_str().to_string(),
            action: action.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn draft() -> SiteTimesheetDraft {
        SiteTimesheetDraft {
            project_id: Uuid::new_v4(),
            foreman_id: Uuid::new_v4(),
            date: NaiveDate::from_ymd_opt(2026, 1, 12).unwrap(),
            shift: ShiftPeriod::Morning,
            number_of_workers: 14,
            equipment: vec![EquipmentLine {
                name: "Excavator".to_string(),
                hours_used: dec("6.5"),
            }],
            materials: vec![MaterialLine {
                item: "Cement".to_string(),
                quantity: dec("10"),
                unit: "bags".to_string(),
                material_type: Some("cement_bag".to_string()),
                calculated_kg: None,
                notes: None,
            }],
            production: vec![ProductionLine {
                activity: "Soil compaction".to_string(),
                quantity: dec("120"),
                unit: "m³".to_string(),
            }],
            remarks: Some("Production low due to rain".to_string()),
        }
    }

    fn submitted() -> SiteTimesheet {
        SiteTimesheet::record(draft()).unwrap().submit().unwrap()
    }

    #[test]
    fn test_record_starts_as_draft() {
        let ts = SiteTimesheet::record(draft()).unwrap();
        assert_eq!(ts.status, SiteTimesheetStatus::Draft);
        assert_eq!(ts.clerk_id, None);
        assert_eq!(ts.authorized_at, None);
        assert_eq!(ts.rejection_reason, None);
    }

    #[test]
    fn test_negative_equipment_hours_rejected() {
        let mut d = draft();
        d.equipment[0].hours_used = dec("-1");
        assert!(matches!(
            SiteTimesheet::record(d),
            Err(EngineError::Validation { .. })
        ));
    }

    #[test]
    fn test_negative_material_quantity_rejected() {
        let mut d = draft();
        d.materials[0].quantity = dec("-3");
        assert!(matches!(
            SiteTimesheet::record(d),
            Err(EngineError::Validation { .. })
        ));
    }

    #[test]
    fn test_negative_production_quantity_rejected() {
        let mut d = draft();
        d.production[0].quantity = dec("-0.5");
        assert!(matches!(
            SiteTimesheet::record(d),
            Err(EngineError::Validation { .. })
        ));
    }

    #[test]
    fn test_submit_moves_draft_to_submitted() {
        let ts = submitted();
        assert_eq!(ts.status, SiteTimesheetStatus::Submitted);
    }

    #[test]
    fn test_submit_twice_fails() {
        let result = submitted().submit();
        assert!(matches!(
            result,
            Err(EngineError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_authorize_stamps_clerk_and_time() {
        let clerk = Uuid::new_v4();
        let at = Utc::now();
        let ts = submitted().authorize(clerk, at).unwrap();
        assert_eq!(ts.status, SiteTimesheetStatus::Authorized);
        assert_eq!(ts.clerk_id, Some(clerk));
        assert_eq!(ts.authorized_at, Some(at));
        assert_eq!(ts.rejection_reason, None);
    }

    #[test]
    fn test_authorize_from_draft_fails() {
        let ts = SiteTimesheet::record(draft()).unwrap();
        match ts.authorize(Uuid::new_v4(), Utc::now()) {
            Err(EngineError::InvalidTransition { from, action, .. }) => {
                assert_eq!(from, "draft");
                assert_eq!(action, "authorize");
            }
            other => panic!("expected invalid transition, got {:?}", other),
        }
    }

    #[test]
    fn test_authorize_twice_reports_already_processed() {
        let ts = submitted().authorize(Uuid::new_v4(), Utc::now()).unwrap();
        match ts.authorize(Uuid::new_v4(), Utc::now()) {
            Err(EngineError::InvalidTransition { from, .. }) => assert_eq!(from, "authorized"),
            other => panic!("expected invalid transition, got {:?}", other),
        }
    }

    #[test]
    fn test_reject_requires_reason_before_any_change() {
        let ts = submitted();
        let result = ts.clone().reject(Uuid::new_v4(), "");
        assert!(matches!(result, Err(EngineError::Validation { .. })));

        let result = ts.clone().reject(Uuid::new_v4(), "   ");
        assert!(matches!(result, Err(EngineError::Validation { .. })));
    }

    #[test]
    fn test_reject_records_reason_and_clerk() {
        let clerk = Uuid::new_v4();
        let ts = submitted()
            .reject(clerk, "Headcount does not match gate log")
            .unwrap();
        assert_eq!(ts.status, SiteTimesheetStatus::Rejected);
        assert_eq!(
            ts.rejection_reason,
            Some("Headcount does not match gate log".to_string())
        );
        assert_eq!(ts.clerk_id, Some(clerk));
        // Rejected records carry no authorization timestamp.
        assert_eq!(ts.authorized_at, None);
    }

    #[test]
    fn test_reject_after_authorize_fails() {
        let ts = submitted().authorize(Uuid::new_v4(), Utc::now()).unwrap();
        let result = ts.reject(Uuid::new_v4(), "Too late");
        assert!(matches!(
            result,
            Err(EngineError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_terminal_states_have_no_exit() {
        let rejected = submitted().reject(Uuid::new_v4(), "Wrong shift").unwrap();
        assert!(rejected.clone().submit().is_err());
        assert!(rejected.clone().authorize(Uuid::new_v4(), Utc::now()).is_err());
        assert!(rejected.reject(Uuid::new_v4(), "Again").is_err());
    }

    #[test]
    fn test_serde_round_trip() {
        let ts = submitted();
        let json = serde_json::to_string(&ts).unwrap();
        assert!(json.contains("\"status\":\"submitted\""));
        assert!(json.contains("\"shift\":\"morning\""));
        let back: SiteTimesheet = serde_json::from_str(&json).unwrap();
        assert_eq!(ts, back);
    }
}
