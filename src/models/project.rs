//! Project and project-assignment models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Role;

/// Lifecycle status of a construction project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    /// Work is in progress.
    Active,
    /// Work is temporarily paused.
    OnHold,
    /// Work has finished.
    Completed,
}

/// A construction project. Created by administrative action; read-only
/// to the timesheet and payroll engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Unique identifier for the project.
    pub id: Uuid,
    /// The project's display name.
    pub name: String,
    /// Free-text site location.
    #[serde(default)]
    pub location: Option<String>,
    /// Current lifecycle status.
    pub status: ProjectStatus,
    /// When the project was created.
    pub created_at: DateTime<Utc>,
}

/// Links a worker to a project with a role.
///
/// A supervisor may only submit site timesheets against projects they
/// hold an assignment for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectAssignment {
    /// Unique identifier for the assignment.
    pub id: Uuid,
    /// The project the user is assigned to.
    pub project_id: Uuid,
    /// The assigned user.
    pub user_id: Uuid,
    /// The role held on this project.
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_status_serialization() {
        assert_eq!(
            serde_json::to_string(&ProjectStatus::OnHold).unwrap(),
            "\"on_hold\""
        );
        assert_eq!(
            serde_json::to_string(&ProjectStatus::Active).unwrap(),
            "\"active\""
        );
    }

    #[test]
    fn test_project_round_trip() {
        let project = Project {
            id: Uuid::new_v4(),
            name: "Waigani Drive upgrade".to_string(),
            location: Some("Port Moresby".to_string()),
            status: ProjectStatus::Active,
            created_at: Utc::now(),
        };
        let json = serde_json::to_string(&project).unwrap();
        let back: Project = serde_json::from_str(&json).unwrap();
        assert_eq!(project, back);
    }

    #[test]
    fn test_assignment_defaults_nothing_silently() {
        let json = r#"{
            "id": "6dd6bb6a-7b4f-49e9-a3be-94bee54fee81",
            "project_id": "9c861a5a-30ad-44e4-a225-42b425a804a3",
            "user_id": "3f2e83de-8adc-44b5-bd60-f0fe1048c552",
            "role": "supervisor"
        }"#;
        let assignment: ProjectAssignment = serde_json::from_str(json).unwrap();
        assert_eq!(assignment.role, Role::Supervisor);
    }
}
