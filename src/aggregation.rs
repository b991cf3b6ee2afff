//! Project aggregation over authorized site timesheets.
//!
//! Rolls authorized site records into per-project summaries: equipment
//! hours, material quantities, production output, worker-day totals, and
//! the most recent remarks. Only records with `authorized` status are
//! ever counted; that is the trust boundary between raw submissions and
//! what stakeholders see. Summaries are recomputed on demand and never
//! persisted; recomputation from the same authorized set is always
//! identical.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{Project, ProjectStatus, SiteTimesheet, SiteTimesheetStatus, Worker};

/// Composite key for a summed quantity: the thing measured and the unit
/// it was recorded in.
///
/// The same item recorded in different units stays on separate lines;
/// "Cement" in bags never merges with "Cement" in kilograms.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct QuantityKey {
    /// The item or activity name.
    pub name: String,
    /// The unit the quantity was recorded in.
    pub unit: String,
}

impl QuantityKey {
    /// The display label used as the aggregate line key.
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.unit)
    }
}

impl fmt::Display for QuantityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.unit)
    }
}

/// One remark surfaced on a project summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemarkEntry {
    /// The site-timesheet date the remark was made on.
    pub date: NaiveDate,
    /// The recording foreman's name, when the profile is known.
    pub foreman: String,
    /// The remark text.
    pub text: String,
}

/// Aggregated view of one project's authorized site timesheets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSummary {
    /// The project id.
    pub project_id: Uuid,
    /// The project name.
    pub name: String,
    /// The project location.
    pub location: Option<String>,
    /// The project status.
    pub status: ProjectStatus,
    /// Count of authorized site timesheets.
    pub timesheet_count: usize,
    /// Sum of headcounts across authorized records. One worker on one
    /// site-timesheet date counts as one worker-day.
    pub total_worker_days: u64,
    /// Equipment hours keyed by equipment name.
    pub equipment: BTreeMap<String, Decimal>,
    /// Material quantities keyed by `item (unit)`.
    pub materials: BTreeMap<String, Decimal>,
    /// Production quantities keyed by `activity (unit)`.
    pub production: BTreeMap<String, Decimal>,
    /// The five most recent non-empty remarks, newest first.
    pub remarks: Vec<RemarkEntry>,
}

/// Fleet-level rollup across all project summaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FleetSummary {
    /// Count of authorized site timesheets across all projects.
    pub authorized_timesheets: usize,
    /// Sum of worker-days across all projects.
    pub total_worker_days: u64,
}

/// Number of remarks surfaced per project.
const RECENT_REMARKS: usize = 5;

/// Summarizes every project from its authorized site timesheets.
///
/// Unauthorized records (draft, submitted, rejected) are excluded
/// unconditionally. The worker slice supplies foreman names for the
/// remark entries; an unknown foreman id is shown as "Unknown".
///
/// # Example
///
/// ```
/// use sitepay_engine::aggregation::summarize_projects;
///
/// let summaries = summarize_projects(&[], &[], &[]);
/// assert!(summaries.is_empty());
/// ```
pub fn summarize_projects(
    projects: &[Project],
    timesheets: &[SiteTimesheet],
    workers: &[Worker],
) -> Vec<ProjectSummary> {
    let names: HashMap<Uuid, &str> = workers
        .iter()
        .map(|w| (w.id, w.full_name.as_str()))
        .collect();

    projects
        .iter()
        .map(|project| summarize_project(project, timesheets, &names))
        .collect()
}

fn summarize_project(
    project: &Project,
    timesheets: &[SiteTimesheet],
    names: &HashMap<Uuid, &str>,
) -> ProjectSummary {
    let authorized: Vec<&SiteTimesheet> = timesheets
        .iter()
        .filter(|t| t.project_id == project.id && t.status == SiteTimesheetStatus::Authorized)
        .collect();

    let total_worker_days = authorized
        .iter()
        .map(|t| u64::from(t.number_of_workers))
        .sum();

    let mut equipment: BTreeMap<String, Decimal> = BTreeMap::new();
    let mut materials: BTreeMap<String, Decimal> = BTreeMap::new();
    let mut production: BTreeMap<String, Decimal> = BTreeMap::new();

    for sheet in &authorized {
        for line in &sheet.equipment {
            *equipment.entry(line.name.clone()).or_insert(Decimal::ZERO) += line.hours_used;
        }
        for line in &sheet.materials {
            let key = QuantityKey {
                name: line.item.clone(),
                unit: line.unit.clone(),
            };
            *materials.entry(key.label()).or_insert(Decimal::ZERO) += line.quantity;
        }
        for line in &sheet.production {
            let key = QuantityKey {
                name: line.activity.clone(),
                unit: line.unit.clone(),
            };
            *production.entry(key.label()).or_insert(Decimal::ZERO) += line.quantity;
        }
    }

    let mut remarks: Vec<RemarkEntry> = authorized
        .iter()
        .filter_map(|t| {
            let text = t.remarks.as_deref()?.trim();
            if text.is_empty() {
                return None;
            }
            Some(RemarkEntry {
                date: t.date,
                foreman: names
                    .get(&t.foreman_id)
                    .map_or_else(|| "Unknown".to_string(), |n| (*n).to_string()),
                text: text.to_string(),
            })
        })
        .collect();
    remarks.sort_by(|a, b| b.date.cmp(&a.date));
    remarks.truncate(RECENT_REMARKS);

    ProjectSummary {
        project_id: project.id,
        name: project.name.clone(),
        location: project.location.clone(),
        status: project.status,
        timesheet_count: authorized.len(),
        total_worker_days,
        equipment,
        materials,
        production,
        remarks,
    }
}

/// Rolls project summaries up into a fleet-level view.
pub fn fleet_summary(summaries: &[ProjectSummary]) -> FleetSummary {
    FleetSummary {
        authorized_timesheets: summaries.iter().map(|s| s.timesheet_count).sum(),
        total_worker_days: summaries.iter().map(|s| s.total_worker_days).sum(),
    }
}
