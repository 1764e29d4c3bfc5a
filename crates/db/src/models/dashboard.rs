//! Aggregate counts and upcoming deadlines for the landing dashboard.

use chrono::NaiveDate;
use mentorhub_core::deadline::DeadlineInfo;
use mentorhub_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// Headline counts across the main tables.
#[derive(Debug, Clone, Default, FromRow, Serialize)]
pub struct DashboardCounts {
    pub projects: i64,
    pub active_projects: i64,
    pub completed_projects: i64,
    pub students: i64,
    pub mentors: i64,
    pub ready_for_publication: i64,
    pub in_publication: i64,
    pub publications: i64,
}

/// Number of rows sharing one status label.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StatusCount {
    pub status: String,
    pub count: i64,
}

/// A dated item surfaced on the dashboard.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DeadlineRow {
    /// `project`, `paper`, `conference`, or `journal`.
    pub kind: String,
    pub id: DbId,
    pub label: String,
    pub due_date: NaiveDate,
}

/// [`DeadlineRow`] with its computed badge.
#[derive(Debug, Clone, Serialize)]
pub struct UpcomingDeadline {
    #[serde(flatten)]
    pub row: DeadlineRow,
    pub deadline: DeadlineInfo,
}

/// Full dashboard payload.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub counts: DashboardCounts,
    pub projects_by_status: Vec<StatusCount>,
    pub papers_by_status: Vec<StatusCount>,
    pub applications_by_status: Vec<StatusCount>,
    pub deadlines: Vec<UpcomingDeadline>,
}
