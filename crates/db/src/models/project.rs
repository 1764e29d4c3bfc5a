//! Project entity model and DTOs.

use chrono::NaiveDate;
use mentorhub_core::deadline::DeadlineInfo;
use mentorhub_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::nullable::double_option;
use crate::models::status::StatusId;
use crate::models::tag::Tag;

/// A row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    /// Generated `PRJ<year><seq>` code.
    pub project_code: String,
    pub project_name: String,
    pub description: Option<String>,
    pub status_id: StatusId,
    pub subject_id: Option<DbId>,
    pub lead_mentor_id: Option<DbId>,
    pub rbm_id: Option<DbId>,
    pub start_date: Option<NaiveDate>,
    pub assigned_date: Option<NaiveDate>,
    pub completion_date: Option<NaiveDate>,
    /// `start_date + 4 months`, written when the start date is saved.
    pub end_date: Option<NaiveDate>,
    /// `"Yes"` or `"No"`.
    pub has_prototype: String,
    pub drive_link: Option<String>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Project list row joined with lookup names.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectSummary {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub project: Project,
    pub status_name: String,
    pub subject_name: Option<String>,
    pub lead_mentor_name: Option<String>,
    pub rbm_name: Option<String>,
    pub student_count: i64,
}

/// Project list row as returned to clients, with the end-date badge.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectListItem {
    #[serde(flatten)]
    pub summary: ProjectSummary,
    pub deadline: Option<DeadlineInfo>,
}

/// Minimal `{ id, full_name }` reference for dropdowns.
#[derive(Debug, Clone, FromRow, Serialize, PartialEq, Eq)]
pub struct PersonRef {
    pub id: DbId,
    pub full_name: String,
}

/// Students and mentors attached to a project (`get_project_data`).
#[derive(Debug, Clone, Serialize)]
pub struct ProjectPeople {
    pub students: Vec<PersonRef>,
    pub mentors: Vec<PersonRef>,
}

/// Full project view returned by `GET /projects/{id}`.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectDetail {
    #[serde(flatten)]
    pub item: ProjectListItem,
    pub students: Vec<PersonRef>,
    pub mentors: Vec<PersonRef>,
    pub tags: Vec<Tag>,
}

/// DTO for creating a new project. The project code and end date are computed.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProject {
    #[validate(length(min = 1, max = 300, message = "must not be empty"))]
    pub project_name: String,
    pub description: Option<String>,
    /// Defaults to 1 (Not Started) if omitted.
    pub status_id: Option<StatusId>,
    pub subject_id: Option<DbId>,
    pub lead_mentor_id: Option<DbId>,
    pub rbm_id: Option<DbId>,
    pub start_date: Option<NaiveDate>,
    pub assigned_date: Option<NaiveDate>,
    /// `"Yes"` or `"No"`; defaults to `"No"`.
    pub has_prototype: Option<String>,
    #[validate(url)]
    pub drive_link: Option<String>,
    pub notes: Option<String>,
    #[serde(default)]
    pub student_ids: Vec<DbId>,
    #[serde(default)]
    pub mentor_ids: Vec<DbId>,
    #[serde(default)]
    pub tag_ids: Vec<DbId>,
}

/// DTO for updating an existing project. All fields are optional.
///
/// Nullable columns accept an explicit `null` to clear the stored value.
/// When an id list is present it replaces the whole assignment set.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProject {
    #[validate(length(min = 1, max = 300, message = "must not be empty"))]
    pub project_name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    pub status_id: Option<StatusId>,
    #[serde(default, deserialize_with = "double_option")]
    pub subject_id: Option<Option<DbId>>,
    #[serde(default, deserialize_with = "double_option")]
    pub lead_mentor_id: Option<Option<DbId>>,
    #[serde(default, deserialize_with = "double_option")]
    pub rbm_id: Option<Option<DbId>>,
    /// Clearing the start date also clears `end_date`.
    #[serde(default, deserialize_with = "double_option")]
    pub start_date: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "double_option")]
    pub assigned_date: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "double_option")]
    pub completion_date: Option<Option<NaiveDate>>,
    pub has_prototype: Option<String>,
    #[validate(url)]
    #[serde(default, deserialize_with = "double_option")]
    pub drive_link: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub notes: Option<Option<String>>,
    pub student_ids: Option<Vec<DbId>>,
    pub mentor_ids: Option<Vec<DbId>>,
    pub tag_ids: Option<Vec<DbId>>,
}

/// Request body for `POST /projects/{id}/complete`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompleteProject {
    /// Defaults to today.
    pub completion_date: Option<NaiveDate>,
    pub has_prototype: Option<String>,
}

/// Request body for `POST /projects/{id}/tags`.
#[derive(Debug, Clone, Deserialize)]
pub struct AttachTag {
    pub tag_id: DbId,
}

/// Which slice of projects a list returns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectScope {
    #[default]
    All,
    /// Status name does not contain "completed".
    Active,
    /// Status name contains "completed".
    Completed,
}

/// Sort keys accepted by `GET /projects?sort=`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectSort {
    #[default]
    Newest,
    Oldest,
    Name,
    StartDateAsc,
    StartDateDesc,
    EndDateAsc,
    EndDateDesc,
}

impl ProjectSort {
    /// Fixed `ORDER BY` fragment for this key.
    pub fn order_by(self) -> &'static str {
        match self {
            ProjectSort::Newest => "p.created_at DESC, p.id DESC",
            ProjectSort::Oldest => "p.created_at ASC, p.id ASC",
            ProjectSort::Name => "p.project_name ASC, p.id ASC",
            ProjectSort::StartDateAsc => "p.start_date ASC NULLS LAST, p.id ASC",
            ProjectSort::StartDateDesc => "p.start_date DESC NULLS LAST, p.id DESC",
            ProjectSort::EndDateAsc => "p.end_date ASC NULLS LAST, p.id ASC",
            ProjectSort::EndDateDesc => "p.end_date DESC NULLS LAST, p.id DESC",
        }
    }
}

/// Query parameters for `GET /projects`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectListParams {
    pub search: Option<String>,
    pub status_id: Option<StatusId>,
    pub mentor_id: Option<DbId>,
    pub subject_id: Option<DbId>,
    pub rbm_id: Option<DbId>,
    pub tag_id: Option<DbId>,
    pub student_id: Option<DbId>,
    pub has_prototype: Option<String>,
    #[serde(default)]
    pub scope: ProjectScope,
    #[serde(default)]
    pub sort: ProjectSort,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_keys_deserialize_snake_case() {
        let params: ProjectListParams =
            serde_json::from_str(r#"{"sort": "end_date_asc", "scope": "completed"}"#).unwrap();
        assert_eq!(params.sort, ProjectSort::EndDateAsc);
        assert_eq!(params.scope, ProjectScope::Completed);
    }

    #[test]
    fn defaults_are_newest_and_all() {
        let params: ProjectListParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params.sort, ProjectSort::Newest);
        assert_eq!(params.scope, ProjectScope::All);
        assert_eq!(params.sort.order_by(), "p.created_at DESC, p.id DESC");
    }

    #[test]
    fn update_project_tells_null_from_absent() {
        let input: UpdateProject =
            serde_json::from_str(r#"{"lead_mentor_id": null, "notes": "kept"}"#).unwrap();
        assert_eq!(input.lead_mentor_id, Some(None));
        assert_eq!(input.notes, Some(Some("kept".to_string())));
        assert_eq!(input.subject_id, None);
        assert_eq!(input.drive_link, None);
    }

    #[test]
    fn create_project_assignment_lists_default_empty() {
        let input: CreateProject =
            serde_json::from_str(r#"{"project_name": "Soil sensors"}"#).unwrap();
        assert!(input.student_ids.is_empty());
        assert!(input.tag_ids.is_empty());
    }
}
