//! Ready-for-publication staging list, its author details, and the
//! derived in-publication view.

use chrono::NaiveDate;
use mentorhub_core::deadline::DeadlineInfo;
use mentorhub_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::nullable::double_option;

use crate::models::application::{ConferenceApplicationView, JournalApplicationView};

/// A row from the `ready_for_publication` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ReadyForPublication {
    pub id: DbId,
    pub project_id: DbId,
    pub paper_title: String,
    /// One of `pending`, `in_review`, `approved`, `published`.
    pub status: String,
    pub draft_link: Option<String>,
    pub plagiarism_report_link: Option<String>,
    pub ai_detection_link: Option<String>,
    pub target_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// List row joined with the owning project.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ReadyForPublicationSummary {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub entry: ReadyForPublication,
    pub project_code: String,
    pub project_name: String,
    pub author_count: i64,
}

/// List row as returned to clients, with the target-date badge.
#[derive(Debug, Clone, Serialize)]
pub struct ReadyForPublicationItem {
    #[serde(flatten)]
    pub summary: ReadyForPublicationSummary,
    pub deadline: Option<DeadlineInfo>,
}

/// Full entry view with its author details.
#[derive(Debug, Clone, Serialize)]
pub struct ReadyForPublicationDetail {
    #[serde(flatten)]
    pub item: ReadyForPublicationItem,
    pub students: Vec<StudentDetail>,
}

/// DTO for creating a ready-for-publication entry.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateReadyForPublication {
    pub project_id: DbId,
    #[validate(length(min = 1, max = 500, message = "must not be empty"))]
    pub paper_title: String,
    /// Defaults to `pending`.
    pub status: Option<String>,
    #[validate(url)]
    pub draft_link: Option<String>,
    #[validate(url)]
    pub plagiarism_report_link: Option<String>,
    #[validate(url)]
    pub ai_detection_link: Option<String>,
    pub target_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// DTO for updating an entry. All fields are optional.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateReadyForPublication {
    #[validate(length(min = 1, max = 500, message = "must not be empty"))]
    pub paper_title: Option<String>,
    pub status: Option<String>,
    #[validate(url)]
    #[serde(default, deserialize_with = "double_option")]
    pub draft_link: Option<Option<String>>,
    #[validate(url)]
    #[serde(default, deserialize_with = "double_option")]
    pub plagiarism_report_link: Option<Option<String>>,
    #[validate(url)]
    #[serde(default, deserialize_with = "double_option")]
    pub ai_detection_link: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub target_date: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "double_option")]
    pub notes: Option<Option<String>>,
}

/// Request body for `PATCH /ready-for-publication/{id}/status`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateReadyStatus {
    pub status: String,
}

/// Query parameters for `GET /ready-for-publication`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReadyForPublicationListParams {
    pub search: Option<String>,
    pub status: Option<String>,
    pub project_id: Option<DbId>,
}

/// A row from `rfp_student_details`: one author on a staged paper.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StudentDetail {
    pub id: DbId,
    pub ready_for_publication_id: DbId,
    pub student_id: Option<DbId>,
    pub full_name: String,
    pub email: Option<String>,
    pub affiliation: Option<String>,
    pub author_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for adding an author to a staged paper.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateStudentDetail {
    /// Link to an existing student; `full_name` is still stored as written.
    pub student_id: Option<DbId>,
    #[validate(length(min = 1, max = 200, message = "must not be empty"))]
    pub full_name: String,
    #[validate(email)]
    pub email: Option<String>,
    pub affiliation: Option<String>,
    #[validate(range(min = 1, max = 50))]
    pub author_order: Option<i32>,
}

/// A row of the in-publication view: an approved paper plus application counts.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct InPublicationEntry {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub entry: ReadyForPublication,
    pub project_code: String,
    pub project_name: String,
    pub conference_application_count: i64,
    pub journal_application_count: i64,
    pub accepted_count: i64,
    pub pending_count: i64,
}

/// In-publication paper with every application attached to it.
#[derive(Debug, Clone, Serialize)]
pub struct InPublicationDetail {
    #[serde(flatten)]
    pub entry: InPublicationEntry,
    pub students: Vec<StudentDetail>,
    pub conference_applications: Vec<ConferenceApplicationView>,
    pub journal_applications: Vec<JournalApplicationView>,
}

/// Query parameters for `GET /in-publication`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InPublicationParams {
    pub search: Option<String>,
    pub project_id: Option<DbId>,
}
