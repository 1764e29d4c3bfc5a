//! Conference and journal submissions of an in-publication paper.
//!
//! Each application carries its own status, independent of the paper's
//! ready-for-publication status.

use chrono::NaiveDate;
use mentorhub_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::nullable::double_option;

/// A row from the `conference_applications` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ConferenceApplication {
    pub id: DbId,
    /// The `ready_for_publication` row being submitted.
    pub paper_id: DbId,
    pub conference_id: DbId,
    /// One of `applied`, `under_review`, `accepted`, `rejected`, `withdrawn`.
    pub status: String,
    pub applied_on: Option<NaiveDate>,
    pub decision_on: Option<NaiveDate>,
    pub feedback: Option<String>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Conference application joined with the paper title and conference name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ConferenceApplicationView {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub application: ConferenceApplication,
    pub paper_title: String,
    pub conference_name: String,
}

/// A row from the `journal_applications` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct JournalApplication {
    pub id: DbId,
    pub paper_id: DbId,
    pub journal_id: DbId,
    pub status: String,
    pub manuscript_ref: Option<String>,
    pub applied_on: Option<NaiveDate>,
    pub decision_on: Option<NaiveDate>,
    pub feedback: Option<String>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Journal application joined with the paper title and journal name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct JournalApplicationView {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub application: JournalApplication,
    pub paper_title: String,
    pub journal_name: String,
}

/// DTO for creating a conference application.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateConferenceApplication {
    pub paper_id: DbId,
    pub conference_id: DbId,
    /// Defaults to `applied`.
    pub status: Option<String>,
    pub applied_on: Option<NaiveDate>,
    pub decision_on: Option<NaiveDate>,
    #[validate(length(max = 10000))]
    pub feedback: Option<String>,
    pub notes: Option<String>,
}

/// DTO for updating a conference application. All fields are optional.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateConferenceApplication {
    pub conference_id: Option<DbId>,
    pub status: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub applied_on: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "double_option")]
    pub decision_on: Option<Option<NaiveDate>>,
    #[validate(length(max = 10000))]
    #[serde(default, deserialize_with = "double_option")]
    pub feedback: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub notes: Option<Option<String>>,
}

/// DTO for creating a journal application.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateJournalApplication {
    pub paper_id: DbId,
    pub journal_id: DbId,
    pub status: Option<String>,
    pub manuscript_ref: Option<String>,
    pub applied_on: Option<NaiveDate>,
    pub decision_on: Option<NaiveDate>,
    #[validate(length(max = 10000))]
    pub feedback: Option<String>,
    pub notes: Option<String>,
}

/// DTO for updating a journal application. All fields are optional.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateJournalApplication {
    pub journal_id: Option<DbId>,
    pub status: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub manuscript_ref: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub applied_on: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "double_option")]
    pub decision_on: Option<Option<NaiveDate>>,
    #[validate(length(max = 10000))]
    #[serde(default, deserialize_with = "double_option")]
    pub feedback: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub notes: Option<Option<String>>,
}

/// Query parameters for `GET /conference-applications`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConferenceApplicationListParams {
    pub paper_id: Option<DbId>,
    pub conference_id: Option<DbId>,
    pub status: Option<String>,
}

/// Query parameters for `GET /journal-applications`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JournalApplicationListParams {
    pub paper_id: Option<DbId>,
    pub journal_id: Option<DbId>,
    pub status: Option<String>,
}
