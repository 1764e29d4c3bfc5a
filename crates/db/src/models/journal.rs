//! Journal reference entity.

use chrono::NaiveDate;
use mentorhub_core::deadline::DeadlineInfo;
use mentorhub_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::nullable::double_option;

/// A row from the `journals` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Journal {
    pub id: DbId,
    pub name: String,
    pub publisher: Option<String>,
    pub journal_type: Option<String>,
    /// Free text such as "Quarterly".
    pub frequency: Option<String>,
    pub submission_deadline: Option<NaiveDate>,
    pub website: Option<String>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Journal with its submission-deadline badge.
#[derive(Debug, Clone, Serialize)]
pub struct JournalItem {
    #[serde(flatten)]
    pub journal: Journal,
    pub deadline: Option<DeadlineInfo>,
}

/// DTO for creating a journal.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateJournal {
    #[validate(length(min = 1, max = 300, message = "must not be empty"))]
    pub name: String,
    pub publisher: Option<String>,
    pub journal_type: Option<String>,
    pub frequency: Option<String>,
    pub submission_deadline: Option<NaiveDate>,
    #[validate(url)]
    pub website: Option<String>,
    pub notes: Option<String>,
}

/// DTO for updating a journal. All fields are optional.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateJournal {
    #[validate(length(min = 1, max = 300, message = "must not be empty"))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub publisher: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub journal_type: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub frequency: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub submission_deadline: Option<Option<NaiveDate>>,
    #[validate(url)]
    #[serde(default, deserialize_with = "double_option")]
    pub website: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub notes: Option<Option<String>>,
}

/// Query parameters for `GET /journals`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JournalListParams {
    pub search: Option<String>,
}
