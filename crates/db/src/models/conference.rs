//! Conference reference entity.

use chrono::NaiveDate;
use mentorhub_core::deadline::DeadlineInfo;
use mentorhub_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::nullable::double_option;

/// A row from the `conferences` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Conference {
    pub id: DbId,
    pub name: String,
    pub affiliation: Option<String>,
    /// Free text such as "International" or "National".
    pub conference_type: Option<String>,
    pub location: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub submission_deadline: Option<NaiveDate>,
    pub website: Option<String>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Conference with its submission-deadline badge.
#[derive(Debug, Clone, Serialize)]
pub struct ConferenceItem {
    #[serde(flatten)]
    pub conference: Conference,
    pub deadline: Option<DeadlineInfo>,
}

/// DTO for creating a conference.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateConference {
    #[validate(length(min = 1, max = 300, message = "must not be empty"))]
    pub name: String,
    pub affiliation: Option<String>,
    pub conference_type: Option<String>,
    pub location: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub submission_deadline: Option<NaiveDate>,
    #[validate(url)]
    pub website: Option<String>,
    pub notes: Option<String>,
}

/// DTO for updating a conference. All fields are optional.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateConference {
    #[validate(length(min = 1, max = 300, message = "must not be empty"))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub affiliation: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub conference_type: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub location: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub start_date: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "double_option")]
    pub end_date: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "double_option")]
    pub submission_deadline: Option<Option<NaiveDate>>,
    #[validate(url)]
    #[serde(default, deserialize_with = "double_option")]
    pub website: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub notes: Option<Option<String>>,
}

/// Query parameters for `GET /conferences`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConferenceListParams {
    pub search: Option<String>,
    pub conference_type: Option<String>,
}
