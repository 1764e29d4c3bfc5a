//! Mentor model and DTOs.

use mentorhub_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::nullable::double_option;

/// A row from the `mentors` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Mentor {
    pub id: DbId,
    pub full_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub specialization: Option<String>,
    pub affiliation: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Mentor list row with the number of projects they are attached to,
/// either as lead or through `project_mentors`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MentorSummary {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub mentor: Mentor,
    pub project_count: i64,
}

/// DTO for creating a mentor.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateMentor {
    #[validate(length(min = 1, max = 200, message = "must not be empty"))]
    pub full_name: String,
    #[validate(email)]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub specialization: Option<String>,
    pub affiliation: Option<String>,
}

/// DTO for updating a mentor. All fields are optional.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateMentor {
    #[validate(length(min = 1, max = 200, message = "must not be empty"))]
    pub full_name: Option<String>,
    #[validate(email)]
    #[serde(default, deserialize_with = "double_option")]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub phone: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub specialization: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub affiliation: Option<Option<String>>,
}

/// Query parameters for `GET /mentors`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MentorListParams {
    pub search: Option<String>,
}
