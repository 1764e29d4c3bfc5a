//! Student model and DTOs.

use mentorhub_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::nullable::double_option;

/// A row from the `students` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Student {
    pub id: DbId,
    /// Generated `STU<year><seq>` code.
    pub student_code: String,
    pub full_name: String,
    pub grade: Option<String>,
    pub board_id: Option<DbId>,
    pub counselor_id: Option<DbId>,
    pub rbm_id: Option<DbId>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub parent_name: Option<String>,
    pub parent_phone: Option<String>,
    pub school_name: Option<String>,
    pub application_year: Option<i32>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Student list row joined with lookup names.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StudentSummary {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub student: Student,
    pub board_name: Option<String>,
    pub counselor_name: Option<String>,
    pub rbm_name: Option<String>,
    pub project_count: i64,
}

/// A project the student is assigned to.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StudentProject {
    pub id: DbId,
    pub project_code: String,
    pub project_name: String,
    pub status_name: String,
}

/// Full student view returned by `GET /students/{id}`.
#[derive(Debug, Clone, Serialize)]
pub struct StudentDetail {
    #[serde(flatten)]
    pub summary: StudentSummary,
    pub projects: Vec<StudentProject>,
}

/// DTO for creating a student. The student code is generated.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateStudent {
    #[validate(length(min = 1, max = 200, message = "must not be empty"))]
    pub full_name: String,
    pub grade: Option<String>,
    pub board_id: Option<DbId>,
    pub counselor_id: Option<DbId>,
    pub rbm_id: Option<DbId>,
    #[validate(email)]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub parent_name: Option<String>,
    pub parent_phone: Option<String>,
    pub school_name: Option<String>,
    #[validate(range(min = 2000, max = 2100))]
    pub application_year: Option<i32>,
}

/// DTO for updating a student. All fields are optional.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateStudent {
    #[validate(length(min = 1, max = 200, message = "must not be empty"))]
    pub full_name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub grade: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub board_id: Option<Option<DbId>>,
    #[serde(default, deserialize_with = "double_option")]
    pub counselor_id: Option<Option<DbId>>,
    #[serde(default, deserialize_with = "double_option")]
    pub rbm_id: Option<Option<DbId>>,
    #[validate(email)]
    #[serde(default, deserialize_with = "double_option")]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub phone: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub parent_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub parent_phone: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub school_name: Option<Option<String>>,
    #[validate(range(min = 2000, max = 2100))]
    #[serde(default, deserialize_with = "double_option")]
    pub application_year: Option<Option<i32>>,
}

/// Query parameters for `GET /students`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StudentListParams {
    pub search: Option<String>,
    pub grade: Option<String>,
    pub board_id: Option<DbId>,
    pub counselor_id: Option<DbId>,
    pub rbm_id: Option<DbId>,
    pub application_year: Option<i32>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
