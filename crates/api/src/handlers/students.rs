//! Handlers for the `/students` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use mentorhub_core::types::DbId;
use mentorhub_core::validation::validate_dto;
use mentorhub_db::models::student::{
    CreateStudent, StudentDetail, StudentListParams, UpdateStudent,
};
use mentorhub_db::repositories::StudentRepo;

use crate::error::{not_found, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/students
///
/// Filters: `search`, `grade`, `board_id`, `counselor_id`, `rbm_id`,
/// `application_year`, plus `limit`/`offset`.
pub async fn list_students(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<StudentListParams>,
) -> AppResult<impl IntoResponse> {
    let students = StudentRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: students }))
}

/// POST /api/v1/students
///
/// The `STU<year><seq>` code is generated on insert.
pub async fn create_student(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateStudent>,
) -> AppResult<impl IntoResponse> {
    validate_dto(&input)?;
    let student = StudentRepo::create(&state.pool, &input).await?;

    tracing::info!(
        student_id = student.id,
        code = %student.student_code,
        user_id = auth.user_id,
        "Student created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: student })))
}

/// GET /api/v1/students/{id}
///
/// Returns the student with lookup names and the projects they belong to.
pub async fn get_student(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let summary = StudentRepo::find_summary(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Student", id))?;
    let projects = StudentRepo::projects(&state.pool, id).await?;

    Ok(Json(DataResponse {
        data: StudentDetail { summary, projects },
    }))
}

/// PUT /api/v1/students/{id}
pub async fn update_student(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateStudent>,
) -> AppResult<impl IntoResponse> {
    validate_dto(&input)?;
    let student = StudentRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("Student", id))?;

    tracing::info!(student_id = id, user_id = auth.user_id, "Student updated");

    Ok(Json(DataResponse { data: student }))
}

/// DELETE /api/v1/students/{id}
pub async fn delete_student(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !StudentRepo::delete(&state.pool, id).await? {
        return Err(not_found("Student", id));
    }

    tracing::info!(student_id = id, user_id = admin.user_id, "Student deleted");
    Ok(StatusCode::NO_CONTENT)
}
