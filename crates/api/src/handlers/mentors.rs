//! Handlers for the `/mentors` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use mentorhub_core::types::DbId;
use mentorhub_core::validation::validate_dto;
use mentorhub_db::models::mentor::{CreateMentor, MentorListParams, UpdateMentor};
use mentorhub_db::repositories::MentorRepo;

use crate::error::{not_found, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/mentors?search=
///
/// Each row carries the number of projects the mentor leads or is assigned to.
pub async fn list_mentors(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<MentorListParams>,
) -> AppResult<impl IntoResponse> {
    let mentors = MentorRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: mentors }))
}

/// POST /api/v1/mentors
pub async fn create_mentor(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateMentor>,
) -> AppResult<impl IntoResponse> {
    validate_dto(&input)?;
    let mentor = MentorRepo::create(&state.pool, &input).await?;

    tracing::info!(mentor_id = mentor.id, user_id = auth.user_id, "Mentor created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: mentor })))
}

/// GET /api/v1/mentors/{id}
pub async fn get_mentor(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let mentor = MentorRepo::find_summary(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Mentor", id))?;
    Ok(Json(DataResponse { data: mentor }))
}

/// PUT /api/v1/mentors/{id}
pub async fn update_mentor(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateMentor>,
) -> AppResult<impl IntoResponse> {
    validate_dto(&input)?;
    let mentor = MentorRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("Mentor", id))?;

    tracing::info!(mentor_id = id, user_id = auth.user_id, "Mentor updated");

    Ok(Json(DataResponse { data: mentor }))
}

/// DELETE /api/v1/mentors/{id}
///
/// Projects led by the mentor keep their row with the lead cleared.
pub async fn delete_mentor(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !MentorRepo::delete(&state.pool, id).await? {
        return Err(not_found("Mentor", id));
    }

    tracing::info!(mentor_id = id, user_id = admin.user_id, "Mentor deleted");
    Ok(StatusCode::NO_CONTENT)
}
