//! Handlers for the `/rbms` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use mentorhub_core::types::DbId;
use mentorhub_core::validation::validate_dto;
use mentorhub_db::models::rbm::{CreateRbm, UpdateRbm};
use mentorhub_db::repositories::RbmRepo;

use crate::error::{not_found, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/rbms
pub async fn list_rbms(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let rbms = RbmRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: rbms }))
}

/// POST /api/v1/rbms
pub async fn create_rbm(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateRbm>,
) -> AppResult<impl IntoResponse> {
    validate_dto(&input)?;
    let rbm = RbmRepo::create(&state.pool, &input).await?;

    tracing::info!(rbm_id = rbm.id, user_id = auth.user_id, "RBM created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: rbm })))
}

/// GET /api/v1/rbms/{id}
pub async fn get_rbm(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let rbm = RbmRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("RBM", id))?;
    Ok(Json(DataResponse { data: rbm }))
}

/// PUT /api/v1/rbms/{id}
pub async fn update_rbm(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateRbm>,
) -> AppResult<impl IntoResponse> {
    validate_dto(&input)?;
    let rbm = RbmRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("RBM", id))?;

    tracing::info!(rbm_id = id, user_id = auth.user_id, "RBM updated");

    Ok(Json(DataResponse { data: rbm }))
}

/// DELETE /api/v1/rbms/{id}
pub async fn delete_rbm(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !RbmRepo::delete(&state.pool, id).await? {
        return Err(not_found("RBM", id));
    }

    tracing::info!(rbm_id = id, user_id = admin.user_id, "RBM deleted");
    Ok(StatusCode::NO_CONTENT)
}
