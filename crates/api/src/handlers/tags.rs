//! Handlers for the tag catalogue.
//!
//! Attaching tags to projects lives in [`super::projects`].

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use mentorhub_core::tags::{normalize_color, normalize_tag_name, DEFAULT_TAG_COLOR};
use mentorhub_core::types::DbId;
use mentorhub_db::models::tag::{CreateTag, UpdateTag};
use mentorhub_db::repositories::TagRepo;

use crate::error::{not_found, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/tags
///
/// Tags with their project usage count, most used first.
pub async fn list_tags(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let tags = TagRepo::list_with_usage(&state.pool).await?;
    Ok(Json(DataResponse { data: tags }))
}

/// POST /api/v1/tags
pub async fn create_tag(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateTag>,
) -> AppResult<impl IntoResponse> {
    let name = normalize_tag_name(&input.name)?;
    let color = normalize_color(input.color.as_deref().unwrap_or(DEFAULT_TAG_COLOR))?;

    let tag = TagRepo::create(&state.pool, &name, &color).await?;

    tracing::info!(tag_id = tag.id, user_id = auth.user_id, "Tag created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: tag })))
}

/// PUT /api/v1/tags/{id}
///
/// Update a tag's name and/or color.
pub async fn update_tag(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(tag_id): Path<DbId>,
    Json(input): Json<UpdateTag>,
) -> AppResult<impl IntoResponse> {
    let name = input.name.as_deref().map(normalize_tag_name).transpose()?;
    let color = input.color.as_deref().map(normalize_color).transpose()?;

    let tag = TagRepo::update(&state.pool, tag_id, name.as_deref(), color.as_deref())
        .await?
        .ok_or_else(|| not_found("Tag", tag_id))?;

    tracing::info!(tag_id, user_id = auth.user_id, "Tag updated");

    Ok(Json(DataResponse { data: tag }))
}

/// DELETE /api/v1/tags/{id}
///
/// Removes the tag from every project it was attached to.
pub async fn delete_tag(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(tag_id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !TagRepo::delete(&state.pool, tag_id).await? {
        return Err(not_found("Tag", tag_id));
    }

    tracing::info!(tag_id, user_id = admin.user_id, "Tag deleted");
    Ok(StatusCode::NO_CONTENT)
}
