//! Read-only view of approved papers and their venue applications.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use mentorhub_core::types::DbId;
use mentorhub_db::models::application::{
    ConferenceApplicationListParams, JournalApplicationListParams,
};
use mentorhub_db::models::ready_for_publication::{InPublicationDetail, InPublicationParams};
use mentorhub_db::repositories::{
    ConferenceApplicationRepo, JournalApplicationRepo, ReadyForPublicationRepo,
};

use crate::error::{not_found, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/in-publication?search=&project_id=
pub async fn list_in_publication(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<InPublicationParams>,
) -> AppResult<impl IntoResponse> {
    let entries = ReadyForPublicationRepo::list_in_publication(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: entries }))
}

/// GET /api/v1/in-publication/{id}
///
/// 404 when the paper does not exist or is not approved.
pub async fn get_in_publication(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let entry = ReadyForPublicationRepo::find_in_publication(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("In-publication paper", id))?;

    let students = ReadyForPublicationRepo::list_students(&state.pool, id).await?;
    let conference_applications = ConferenceApplicationRepo::list(
        &state.pool,
        &ConferenceApplicationListParams {
            paper_id: Some(id),
            ..Default::default()
        },
        None,
    )
    .await?;
    let journal_applications = JournalApplicationRepo::list(
        &state.pool,
        &JournalApplicationListParams {
            paper_id: Some(id),
            ..Default::default()
        },
        None,
    )
    .await?;

    Ok(Json(DataResponse {
        data: InPublicationDetail {
            entry,
            students,
            conference_applications,
            journal_applications,
        },
    }))
}
