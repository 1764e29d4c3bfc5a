//! Handlers for conference and journal applications.
//!
//! Each application tracks one submission of an in-publication paper to one
//! venue. Application status is independent of the paper's own status.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use mentorhub_core::status::{parse_optional, ApplicationStatus};
use mentorhub_core::types::DbId;
use mentorhub_core::validation::validate_dto;
use mentorhub_db::models::application::{
    ConferenceApplicationListParams, CreateConferenceApplication, CreateJournalApplication,
    JournalApplicationListParams, UpdateConferenceApplication, UpdateJournalApplication,
};
use mentorhub_db::repositories::{ConferenceApplicationRepo, JournalApplicationRepo};

use crate::error::{not_found, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Conference applications
// ---------------------------------------------------------------------------

/// GET /api/v1/conference-applications?paper_id=&conference_id=&status=
pub async fn list_conference_applications(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ConferenceApplicationListParams>,
) -> AppResult<impl IntoResponse> {
    let status = parse_optional::<ApplicationStatus>(params.status.as_deref())?;
    let rows = ConferenceApplicationRepo::list(&state.pool, &params, status).await?;
    Ok(Json(DataResponse { data: rows }))
}

/// POST /api/v1/conference-applications
///
/// Status defaults to `applied`.
pub async fn create_conference_application(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateConferenceApplication>,
) -> AppResult<impl IntoResponse> {
    validate_dto(&input)?;
    let status = parse_optional::<ApplicationStatus>(input.status.as_deref())?
        .unwrap_or(ApplicationStatus::Applied);

    let application = ConferenceApplicationRepo::create(&state.pool, &input, status).await?;

    tracing::info!(
        application_id = application.id,
        paper_id = application.paper_id,
        conference_id = application.conference_id,
        user_id = auth.user_id,
        "Conference application created"
    );

    let view = ConferenceApplicationRepo::find_view(&state.pool, application.id)
        .await?
        .ok_or_else(|| not_found("Conference application", application.id))?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: view })))
}

/// GET /api/v1/conference-applications/{id}
pub async fn get_conference_application(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let view = ConferenceApplicationRepo::find_view(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Conference application", id))?;
    Ok(Json(DataResponse { data: view }))
}

/// PUT /api/v1/conference-applications/{id}
pub async fn update_conference_application(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateConferenceApplication>,
) -> AppResult<impl IntoResponse> {
    validate_dto(&input)?;
    let status = parse_optional::<ApplicationStatus>(input.status.as_deref())?;

    ConferenceApplicationRepo::update(&state.pool, id, &input, status)
        .await?
        .ok_or_else(|| not_found("Conference application", id))?;

    tracing::info!(
        application_id = id,
        status = status.map(ApplicationStatus::as_str),
        user_id = auth.user_id,
        "Conference application updated"
    );

    let view = ConferenceApplicationRepo::find_view(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Conference application", id))?;
    Ok(Json(DataResponse { data: view }))
}

/// DELETE /api/v1/conference-applications/{id}
pub async fn delete_conference_application(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !ConferenceApplicationRepo::delete(&state.pool, id).await? {
        return Err(not_found("Conference application", id));
    }

    tracing::info!(application_id = id, user_id = admin.user_id, "Conference application deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Journal applications
// ---------------------------------------------------------------------------

/// GET /api/v1/journal-applications?paper_id=&journal_id=&status=
pub async fn list_journal_applications(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<JournalApplicationListParams>,
) -> AppResult<impl IntoResponse> {
    let status = parse_optional::<ApplicationStatus>(params.status.as_deref())?;
    let rows = JournalApplicationRepo::list(&state.pool, &params, status).await?;
    Ok(Json(DataResponse { data: rows }))
}

/// POST /api/v1/journal-applications
pub async fn create_journal_application(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateJournalApplication>,
) -> AppResult<impl IntoResponse> {
    validate_dto(&input)?;
    let status = parse_optional::<ApplicationStatus>(input.status.as_deref())?
        .unwrap_or(ApplicationStatus::Applied);

    let application = JournalApplicationRepo::create(&state.pool, &input, status).await?;

    tracing::info!(
        application_id = application.id,
        paper_id = application.paper_id,
        journal_id = application.journal_id,
        user_id = auth.user_id,
        "Journal application created"
    );

    let view = JournalApplicationRepo::find_view(&state.pool, application.id)
        .await?
        .ok_or_else(|| not_found("Journal application", application.id))?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: view })))
}

/// GET /api/v1/journal-applications/{id}
pub async fn get_journal_application(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let view = JournalApplicationRepo::find_view(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Journal application", id))?;
    Ok(Json(DataResponse { data: view }))
}

/// PUT /api/v1/journal-applications/{id}
pub async fn update_journal_application(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateJournalApplication>,
) -> AppResult<impl IntoResponse> {
    validate_dto(&input)?;
    let status = parse_optional::<ApplicationStatus>(input.status.as_deref())?;

    JournalApplicationRepo::update(&state.pool, id, &input, status)
        .await?
        .ok_or_else(|| not_found("Journal application", id))?;

    tracing::info!(
        application_id = id,
        status = status.map(ApplicationStatus::as_str),
        user_id = auth.user_id,
        "Journal application updated"
    );

    let view = JournalApplicationRepo::find_view(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Journal application", id))?;
    Ok(Json(DataResponse { data: view }))
}

/// DELETE /api/v1/journal-applications/{id}
pub async fn delete_journal_application(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !JournalApplicationRepo::delete(&state.pool, id).await? {
        return Err(not_found("Journal application", id));
    }

    tracing::info!(application_id = id, user_id = admin.user_id, "Journal application deleted");
    Ok(StatusCode::NO_CONTENT)
}
