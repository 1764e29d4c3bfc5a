//! Handlers for the `/ready-for-publication` resource.
//!
//! Papers move through `pending → in_review → approved → published`. Any
//! status may be set from any other; unknown literals are rejected with 400.
//! Approved papers also show up under `/in-publication`.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::NaiveDate;
use mentorhub_core::deadline::{self, deadline_info, PROJECT_DUE_SOON_DAYS};
use mentorhub_core::status::{parse_optional, ReadyStatus};
use mentorhub_core::types::DbId;
use mentorhub_core::validation::validate_dto;
use mentorhub_db::models::ready_for_publication::{
    CreateReadyForPublication, CreateStudentDetail, ReadyForPublicationDetail,
    ReadyForPublicationItem, ReadyForPublicationListParams, ReadyForPublicationSummary,
    UpdateReadyForPublication, UpdateReadyStatus,
};
use mentorhub_db::repositories::{ProjectRepo, ReadyForPublicationRepo};

use crate::error::{not_found, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

const ENTITY: &str = "Ready-for-publication entry";

fn item(summary: ReadyForPublicationSummary, today: NaiveDate) -> ReadyForPublicationItem {
    let deadline = deadline_info(summary.entry.target_date, today, PROJECT_DUE_SOON_DAYS);
    ReadyForPublicationItem { summary, deadline }
}

async fn load_detail(state: &AppState, id: DbId) -> AppResult<ReadyForPublicationDetail> {
    let summary = ReadyForPublicationRepo::find_summary(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(ENTITY, id))?;
    let students = ReadyForPublicationRepo::list_students(&state.pool, id).await?;

    Ok(ReadyForPublicationDetail {
        item: item(summary, deadline::today()),
        students,
    })
}

/// GET /api/v1/ready-for-publication?search=&status=&project_id=
pub async fn list_entries(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ReadyForPublicationListParams>,
) -> AppResult<impl IntoResponse> {
    let status = parse_optional::<ReadyStatus>(params.status.as_deref())?;

    let today = deadline::today();
    let items: Vec<ReadyForPublicationItem> =
        ReadyForPublicationRepo::list(&state.pool, &params, status)
            .await?
            .into_iter()
            .map(|s| item(s, today))
            .collect();

    Ok(Json(DataResponse { data: items }))
}

/// POST /api/v1/ready-for-publication
///
/// Status defaults to `pending`.
pub async fn create_entry(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateReadyForPublication>,
) -> AppResult<impl IntoResponse> {
    validate_dto(&input)?;
    let status =
        parse_optional::<ReadyStatus>(input.status.as_deref())?.unwrap_or(ReadyStatus::Pending);
    if ProjectRepo::find_by_id(&state.pool, input.project_id).await?.is_none() {
        return Err(not_found("Project", input.project_id));
    }

    let entry = ReadyForPublicationRepo::create(&state.pool, &input, status).await?;

    tracing::info!(
        rfp_id = entry.id,
        project_id = entry.project_id,
        status = %status,
        user_id = auth.user_id,
        "Ready-for-publication entry created"
    );

    let detail = load_detail(&state, entry.id).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: detail })))
}

/// GET /api/v1/ready-for-publication/{id}
pub async fn get_entry(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let detail = load_detail(&state, id).await?;
    Ok(Json(DataResponse { data: detail }))
}

/// PUT /api/v1/ready-for-publication/{id}
pub async fn update_entry(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateReadyForPublication>,
) -> AppResult<impl IntoResponse> {
    validate_dto(&input)?;
    let status = parse_optional::<ReadyStatus>(input.status.as_deref())?;

    ReadyForPublicationRepo::update(&state.pool, id, &input, status)
        .await?
        .ok_or_else(|| not_found(ENTITY, id))?;

    tracing::info!(rfp_id = id, user_id = auth.user_id, "Ready-for-publication entry updated");

    let detail = load_detail(&state, id).await?;
    Ok(Json(DataResponse { data: detail }))
}

/// PATCH /api/v1/ready-for-publication/{id}/status
///
/// Sets the status directly. Moving to `approved` places the paper in the
/// in-publication view.
pub async fn update_status(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateReadyStatus>,
) -> AppResult<impl IntoResponse> {
    let status: ReadyStatus = input.status.trim().parse()?;

    let entry = ReadyForPublicationRepo::update_status(&state.pool, id, status)
        .await?
        .ok_or_else(|| not_found(ENTITY, id))?;

    tracing::info!(
        rfp_id = id,
        status = %status,
        in_publication = status.is_in_publication(),
        user_id = auth.user_id,
        "Ready-for-publication status changed"
    );

    Ok(Json(DataResponse { data: entry }))
}

/// DELETE /api/v1/ready-for-publication/{id}
///
/// Author rows and venue applications cascade.
pub async fn delete_entry(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !ReadyForPublicationRepo::delete(&state.pool, id).await? {
        return Err(not_found(ENTITY, id));
    }

    tracing::info!(rfp_id = id, user_id = admin.user_id, "Ready-for-publication entry deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/ready-for-publication/{id}/students
pub async fn list_students(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if ReadyForPublicationRepo::find_summary(&state.pool, id).await?.is_none() {
        return Err(not_found(ENTITY, id));
    }
    let students = ReadyForPublicationRepo::list_students(&state.pool, id).await?;
    Ok(Json(DataResponse { data: students }))
}

/// POST /api/v1/ready-for-publication/{id}/students
///
/// Without `author_order` the new author is appended last.
pub async fn add_student(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<CreateStudentDetail>,
) -> AppResult<impl IntoResponse> {
    validate_dto(&input)?;
    if ReadyForPublicationRepo::find_summary(&state.pool, id).await?.is_none() {
        return Err(not_found(ENTITY, id));
    }

    let detail = ReadyForPublicationRepo::add_student(&state.pool, id, &input).await?;

    tracing::info!(
        rfp_id = id,
        detail_id = detail.id,
        author_order = detail.author_order,
        user_id = auth.user_id,
        "Author added"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: detail })))
}

/// DELETE /api/v1/ready-for-publication/{id}/students/{detail_id}
pub async fn remove_student(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path((id, detail_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    if !ReadyForPublicationRepo::remove_student(&state.pool, id, detail_id).await? {
        return Err(not_found("Author", detail_id));
    }

    tracing::info!(rfp_id = id, detail_id, user_id = admin.user_id, "Author removed");
    Ok(StatusCode::NO_CONTENT)
}
