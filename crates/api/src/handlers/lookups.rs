//! Handlers for `/lookups`: project statuses, subjects, boards, counselors.
//!
//! Subjects and boards share the same `{ id, name }` shape, so their handlers
//! are thin wrappers over [`LookupRepo`] parameterized by [`LookupTable`].

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use mentorhub_core::types::DbId;
use mentorhub_core::validation::{require_text, validate_dto};
use mentorhub_db::models::lookup::{CreateCounselor, CreateNamedLookup, LookupTable};
use mentorhub_db::repositories::LookupRepo;

use crate::error::{not_found, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/lookups/statuses
pub async fn list_statuses(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let statuses = LookupRepo::statuses(&state.pool).await?;
    Ok(Json(DataResponse { data: statuses }))
}

async fn list_named(state: &AppState, table: LookupTable) -> AppResult<impl IntoResponse> {
    let rows = LookupRepo::list_named(&state.pool, table).await?;
    Ok(Json(DataResponse { data: rows }))
}

async fn create_named(
    state: &AppState,
    auth: &AuthUser,
    table: LookupTable,
    input: CreateNamedLookup,
) -> AppResult<impl IntoResponse> {
    validate_dto(&input)?;
    let name = require_text("name", &input.name)?;
    let row = LookupRepo::create_named(&state.pool, table, &name).await?;

    tracing::info!(
        id = row.id,
        table = table.table_name(),
        user_id = auth.user_id,
        "Lookup created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: row })))
}

async fn delete_named(
    state: &AppState,
    admin: &AuthUser,
    table: LookupTable,
    id: DbId,
) -> AppResult<StatusCode> {
    if !LookupRepo::delete_named(&state.pool, table, id).await? {
        return Err(not_found(table.entity(), id));
    }

    tracing::info!(
        id,
        table = table.table_name(),
        user_id = admin.user_id,
        "Lookup deleted"
    );
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/lookups/subjects
pub async fn list_subjects(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    list_named(&state, LookupTable::Subjects).await
}

/// POST /api/v1/lookups/subjects
pub async fn create_subject(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateNamedLookup>,
) -> AppResult<impl IntoResponse> {
    create_named(&state, &auth, LookupTable::Subjects, input).await
}

/// DELETE /api/v1/lookups/subjects/{id}
pub async fn delete_subject(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    delete_named(&state, &admin, LookupTable::Subjects, id).await
}

/// GET /api/v1/lookups/boards
pub async fn list_boards(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    list_named(&state, LookupTable::Boards).await
}

/// POST /api/v1/lookups/boards
pub async fn create_board(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateNamedLookup>,
) -> AppResult<impl IntoResponse> {
    create_named(&state, &auth, LookupTable::Boards, input).await
}

/// DELETE /api/v1/lookups/boards/{id}
pub async fn delete_board(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    delete_named(&state, &admin, LookupTable::Boards, id).await
}

/// GET /api/v1/lookups/counselors
pub async fn list_counselors(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let counselors = LookupRepo::list_counselors(&state.pool).await?;
    Ok(Json(DataResponse { data: counselors }))
}

/// POST /api/v1/lookups/counselors
pub async fn create_counselor(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateCounselor>,
) -> AppResult<impl IntoResponse> {
    validate_dto(&input)?;
    let counselor = LookupRepo::create_counselor(&state.pool, &input).await?;

    tracing::info!(counselor_id = counselor.id, user_id = auth.user_id, "Counselor created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: counselor })))
}

/// DELETE /api/v1/lookups/counselors/{id}
pub async fn delete_counselor(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !LookupRepo::delete_counselor(&state.pool, id).await? {
        return Err(not_found("Counselor", id));
    }

    tracing::info!(counselor_id = id, user_id = admin.user_id, "Counselor deleted");
    Ok(StatusCode::NO_CONTENT)
}
