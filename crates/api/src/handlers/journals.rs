//! Handlers for the `/journals` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::NaiveDate;
use mentorhub_core::deadline::{self, deadline_info, VENUE_DUE_SOON_DAYS};
use mentorhub_core::types::DbId;
use mentorhub_core::validation::validate_dto;
use mentorhub_db::models::journal::{
    CreateJournal, Journal, JournalItem, JournalListParams, UpdateJournal,
};
use mentorhub_db::repositories::JournalRepo;

use crate::error::{not_found, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

fn item(journal: Journal, today: NaiveDate) -> JournalItem {
    let deadline = deadline_info(journal.submission_deadline, today, VENUE_DUE_SOON_DAYS);
    JournalItem { journal, deadline }
}

/// GET /api/v1/journals?search=
pub async fn list_journals(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<JournalListParams>,
) -> AppResult<impl IntoResponse> {
    let today = deadline::today();
    let items: Vec<JournalItem> = JournalRepo::list(&state.pool, &params)
        .await?
        .into_iter()
        .map(|j| item(j, today))
        .collect();
    Ok(Json(DataResponse { data: items }))
}

/// POST /api/v1/journals
pub async fn create_journal(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateJournal>,
) -> AppResult<impl IntoResponse> {
    validate_dto(&input)?;
    let journal = JournalRepo::create(&state.pool, &input).await?;

    tracing::info!(journal_id = journal.id, user_id = auth.user_id, "Journal created");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: item(journal, deadline::today()),
        }),
    ))
}

/// GET /api/v1/journals/{id}
pub async fn get_journal(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let journal = JournalRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Journal", id))?;
    Ok(Json(DataResponse {
        data: item(journal, deadline::today()),
    }))
}

/// PUT /api/v1/journals/{id}
pub async fn update_journal(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateJournal>,
) -> AppResult<impl IntoResponse> {
    validate_dto(&input)?;
    let journal = JournalRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("Journal", id))?;

    tracing::info!(journal_id = id, user_id = auth.user_id, "Journal updated");

    Ok(Json(DataResponse {
        data: item(journal, deadline::today()),
    }))
}

/// DELETE /api/v1/journals/{id}
pub async fn delete_journal(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !JournalRepo::delete(&state.pool, id).await? {
        return Err(not_found("Journal", id));
    }

    tracing::info!(journal_id = id, user_id = admin.user_id, "Journal deleted");
    Ok(StatusCode::NO_CONTENT)
}
