//! Handlers for the `/conferences` resource.
//!
//! Rows carry a submission-deadline badge with the 30-day venue window.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::NaiveDate;
use mentorhub_core::deadline::{self, deadline_info, VENUE_DUE_SOON_DAYS};
use mentorhub_core::types::DbId;
use mentorhub_core::validation::validate_dto;
use mentorhub_db::models::conference::{
    Conference, ConferenceItem, ConferenceListParams, CreateConference, UpdateConference,
};
use mentorhub_db::repositories::ConferenceRepo;

use crate::error::{not_found, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

fn item(conference: Conference, today: NaiveDate) -> ConferenceItem {
    let deadline = deadline_info(conference.submission_deadline, today, VENUE_DUE_SOON_DAYS);
    ConferenceItem {
        conference,
        deadline,
    }
}

/// GET /api/v1/conferences?search=&conference_type=
pub async fn list_conferences(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ConferenceListParams>,
) -> AppResult<impl IntoResponse> {
    let today = deadline::today();
    let items: Vec<ConferenceItem> = ConferenceRepo::list(&state.pool, &params)
        .await?
        .into_iter()
        .map(|c| item(c, today))
        .collect();
    Ok(Json(DataResponse { data: items }))
}

/// POST /api/v1/conferences
pub async fn create_conference(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateConference>,
) -> AppResult<impl IntoResponse> {
    validate_dto(&input)?;
    let conference = ConferenceRepo::create(&state.pool, &input).await?;

    tracing::info!(conference_id = conference.id, user_id = auth.user_id, "Conference created");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: item(conference, deadline::today()),
        }),
    ))
}

/// GET /api/v1/conferences/{id}
pub async fn get_conference(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let conference = ConferenceRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Conference", id))?;
    Ok(Json(DataResponse {
        data: item(conference, deadline::today()),
    }))
}

/// PUT /api/v1/conferences/{id}
pub async fn update_conference(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateConference>,
) -> AppResult<impl IntoResponse> {
    validate_dto(&input)?;
    let conference = ConferenceRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("Conference", id))?;

    tracing::info!(conference_id = id, user_id = auth.user_id, "Conference updated");

    Ok(Json(DataResponse {
        data: item(conference, deadline::today()),
    }))
}

/// DELETE /api/v1/conferences/{id}
///
/// Rejected with 400 while applications still reference the conference.
pub async fn delete_conference(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !ConferenceRepo::delete(&state.pool, id).await? {
        return Err(not_found("Conference", id));
    }

    tracing::info!(conference_id = id, user_id = admin.user_id, "Conference deleted");
    Ok(StatusCode::NO_CONTENT)
}
