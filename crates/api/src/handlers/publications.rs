//! Handlers for the `/publications` resource.
//!
//! A publication is either a conference paper or a journal article. Columns
//! belonging to the other venue are cleared on every write, including when
//! an update switches `venue_type`.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use mentorhub_core::status::{parse_optional, VenueType};
use mentorhub_core::types::DbId;
use mentorhub_core::validation::validate_dto;
use mentorhub_db::models::publication::{
    CreatePublication, PublicationInput, PublicationListParams, UpdatePublication,
};
use mentorhub_db::repositories::PublicationRepo;

use crate::error::{not_found, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Validate a full publication input and drop the other venue's fields.
fn prepare(input: PublicationInput) -> AppResult<PublicationInput> {
    validate_dto(&input)?;
    let venue: VenueType = input.venue_type.trim().parse()?;
    Ok(input.retain_venue_fields(venue))
}

/// GET /api/v1/publications?search=&venue_type=&project_id=&year=
pub async fn list_publications(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<PublicationListParams>,
) -> AppResult<impl IntoResponse> {
    let venue = parse_optional::<VenueType>(params.venue_type.as_deref())?;
    let publications = PublicationRepo::list(&state.pool, &params, venue).await?;
    Ok(Json(DataResponse { data: publications }))
}

/// POST /api/v1/publications
pub async fn create_publication(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreatePublication>,
) -> AppResult<impl IntoResponse> {
    let input = prepare(input)?;
    let publication = PublicationRepo::create(&state.pool, &input).await?;

    tracing::info!(
        publication_id = publication.id,
        code = %publication.publication_code,
        venue_type = %publication.venue_type,
        user_id = auth.user_id,
        "Publication created"
    );

    let summary = PublicationRepo::find_summary(&state.pool, publication.id)
        .await?
        .ok_or_else(|| not_found("Publication", publication.id))?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: summary })))
}

/// GET /api/v1/publications/{id}
pub async fn get_publication(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let summary = PublicationRepo::find_summary(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Publication", id))?;
    Ok(Json(DataResponse { data: summary }))
}

/// PUT /api/v1/publications/{id}
///
/// Merges the update onto the stored row, then rewrites the whole row.
pub async fn update_publication(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePublication>,
) -> AppResult<impl IntoResponse> {
    validate_dto(&input)?;
    let existing = PublicationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Publication", id))?;

    let merged = prepare(PublicationInput::merged(&existing, &input))?;
    PublicationRepo::replace(&state.pool, id, &merged)
        .await?
        .ok_or_else(|| not_found("Publication", id))?;

    tracing::info!(
        publication_id = id,
        venue_type = %merged.venue_type,
        user_id = auth.user_id,
        "Publication updated"
    );

    let summary = PublicationRepo::find_summary(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Publication", id))?;
    Ok(Json(DataResponse { data: summary }))
}

/// DELETE /api/v1/publications/{id}
pub async fn delete_publication(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !PublicationRepo::delete(&state.pool, id).await? {
        return Err(not_found("Publication", id));
    }

    tracing::info!(publication_id = id, user_id = admin.user_id, "Publication deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use mentorhub_core::error::CoreError;

    use super::*;
    use crate::error::AppError;

    fn input(venue: &str) -> PublicationInput {
        serde_json::from_value(serde_json::json!({
            "project_id": 1,
            "paper_title": "Low-cost soil moisture sensing",
            "venue_type": venue,
            "conference_name": "ICRA",
            "journal_name": "Sensors",
            "volume": "12"
        }))
        .unwrap()
    }

    #[test]
    fn conference_input_drops_journal_fields() {
        let prepared = prepare(input("Conference")).unwrap();
        assert_eq!(prepared.conference_name.as_deref(), Some("ICRA"));
        assert_eq!(prepared.journal_name, None);
        assert_eq!(prepared.volume, None);
    }

    #[test]
    fn unknown_venue_is_a_validation_error() {
        assert_matches!(
            prepare(input("Workshop")),
            Err(AppError::Core(CoreError::Validation(_)))
        );
    }
}
