//! Handlers for the `/projects` resource.
//!
//! Besides CRUD this covers the lifecycle helpers (complete, reactivate),
//! the people dropdown data, and single-tag attach/detach. Every project
//! payload carries a `deadline` badge derived from `end_date`.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::NaiveDate;
use mentorhub_core::deadline::{self, deadline_info, PROJECT_DUE_SOON_DAYS};
use mentorhub_core::error::CoreError;
use mentorhub_core::status::{parse_optional, HasPrototype};
use mentorhub_core::types::DbId;
use mentorhub_core::validation::validate_dto;
use mentorhub_db::models::project::{
    AttachTag, CompleteProject, CreateProject, ProjectDetail, ProjectListItem,
    ProjectListParams, ProjectSummary, UpdateProject,
};
use mentorhub_db::models::status::StatusId;
use mentorhub_db::repositories::{LookupRepo, ProjectRepo, TagRepo};

use crate::error::{not_found, AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

fn list_item(summary: ProjectSummary, today: NaiveDate) -> ProjectListItem {
    let deadline = deadline_info(summary.project.end_date, today, PROJECT_DUE_SOON_DAYS);
    ProjectListItem { summary, deadline }
}

async fn ensure_status(state: &AppState, status_id: Option<StatusId>) -> AppResult<()> {
    if let Some(id) = status_id {
        if !LookupRepo::status_exists(&state.pool, id).await? {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Unknown project status id {id}"
            ))));
        }
    }
    Ok(())
}

/// Load the full detail view for a project that is known to exist.
async fn load_detail(state: &AppState, id: DbId) -> AppResult<ProjectDetail> {
    let summary = ProjectRepo::find_summary(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Project", id))?;
    let people = ProjectRepo::people(&state.pool, id).await?;
    let tags = ProjectRepo::tags(&state.pool, id).await?;

    Ok(ProjectDetail {
        item: list_item(summary, deadline::today()),
        students: people.students,
        mentors: people.mentors,
        tags,
    })
}

/// GET /api/v1/projects
///
/// Filters: `search`, `status_id`, `mentor_id`, `subject_id`, `rbm_id`,
/// `tag_id`, `student_id`, `has_prototype`, `scope` (`all`/`active`/`completed`),
/// and `sort`. No match returns an empty list.
pub async fn list_projects(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ProjectListParams>,
) -> AppResult<impl IntoResponse> {
    parse_optional::<HasPrototype>(params.has_prototype.as_deref())?;

    let today = deadline::today();
    let items: Vec<ProjectListItem> = ProjectRepo::list(&state.pool, &params)
        .await?
        .into_iter()
        .map(|s| list_item(s, today))
        .collect();

    Ok(Json(DataResponse { data: items }))
}

/// POST /api/v1/projects
///
/// Generates the `PRJ<year><seq>` code and derives `end_date` from
/// `start_date`. Assignment lists are written with the row.
pub async fn create_project(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateProject>,
) -> AppResult<impl IntoResponse> {
    validate_dto(&input)?;
    let has_prototype =
        parse_optional::<HasPrototype>(input.has_prototype.as_deref())?.unwrap_or(HasPrototype::No);
    ensure_status(&state, input.status_id).await?;

    let project = ProjectRepo::create(&state.pool, &input, has_prototype).await?;

    tracing::info!(
        project_id = project.id,
        code = %project.project_code,
        user_id = auth.user_id,
        "Project created"
    );

    let detail = load_detail(&state, project.id).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: detail })))
}

/// GET /api/v1/projects/{id}
pub async fn get_project(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let detail = load_detail(&state, id).await?;
    Ok(Json(DataResponse { data: detail }))
}

/// PUT /api/v1/projects/{id}
///
/// Partial update. A new `start_date` recomputes `end_date`; present id
/// lists replace the corresponding assignments.
pub async fn update_project(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProject>,
) -> AppResult<impl IntoResponse> {
    validate_dto(&input)?;
    let has_prototype = parse_optional::<HasPrototype>(input.has_prototype.as_deref())?;
    ensure_status(&state, input.status_id).await?;

    ProjectRepo::update(&state.pool, id, &input, has_prototype)
        .await?
        .ok_or_else(|| not_found("Project", id))?;

    tracing::info!(project_id = id, user_id = auth.user_id, "Project updated");

    let detail = load_detail(&state, id).await?;
    Ok(Json(DataResponse { data: detail }))
}

/// DELETE /api/v1/projects/{id}
///
/// Assignments cascade. Publications referencing the project block the
/// delete with a 400.
pub async fn delete_project(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !ProjectRepo::delete(&state.pool, id).await? {
        return Err(not_found("Project", id));
    }

    tracing::info!(project_id = id, user_id = admin.user_id, "Project deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/projects/{id}/people
///
/// Students and mentors (lead included) for author and reviewer dropdowns.
pub async fn get_people(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if ProjectRepo::find_by_id(&state.pool, id).await?.is_none() {
        return Err(not_found("Project", id));
    }
    let people = ProjectRepo::people(&state.pool, id).await?;
    Ok(Json(DataResponse { data: people }))
}

/// POST /api/v1/projects/{id}/complete
///
/// `completion_date` defaults to today.
pub async fn complete_project(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    body: Option<Json<CompleteProject>>,
) -> AppResult<impl IntoResponse> {
    let input = body.map(|Json(b)| b).unwrap_or_default();
    let has_prototype = parse_optional::<HasPrototype>(input.has_prototype.as_deref())?;
    let completion_date = input.completion_date.unwrap_or_else(deadline::today);

    ProjectRepo::complete(&state.pool, id, completion_date, has_prototype)
        .await?
        .ok_or_else(|| not_found("Project", id))?;

    tracing::info!(
        project_id = id,
        %completion_date,
        user_id = auth.user_id,
        "Project completed"
    );

    let detail = load_detail(&state, id).await?;
    Ok(Json(DataResponse { data: detail }))
}

/// POST /api/v1/projects/{id}/reactivate
///
/// Moves a completed project back to In Progress and clears its completion
/// date. Any other status is rejected with 400 and left unchanged.
pub async fn reactivate_project(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let completed = ProjectRepo::is_completed(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Project", id))?;
    if !completed {
        return Err(CoreError::Validation(
            "Only a completed project can be moved back to active".to_string(),
        )
        .into());
    }

    ProjectRepo::reactivate(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Project", id))?;

    tracing::info!(project_id = id, user_id = auth.user_id, "Project reactivated");

    let detail = load_detail(&state, id).await?;
    Ok(Json(DataResponse { data: detail }))
}

/// POST /api/v1/projects/{id}/tags
///
/// Idempotent: attaching an already attached tag is a no-op.
pub async fn attach_tag(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<AttachTag>,
) -> AppResult<impl IntoResponse> {
    if ProjectRepo::find_by_id(&state.pool, id).await?.is_none() {
        return Err(not_found("Project", id));
    }
    if TagRepo::find_by_id(&state.pool, input.tag_id).await?.is_none() {
        return Err(not_found("Tag", input.tag_id));
    }

    ProjectRepo::attach_tag(&state.pool, id, input.tag_id).await?;

    tracing::info!(project_id = id, tag_id = input.tag_id, user_id = auth.user_id, "Tag attached");

    let tags = ProjectRepo::tags(&state.pool, id).await?;
    Ok(Json(DataResponse { data: tags }))
}

/// DELETE /api/v1/projects/{id}/tags/{tag_id}
pub async fn detach_tag(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path((id, tag_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    if !ProjectRepo::detach_tag(&state.pool, id, tag_id).await? {
        return Err(not_found("Project tag", tag_id));
    }

    tracing::info!(project_id = id, tag_id, user_id = admin.user_id, "Tag detached");
    Ok(StatusCode::NO_CONTENT)
}
