//! Route definitions for the `/projects` resource.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::projects;
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET, POST          /                    -> list_projects, create_project
/// GET, PUT, DELETE   /{id}                -> get_project, update_project, delete_project (admin only)
/// GET                /{id}/people         -> get_people
/// POST               /{id}/complete       -> complete_project
/// POST               /{id}/reactivate     -> reactivate_project
/// POST               /{id}/tags           -> attach_tag
/// DELETE             /{id}/tags/{tag_id}  -> detach_tag (admin only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(projects::list_projects).post(projects::create_project),
        )
        .route(
            "/{id}",
            get(projects::get_project)
                .put(projects::update_project)
                .delete(projects::delete_project),
        )
        .route("/{id}/people", get(projects::get_people))
        .route("/{id}/complete", post(projects::complete_project))
        .route("/{id}/reactivate", post(projects::reactivate_project))
        .route("/{id}/tags", post(projects::attach_tag))
        .route("/{id}/tags/{tag_id}", delete(projects::detach_tag))
}
