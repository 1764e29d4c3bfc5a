//! Route definitions for the publication pipeline: staged papers, the
//! in-publication view, and published records.

use axum::routing::{delete, get, patch};
use axum::Router;

use crate::handlers::{in_publication, publications, ready_for_publication as rfp};
use crate::state::AppState;

/// Routes mounted at `/ready-for-publication`.
///
/// ```text
/// GET, POST          /                             -> list_entries, create_entry
/// GET, PUT, DELETE   /{id}                         -> get_entry, update_entry, delete_entry (admin only)
/// PATCH              /{id}/status                  -> update_status
/// GET, POST          /{id}/students                -> list_students, add_student
/// DELETE             /{id}/students/{detail_id}    -> remove_student (admin only)
/// ```
pub fn ready_for_publication_router() -> Router<AppState> {
    Router::new()
        .route("/", get(rfp::list_entries).post(rfp::create_entry))
        .route(
            "/{id}",
            get(rfp::get_entry)
                .put(rfp::update_entry)
                .delete(rfp::delete_entry),
        )
        .route("/{id}/status", patch(rfp::update_status))
        .route(
            "/{id}/students",
            get(rfp::list_students).post(rfp::add_student),
        )
        .route("/{id}/students/{detail_id}", delete(rfp::remove_student))
}

/// Routes mounted at `/in-publication`.
///
/// ```text
/// GET   /       -> list_in_publication
/// GET   /{id}   -> get_in_publication
/// ```
pub fn in_publication_router() -> Router<AppState> {
    Router::new()
        .route("/", get(in_publication::list_in_publication))
        .route("/{id}", get(in_publication::get_in_publication))
}

/// Routes mounted at `/publications`.
///
/// ```text
/// GET, POST          /        -> list_publications, create_publication
/// GET, PUT, DELETE   /{id}    -> get_publication, update_publication, delete_publication (admin only)
/// ```
pub fn publications_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(publications::list_publications).post(publications::create_publication),
        )
        .route(
            "/{id}",
            get(publications::get_publication)
                .put(publications::update_publication)
                .delete(publications::delete_publication),
        )
}
