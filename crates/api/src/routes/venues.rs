//! Route definitions for conferences, journals, and their applications.

use axum::routing::get;
use axum::Router;

use crate::handlers::{applications, conferences, journals};
use crate::state::AppState;

/// Routes mounted at `/conferences`.
///
/// ```text
/// GET, POST          /        -> list_conferences, create_conference
/// GET, PUT, DELETE   /{id}    -> get_conference, update_conference, delete_conference (admin only)
/// ```
pub fn conferences_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(conferences::list_conferences).post(conferences::create_conference),
        )
        .route(
            "/{id}",
            get(conferences::get_conference)
                .put(conferences::update_conference)
                .delete(conferences::delete_conference),
        )
}

/// Routes mounted at `/journals`.
///
/// ```text
/// GET, POST          /        -> list_journals, create_journal
/// GET, PUT, DELETE   /{id}    -> get_journal, update_journal, delete_journal (admin only)
/// ```
pub fn journals_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(journals::list_journals).post(journals::create_journal),
        )
        .route(
            "/{id}",
            get(journals::get_journal)
                .put(journals::update_journal)
                .delete(journals::delete_journal),
        )
}

/// Routes mounted at `/conference-applications`.
pub fn conference_applications_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(applications::list_conference_applications)
                .post(applications::create_conference_application),
        )
        .route(
            "/{id}",
            get(applications::get_conference_application)
                .put(applications::update_conference_application)
                .delete(applications::delete_conference_application),
        )
}

/// Routes mounted at `/journal-applications`.
pub fn journal_applications_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(applications::list_journal_applications)
                .post(applications::create_journal_application),
        )
        .route(
            "/{id}",
            get(applications::get_journal_application)
                .put(applications::update_journal_application)
                .delete(applications::delete_journal_application),
        )
}
