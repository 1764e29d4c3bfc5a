//! Route definitions for reference data.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::lookups;
use crate::state::AppState;

/// Routes mounted at `/lookups`.
///
/// ```text
/// GET         /statuses          -> list_statuses
/// GET, POST   /subjects          -> list_subjects, create_subject
/// DELETE      /subjects/{id}     -> delete_subject (admin only)
/// GET, POST   /boards            -> list_boards, create_board
/// DELETE      /boards/{id}       -> delete_board (admin only)
/// GET, POST   /counselors        -> list_counselors, create_counselor
/// DELETE      /counselors/{id}   -> delete_counselor (admin only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/statuses", get(lookups::list_statuses))
        .route(
            "/subjects",
            get(lookups::list_subjects).post(lookups::create_subject),
        )
        .route("/subjects/{id}", delete(lookups::delete_subject))
        .route("/boards", get(lookups::list_boards).post(lookups::create_board))
        .route("/boards/{id}", delete(lookups::delete_board))
        .route(
            "/counselors",
            get(lookups::list_counselors).post(lookups::create_counselor),
        )
        .route("/counselors/{id}", delete(lookups::delete_counselor))
}
