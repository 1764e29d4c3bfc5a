//! Route definitions for the tag catalogue.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::tags;
use crate::state::AppState;

/// Routes mounted at `/tags`.
///
/// ```text
/// GET, POST      /        -> list_tags, create_tag
/// PUT, DELETE    /{id}    -> update_tag, delete_tag (admin only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(tags::list_tags).post(tags::create_tag))
        .route("/{id}", put(tags::update_tag).delete(tags::delete_tag))
}
