//! Route definitions for RBMs, mentors, and students.

use axum::routing::get;
use axum::Router;

use crate::handlers::{mentors, rbms, students};
use crate::state::AppState;

/// Routes mounted at `/rbms`.
///
/// ```text
/// GET, POST          /        -> list_rbms, create_rbm
/// GET, PUT, DELETE   /{id}    -> get_rbm, update_rbm, delete_rbm (admin only)
/// ```
pub fn rbms_router() -> Router<AppState> {
    Router::new()
        .route("/", get(rbms::list_rbms).post(rbms::create_rbm))
        .route(
            "/{id}",
            get(rbms::get_rbm)
                .put(rbms::update_rbm)
                .delete(rbms::delete_rbm),
        )
}

/// Routes mounted at `/mentors`.
///
/// ```text
/// GET, POST          /        -> list_mentors (?search=), create_mentor
/// GET, PUT, DELETE   /{id}    -> get_mentor, update_mentor, delete_mentor (admin only)
/// ```
pub fn mentors_router() -> Router<AppState> {
    Router::new()
        .route("/", get(mentors::list_mentors).post(mentors::create_mentor))
        .route(
            "/{id}",
            get(mentors::get_mentor)
                .put(mentors::update_mentor)
                .delete(mentors::delete_mentor),
        )
}

/// Routes mounted at `/students`.
///
/// ```text
/// GET, POST          /        -> list_students, create_student
/// GET, PUT, DELETE   /{id}    -> get_student, update_student, delete_student (admin only)
/// ```
pub fn students_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(students::list_students).post(students::create_student),
        )
        .route(
            "/{id}",
            get(students::get_student)
                .put(students::update_student)
                .delete(students::delete_student),
        )
}
