pub mod admin;
pub mod auth;
pub mod health;
pub mod lookups;
pub mod people;
pub mod projects;
pub mod publication;
pub mod tags;
pub mod venues;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                                      login (public)
/// /auth/me                                         current user
///
/// /admin/users                                     list, create (admin only)
///
/// /dashboard                                       counts, breakdowns, deadlines
///
/// /lookups/statuses                                project statuses
/// /lookups/{subjects,boards,counselors}            list, create
/// /lookups/{subjects,boards,counselors}/{id}       delete (admin only)
///
/// /rbms, /mentors, /students                       list, create
/// /rbms/{id}, /mentors/{id}, /students/{id}        get, update, delete
///
/// /tags                                            list, create
/// /tags/{id}                                       update, delete
///
/// /projects                                        list, create
/// /projects/{id}                                   get, update, delete
/// /projects/{id}/people                            students + mentors
/// /projects/{id}/complete                          mark completed (POST)
/// /projects/{id}/reactivate                        back to active (POST)
/// /projects/{id}/tags                              attach tag (POST)
/// /projects/{id}/tags/{tag_id}                     detach tag (DELETE)
///
/// /ready-for-publication                           list, create
/// /ready-for-publication/{id}                      get, update, delete
/// /ready-for-publication/{id}/status               set status (PATCH)
/// /ready-for-publication/{id}/students             list, add author
/// /ready-for-publication/{id}/students/{detail_id} remove author
///
/// /in-publication                                  approved papers
/// /in-publication/{id}                             paper + applications
///
/// /publications                                    list, create
/// /publications/{id}                               get, update, delete
///
/// /conferences, /journals                          list, create
/// /conferences/{id}, /journals/{id}                get, update, delete
///
/// /conference-applications                         list, create
/// /conference-applications/{id}                    get, update, delete
/// /journal-applications                            list, create
/// /journal-applications/{id}                       get, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/admin", admin::router())
        .route("/dashboard", get(handlers::dashboard::get_dashboard))
        .nest("/lookups", lookups::router())
        .nest("/rbms", people::rbms_router())
        .nest("/mentors", people::mentors_router())
        .nest("/students", people::students_router())
        .nest("/tags", tags::router())
        .nest("/projects", projects::router())
        .nest(
            "/ready-for-publication",
            publication::ready_for_publication_router(),
        )
        .nest("/in-publication", publication::in_publication_router())
        .nest("/publications", publication::publications_router())
        .nest("/conferences", venues::conferences_router())
        .nest("/journals", venues::journals_router())
        .nest(
            "/conference-applications",
            venues::conference_applications_router(),
        )
        .nest("/journal-applications", venues::journal_applications_router())
}
