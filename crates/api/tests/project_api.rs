//! HTTP-level tests for the `/projects` resource.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, delete_auth, get_auth, patch_json_auth, post_json_auth, put_json_auth,
};
use mentorhub_db::repositories::ProjectRepo;
use serde_json::{json, Value};
use sqlx::PgPool;

async fn create_project(app: axum::Router, token: &str, body: Value) -> Value {
    let response = post_json_auth(app, "/api/v1/projects", body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"].clone()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_derives_code_end_date_and_badge(pool: PgPool) {
    let token = common::staff_token(&pool).await;
    let app = common::build_test_app(pool);

    let project = create_project(
        app,
        &token,
        json!({ "project_name": "Soil sensors", "start_date": "2025-10-31" }),
    )
    .await;

    assert!(project["project_code"].as_str().unwrap().starts_with("PRJ"));
    assert_eq!(project["end_date"], "2026-02-28");
    assert_eq!(project["has_prototype"], "No");
    assert_eq!(project["status_name"], "Not Started");
    assert!(project["deadline"]["badge"].is_string());
    assert_eq!(project["students"], json!([]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn invalid_has_prototype_is_rejected(pool: PgPool) {
    let token = common::staff_token(&pool).await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app,
        "/api/v1/projects",
        json!({ "project_name": "X", "has_prototype": "maybe" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_status_is_rejected(pool: PgPool) {
    let token = common::staff_token(&pool).await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app,
        "/api/v1/projects",
        json!({ "project_name": "X", "status_id": 99 }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn staff_delete_is_forbidden_and_row_survives(pool: PgPool) {
    let staff = common::staff_token(&pool).await;
    let admin = common::admin_token(&pool).await;
    let app = common::build_test_app(pool.clone());

    let project = create_project(app.clone(), &staff, json!({ "project_name": "Keep me" })).await;
    let id = project["id"].as_i64().unwrap();
    let uri = format!("/api/v1/projects/{id}");

    let forbidden = delete_auth(app.clone(), &uri, &staff).await;
    assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(forbidden).await["code"], "FORBIDDEN");
    assert!(ProjectRepo::find_by_id(&pool, id).await.unwrap().is_some());

    let deleted = delete_auth(app.clone(), &uri, &admin).await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);
    assert!(ProjectRepo::find_by_id(&pool, id).await.unwrap().is_none());

    let gone = get_auth(app, &uri, &staff).await;
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(gone).await["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn filters_with_no_match_return_empty_list(pool: PgPool) {
    let token = common::staff_token(&pool).await;
    let app = common::build_test_app(pool);

    create_project(app.clone(), &token, json!({ "project_name": "Solar kiln" })).await;

    let hit = get_auth(app.clone(), "/api/v1/projects?search=kiln", &token).await;
    assert_eq!(body_json(hit).await["data"].as_array().unwrap().len(), 1);

    let miss = get_auth(app.clone(), "/api/v1/projects?search=zzz&status_id=2", &token).await;
    assert_eq!(miss.status(), StatusCode::OK);
    assert_eq!(body_json(miss).await["data"], json!([]));

    let bad = get_auth(app, "/api/v1/projects?sort=sideways", &token).await;
    assert_eq!(bad.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn complete_then_reactivate_moves_between_scopes(pool: PgPool) {
    let token = common::staff_token(&pool).await;
    let app = common::build_test_app(pool);

    let project = create_project(app.clone(), &token, json!({ "project_name": "Drone mapping" })).await;
    let id = project["id"].as_i64().unwrap();

    let completed = post_json_auth(
        app.clone(),
        &format!("/api/v1/projects/{id}/complete"),
        json!({ "completion_date": "2026-01-15", "has_prototype": "Yes" }),
        &token,
    )
    .await;
    assert_eq!(completed.status(), StatusCode::OK);
    let completed = body_json(completed).await;
    assert_eq!(completed["data"]["completion_date"], "2026-01-15");
    assert_eq!(completed["data"]["has_prototype"], "Yes");

    let done = get_auth(app.clone(), "/api/v1/projects?scope=completed", &token).await;
    assert_eq!(body_json(done).await["data"].as_array().unwrap().len(), 1);

    let reactivated = post_json_auth(
        app.clone(),
        &format!("/api/v1/projects/{id}/reactivate"),
        json!({}),
        &token,
    )
    .await;
    assert_eq!(reactivated.status(), StatusCode::OK);
    let reactivated = body_json(reactivated).await;
    assert_eq!(reactivated["data"]["status_name"], "In Progress");
    assert!(reactivated["data"]["completion_date"].is_null());

    let active = get_auth(app.clone(), "/api/v1/projects?scope=active", &token).await;
    assert_eq!(body_json(active).await["data"].as_array().unwrap().len(), 1);
    let done = get_auth(app, "/api/v1/projects?scope=completed", &token).await;
    assert_eq!(body_json(done).await["data"], json!([]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn reactivate_rejects_project_that_is_not_completed(pool: PgPool) {
    let token = common::staff_token(&pool).await;
    let app = common::build_test_app(pool);

    let project = create_project(
        app.clone(),
        &token,
        json!({ "project_name": "Paused study", "status_id": 5 }),
    )
    .await;
    let id = project["id"].as_i64().unwrap();

    let response = post_json_auth(
        app.clone(),
        &format!("/api/v1/projects/{id}/reactivate"),
        json!({}),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

    let fetched = get_auth(app, &format!("/api/v1/projects/{id}"), &token).await;
    assert_eq!(body_json(fetched).await["data"]["status_name"], "Cancelled");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_with_null_clears_optional_fields(pool: PgPool) {
    let token = common::staff_token(&pool).await;
    let app = common::build_test_app(pool);

    let mentor = post_json_auth(
        app.clone(),
        "/api/v1/mentors",
        json!({ "full_name": "Dr. Sen" }),
        &token,
    )
    .await;
    let mentor_id = body_json(mentor).await["data"]["id"].as_i64().unwrap();

    let project = create_project(
        app.clone(),
        &token,
        json!({
            "project_name": "Bridge loads",
            "lead_mentor_id": mentor_id,
            "start_date": "2026-01-10",
            "drive_link": "https://drive.example/bridge",
            "notes": "keep"
        }),
    )
    .await;
    let id = project["id"].as_i64().unwrap();
    assert_eq!(project["end_date"], "2026-05-10");

    let updated = put_json_auth(
        app,
        &format!("/api/v1/projects/{id}"),
        json!({ "lead_mentor_id": null, "drive_link": null, "start_date": null }),
        &token,
    )
    .await;
    assert_eq!(updated.status(), StatusCode::OK);
    let data = body_json(updated).await["data"].clone();
    assert!(data["lead_mentor_id"].is_null());
    assert!(data["lead_mentor_name"].is_null());
    assert!(data["drive_link"].is_null());
    assert!(data["start_date"].is_null());
    assert!(data["end_date"].is_null());
    assert_eq!(data["notes"], "keep");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_replaces_assignments_and_tags_attach(pool: PgPool) {
    let token = common::staff_token(&pool).await;
    let app = common::build_test_app(pool);

    let mentor = post_json_auth(
        app.clone(),
        "/api/v1/mentors",
        json!({ "full_name": "Dr. Rao" }),
        &token,
    )
    .await;
    let mentor_id = body_json(mentor).await["data"]["id"].as_i64().unwrap();

    let tag = post_json_auth(
        app.clone(),
        "/api/v1/tags",
        json!({ "name": " robotics ", "color": "#1e90ff" }),
        &token,
    )
    .await;
    let tag = body_json(tag).await["data"].clone();
    assert_eq!(tag["name"], "robotics");
    assert_eq!(tag["color"], "#1E90FF");
    let tag_id = tag["id"].as_i64().unwrap();

    let project = create_project(app.clone(), &token, json!({ "project_name": "Arm" })).await;
    let id = project["id"].as_i64().unwrap();

    let updated = put_json_auth(
        app.clone(),
        &format!("/api/v1/projects/{id}"),
        json!({ "mentor_ids": [mentor_id] }),
        &token,
    )
    .await;
    assert_eq!(updated.status(), StatusCode::OK);
    let updated = body_json(updated).await;
    assert_eq!(updated["data"]["mentors"][0]["full_name"], "Dr. Rao");

    let attached = post_json_auth(
        app.clone(),
        &format!("/api/v1/projects/{id}/tags"),
        json!({ "tag_id": tag_id }),
        &token,
    )
    .await;
    assert_eq!(attached.status(), StatusCode::OK);
    assert_eq!(body_json(attached).await["data"][0]["id"], tag_id);

    let people = get_auth(app, &format!("/api/v1/projects/{id}/people"), &token).await;
    let people = body_json(people).await;
    assert_eq!(people["data"]["mentors"].as_array().unwrap().len(), 1);
    assert_eq!(people["data"]["students"], json!([]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn patch_on_project_is_method_not_allowed(pool: PgPool) {
    let token = common::staff_token(&pool).await;
    let app = common::build_test_app(pool);

    let response = patch_json_auth(app, "/api/v1/projects/1", json!({}), &token).await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
