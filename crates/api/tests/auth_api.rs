//! HTTP-level tests for login, the current-user endpoint, and RBAC.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_user, get, get_auth, post_json, post_json_auth, TEST_PASSWORD,
};
use mentorhub_core::roles::ROLE_STAFF;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_returns_bearer_token_and_user(pool: PgPool) {
    let user = create_user(&pool, "priya", ROLE_STAFF).await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "username": "priya", "password": TEST_PASSWORD });
    let response = post_json(app.clone(), "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let token = json["data"]["access_token"].as_str().unwrap().to_string();
    assert_eq!(json["data"]["token_type"], "Bearer");
    assert_eq!(json["data"]["expires_in"], 3600);
    assert_eq!(json["data"]["user"]["id"], user.id);
    assert!(json["data"]["user"].get("password_hash").is_none());

    let me = get_auth(app, "/api/v1/auth/me", &token).await;
    assert_eq!(me.status(), StatusCode::OK);
    assert_eq!(body_json(me).await["data"]["username"], "priya");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn wrong_password_is_unauthorized(pool: PgPool) {
    create_user(&pool, "priya", ROLE_STAFF).await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "username": "priya", "password": "nope" });
    let response = post_json(app, "/api/v1/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["code"], "UNAUTHORIZED");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_token_is_unauthorized(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/projects").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn garbage_token_is_unauthorized(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/projects", "not-a-jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn staff_cannot_manage_users(pool: PgPool) {
    let token = common::staff_token(&pool).await;
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/v1/admin/users", &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_creates_user_and_duplicate_conflicts(pool: PgPool) {
    let token = common::admin_token(&pool).await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "username": "new_staff",
        "full_name": "New Staff",
        "password": "long-enough-password"
    });
    let created = post_json_auth(app.clone(), "/api/v1/admin/users", body.clone(), &token).await;
    assert_eq!(created.status(), StatusCode::CREATED);
    assert_eq!(body_json(created).await["data"]["role"], "staff");

    let duplicate = post_json_auth(app, "/api/v1/admin/users", body, &token).await;
    assert_eq!(duplicate.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_role_is_rejected(pool: PgPool) {
    let token = common::admin_token(&pool).await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "username": "someone",
        "full_name": "Some One",
        "password": "long-enough-password",
        "role": "superuser"
    });
    let response = post_json_auth(app, "/api/v1/admin/users", body, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}
