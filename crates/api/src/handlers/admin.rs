//! Admin-only user management.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use mentorhub_core::roles::{validate_role, ROLE_STAFF};
use mentorhub_core::validation::{require_text, validate_dto};
use mentorhub_db::models::user::{CreateUser, CreateUserRequest};
use mentorhub_db::repositories::UserRepo;

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/admin/users
pub async fn list_users(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let users = UserRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: users }))
}

/// POST /api/v1/admin/users
///
/// Role defaults to `staff`. A taken username is rejected with 409.
pub async fn create_user(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<impl IntoResponse> {
    validate_dto(&input)?;
    let role = input.role.as_deref().unwrap_or(ROLE_STAFF);
    validate_role(role)?;
    let username = require_text("username", &input.username)?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            username,
            full_name: input.full_name.trim().to_string(),
            password_hash,
            role: role.to_string(),
        },
    )
    .await?;

    tracing::info!(
        new_user_id = user.id,
        role = %user.role,
        user_id = admin.user_id,
        "User created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: user })))
}
