//! Research Branch Manager (RBM) model and DTOs.

use mentorhub_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::nullable::double_option;

/// A row from the `rbms` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Rbm {
    pub id: DbId,
    pub full_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub branch: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating an RBM.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateRbm {
    #[validate(length(min = 1, max = 200, message = "must not be empty"))]
    pub full_name: String,
    #[validate(email)]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub branch: Option<String>,
}

/// DTO for updating an RBM. All fields are optional.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateRbm {
    #[validate(length(min = 1, max = 200, message = "must not be empty"))]
    pub full_name: Option<String>,
    #[validate(email)]
    #[serde(default, deserialize_with = "double_option")]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub phone: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub branch: Option<Option<String>>,
}
