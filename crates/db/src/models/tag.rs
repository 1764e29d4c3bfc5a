//! Project tag model and DTOs.

use mentorhub_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `tags` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Tag {
    pub id: DbId,
    pub name: String,
    pub color: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Tag list row with the number of projects carrying it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TagWithUsage {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub tag: Tag,
    pub project_count: i64,
}

/// DTO for creating a tag. Name and color are normalized by the handler.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTag {
    pub name: String,
    pub color: Option<String>,
}

/// DTO for updating a tag.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTag {
    pub name: Option<String>,
    pub color: Option<String>,
}
