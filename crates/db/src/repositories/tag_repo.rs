//! Repository for the `tags` table.

use mentorhub_core::types::DbId;
use sqlx::PgPool;

use crate::models::tag::{Tag, TagWithUsage};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, color, created_at, updated_at";

/// Provides CRUD operations for project tags.
pub struct TagRepo;

impl TagRepo {
    /// Insert a tag. Name and color must already be normalized.
    pub async fn create(pool: &PgPool, name: &str, color: &str) -> Result<Tag, sqlx::Error> {
        let query = format!("INSERT INTO tags (name, color) VALUES ($1, $2) RETURNING {COLUMNS}");
        sqlx::query_as::<_, Tag>(&query)
            .bind(name)
            .bind(color)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Tag>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tags WHERE id = $1");
        sqlx::query_as::<_, Tag>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All tags with the number of projects carrying each, most used first.
    pub async fn list_with_usage(pool: &PgPool) -> Result<Vec<TagWithUsage>, sqlx::Error> {
        sqlx::query_as::<_, TagWithUsage>(
            "SELECT t.id, t.name, t.color, t.created_at, t.updated_at,
                    COUNT(pt.project_id) AS project_count
             FROM tags t
             LEFT JOIN project_tags pt ON pt.tag_id = t.id
             GROUP BY t.id
             ORDER BY project_count DESC, t.name",
        )
        .fetch_all(pool)
        .await
    }

    /// Rename or recolor a tag. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        name: Option<&str>,
        color: Option<&str>,
    ) -> Result<Option<Tag>, sqlx::Error> {
        let query = format!(
            "UPDATE tags SET
                name = COALESCE($2, name),
                color = COALESCE($3, color)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Tag>(&query)
            .bind(id)
            .bind(name)
            .bind(color)
            .fetch_optional(pool)
            .await
    }

    /// Delete a tag. Project associations cascade.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tags WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
