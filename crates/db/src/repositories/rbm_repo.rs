//! Repository for the `rbms` table.

use mentorhub_core::types::DbId;
use sqlx::PgPool;

use crate::models::nullable::{is_set, value_of};
use crate::models::rbm::{CreateRbm, Rbm, UpdateRbm};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, full_name, email, phone, branch, created_at, updated_at";

/// Provides CRUD operations for research branch managers.
pub struct RbmRepo;

impl RbmRepo {
    /// Insert a new RBM, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateRbm) -> Result<Rbm, sqlx::Error> {
        let query = format!(
            "INSERT INTO rbms (full_name, email, phone, branch)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Rbm>(&query)
            .bind(&input.full_name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.branch)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Rbm>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM rbms WHERE id = $1");
        sqlx::query_as::<_, Rbm>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all RBMs ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Rbm>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM rbms ORDER BY full_name, id");
        sqlx::query_as::<_, Rbm>(&query).fetch_all(pool).await
    }

    /// Update an RBM. Absent fields keep their value; `null` clears a nullable column.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateRbm,
    ) -> Result<Option<Rbm>, sqlx::Error> {
        let query = format!(
            "UPDATE rbms SET
                full_name = COALESCE($2, full_name),
                email = CASE WHEN $3 THEN $4 ELSE email END,
                phone = CASE WHEN $5 THEN $6 ELSE phone END,
                branch = CASE WHEN $7 THEN $8 ELSE branch END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Rbm>(&query)
            .bind(id)
            .bind(&input.full_name)
            .bind(is_set(&input.email))
            .bind(value_of(&input.email))
            .bind(is_set(&input.phone))
            .bind(value_of(&input.phone))
            .bind(is_set(&input.branch))
            .bind(value_of(&input.branch))
            .fetch_optional(pool)
            .await
    }

    /// Delete an RBM. Students and projects referencing it keep a NULL `rbm_id`.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM rbms WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
