//! Repository for the small dropdown tables: statuses, subjects, boards, counselors.

use mentorhub_core::types::DbId;
use sqlx::PgPool;

use crate::models::lookup::{Counselor, CreateCounselor, LookupTable, NamedLookup};
use crate::models::status::{ProjectStatusRow, StatusId};

const NAMED_COLUMNS: &str = "id, name, created_at, updated_at";

const COUNSELOR_COLUMNS: &str = "id, full_name, email, phone, created_at, updated_at";

/// Provides read and insert operations for lookup tables.
pub struct LookupRepo;

impl LookupRepo {
    /// All project statuses in display order.
    pub async fn statuses(pool: &PgPool) -> Result<Vec<ProjectStatusRow>, sqlx::Error> {
        sqlx::query_as::<_, ProjectStatusRow>(
            "SELECT id, name, sort_order FROM project_statuses ORDER BY sort_order",
        )
        .fetch_all(pool)
        .await
    }

    /// Whether a status id exists.
    pub async fn status_exists(pool: &PgPool, id: StatusId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM project_statuses WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Every entry in a name-only lookup table, sorted by name.
    pub async fn list_named(
        pool: &PgPool,
        table: LookupTable,
    ) -> Result<Vec<NamedLookup>, sqlx::Error> {
        let query = format!(
            "SELECT {NAMED_COLUMNS} FROM {} ORDER BY name",
            table.table_name()
        );
        sqlx::query_as::<_, NamedLookup>(&query).fetch_all(pool).await
    }

    /// Insert into a name-only lookup table. Duplicate names violate the
    /// table's `uq_*_name` constraint.
    pub async fn create_named(
        pool: &PgPool,
        table: LookupTable,
        name: &str,
    ) -> Result<NamedLookup, sqlx::Error> {
        let query = format!(
            "INSERT INTO {} (name) VALUES ($1) RETURNING {NAMED_COLUMNS}",
            table.table_name()
        );
        sqlx::query_as::<_, NamedLookup>(&query)
            .bind(name)
            .fetch_one(pool)
            .await
    }

    /// Delete a name-only lookup entry. Referencing rows are set to NULL.
    pub async fn delete_named(
        pool: &PgPool,
        table: LookupTable,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let query = format!("DELETE FROM {} WHERE id = $1", table.table_name());
        let result = sqlx::query(&query).bind(id).execute(pool).await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn list_counselors(pool: &PgPool) -> Result<Vec<Counselor>, sqlx::Error> {
        let query = format!("SELECT {COUNSELOR_COLUMNS} FROM counselors ORDER BY full_name, id");
        sqlx::query_as::<_, Counselor>(&query).fetch_all(pool).await
    }

    pub async fn create_counselor(
        pool: &PgPool,
        input: &CreateCounselor,
    ) -> Result<Counselor, sqlx::Error> {
        let query = format!(
            "INSERT INTO counselors (full_name, email, phone)
             VALUES ($1, $2, $3)
             RETURNING {COUNSELOR_COLUMNS}"
        );
        sqlx::query_as::<_, Counselor>(&query)
            .bind(&input.full_name)
            .bind(&input.email)
            .bind(&input.phone)
            .fetch_one(pool)
            .await
    }

    pub async fn delete_counselor(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM counselors WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
