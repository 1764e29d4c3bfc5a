//! Repository for the `mentors` table.

use mentorhub_core::search::normalize_search;
use mentorhub_core::types::DbId;
use sqlx::PgPool;

use crate::filter::FilterBuilder;
use crate::models::mentor::{CreateMentor, Mentor, MentorListParams, MentorSummary, UpdateMentor};
use crate::models::nullable::{is_set, value_of};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, full_name, email, phone, specialization, affiliation, created_at, updated_at";

/// Counts projects where the mentor leads or is assigned, without double counting.
const SUMMARY_SELECT: &str = "\
    SELECT m.id, m.full_name, m.email, m.phone, m.specialization, m.affiliation, \
           m.created_at, m.updated_at, \
           (SELECT COUNT(*) FROM projects p \
            WHERE p.lead_mentor_id = m.id \
               OR EXISTS (SELECT 1 FROM project_mentors pm \
                          WHERE pm.project_id = p.id AND pm.mentor_id = m.id)) AS project_count \
    FROM mentors m";

/// Provides CRUD operations for mentors.
pub struct MentorRepo;

impl MentorRepo {
    /// Insert a new mentor, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateMentor) -> Result<Mentor, sqlx::Error> {
        let query = format!(
            "INSERT INTO mentors (full_name, email, phone, specialization, affiliation)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Mentor>(&query)
            .bind(&input.full_name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.specialization)
            .bind(&input.affiliation)
            .fetch_one(pool)
            .await
    }

    /// Find a mentor with its project count.
    pub async fn find_summary(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<MentorSummary>, sqlx::Error> {
        let query = format!("{SUMMARY_SELECT} WHERE m.id = $1");
        sqlx::query_as::<_, MentorSummary>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List mentors ordered by name, optionally filtered by a search term.
    pub async fn list(
        pool: &PgPool,
        params: &MentorListParams,
    ) -> Result<Vec<MentorSummary>, sqlx::Error> {
        let search = normalize_search(params.search.as_deref());
        let mut filter = FilterBuilder::new();
        filter.search(
            &["m.full_name", "m.email", "m.specialization", "m.affiliation"],
            search.as_deref(),
        );

        let query = format!(
            "{SUMMARY_SELECT} {} ORDER BY m.full_name, m.id",
            filter.where_clause()
        );
        filter
            .bind_to(sqlx::query_as::<_, MentorSummary>(&query))
            .fetch_all(pool)
            .await
    }

    /// Update a mentor. Absent fields keep their value; `null` clears a nullable column.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateMentor,
    ) -> Result<Option<Mentor>, sqlx::Error> {
        let query = format!(
            "UPDATE mentors SET
                full_name = COALESCE($2, full_name),
                email = CASE WHEN $3 THEN $4 ELSE email END,
                phone = CASE WHEN $5 THEN $6 ELSE phone END,
                specialization = CASE WHEN $7 THEN $8 ELSE specialization END,
                affiliation = CASE WHEN $9 THEN $10 ELSE affiliation END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Mentor>(&query)
            .bind(id)
            .bind(&input.full_name)
            .bind(is_set(&input.email))
            .bind(value_of(&input.email))
            .bind(is_set(&input.phone))
            .bind(value_of(&input.phone))
            .bind(is_set(&input.specialization))
            .bind(value_of(&input.specialization))
            .bind(is_set(&input.affiliation))
            .bind(value_of(&input.affiliation))
            .fetch_optional(pool)
            .await
    }

    /// Delete a mentor. Lead assignments become NULL; join rows cascade.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM mentors WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
