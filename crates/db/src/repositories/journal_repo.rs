//! Repository for the `journals` table.

use mentorhub_core::search::normalize_search;
use mentorhub_core::types::DbId;
use sqlx::PgPool;

use crate::filter::FilterBuilder;
use crate::models::journal::{CreateJournal, Journal, JournalListParams, UpdateJournal};
use crate::models::nullable::{is_set, value_of};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "\
    id, name, publisher, journal_type, frequency, submission_deadline, website, notes, \
    created_at, updated_at";

/// Provides CRUD operations for journals.
pub struct JournalRepo;

impl JournalRepo {
    pub async fn create(pool: &PgPool, input: &CreateJournal) -> Result<Journal, sqlx::Error> {
        let query = format!(
            "INSERT INTO journals
                (name, publisher, journal_type, frequency, submission_deadline, website, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Journal>(&query)
            .bind(&input.name)
            .bind(&input.publisher)
            .bind(&input.journal_type)
            .bind(&input.frequency)
            .bind(input.submission_deadline)
            .bind(&input.website)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Journal>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM journals WHERE id = $1");
        sqlx::query_as::<_, Journal>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List journals, nearest submission deadline first.
    pub async fn list(
        pool: &PgPool,
        params: &JournalListParams,
    ) -> Result<Vec<Journal>, sqlx::Error> {
        let search = normalize_search(params.search.as_deref());
        let mut filter = FilterBuilder::new();
        filter.search(&["name", "publisher", "journal_type"], search.as_deref());

        let query = format!(
            "SELECT {COLUMNS} FROM journals {} \
             ORDER BY submission_deadline ASC NULLS LAST, name",
            filter.where_clause()
        );
        filter
            .bind_to(sqlx::query_as::<_, Journal>(&query))
            .fetch_all(pool)
            .await
    }

    /// Update a journal. Absent fields keep their value; `null` clears a nullable column.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateJournal,
    ) -> Result<Option<Journal>, sqlx::Error> {
        let query = format!(
            "UPDATE journals SET
                name = COALESCE($2, name),
                publisher = CASE WHEN $3 THEN $4 ELSE publisher END,
                journal_type = CASE WHEN $5 THEN $6 ELSE journal_type END,
                frequency = CASE WHEN $7 THEN $8 ELSE frequency END,
                submission_deadline = CASE WHEN $9 THEN $10 ELSE submission_deadline END,
                website = CASE WHEN $11 THEN $12 ELSE website END,
                notes = CASE WHEN $13 THEN $14 ELSE notes END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Journal>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(is_set(&input.publisher))
            .bind(value_of(&input.publisher))
            .bind(is_set(&input.journal_type))
            .bind(value_of(&input.journal_type))
            .bind(is_set(&input.frequency))
            .bind(value_of(&input.frequency))
            .bind(is_set(&input.submission_deadline))
            .bind(value_of(&input.submission_deadline))
            .bind(is_set(&input.website))
            .bind(value_of(&input.website))
            .bind(is_set(&input.notes))
            .bind(value_of(&input.notes))
            .fetch_optional(pool)
            .await
    }

    /// Delete a journal. Fails with a foreign-key violation while
    /// applications still reference it.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM journals WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
