//! Repository for the `conferences` table.

use mentorhub_core::search::normalize_search;
use mentorhub_core::types::DbId;
use sqlx::PgPool;

use crate::filter::FilterBuilder;
use crate::models::conference::{
    Conference, ConferenceListParams, CreateConference, UpdateConference,
};
use crate::models::nullable::{is_set, value_of};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "\
    id, name, affiliation, conference_type, location, start_date, end_date, \
    submission_deadline, website, notes, created_at, updated_at";

/// Provides CRUD operations for conferences.
pub struct ConferenceRepo;

impl ConferenceRepo {
    pub async fn create(pool: &PgPool, input: &CreateConference) -> Result<Conference, sqlx::Error> {
        let query = format!(
            "INSERT INTO conferences
                (name, affiliation, conference_type, location, start_date, end_date,
                 submission_deadline, website, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Conference>(&query)
            .bind(&input.name)
            .bind(&input.affiliation)
            .bind(&input.conference_type)
            .bind(&input.location)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(input.submission_deadline)
            .bind(&input.website)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Conference>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM conferences WHERE id = $1");
        sqlx::query_as::<_, Conference>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List conferences, nearest submission deadline first.
    pub async fn list(
        pool: &PgPool,
        params: &ConferenceListParams,
    ) -> Result<Vec<Conference>, sqlx::Error> {
        let search = normalize_search(params.search.as_deref());
        let mut filter = FilterBuilder::new();
        filter
            .eq("conference_type", params.conference_type.clone())
            .search(&["name", "affiliation", "location"], search.as_deref());

        let query = format!(
            "SELECT {COLUMNS} FROM conferences {} \
             ORDER BY submission_deadline ASC NULLS LAST, name",
            filter.where_clause()
        );
        filter
            .bind_to(sqlx::query_as::<_, Conference>(&query))
            .fetch_all(pool)
            .await
    }

    /// Update a conference. Absent fields keep their value; `null` clears a nullable column.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateConference,
    ) -> Result<Option<Conference>, sqlx::Error> {
        let query = format!(
            "UPDATE conferences SET
                name = COALESCE($2, name),
                affiliation = CASE WHEN $3 THEN $4 ELSE affiliation END,
                conference_type = CASE WHEN $5 THEN $6 ELSE conference_type END,
                location = CASE WHEN $7 THEN $8 ELSE location END,
                start_date = CASE WHEN $9 THEN $10 ELSE start_date END,
                end_date = CASE WHEN $11 THEN $12 ELSE end_date END,
                submission_deadline = CASE WHEN $13 THEN $14 ELSE submission_deadline END,
                website = CASE WHEN $15 THEN $16 ELSE website END,
                notes = CASE WHEN $17 THEN $18 ELSE notes END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Conference>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(is_set(&input.affiliation))
            .bind(value_of(&input.affiliation))
            .bind(is_set(&input.conference_type))
            .bind(value_of(&input.conference_type))
            .bind(is_set(&input.location))
            .bind(value_of(&input.location))
            .bind(is_set(&input.start_date))
            .bind(value_of(&input.start_date))
            .bind(is_set(&input.end_date))
            .bind(value_of(&input.end_date))
            .bind(is_set(&input.submission_deadline))
            .bind(value_of(&input.submission_deadline))
            .bind(is_set(&input.website))
            .bind(value_of(&input.website))
            .bind(is_set(&input.notes))
            .bind(value_of(&input.notes))
            .fetch_optional(pool)
            .await
    }

    /// Delete a conference. Fails with a foreign-key violation while
    /// applications still reference it.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM conferences WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
