//! Repository for the `journal_applications` table.

use mentorhub_core::status::ApplicationStatus;
use mentorhub_core::types::DbId;
use sqlx::PgPool;

use crate::filter::FilterBuilder;
use crate::models::application::{
    CreateJournalApplication, JournalApplication, JournalApplicationListParams,
    JournalApplicationView, UpdateJournalApplication,
};
use crate::models::nullable::{is_set, value_of};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "\
    id, paper_id, journal_id, status, manuscript_ref, applied_on, decision_on, feedback, \
    notes, created_at, updated_at";

const VIEW_SELECT: &str = "\
    SELECT ja.id, ja.paper_id, ja.journal_id, ja.status, ja.manuscript_ref, ja.applied_on, \
           ja.decision_on, ja.feedback, ja.notes, ja.created_at, ja.updated_at, \
           rfp.paper_title, j.name AS journal_name \
    FROM journal_applications ja \
    JOIN ready_for_publication rfp ON rfp.id = ja.paper_id \
    JOIN journals j ON j.id = ja.journal_id";

/// Provides CRUD operations for journal submissions.
pub struct JournalApplicationRepo;

impl JournalApplicationRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateJournalApplication,
        status: ApplicationStatus,
    ) -> Result<JournalApplication, sqlx::Error> {
        let query = format!(
            "INSERT INTO journal_applications
                (paper_id, journal_id, status, manuscript_ref, applied_on, decision_on,
                 feedback, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, JournalApplication>(&query)
            .bind(input.paper_id)
            .bind(input.journal_id)
            .bind(status.as_str())
            .bind(&input.manuscript_ref)
            .bind(input.applied_on)
            .bind(input.decision_on)
            .bind(&input.feedback)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    pub async fn find_view(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<JournalApplicationView>, sqlx::Error> {
        let query = format!("{VIEW_SELECT} WHERE ja.id = $1");
        sqlx::query_as::<_, JournalApplicationView>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List applications, most recently applied first.
    pub async fn list(
        pool: &PgPool,
        params: &JournalApplicationListParams,
        status: Option<ApplicationStatus>,
    ) -> Result<Vec<JournalApplicationView>, sqlx::Error> {
        let mut filter = FilterBuilder::new();
        filter
            .eq("ja.paper_id", params.paper_id)
            .eq("ja.journal_id", params.journal_id)
            .eq("ja.status", status.map(ApplicationStatus::as_str));

        let query = format!(
            "{VIEW_SELECT} {} ORDER BY ja.applied_on DESC NULLS LAST, ja.id DESC",
            filter.where_clause()
        );
        filter
            .bind_to(sqlx::query_as::<_, JournalApplicationView>(&query))
            .fetch_all(pool)
            .await
    }

    /// Update an application. Absent fields keep their value; `null` clears a nullable column.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateJournalApplication,
        status: Option<ApplicationStatus>,
    ) -> Result<Option<JournalApplication>, sqlx::Error> {
        let query = format!(
            "UPDATE journal_applications SET
                journal_id = COALESCE($2, journal_id),
                status = COALESCE($3, status),
                manuscript_ref = CASE WHEN $4 THEN $5 ELSE manuscript_ref END,
                applied_on = CASE WHEN $6 THEN $7 ELSE applied_on END,
                decision_on = CASE WHEN $8 THEN $9 ELSE decision_on END,
                feedback = CASE WHEN $10 THEN $11 ELSE feedback END,
                notes = CASE WHEN $12 THEN $13 ELSE notes END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, JournalApplication>(&query)
            .bind(id)
            .bind(input.journal_id)
            .bind(status.map(ApplicationStatus::as_str))
            .bind(is_set(&input.manuscript_ref))
            .bind(value_of(&input.manuscript_ref))
            .bind(is_set(&input.applied_on))
            .bind(value_of(&input.applied_on))
            .bind(is_set(&input.decision_on))
            .bind(value_of(&input.decision_on))
            .bind(is_set(&input.feedback))
            .bind(value_of(&input.feedback))
            .bind(is_set(&input.notes))
            .bind(value_of(&input.notes))
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM journal_applications WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
