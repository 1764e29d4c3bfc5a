//! Repository for the `conference_applications` table.

use mentorhub_core::status::ApplicationStatus;
use mentorhub_core::types::DbId;
use sqlx::PgPool;

use crate::filter::FilterBuilder;
use crate::models::application::{
    ConferenceApplication, ConferenceApplicationListParams, ConferenceApplicationView,
    CreateConferenceApplication, UpdateConferenceApplication,
};
use crate::models::nullable::{is_set, value_of};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "\
    id, paper_id, conference_id, status, applied_on, decision_on, feedback, notes, \
    created_at, updated_at";

const VIEW_SELECT: &str = "\
    SELECT ca.id, ca.paper_id, ca.conference_id, ca.status, ca.applied_on, ca.decision_on, \
           ca.feedback, ca.notes, ca.created_at, ca.updated_at, \
           rfp.paper_title, c.name AS conference_name \
    FROM conference_applications ca \
    JOIN ready_for_publication rfp ON rfp.id = ca.paper_id \
    JOIN conferences c ON c.id = ca.conference_id";

/// Provides CRUD operations for conference submissions.
pub struct ConferenceApplicationRepo;

impl ConferenceApplicationRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateConferenceApplication,
        status: ApplicationStatus,
    ) -> Result<ConferenceApplication, sqlx::Error> {
        let query = format!(
            "INSERT INTO conference_applications
                (paper_id, conference_id, status, applied_on, decision_on, feedback, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ConferenceApplication>(&query)
            .bind(input.paper_id)
            .bind(input.conference_id)
            .bind(status.as_str())
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
    ) -> Result<Option<ConferenceApplicationView>, sqlx::Error> {
        let query = format!("{VIEW_SELECT} WHERE ca.id = $1");
        sqlx::query_as::<_, ConferenceApplicationView>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List applications, most recently applied first.
    pub async fn list(
        pool: &PgPool,
        params: &ConferenceApplicationListParams,
        status: Option<ApplicationStatus>,
    ) -> Result<Vec<ConferenceApplicationView>, sqlx::Error> {
        let mut filter = FilterBuilder::new();
        filter
            .eq("ca.paper_id", params.paper_id)
            .eq("ca.conference_id", params.conference_id)
            .eq("ca.status", status.map(ApplicationStatus::as_str));

        let query = format!(
            "{VIEW_SELECT} {} ORDER BY ca.applied_on DESC NULLS LAST, ca.id DESC",
            filter.where_clause()
        );
        filter
            .bind_to(sqlx::query_as::<_, ConferenceApplicationView>(&query))
            .fetch_all(pool)
            .await
    }

    /// Update an application. Absent fields keep their value; `null` clears a nullable column.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateConferenceApplication,
        status: Option<ApplicationStatus>,
    ) -> Result<Option<ConferenceApplication>, sqlx::Error> {
        let query = format!(
            "UPDATE conference_applications SET
                conference_id = COALESCE($2, conference_id),
                status = COALESCE($3, status),
                applied_on = CASE WHEN $4 THEN $5 ELSE applied_on END,
                decision_on = CASE WHEN $6 THEN $7 ELSE decision_on END,
                feedback = CASE WHEN $8 THEN $9 ELSE feedback END,
                notes = CASE WHEN $10 THEN $11 ELSE notes END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ConferenceApplication>(&query)
            .bind(id)
            .bind(input.conference_id)
            .bind(status.map(ApplicationStatus::as_str))
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
        let result = sqlx::query("DELETE FROM conference_applications WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
