//! Read-only aggregate queries behind the dashboard.

use chrono::NaiveDate;
use mentorhub_core::deadline::VENUE_DUE_SOON_DAYS;
use mentorhub_core::status::ReadyStatus;
use sqlx::PgPool;

use crate::models::dashboard::{DashboardCounts, DeadlineRow, StatusCount};
use crate::repositories::project_repo::COMPLETED_PREDICATE;

/// Maximum number of deadline rows returned.
const DEADLINE_LIMIT: i64 = 20;

/// Provides the dashboard's counts and deadline list.
pub struct DashboardRepo;

impl DashboardRepo {
    /// Headline counts in a single round trip.
    pub async fn counts(pool: &PgPool) -> Result<DashboardCounts, sqlx::Error> {
        let query = format!(
            "SELECT
                (SELECT COUNT(*) FROM projects) AS projects,
                (SELECT COUNT(*) FROM projects p JOIN project_statuses ps ON ps.id = p.status_id
                 WHERE NOT ({COMPLETED_PREDICATE})) AS active_projects,
                (SELECT COUNT(*) FROM projects p JOIN project_statuses ps ON ps.id = p.status_id
                 WHERE {COMPLETED_PREDICATE}) AS completed_projects,
                (SELECT COUNT(*) FROM students) AS students,
                (SELECT COUNT(*) FROM mentors) AS mentors,
                (SELECT COUNT(*) FROM ready_for_publication) AS ready_for_publication,
                (SELECT COUNT(*) FROM ready_for_publication WHERE status = $1) AS in_publication,
                (SELECT COUNT(*) FROM publications) AS publications"
        );
        sqlx::query_as::<_, DashboardCounts>(&query)
            .bind(ReadyStatus::Approved.as_str())
            .fetch_one(pool)
            .await
    }

    /// Project counts per status, in status order. Statuses with no
    /// projects are included with a zero count.
    pub async fn projects_by_status(pool: &PgPool) -> Result<Vec<StatusCount>, sqlx::Error> {
        sqlx::query_as::<_, StatusCount>(
            "SELECT ps.name AS status, COUNT(p.id) AS count
             FROM project_statuses ps
             LEFT JOIN projects p ON p.status_id = ps.id
             GROUP BY ps.id, ps.name, ps.sort_order
             ORDER BY ps.sort_order",
        )
        .fetch_all(pool)
        .await
    }

    /// Staged paper counts per status literal.
    pub async fn papers_by_status(pool: &PgPool) -> Result<Vec<StatusCount>, sqlx::Error> {
        sqlx::query_as::<_, StatusCount>(
            "SELECT status, COUNT(*) AS count
             FROM ready_for_publication
             GROUP BY status
             ORDER BY status",
        )
        .fetch_all(pool)
        .await
    }

    /// Conference and journal application counts per status literal.
    pub async fn applications_by_status(pool: &PgPool) -> Result<Vec<StatusCount>, sqlx::Error> {
        sqlx::query_as::<_, StatusCount>(
            "SELECT status, COUNT(*) AS count
             FROM (SELECT status FROM conference_applications
                   UNION ALL
                   SELECT status FROM journal_applications) a
             GROUP BY status
             ORDER BY status",
        )
        .fetch_all(pool)
        .await
    }

    /// Dated items worth surfacing as of `today`.
    ///
    /// Active project end dates and unpublished paper target dates are
    /// included when overdue or within the venue window. Venue submission
    /// deadlines are included only while still open.
    pub async fn deadlines(
        pool: &PgPool,
        today: NaiveDate,
    ) -> Result<Vec<DeadlineRow>, sqlx::Error> {
        let query = format!(
            "SELECT kind, id, label, due_date FROM (
                SELECT 'project' AS kind, p.id, p.project_name AS label, p.end_date AS due_date
                FROM projects p JOIN project_statuses ps ON ps.id = p.status_id
                WHERE p.end_date IS NOT NULL AND NOT ({COMPLETED_PREDICATE})
                  AND p.end_date <= $1::DATE + $2::INTEGER
                UNION ALL
                SELECT 'paper', rfp.id, rfp.paper_title, rfp.target_date
                FROM ready_for_publication rfp
                WHERE rfp.target_date IS NOT NULL AND rfp.status <> $3
                  AND rfp.target_date <= $1::DATE + $2::INTEGER
                UNION ALL
                SELECT 'conference', c.id, c.name, c.submission_deadline
                FROM conferences c
                WHERE c.submission_deadline BETWEEN $1::DATE AND $1::DATE + $2::INTEGER
                UNION ALL
                SELECT 'journal', j.id, j.name, j.submission_deadline
                FROM journals j
                WHERE j.submission_deadline BETWEEN $1::DATE AND $1::DATE + $2::INTEGER
             ) d
             ORDER BY due_date, kind, id
             LIMIT $4"
        );
        sqlx::query_as::<_, DeadlineRow>(&query)
            .bind(today)
            .bind(VENUE_DUE_SOON_DAYS as i32)
            .bind(ReadyStatus::Published.as_str())
            .bind(DEADLINE_LIMIT)
            .fetch_all(pool)
            .await
    }
}
