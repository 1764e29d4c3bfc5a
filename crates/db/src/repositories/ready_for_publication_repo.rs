//! Repository for the `ready_for_publication` staging list, its author
//! details, and the in-publication view derived from it.

use mentorhub_core::search::normalize_search;
use mentorhub_core::status::{ApplicationStatus, ReadyStatus};
use mentorhub_core::types::DbId;
use sqlx::PgPool;

use crate::filter::FilterBuilder;
use crate::models::nullable::{is_set, value_of};
use crate::models::ready_for_publication::{
    CreateReadyForPublication, CreateStudentDetail, InPublicationEntry, InPublicationParams,
    ReadyForPublication, ReadyForPublicationListParams, ReadyForPublicationSummary, StudentDetail,
    UpdateReadyForPublication,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "\
    id, project_id, paper_title, status, draft_link, plagiarism_report_link, \
    ai_detection_link, target_date, notes, created_at, updated_at";

/// Entry columns qualified with the `rfp` alias.
const RFP_COLUMNS: &str = "\
    rfp.id, rfp.project_id, rfp.paper_title, rfp.status, rfp.draft_link, \
    rfp.plagiarism_report_link, rfp.ai_detection_link, rfp.target_date, rfp.notes, \
    rfp.created_at, rfp.updated_at";

const DETAIL_COLUMNS: &str = "\
    id, ready_for_publication_id, student_id, full_name, email, affiliation, author_order, \
    created_at, updated_at";

/// Columns searched by the free-text filter on both views.
const SEARCH_COLUMNS: &[&str] = &["rfp.paper_title", "p.project_name", "p.project_code"];

/// Provides CRUD operations for staged papers.
pub struct ReadyForPublicationRepo;

impl ReadyForPublicationRepo {
    /// Insert a new entry, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateReadyForPublication,
        status: ReadyStatus,
    ) -> Result<ReadyForPublication, sqlx::Error> {
        let query = format!(
            "INSERT INTO ready_for_publication
                (project_id, paper_title, status, draft_link, plagiarism_report_link,
                 ai_detection_link, target_date, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ReadyForPublication>(&query)
            .bind(input.project_id)
            .bind(&input.paper_title)
            .bind(status.as_str())
            .bind(&input.draft_link)
            .bind(&input.plagiarism_report_link)
            .bind(&input.ai_detection_link)
            .bind(input.target_date)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    /// Find an entry joined with its project.
    pub async fn find_summary(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ReadyForPublicationSummary>, sqlx::Error> {
        let query = format!("{} WHERE rfp.id = $1", Self::summary_select());
        sqlx::query_as::<_, ReadyForPublicationSummary>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List entries, soonest target date first.
    pub async fn list(
        pool: &PgPool,
        params: &ReadyForPublicationListParams,
        status: Option<ReadyStatus>,
    ) -> Result<Vec<ReadyForPublicationSummary>, sqlx::Error> {
        let search = normalize_search(params.search.as_deref());

        let mut filter = FilterBuilder::new();
        filter
            .eq("rfp.status", status.map(ReadyStatus::as_str))
            .eq("rfp.project_id", params.project_id)
            .search(SEARCH_COLUMNS, search.as_deref());

        let query = format!(
            "{} {} ORDER BY rfp.target_date ASC NULLS LAST, rfp.id DESC",
            Self::summary_select(),
            filter.where_clause()
        );
        filter
            .bind_to(sqlx::query_as::<_, ReadyForPublicationSummary>(&query))
            .fetch_all(pool)
            .await
    }

    /// Update an entry. Absent fields keep their value; `null` clears a nullable column.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateReadyForPublication,
        status: Option<ReadyStatus>,
    ) -> Result<Option<ReadyForPublication>, sqlx::Error> {
        let query = format!(
            "UPDATE ready_for_publication SET
                paper_title = COALESCE($2, paper_title),
                status = COALESCE($3, status),
                draft_link = CASE WHEN $4 THEN $5 ELSE draft_link END,
                plagiarism_report_link = CASE WHEN $6 THEN $7 ELSE plagiarism_report_link END,
                ai_detection_link = CASE WHEN $8 THEN $9 ELSE ai_detection_link END,
                target_date = CASE WHEN $10 THEN $11 ELSE target_date END,
                notes = CASE WHEN $12 THEN $13 ELSE notes END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ReadyForPublication>(&query)
            .bind(id)
            .bind(&input.paper_title)
            .bind(status.map(ReadyStatus::as_str))
            .bind(is_set(&input.draft_link))
            .bind(value_of(&input.draft_link))
            .bind(is_set(&input.plagiarism_report_link))
            .bind(value_of(&input.plagiarism_report_link))
            .bind(is_set(&input.ai_detection_link))
            .bind(value_of(&input.ai_detection_link))
            .bind(is_set(&input.target_date))
            .bind(value_of(&input.target_date))
            .bind(is_set(&input.notes))
            .bind(value_of(&input.notes))
            .fetch_optional(pool)
            .await
    }

    /// Set only the status column.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: ReadyStatus,
    ) -> Result<Option<ReadyForPublication>, sqlx::Error> {
        let query = format!(
            "UPDATE ready_for_publication SET status = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ReadyForPublication>(&query)
            .bind(id)
            .bind(status.as_str())
            .fetch_optional(pool)
            .await
    }

    /// Delete an entry. Author details and applications cascade.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM ready_for_publication WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Author details
    // -----------------------------------------------------------------------

    /// Authors of a staged paper in author order.
    pub async fn list_students(
        pool: &PgPool,
        rfp_id: DbId,
    ) -> Result<Vec<StudentDetail>, sqlx::Error> {
        let query = format!(
            "SELECT {DETAIL_COLUMNS} FROM rfp_student_details
             WHERE ready_for_publication_id = $1
             ORDER BY author_order, id"
        );
        sqlx::query_as::<_, StudentDetail>(&query)
            .bind(rfp_id)
            .fetch_all(pool)
            .await
    }

    /// Add an author. Without an explicit order the author goes last.
    pub async fn add_student(
        pool: &PgPool,
        rfp_id: DbId,
        input: &CreateStudentDetail,
    ) -> Result<StudentDetail, sqlx::Error> {
        let query = format!(
            "INSERT INTO rfp_student_details
                (ready_for_publication_id, student_id, full_name, email, affiliation, author_order)
             VALUES ($1, $2, $3, $4, $5,
                     COALESCE($6, (SELECT COALESCE(MAX(author_order), 0) + 1
                                   FROM rfp_student_details
                                   WHERE ready_for_publication_id = $1)))
             RETURNING {DETAIL_COLUMNS}"
        );
        sqlx::query_as::<_, StudentDetail>(&query)
            .bind(rfp_id)
            .bind(input.student_id)
            .bind(&input.full_name)
            .bind(&input.email)
            .bind(&input.affiliation)
            .bind(input.author_order)
            .fetch_one(pool)
            .await
    }

    /// Remove one author from one paper. Returns `true` if a row was removed.
    pub async fn remove_student(
        pool: &PgPool,
        rfp_id: DbId,
        detail_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM rfp_student_details WHERE id = $1 AND ready_for_publication_id = $2",
        )
        .bind(detail_id)
        .bind(rfp_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // In-publication view
    // -----------------------------------------------------------------------

    /// Approved papers with their application counts.
    pub async fn list_in_publication(
        pool: &PgPool,
        params: &InPublicationParams,
    ) -> Result<Vec<InPublicationEntry>, sqlx::Error> {
        let search = normalize_search(params.search.as_deref());

        let mut filter = FilterBuilder::new();
        filter
            .raw(&Self::in_publication_predicate())
            .eq("rfp.project_id", params.project_id)
            .search(SEARCH_COLUMNS, search.as_deref());

        let query = format!(
            "{} {} ORDER BY rfp.updated_at DESC, rfp.id DESC",
            Self::in_publication_select(),
            filter.where_clause()
        );
        filter
            .bind_to(sqlx::query_as::<_, InPublicationEntry>(&query))
            .fetch_all(pool)
            .await
    }

    /// One in-publication paper. `None` if the row is missing or not approved.
    pub async fn find_in_publication(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<InPublicationEntry>, sqlx::Error> {
        let query = format!(
            "{} WHERE {} AND rfp.id = $1",
            Self::in_publication_select(),
            Self::in_publication_predicate()
        );
        sqlx::query_as::<_, InPublicationEntry>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    fn summary_select() -> String {
        format!(
            "SELECT {RFP_COLUMNS}, p.project_code, p.project_name,
                    (SELECT COUNT(*) FROM rfp_student_details d
                     WHERE d.ready_for_publication_id = rfp.id) AS author_count
             FROM ready_for_publication rfp
             JOIN projects p ON p.id = rfp.project_id"
        )
    }

    /// Statuses that place a paper in the in-publication view.
    fn in_publication_predicate() -> String {
        let literals: Vec<String> = ReadyStatus::ALL
            .iter()
            .filter(|s| s.is_in_publication())
            .map(|s| format!("'{}'", s.as_str()))
            .collect();
        format!("rfp.status IN ({})", literals.join(", "))
    }

    fn in_publication_select() -> String {
        let accepted = ApplicationStatus::Accepted.as_str();
        let pending: Vec<String> = ApplicationStatus::ALL
            .iter()
            .filter(|s| !s.is_final())
            .map(|s| format!("'{}'", s.as_str()))
            .collect();
        let pending = pending.join(", ");
        format!(
            "SELECT {RFP_COLUMNS}, p.project_code, p.project_name,
                    (SELECT COUNT(*) FROM conference_applications ca
                     WHERE ca.paper_id = rfp.id) AS conference_application_count,
                    (SELECT COUNT(*) FROM journal_applications ja
                     WHERE ja.paper_id = rfp.id) AS journal_application_count,
                    (SELECT COUNT(*) FROM conference_applications ca
                     WHERE ca.paper_id = rfp.id AND ca.status = '{accepted}')
                  + (SELECT COUNT(*) FROM journal_applications ja
                     WHERE ja.paper_id = rfp.id AND ja.status = '{accepted}') AS accepted_count,
                    (SELECT COUNT(*) FROM conference_applications ca
                     WHERE ca.paper_id = rfp.id AND ca.status IN ({pending}))
                  + (SELECT COUNT(*) FROM journal_applications ja
                     WHERE ja.paper_id = rfp.id AND ja.status IN ({pending})) AS pending_count
             FROM ready_for_publication rfp
             JOIN projects p ON p.id = rfp.project_id"
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_publication_predicate_lists_approved_only() {
        assert_eq!(
            ReadyForPublicationRepo::in_publication_predicate(),
            "rfp.status IN ('approved')"
        );
    }
}
