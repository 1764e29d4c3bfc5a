//! Repository for the `projects` table and its assignment join tables.

use chrono::NaiveDate;
use mentorhub_core::codes::PROJECT_PREFIX;
use mentorhub_core::deadline::project_end_date;
use mentorhub_core::search::{
    clamp_limit, clamp_offset, normalize_search, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT,
};
use mentorhub_core::status::HasPrototype;
use mentorhub_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::filter::FilterBuilder;
use crate::models::nullable::{is_set, value_of};
use crate::models::project::{
    CreateProject, PersonRef, Project, ProjectListParams, ProjectPeople, ProjectScope,
    ProjectSummary, UpdateProject,
};
use crate::models::status::{ProjectStatus, StatusId};
use crate::models::tag::Tag;
use crate::repositories::code_seq;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "\
    id, project_code, project_name, description, status_id, subject_id, \
    lead_mentor_id, rbm_id, start_date, assigned_date, completion_date, end_date, \
    has_prototype, drive_link, notes, created_at, updated_at";

/// `SELECT ... FROM` for [`ProjectSummary`] rows, aliased as `p`.
const SUMMARY_SELECT: &str = "\
    SELECT p.id, p.project_code, p.project_name, p.description, p.status_id, p.subject_id, \
           p.lead_mentor_id, p.rbm_id, p.start_date, p.assigned_date, p.completion_date, \
           p.end_date, p.has_prototype, p.drive_link, p.notes, p.created_at, p.updated_at, \
           ps.name AS status_name, \
           s.name AS subject_name, \
           m.full_name AS lead_mentor_name, \
           r.full_name AS rbm_name, \
           (SELECT COUNT(*) FROM project_students x WHERE x.project_id = p.id) AS student_count \
    FROM projects p \
    JOIN project_statuses ps ON ps.id = p.status_id \
    LEFT JOIN subjects s ON s.id = p.subject_id \
    LEFT JOIN mentors m ON m.id = p.lead_mentor_id \
    LEFT JOIN rbms r ON r.id = p.rbm_id";

/// Predicate selecting projects whose status counts as completed.
pub const COMPLETED_PREDICATE: &str = "ps.name ILIKE '%completed%'";

/// Assignment join tables keyed by project.
#[derive(Debug, Clone, Copy)]
enum Assignment {
    Students,
    Mentors,
    Tags,
}

impl Assignment {
    fn table(self) -> &'static str {
        match self {
            Assignment::Students => "project_students",
            Assignment::Mentors => "project_mentors",
            Assignment::Tags => "project_tags",
        }
    }

    fn column(self) -> &'static str {
        match self {
            Assignment::Students => "student_id",
            Assignment::Mentors => "mentor_id",
            Assignment::Tags => "tag_id",
        }
    }
}

/// Provides CRUD operations for projects and their assignments.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project with its assignments, returning the created row.
    ///
    /// Generates the project code and derives `end_date` from `start_date`.
    /// The row and every join row are written in one transaction.
    pub async fn create(
        pool: &PgPool,
        input: &CreateProject,
        has_prototype: HasPrototype,
    ) -> Result<Project, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let code = code_seq::next_code(&mut tx, "projects", "project_code", PROJECT_PREFIX).await?;
        let end_date = project_end_date(input.start_date);

        let query = format!(
            "INSERT INTO projects \
                (project_code, project_name, description, status_id, subject_id, lead_mentor_id, \
                 rbm_id, start_date, assigned_date, end_date, has_prototype, drive_link, notes) \
             VALUES ($1, $2, $3, COALESCE($4, $5), $6, $7, $8, $9, $10, $11, $12, $13, $14) \
             RETURNING {COLUMNS}"
        );
        let project = sqlx::query_as::<_, Project>(&query)
            .bind(&code)
            .bind(&input.project_name)
            .bind(&input.description)
            .bind(input.status_id)
            .bind(ProjectStatus::NotStarted.id())
            .bind(input.subject_id)
            .bind(input.lead_mentor_id)
            .bind(input.rbm_id)
            .bind(input.start_date)
            .bind(input.assigned_date)
            .bind(end_date)
            .bind(has_prototype.as_str())
            .bind(&input.drive_link)
            .bind(&input.notes)
            .fetch_one(&mut *tx)
            .await?;

        Self::replace_inner(&mut tx, Assignment::Students, project.id, &input.student_ids).await?;
        Self::replace_inner(&mut tx, Assignment::Mentors, project.id, &input.mentor_ids).await?;
        Self::replace_inner(&mut tx, Assignment::Tags, project.id, &input.tag_ids).await?;

        tx.commit().await?;
        Ok(project)
    }

    /// Find a project by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a project joined with its lookup names.
    pub async fn find_summary(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ProjectSummary>, sqlx::Error> {
        let query = format!("{SUMMARY_SELECT} WHERE p.id = $1");
        sqlx::query_as::<_, ProjectSummary>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List projects matching the given filters.
    ///
    /// `mentor_id` matches both the lead mentor and assigned mentors.
    /// An empty result is a normal outcome, not an error.
    pub async fn list(
        pool: &PgPool,
        params: &ProjectListParams,
    ) -> Result<Vec<ProjectSummary>, sqlx::Error> {
        let search = normalize_search(params.search.as_deref());

        let mut filter = FilterBuilder::new();
        filter
            .eq("p.status_id", params.status_id)
            .eq("p.subject_id", params.subject_id)
            .eq("p.rbm_id", params.rbm_id)
            .eq("p.has_prototype", params.has_prototype.clone())
            .with_value(
                "(p.lead_mentor_id = {} OR EXISTS (SELECT 1 FROM project_mentors pm \
                  WHERE pm.project_id = p.id AND pm.mentor_id = {}))",
                params.mentor_id,
            )
            .with_value(
                "EXISTS (SELECT 1 FROM project_tags pt WHERE pt.project_id = p.id AND pt.tag_id = {})",
                params.tag_id,
            )
            .with_value(
                "EXISTS (SELECT 1 FROM project_students pst \
                  WHERE pst.project_id = p.id AND pst.student_id = {})",
                params.student_id,
            )
            .search(
                &["p.project_name", "p.project_code", "p.description"],
                search.as_deref(),
            );

        match params.scope {
            ProjectScope::All => {}
            ProjectScope::Active => {
                filter.raw(&format!("NOT ({COMPLETED_PREDICATE})"));
            }
            ProjectScope::Completed => {
                filter.raw(COMPLETED_PREDICATE);
            }
        }

        let idx = filter.next_index();
        let query = format!(
            "{SUMMARY_SELECT} {} ORDER BY {} LIMIT ${idx} OFFSET ${}",
            filter.where_clause(),
            params.sort.order_by(),
            idx + 1
        );

        filter
            .bind_to(sqlx::query_as::<_, ProjectSummary>(&query))
            .bind(clamp_limit(params.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT))
            .bind(clamp_offset(params.offset))
            .fetch_all(pool)
            .await
    }

    /// Update a project. Only fields present in `input` are applied; an
    /// explicit `null` on a nullable column clears it.
    ///
    /// Setting `start_date` also rewrites `end_date`, and clearing it clears
    /// both. Assignment lists that are present replace the existing set in
    /// the same transaction.
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProject,
        has_prototype: Option<HasPrototype>,
    ) -> Result<Option<Project>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let start_date = value_of(&input.start_date);
        let query = format!(
            "UPDATE projects SET \
                project_name = COALESCE($2, project_name), \
                status_id = COALESCE($3, status_id), \
                has_prototype = COALESCE($4, has_prototype), \
                description = CASE WHEN $5 THEN $6 ELSE description END, \
                subject_id = CASE WHEN $7 THEN $8 ELSE subject_id END, \
                lead_mentor_id = CASE WHEN $9 THEN $10 ELSE lead_mentor_id END, \
                rbm_id = CASE WHEN $11 THEN $12 ELSE rbm_id END, \
                start_date = CASE WHEN $13 THEN $14 ELSE start_date END, \
                end_date = CASE WHEN $13 THEN $15 ELSE end_date END, \
                assigned_date = CASE WHEN $16 THEN $17 ELSE assigned_date END, \
                completion_date = CASE WHEN $18 THEN $19 ELSE completion_date END, \
                drive_link = CASE WHEN $20 THEN $21 ELSE drive_link END, \
                notes = CASE WHEN $22 THEN $23 ELSE notes END \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let project = sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&input.project_name)
            .bind(input.status_id)
            .bind(has_prototype.map(HasPrototype::as_str))
            .bind(is_set(&input.description))
            .bind(value_of(&input.description))
            .bind(is_set(&input.subject_id))
            .bind(value_of(&input.subject_id))
            .bind(is_set(&input.lead_mentor_id))
            .bind(value_of(&input.lead_mentor_id))
            .bind(is_set(&input.rbm_id))
            .bind(value_of(&input.rbm_id))
            .bind(is_set(&input.start_date))
            .bind(start_date)
            .bind(project_end_date(start_date))
            .bind(is_set(&input.assigned_date))
            .bind(value_of(&input.assigned_date))
            .bind(is_set(&input.completion_date))
            .bind(value_of(&input.completion_date))
            .bind(is_set(&input.drive_link))
            .bind(value_of(&input.drive_link))
            .bind(is_set(&input.notes))
            .bind(value_of(&input.notes))
            .fetch_optional(&mut *tx)
            .await?;

        if let Some(ref project) = project {
            if let Some(ref ids) = input.student_ids {
                Self::replace_inner(&mut tx, Assignment::Students, project.id, ids).await?;
            }
            if let Some(ref ids) = input.mentor_ids {
                Self::replace_inner(&mut tx, Assignment::Mentors, project.id, ids).await?;
            }
            if let Some(ref ids) = input.tag_ids {
                Self::replace_inner(&mut tx, Assignment::Tags, project.id, ids).await?;
            }
        }

        tx.commit().await?;
        Ok(project)
    }

    /// Mark a project completed.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn complete(
        pool: &PgPool,
        id: DbId,
        completion_date: NaiveDate,
        has_prototype: Option<HasPrototype>,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET \
                status_id = $2, \
                completion_date = $3, \
                has_prototype = COALESCE($4, has_prototype) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(ProjectStatus::Completed.id())
            .bind(completion_date)
            .bind(has_prototype.map(HasPrototype::as_str))
            .fetch_optional(pool)
            .await
    }

    /// Move a completed project back to the active list: status becomes
    /// In Progress and the completion date is cleared.
    ///
    /// Returns `None` if no row with the given `id` exists or its status
    /// does not count as completed.
    pub async fn reactivate(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET status_id = $2, completion_date = NULL \
             WHERE id = $1 \
               AND status_id IN (SELECT ps.id FROM project_statuses ps WHERE {COMPLETED_PREDICATE}) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(ProjectStatus::InProgress.id())
            .fetch_optional(pool)
            .await
    }

    /// Whether the project's current status counts as completed.
    pub async fn is_completed(pool: &PgPool, id: DbId) -> Result<Option<bool>, sqlx::Error> {
        let query = format!(
            "SELECT ({COMPLETED_PREDICATE}) FROM projects p \
             JOIN project_statuses ps ON ps.id = p.status_id \
             WHERE p.id = $1"
        );
        sqlx::query_scalar::<_, bool>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a project by ID. Returns `true` if a row was removed.
    ///
    /// Student, mentor, and tag assignments go with it through
    /// `ON DELETE CASCADE`.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Assignment queries
    // -----------------------------------------------------------------------

    /// Students and mentors attached to a project, for dropdown population.
    pub async fn people(pool: &PgPool, id: DbId) -> Result<ProjectPeople, sqlx::Error> {
        let students = Self::students(pool, id).await?;
        let mentors = Self::mentors(pool, id).await?;
        Ok(ProjectPeople { students, mentors })
    }

    /// Students assigned to a project, ordered by name.
    pub async fn students(pool: &PgPool, id: DbId) -> Result<Vec<PersonRef>, sqlx::Error> {
        sqlx::query_as::<_, PersonRef>(
            "SELECT s.id, s.full_name FROM students s \
             JOIN project_students ps ON ps.student_id = s.id \
             WHERE ps.project_id = $1 \
             ORDER BY s.full_name, s.id",
        )
        .bind(id)
        .fetch_all(pool)
        .await
    }

    /// Mentors attached to a project: the lead mentor plus assigned mentors.
    pub async fn mentors(pool: &PgPool, id: DbId) -> Result<Vec<PersonRef>, sqlx::Error> {
        sqlx::query_as::<_, PersonRef>(
            "SELECT m.id, m.full_name FROM mentors m \
             WHERE m.id IN ( \
                 SELECT pm.mentor_id FROM project_mentors pm WHERE pm.project_id = $1 \
                 UNION \
                 SELECT p.lead_mentor_id FROM projects p \
                 WHERE p.id = $1 AND p.lead_mentor_id IS NOT NULL \
             ) \
             ORDER BY m.full_name, m.id",
        )
        .bind(id)
        .fetch_all(pool)
        .await
    }

    /// Tags attached to a project, ordered by name.
    pub async fn tags(pool: &PgPool, id: DbId) -> Result<Vec<Tag>, sqlx::Error> {
        sqlx::query_as::<_, Tag>(
            "SELECT t.id, t.name, t.color, t.created_at, t.updated_at FROM tags t \
             JOIN project_tags pt ON pt.tag_id = t.id \
             WHERE pt.project_id = $1 \
             ORDER BY t.name",
        )
        .bind(id)
        .fetch_all(pool)
        .await
    }

    /// Attach a single tag to a project (idempotent).
    pub async fn attach_tag(pool: &PgPool, id: DbId, tag_id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO project_tags (project_id, tag_id) VALUES ($1, $2) \
             ON CONFLICT DO NOTHING",
        )
        .bind(id)
        .bind(tag_id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Detach a single tag. Returns `true` if the association existed.
    pub async fn detach_tag(pool: &PgPool, id: DbId, tag_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM project_tags WHERE project_id = $1 AND tag_id = $2")
            .bind(id)
            .bind(tag_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Name of a project status, used to report reactivation results.
    pub async fn status_name(pool: &PgPool, status_id: StatusId) -> Result<String, sqlx::Error> {
        sqlx::query_scalar::<_, String>("SELECT name FROM project_statuses WHERE id = $1")
            .bind(status_id)
            .fetch_one(pool)
            .await
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    /// Replace one assignment set within an existing transaction.
    async fn replace_inner(
        conn: &mut PgConnection,
        assignment: Assignment,
        project_id: DbId,
        ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        let table = assignment.table();
        let column = assignment.column();

        sqlx::query(&format!("DELETE FROM {table} WHERE project_id = $1"))
            .bind(project_id)
            .execute(&mut *conn)
            .await?;

        if !ids.is_empty() {
            sqlx::query(&format!(
                "INSERT INTO {table} (project_id, {column}) \
                 SELECT $1, UNNEST($2::BIGINT[]) \
                 ON CONFLICT DO NOTHING"
            ))
            .bind(project_id)
            .bind(ids)
            .execute(&mut *conn)
            .await?;
        }

        Ok(())
    }
}
