//! Repository for the `students` table.

use mentorhub_core::codes::STUDENT_PREFIX;
use mentorhub_core::search::{
    clamp_limit, clamp_offset, normalize_search, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT,
};
use mentorhub_core::types::DbId;
use sqlx::PgPool;

use crate::filter::FilterBuilder;
use crate::models::nullable::{is_set, value_of};
use crate::models::student::{
    CreateStudent, Student, StudentListParams, StudentProject, StudentSummary, UpdateStudent,
};
use crate::repositories::code_seq;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "\
    id, student_code, full_name, grade, board_id, counselor_id, rbm_id, email, phone, \
    parent_name, parent_phone, school_name, application_year, created_at, updated_at";

const SUMMARY_SELECT: &str = "\
    SELECT st.id, st.student_code, st.full_name, st.grade, st.board_id, st.counselor_id, \
           st.rbm_id, st.email, st.phone, st.parent_name, st.parent_phone, st.school_name, \
           st.application_year, st.created_at, st.updated_at, \
           b.name AS board_name, \
           c.full_name AS counselor_name, \
           r.full_name AS rbm_name, \
           (SELECT COUNT(*) FROM project_students ps WHERE ps.student_id = st.id) AS project_count \
    FROM students st \
    LEFT JOIN boards b ON b.id = st.board_id \
    LEFT JOIN counselors c ON c.id = st.counselor_id \
    LEFT JOIN rbms r ON r.id = st.rbm_id";

/// Provides CRUD operations for students.
pub struct StudentRepo;

impl StudentRepo {
    /// Insert a new student with a generated `STU<year><seq>` code.
    pub async fn create(pool: &PgPool, input: &CreateStudent) -> Result<Student, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let code = code_seq::next_code(&mut tx, "students", "student_code", STUDENT_PREFIX).await?;

        let query = format!(
            "INSERT INTO students
                (student_code, full_name, grade, board_id, counselor_id, rbm_id, email, phone,
                 parent_name, parent_phone, school_name, application_year)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
             RETURNING {COLUMNS}"
        );
        let student = sqlx::query_as::<_, Student>(&query)
            .bind(&code)
            .bind(&input.full_name)
            .bind(&input.grade)
            .bind(input.board_id)
            .bind(input.counselor_id)
            .bind(input.rbm_id)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.parent_name)
            .bind(&input.parent_phone)
            .bind(&input.school_name)
            .bind(input.application_year)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(student)
    }

    /// Find a student joined with lookup names.
    pub async fn find_summary(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<StudentSummary>, sqlx::Error> {
        let query = format!("{SUMMARY_SELECT} WHERE st.id = $1");
        sqlx::query_as::<_, StudentSummary>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List students matching the given filters, ordered by name.
    pub async fn list(
        pool: &PgPool,
        params: &StudentListParams,
    ) -> Result<Vec<StudentSummary>, sqlx::Error> {
        let search = normalize_search(params.search.as_deref());

        let mut filter = FilterBuilder::new();
        filter
            .eq("st.grade", params.grade.clone())
            .eq("st.board_id", params.board_id)
            .eq("st.counselor_id", params.counselor_id)
            .eq("st.rbm_id", params.rbm_id)
            .eq("st.application_year", params.application_year)
            .search(
                &["st.full_name", "st.student_code", "st.email", "st.school_name"],
                search.as_deref(),
            );

        let idx = filter.next_index();
        let query = format!(
            "{SUMMARY_SELECT} {} ORDER BY st.full_name, st.id LIMIT ${idx} OFFSET ${}",
            filter.where_clause(),
            idx + 1
        );
        filter
            .bind_to(sqlx::query_as::<_, StudentSummary>(&query))
            .bind(clamp_limit(params.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT))
            .bind(clamp_offset(params.offset))
            .fetch_all(pool)
            .await
    }

    /// Projects a student is assigned to, newest first.
    pub async fn projects(pool: &PgPool, id: DbId) -> Result<Vec<StudentProject>, sqlx::Error> {
        sqlx::query_as::<_, StudentProject>(
            "SELECT p.id, p.project_code, p.project_name, ps.name AS status_name
             FROM projects p
             JOIN project_students x ON x.project_id = p.id
             JOIN project_statuses ps ON ps.id = p.status_id
             WHERE x.student_id = $1
             ORDER BY p.created_at DESC, p.id DESC",
        )
        .bind(id)
        .fetch_all(pool)
        .await
    }

    /// Update a student. Absent fields keep their value; `null` clears a nullable column.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateStudent,
    ) -> Result<Option<Student>, sqlx::Error> {
        let query = format!(
            "UPDATE students SET
                full_name = COALESCE($2, full_name),
                grade = CASE WHEN $3 THEN $4 ELSE grade END,
                board_id = CASE WHEN $5 THEN $6 ELSE board_id END,
                counselor_id = CASE WHEN $7 THEN $8 ELSE counselor_id END,
                rbm_id = CASE WHEN $9 THEN $10 ELSE rbm_id END,
                email = CASE WHEN $11 THEN $12 ELSE email END,
                phone = CASE WHEN $13 THEN $14 ELSE phone END,
                parent_name = CASE WHEN $15 THEN $16 ELSE parent_name END,
                parent_phone = CASE WHEN $17 THEN $18 ELSE parent_phone END,
                school_name = CASE WHEN $19 THEN $20 ELSE school_name END,
                application_year = CASE WHEN $21 THEN $22 ELSE application_year END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Student>(&query)
            .bind(id)
            .bind(&input.full_name)
            .bind(is_set(&input.grade))
            .bind(value_of(&input.grade))
            .bind(is_set(&input.board_id))
            .bind(value_of(&input.board_id))
            .bind(is_set(&input.counselor_id))
            .bind(value_of(&input.counselor_id))
            .bind(is_set(&input.rbm_id))
            .bind(value_of(&input.rbm_id))
            .bind(is_set(&input.email))
            .bind(value_of(&input.email))
            .bind(is_set(&input.phone))
            .bind(value_of(&input.phone))
            .bind(is_set(&input.parent_name))
            .bind(value_of(&input.parent_name))
            .bind(is_set(&input.parent_phone))
            .bind(value_of(&input.parent_phone))
            .bind(is_set(&input.school_name))
            .bind(value_of(&input.school_name))
            .bind(is_set(&input.application_year))
            .bind(value_of(&input.application_year))
            .fetch_optional(pool)
            .await
    }

    /// Delete a student. Project assignments cascade; author details keep
    /// their copied name with a NULL `student_id`.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM students WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
