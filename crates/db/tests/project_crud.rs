//! Integration tests for project persistence.
//!
//! Exercises the project repository against a real database:
//! - Code generation and end-date derivation
//! - Assignment replacement and cascade delete
//! - List filters, scopes, and empty results
//! - Completion and reactivation

use chrono::{Datelike, NaiveDate};
use mentorhub_core::status::HasPrototype;
use mentorhub_db::models::mentor::{CreateMentor, MentorListParams};
use mentorhub_db::models::project::{
    CreateProject, ProjectListParams, ProjectScope, UpdateProject,
};
use mentorhub_db::models::status::ProjectStatus;
use mentorhub_db::models::student::{CreateStudent, StudentListParams};
use mentorhub_db::repositories::{MentorRepo, ProjectRepo, StudentRepo, TagRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_project(name: &str) -> CreateProject {
    CreateProject {
        project_name: name.to_string(),
        description: None,
        status_id: None,
        subject_id: None,
        lead_mentor_id: None,
        rbm_id: None,
        start_date: None,
        assigned_date: None,
        has_prototype: None,
        drive_link: None,
        notes: None,
        student_ids: Vec::new(),
        mentor_ids: Vec::new(),
        tag_ids: Vec::new(),
    }
}

fn new_mentor(name: &str) -> CreateMentor {
    CreateMentor {
        full_name: name.to_string(),
        email: None,
        phone: None,
        specialization: None,
        affiliation: None,
    }
}

fn new_student(name: &str) -> CreateStudent {
    CreateStudent {
        full_name: name.to_string(),
        grade: Some("11".to_string()),
        board_id: None,
        counselor_id: None,
        rbm_id: None,
        email: None,
        phone: None,
        parent_name: None,
        parent_phone: None,
        school_name: None,
        application_year: Some(2026),
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

async fn count_rows(pool: &PgPool, table: &str, project_id: i64) -> i64 {
    let (count,): (i64,) =
        sqlx::query_as(&format!("SELECT COUNT(*) FROM {table} WHERE project_id = $1"))
            .bind(project_id)
            .fetch_one(pool)
            .await
            .unwrap();
    count
}

// ---------------------------------------------------------------------------
// Codes and dates
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_project_codes_increment_within_year(pool: PgPool) {
    let first = ProjectRepo::create(&pool, &new_project("A"), HasPrototype::No)
        .await
        .unwrap();
    let second = ProjectRepo::create(&pool, &new_project("B"), HasPrototype::No)
        .await
        .unwrap();

    let year = chrono::Utc::now().year();
    assert_eq!(first.project_code, format!("PRJ{year}001"));
    assert_eq!(second.project_code, format!("PRJ{year}002"));
    assert_eq!(first.status_id, ProjectStatus::NotStarted.id());
    assert_eq!(first.has_prototype, "No");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_end_date_is_start_plus_four_months(pool: PgPool) {
    let mut input = new_project("Dated");
    input.start_date = Some(date(2026, 1, 15));
    let project = ProjectRepo::create(&pool, &input, HasPrototype::No)
        .await
        .unwrap();
    assert_eq!(project.end_date, Some(date(2026, 5, 15)));

    let undated = ProjectRepo::create(&pool, &new_project("Undated"), HasPrototype::No)
        .await
        .unwrap();
    assert_eq!(undated.end_date, None);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_end_date_recomputed_only_with_new_start(pool: PgPool) {
    let mut input = new_project("Shifting");
    input.start_date = Some(date(2026, 10, 31));
    let project = ProjectRepo::create(&pool, &input, HasPrototype::No)
        .await
        .unwrap();
    assert_eq!(project.end_date, Some(date(2027, 2, 28)));

    let renamed = ProjectRepo::update(
        &pool,
        project.id,
        &UpdateProject {
            project_name: Some("Renamed".into()),
            ..Default::default()
        },
        None,
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(renamed.end_date, Some(date(2027, 2, 28)));

    let moved = ProjectRepo::update(
        &pool,
        project.id,
        &UpdateProject {
            start_date: Some(Some(date(2026, 3, 1))),
            ..Default::default()
        },
        None,
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(moved.end_date, Some(date(2026, 7, 1)));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_clears_nullable_columns_on_null(pool: PgPool) {
    let mentor = MentorRepo::create(&pool, &new_mentor("Dr. Iyer")).await.unwrap();
    let mut input = new_project("Clearable");
    input.lead_mentor_id = Some(mentor.id);
    input.start_date = Some(date(2026, 2, 1));
    input.drive_link = Some("https://drive.example/x".to_string());
    input.notes = Some("keep me".to_string());
    let project = ProjectRepo::create(&pool, &input, HasPrototype::No)
        .await
        .unwrap();

    let update: UpdateProject = serde_json::from_str(
        r#"{"lead_mentor_id": null, "drive_link": null, "start_date": null}"#,
    )
    .unwrap();
    let cleared = ProjectRepo::update(&pool, project.id, &update, None)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(cleared.lead_mentor_id, None);
    assert_eq!(cleared.drive_link, None);
    assert_eq!(cleared.start_date, None);
    assert_eq!(cleared.end_date, None);
    // Absent keys keep their stored values.
    assert_eq!(cleared.notes.as_deref(), Some("keep me"));
    assert_eq!(cleared.project_name, "Clearable");
}

// ---------------------------------------------------------------------------
// Assignments
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_assignments_replaced_and_cascade_on_delete(pool: PgPool) {
    let alice = StudentRepo::create(&pool, &new_student("Alice")).await.unwrap();
    let bob = StudentRepo::create(&pool, &new_student("Bob")).await.unwrap();
    let mentor = MentorRepo::create(&pool, &new_mentor("Dr. Rao")).await.unwrap();
    let tag = TagRepo::create(&pool, "robotics", "#123456").await.unwrap();

    let mut input = new_project("Rover");
    input.student_ids = vec![alice.id, bob.id];
    input.mentor_ids = vec![mentor.id];
    input.tag_ids = vec![tag.id];
    let project = ProjectRepo::create(&pool, &input, HasPrototype::Yes)
        .await
        .unwrap();

    assert_eq!(count_rows(&pool, "project_students", project.id).await, 2);
    assert_eq!(count_rows(&pool, "project_mentors", project.id).await, 1);
    assert_eq!(count_rows(&pool, "project_tags", project.id).await, 1);

    ProjectRepo::update(
        &pool,
        project.id,
        &UpdateProject {
            student_ids: Some(vec![bob.id]),
            ..Default::default()
        },
        None,
    )
    .await
    .unwrap();
    let students = ProjectRepo::students(&pool, project.id).await.unwrap();
    assert_eq!(students.len(), 1);
    assert_eq!(students[0].full_name, "Bob");
    // Lists absent from the update are untouched.
    assert_eq!(count_rows(&pool, "project_mentors", project.id).await, 1);

    assert!(ProjectRepo::delete(&pool, project.id).await.unwrap());
    assert!(ProjectRepo::find_by_id(&pool, project.id).await.unwrap().is_none());
    assert_eq!(count_rows(&pool, "project_students", project.id).await, 0);
    assert_eq!(count_rows(&pool, "project_mentors", project.id).await, 0);
    assert_eq!(count_rows(&pool, "project_tags", project.id).await, 0);

    // The people themselves survive.
    assert!(StudentRepo::find_summary(&pool, alice.id).await.unwrap().is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_people_include_lead_mentor(pool: PgPool) {
    let lead = MentorRepo::create(&pool, &new_mentor("Lead")).await.unwrap();
    let helper = MentorRepo::create(&pool, &new_mentor("Helper")).await.unwrap();

    let mut input = new_project("Mentored");
    input.lead_mentor_id = Some(lead.id);
    input.mentor_ids = vec![helper.id, lead.id];
    let project = ProjectRepo::create(&pool, &input, HasPrototype::No)
        .await
        .unwrap();

    let people = ProjectRepo::people(&pool, project.id).await.unwrap();
    let names: Vec<&str> = people.mentors.iter().map(|m| m.full_name.as_str()).collect();
    assert_eq!(names, ["Helper", "Lead"]);
    assert!(people.students.is_empty());

    let mentors = MentorRepo::list(&pool, &MentorListParams::default())
        .await
        .unwrap();
    let lead_row = mentors.iter().find(|m| m.mentor.id == lead.id).unwrap();
    assert_eq!(lead_row.project_count, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_attach_and_detach_tag(pool: PgPool) {
    let project = ProjectRepo::create(&pool, &new_project("Tagged"), HasPrototype::No)
        .await
        .unwrap();
    let tag = TagRepo::create(&pool, "ml", "#ABCDEF").await.unwrap();

    ProjectRepo::attach_tag(&pool, project.id, tag.id).await.unwrap();
    // Attaching twice is a no-op.
    ProjectRepo::attach_tag(&pool, project.id, tag.id).await.unwrap();
    assert_eq!(ProjectRepo::tags(&pool, project.id).await.unwrap().len(), 1);

    let usage = TagRepo::list_with_usage(&pool).await.unwrap();
    assert_eq!(usage[0].project_count, 1);

    assert!(ProjectRepo::detach_tag(&pool, project.id, tag.id).await.unwrap());
    assert!(!ProjectRepo::detach_tag(&pool, project.id, tag.id).await.unwrap());
}

// ---------------------------------------------------------------------------
// Filters and scopes
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_filters_return_only_matches(pool: PgPool) {
    let mentor = MentorRepo::create(&pool, &new_mentor("Dr. Sen")).await.unwrap();

    let mut solar = new_project("Solar dryer");
    solar.status_id = Some(ProjectStatus::InProgress.id());
    solar.mentor_ids = vec![mentor.id];
    let solar = ProjectRepo::create(&pool, &solar, HasPrototype::No)
        .await
        .unwrap();

    let mut water = new_project("Water filter");
    water.lead_mentor_id = Some(mentor.id);
    let water = ProjectRepo::create(&pool, &water, HasPrototype::No)
        .await
        .unwrap();

    ProjectRepo::create(&pool, &new_project("Unrelated"), HasPrototype::No)
        .await
        .unwrap();

    let by_status = ProjectRepo::list(
        &pool,
        &ProjectListParams {
            status_id: Some(ProjectStatus::InProgress.id()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(by_status.len(), 1);
    assert_eq!(by_status[0].project.id, solar.id);
    assert_eq!(by_status[0].status_name, "In Progress");

    let by_mentor = ProjectRepo::list(
        &pool,
        &ProjectListParams {
            mentor_id: Some(mentor.id),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    let mut ids: Vec<i64> = by_mentor.iter().map(|p| p.project.id).collect();
    ids.sort();
    assert_eq!(ids, vec![solar.id, water.id]);

    let by_search = ProjectRepo::list(
        &pool,
        &ProjectListParams {
            search: Some("FILTER".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(by_search.len(), 1);
    assert_eq!(by_search[0].project.id, water.id);

    let none = ProjectRepo::list(
        &pool,
        &ProjectListParams {
            search: Some("nothing matches this".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert!(none.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_reactivate_moves_project_to_active_scope(pool: PgPool) {
    let project = ProjectRepo::create(&pool, &new_project("Finished"), HasPrototype::No)
        .await
        .unwrap();

    let completed = ProjectRepo::complete(&pool, project.id, date(2026, 6, 1), Some(HasPrototype::Yes))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(completed.status_id, ProjectStatus::Completed.id());
    assert_eq!(completed.completion_date, Some(date(2026, 6, 1)));
    assert_eq!(completed.has_prototype, "Yes");

    let in_scope = |scope| ProjectListParams {
        scope,
        ..Default::default()
    };
    let done = ProjectRepo::list(&pool, &in_scope(ProjectScope::Completed)).await.unwrap();
    assert_eq!(done.len(), 1);
    assert!(ProjectRepo::list(&pool, &in_scope(ProjectScope::Active)).await.unwrap().is_empty());

    let reactivated = ProjectRepo::reactivate(&pool, project.id).await.unwrap().unwrap();
    assert_eq!(reactivated.status_id, ProjectStatus::InProgress.id());
    assert_eq!(reactivated.completion_date, None);

    assert!(ProjectRepo::list(&pool, &in_scope(ProjectScope::Completed)).await.unwrap().is_empty());
    let active = ProjectRepo::list(&pool, &in_scope(ProjectScope::Active)).await.unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].project.id, project.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_reactivate_skips_projects_that_are_not_completed(pool: PgPool) {
    let mut input = new_project("Shelved");
    input.status_id = Some(ProjectStatus::Cancelled.id());
    let project = ProjectRepo::create(&pool, &input, HasPrototype::No)
        .await
        .unwrap();

    assert_eq!(ProjectRepo::is_completed(&pool, project.id).await.unwrap(), Some(false));
    assert!(ProjectRepo::reactivate(&pool, project.id).await.unwrap().is_none());

    let unchanged = ProjectRepo::find_by_id(&pool, project.id).await.unwrap().unwrap();
    assert_eq!(unchanged.status_id, ProjectStatus::Cancelled.id());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_student_codes_and_filters(pool: PgPool) {
    let first = StudentRepo::create(&pool, &new_student("Meera")).await.unwrap();
    let mut other = new_student("Kabir");
    other.grade = Some("9".into());
    StudentRepo::create(&pool, &other).await.unwrap();

    let year = chrono::Utc::now().year();
    assert_eq!(first.student_code, format!("STU{year}001"));

    let grade_11 = StudentRepo::list(
        &pool,
        &StudentListParams {
            grade: Some("11".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(grade_11.len(), 1);
    assert_eq!(grade_11[0].student.full_name, "Meera");
}
