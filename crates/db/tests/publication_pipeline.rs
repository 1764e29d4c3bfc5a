//! Integration tests for the publication pipeline:
//! ready-for-publication entries, the in-publication view, applications,
//! and published papers.

use assert_matches::assert_matches;
use chrono::{Datelike, NaiveDate};
use mentorhub_core::status::{ApplicationStatus, HasPrototype, ReadyStatus, VenueType};
use mentorhub_db::models::application::{CreateConferenceApplication, CreateJournalApplication};
use mentorhub_db::models::conference::CreateConference;
use mentorhub_db::models::journal::CreateJournal;
use mentorhub_db::models::project::CreateProject;
use mentorhub_db::models::publication::{PublicationInput, PublicationListParams, UpdatePublication};
use mentorhub_db::models::ready_for_publication::{
    CreateReadyForPublication, CreateStudentDetail, InPublicationParams,
    UpdateReadyForPublication,
};
use mentorhub_db::repositories::{
    ConferenceApplicationRepo, ConferenceRepo, JournalApplicationRepo, JournalRepo, ProjectRepo,
    PublicationRepo, ReadyForPublicationRepo,
};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_project(pool: &PgPool) -> i64 {
    let input = CreateProject {
        project_name: "Microplastics survey".to_string(),
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
    };
    ProjectRepo::create(pool, &input, HasPrototype::No)
        .await
        .unwrap()
        .id
}

fn new_paper(project_id: i64, title: &str) -> CreateReadyForPublication {
    CreateReadyForPublication {
        project_id,
        paper_title: title.to_string(),
        status: None,
        draft_link: None,
        plagiarism_report_link: None,
        ai_detection_link: None,
        target_date: None,
        notes: None,
    }
}

fn new_conference(name: &str) -> CreateConference {
    CreateConference {
        name: name.to_string(),
        affiliation: None,
        conference_type: Some("International".to_string()),
        location: None,
        start_date: None,
        end_date: None,
        submission_deadline: None,
        website: None,
        notes: None,
    }
}

fn new_journal(name: &str) -> CreateJournal {
    CreateJournal {
        name: name.to_string(),
        publisher: None,
        journal_type: None,
        frequency: None,
        submission_deadline: None,
        website: None,
        notes: None,
    }
}

fn publication_input(project_id: i64, venue: &str) -> PublicationInput {
    PublicationInput {
        project_id,
        paper_title: "River health index".to_string(),
        venue_type: venue.to_string(),
        doi: None,
        published_on: None,
        notes: None,
        conference_name: Some("ICSE Youth".to_string()),
        conference_location: Some("Pune".to_string()),
        conference_date: None,
        proceedings_link: None,
        journal_name: Some("Young Scientist".to_string()),
        journal_publisher: Some("YS Press".to_string()),
        volume: Some("3".to_string()),
        issue: Some("1".to_string()),
        journal_link: None,
    }
}

// ---------------------------------------------------------------------------
// Ready for publication
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_status_update_and_check_constraint(pool: PgPool) {
    let project_id = seed_project(&pool).await;
    let paper = ReadyForPublicationRepo::create(
        &pool,
        &new_paper(project_id, "Draft"),
        ReadyStatus::Pending,
    )
    .await
    .unwrap();
    assert_eq!(paper.status, "pending");

    // Any status may follow any other.
    let published = ReadyForPublicationRepo::update_status(&pool, paper.id, ReadyStatus::Published)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(published.status, "published");
    let back = ReadyForPublicationRepo::update_status(&pool, paper.id, ReadyStatus::Pending)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(back.status, "pending");

    let raw = sqlx::query("UPDATE ready_for_publication SET status = 'done' WHERE id = $1")
        .bind(paper.id)
        .execute(&pool)
        .await;
    assert_matches!(raw, Err(sqlx::Error::Database(_)));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_entry_update_clears_optional_fields(pool: PgPool) {
    let project_id = seed_project(&pool).await;
    let mut input = new_paper(project_id, "Wetland survey");
    input.target_date = NaiveDate::from_ymd_opt(2026, 6, 1);
    input.draft_link = Some("https://docs.example/draft".to_string());
    input.notes = Some("second pass".to_string());
    let paper = ReadyForPublicationRepo::create(&pool, &input, ReadyStatus::Pending)
        .await
        .unwrap();

    let update: UpdateReadyForPublication =
        serde_json::from_str(r#"{"target_date": null, "draft_link": null}"#).unwrap();
    let cleared = ReadyForPublicationRepo::update(&pool, paper.id, &update, None)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(cleared.target_date, None);
    assert_eq!(cleared.draft_link, None);
    assert_eq!(cleared.notes.as_deref(), Some("second pass"));
    assert_eq!(cleared.status, "pending");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_authors_append_in_order(pool: PgPool) {
    let project_id = seed_project(&pool).await;
    let paper = ReadyForPublicationRepo::create(
        &pool,
        &new_paper(project_id, "Authored"),
        ReadyStatus::InReview,
    )
    .await
    .unwrap();

    for name in ["First Author", "Second Author"] {
        ReadyForPublicationRepo::add_student(
            &pool,
            paper.id,
            &CreateStudentDetail {
                student_id: None,
                full_name: name.to_string(),
                email: None,
                affiliation: None,
                author_order: None,
            },
        )
        .await
        .unwrap();
    }

    let authors = ReadyForPublicationRepo::list_students(&pool, paper.id).await.unwrap();
    let orders: Vec<i32> = authors.iter().map(|a| a.author_order).collect();
    assert_eq!(orders, vec![1, 2]);

    let summary = ReadyForPublicationRepo::find_summary(&pool, paper.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(summary.author_count, 2);

    assert!(ReadyForPublicationRepo::remove_student(&pool, paper.id, authors[0].id)
        .await
        .unwrap());
    // A detail id under a different paper is not removed.
    assert!(!ReadyForPublicationRepo::remove_student(&pool, paper.id + 1, authors[1].id)
        .await
        .unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_in_publication_counts_applications(pool: PgPool) {
    let project_id = seed_project(&pool).await;
    let approved = ReadyForPublicationRepo::create(
        &pool,
        &new_paper(project_id, "Approved paper"),
        ReadyStatus::Approved,
    )
    .await
    .unwrap();
    ReadyForPublicationRepo::create(&pool, &new_paper(project_id, "Still pending"), ReadyStatus::Pending)
        .await
        .unwrap();

    let conference = ConferenceRepo::create(&pool, &new_conference("IEEE Youth")).await.unwrap();
    let journal = JournalRepo::create(&pool, &new_journal("JEI")).await.unwrap();

    ConferenceApplicationRepo::create(
        &pool,
        &CreateConferenceApplication {
            paper_id: approved.id,
            conference_id: conference.id,
            status: None,
            applied_on: None,
            decision_on: None,
            feedback: None,
            notes: None,
        },
        ApplicationStatus::Accepted,
    )
    .await
    .unwrap();
    JournalApplicationRepo::create(
        &pool,
        &CreateJournalApplication {
            paper_id: approved.id,
            journal_id: journal.id,
            status: None,
            manuscript_ref: Some("JEI-42".to_string()),
            applied_on: None,
            decision_on: None,
            feedback: None,
            notes: None,
        },
        ApplicationStatus::UnderReview,
    )
    .await
    .unwrap();

    let entries = ReadyForPublicationRepo::list_in_publication(&pool, &InPublicationParams::default())
        .await
        .unwrap();
    assert_eq!(entries.len(), 1);
    let entry = &entries[0];
    assert_eq!(entry.entry.id, approved.id);
    assert_eq!(entry.conference_application_count, 1);
    assert_eq!(entry.journal_application_count, 1);
    assert_eq!(entry.accepted_count, 1);
    assert_eq!(entry.pending_count, 1);

    // Venues with applications cannot be deleted.
    let blocked = ConferenceRepo::delete(&pool, conference.id).await;
    assert_matches!(blocked, Err(sqlx::Error::Database(ref e)) if e.code().as_deref() == Some("23503"));

    // Deleting the paper removes its applications.
    assert!(ReadyForPublicationRepo::delete(&pool, approved.id).await.unwrap());
    assert!(ConferenceRepo::delete(&pool, conference.id).await.unwrap());
}

// ---------------------------------------------------------------------------
// Publications
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_venue_fields_are_exclusive(pool: PgPool) {
    let project_id = seed_project(&pool).await;

    let input = publication_input(project_id, "Conference").retain_venue_fields(VenueType::Conference);
    let conference_pub = PublicationRepo::create(&pool, &input).await.unwrap();
    assert_eq!(conference_pub.venue_type, "Conference");
    assert_eq!(conference_pub.conference_name.as_deref(), Some("ICSE Youth"));
    assert!(conference_pub.journal_name.is_none());
    assert!(conference_pub.journal_publisher.is_none());
    assert!(conference_pub.volume.is_none());
    assert!(conference_pub.issue.is_none());

    let year = chrono::Utc::now().year();
    assert_eq!(conference_pub.publication_code, format!("PUB{year}001"));

    // Switching venue on update drops the conference columns.
    let update = UpdatePublication {
        venue_type: Some("Journal".to_string()),
        journal_name: Some(Some("Young Scientist".to_string())),
        ..Default::default()
    };
    let merged = PublicationInput::merged(&conference_pub, &update)
        .retain_venue_fields(VenueType::Journal);
    let journal_pub = PublicationRepo::replace(&pool, conference_pub.id, &merged)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(journal_pub.venue_type, "Journal");
    assert_eq!(journal_pub.journal_name.as_deref(), Some("Young Scientist"));
    assert!(journal_pub.conference_name.is_none());
    assert!(journal_pub.conference_location.is_none());

    let journals = PublicationRepo::list(
        &pool,
        &PublicationListParams::default(),
        Some(VenueType::Journal),
    )
    .await
    .unwrap();
    assert_eq!(journals.len(), 1);
    let conferences = PublicationRepo::list(
        &pool,
        &PublicationListParams::default(),
        Some(VenueType::Conference),
    )
    .await
    .unwrap();
    assert!(conferences.is_empty());
}
