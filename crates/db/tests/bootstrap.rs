use sqlx::PgPool;

/// Full bootstrap test: connect, migrate, verify schema.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    mentorhub_db::health_check(&pool).await.unwrap();

    let statuses: Vec<(i16, String)> =
        sqlx::query_as("SELECT id, name FROM project_statuses ORDER BY sort_order")
            .fetch_all(&pool)
            .await
            .unwrap();
    let names: Vec<&str> = statuses.iter().map(|(_, n)| n.as_str()).collect();
    assert_eq!(
        names,
        ["Not Started", "In Progress", "On Hold", "Completed", "Cancelled"]
    );
}

/// Every table carries the `set_updated_at` trigger.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_updated_at_triggers_installed(pool: PgPool) {
    let tables = [
        "users",
        "subjects",
        "boards",
        "counselors",
        "rbms",
        "mentors",
        "students",
        "tags",
        "projects",
        "conferences",
        "journals",
        "ready_for_publication",
        "rfp_student_details",
        "conference_applications",
        "journal_applications",
        "publications",
    ];

    for table in tables {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM information_schema.triggers
             WHERE event_object_table = $1 AND trigger_name = 'set_updated_at'",
        )
        .bind(table)
        .fetch_one(&pool)
        .await
        .unwrap_or_else(|e| panic!("{table} trigger query failed: {e}"));
        assert!(count > 0, "{table} should have a set_updated_at trigger");
    }
}
