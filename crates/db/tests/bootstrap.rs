use sqlx::PgPool;

/// Full bootstrap test: connect, migrate, verify schema.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    // Health check
    studyquest_db::health_check(&pool).await.unwrap();

    // Verify the three tables exist and start empty.
    let tables = ["users", "daily_tasks", "purchases"];

    for table in tables {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert_eq!(count.0, 0, "{table} should start empty");
    }
}

/// Uniqueness constraints carry the `uq_` prefix the API error mapping
/// keys on.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unique_constraints_named_for_conflict_mapping(pool: PgPool) {
    let names: Vec<(String,)> = sqlx::query_as(
        "SELECT conname FROM pg_constraint WHERE contype = 'u' ORDER BY conname",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    let names: Vec<&str> = names.iter().map(|(n,)| n.as_str()).collect();
    assert!(names.contains(&"uq_users_username"));
    assert!(names.contains(&"uq_daily_tasks_user_date_slot"));
    assert!(names.contains(&"uq_purchases_user_item_date"));
    assert!(names.iter().all(|n| n.starts_with("uq_")));
}
