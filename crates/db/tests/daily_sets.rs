//! Integration tests for daily task sets: building, refreshing, and the
//! one-way completion credit.

use chrono::NaiveDate;
use sqlx::PgPool;
use studyquest_db::models::daily_task::CreateDailyTask;
use studyquest_db::models::user::CreateUser;
use studyquest_db::repositories::task_repo::CompletionOutcome;
use studyquest_db::repositories::{TaskRepo, UserRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
}

async fn seed_user(pool: &PgPool) -> i64 {
    UserRepo::create(
        pool,
        &CreateUser {
            username: "xiaoming".to_string(),
            password_hash: "$argon2id$fake".to_string(),
            email: None,
            name: "xiaoming".to_string(),
        },
    )
    .await
    .unwrap()
    .id
}

fn task_input(user_id: i64, slot: i16, text: &str, coins: i64, origin: &str) -> CreateDailyTask {
    CreateDailyTask {
        user_id,
        task_date: day(1),
        slot,
        text: text.to_string(),
        reward_coins: coins,
        difficulty: "中等".to_string(),
        origin: origin.to_string(),
    }
}

fn full_day(user_id: i64) -> Vec<CreateDailyTask> {
    vec![
        task_input(user_id, 1, "课后作业", 20, "fixed"),
        task_input(user_id, 2, "运动打卡", 10, "fixed"),
        task_input(user_id, 3, "数学练习", 12, "ai"),
        task_input(user_id, 4, "语文朗读", 14, "ai"),
        task_input(user_id, 5, "英语单词", 13, "ai"),
    ]
}

// ---------------------------------------------------------------------------
// Test: Building and replacing a day
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_replace_day_builds_ordered_set(pool: PgPool) {
    let user_id = seed_user(&pool).await;

    let rows = TaskRepo::replace_day(&pool, user_id, day(1), &full_day(user_id))
        .await
        .unwrap();
    assert_eq!(rows.len(), 5);

    let listed = TaskRepo::list_for_day(&pool, user_id, day(1)).await.unwrap();
    let slots: Vec<i16> = listed.iter().map(|t| t.slot).collect();
    assert_eq!(slots, vec![1, 2, 3, 4, 5]);
    assert!(listed.iter().all(|t| !t.completed));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_replace_day_discards_previous_rows(pool: PgPool) {
    let user_id = seed_user(&pool).await;

    // A partial set from an interrupted build.
    TaskRepo::replace_day(
        &pool,
        user_id,
        day(1),
        &[task_input(user_id, 1, "旧任务", 20, "fixed")],
    )
    .await
    .unwrap();

    TaskRepo::replace_day(&pool, user_id, day(1), &full_day(user_id))
        .await
        .unwrap();

    let listed = TaskRepo::list_for_day(&pool, user_id, day(1)).await.unwrap();
    assert_eq!(listed.len(), 5);
    assert_eq!(listed[0].text, "课后作业");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_days_are_isolated(pool: PgPool) {
    let user_id = seed_user(&pool).await;

    TaskRepo::replace_day(&pool, user_id, day(1), &full_day(user_id))
        .await
        .unwrap();

    assert!(TaskRepo::list_for_day(&pool, user_id, day(2))
        .await
        .unwrap()
        .is_empty());
}

// ---------------------------------------------------------------------------
// Test: Refreshing slots
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_refresh_slots_replaces_only_named_slots(pool: PgPool) {
    let user_id = seed_user(&pool).await;
    TaskRepo::replace_day(&pool, user_id, day(1), &full_day(user_id))
        .await
        .unwrap();

    TaskRepo::refresh_slots(
        &pool,
        user_id,
        day(1),
        &[
            task_input(user_id, 3, "新科学任务", 15, "ai"),
            task_input(user_id, 5, "新音乐任务", 11, "ai"),
        ],
    )
    .await
    .unwrap();

    let listed = TaskRepo::list_for_day(&pool, user_id, day(1)).await.unwrap();
    assert_eq!(listed.len(), 5);
    assert_eq!(listed[2].text, "新科学任务");
    assert_eq!(listed[3].text, "语文朗读"); // untouched
    assert_eq!(listed[4].text, "新音乐任务");
}

// ---------------------------------------------------------------------------
// Test: Completion is one-way and credits once
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_complete_credits_reward_once(pool: PgPool) {
    let user_id = seed_user(&pool).await;
    TaskRepo::replace_day(&pool, user_id, day(1), &full_day(user_id))
        .await
        .unwrap();

    let outcome = TaskRepo::complete(&pool, user_id, day(1), 1).await.unwrap();
    let CompletionOutcome::Credited { task, user, level_up } = outcome else {
        panic!("expected a credit");
    };
    assert!(task.completed);
    assert_eq!(user.total_xp, 20);
    assert_eq!(user.gold_coins, 20);
    assert!(!level_up);

    // Second attempt is a no-op reporting the completed row.
    let outcome = TaskRepo::complete(&pool, user_id, day(1), 1).await.unwrap();
    let CompletionOutcome::AlreadyDone(task) = outcome else {
        panic!("expected the already-done branch");
    };
    assert!(task.completed);

    let user = UserRepo::find_by_id(&pool, user_id).await.unwrap().unwrap();
    assert_eq!(user.total_xp, 20, "repeat completion must not credit again");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_complete_unknown_slot_is_missing(pool: PgPool) {
    let user_id = seed_user(&pool).await;

    let outcome = TaskRepo::complete(&pool, user_id, day(1), 3).await.unwrap();
    assert!(matches!(outcome, CompletionOutcome::Missing));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_completed_count_tracks_the_day(pool: PgPool) {
    let user_id = seed_user(&pool).await;
    TaskRepo::replace_day(&pool, user_id, day(1), &full_day(user_id))
        .await
        .unwrap();

    assert_eq!(TaskRepo::completed_count(&pool, user_id, day(1)).await.unwrap(), 0);

    TaskRepo::complete(&pool, user_id, day(1), 2).await.unwrap();
    TaskRepo::complete(&pool, user_id, day(1), 4).await.unwrap();

    assert_eq!(TaskRepo::completed_count(&pool, user_id, day(1)).await.unwrap(), 2);
}
