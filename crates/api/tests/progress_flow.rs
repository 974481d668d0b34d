//! Integration tests for progress loading, the daily chest, and the
//! deferred sync queue.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_auth, post_empty_auth, put_json_auth, register_user};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Test: first load of the day advances the login streak to one
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn first_load_starts_the_login_streak(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, user) = register_user(&app, "xiaoming").await;

    // Registration itself does not count a login day.
    assert_eq!(user["loginStreakDays"], 0);

    let response = get_auth(app.clone(), "/api/progress", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    assert_eq!(json["data"]["user"]["loginStreakDays"], 1);
    assert_eq!(json["data"]["chestAvailable"], true);
}

// ---------------------------------------------------------------------------
// Test: a second load on the same day does not advance the streak
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn same_day_reload_keeps_the_streak(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, _) = register_user(&app, "xiaoming").await;

    let first = get_auth(app.clone(), "/api/progress", &token).await;
    let first_json = body_json(first).await;

    let second = get_auth(app.clone(), "/api/progress", &token).await;
    let second_json = body_json(second).await;

    assert_eq!(first_json["data"]["user"]["loginStreakDays"], 1);
    assert_eq!(second_json["data"]["user"]["loginStreakDays"], 1);
}

// ---------------------------------------------------------------------------
// Test: the chest pays once per day and both counters move together
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn chest_pays_once_per_day(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, _) = register_user(&app, "xiaoming").await;

    let response = post_empty_auth(app.clone(), "/api/progress/chest", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    let reward = json["data"]["reward"].as_i64().unwrap();
    assert!((10..=50).contains(&reward), "reward out of range: {reward}");

    // Earning and spending currency move in lockstep.
    assert_eq!(json["data"]["progress"]["totalXp"], reward);
    assert_eq!(json["data"]["progress"]["goldCoins"], reward);
    assert_eq!(json["data"]["levelUp"], false);

    // The same day answers 409.
    let repeat = post_empty_auth(app.clone(), "/api/progress/chest", &token).await;
    assert_eq!(repeat.status(), StatusCode::CONFLICT);
    let repeat_json = body_json(repeat).await;
    assert_eq!(repeat_json["code"], "CONFLICT");

    // And the dashboard reports the chest as spent.
    let progress = get_auth(app.clone(), "/api/progress", &token).await;
    let progress_json = body_json(progress).await;
    assert_eq!(progress_json["data"]["chestAvailable"], false);
}

// ---------------------------------------------------------------------------
// Test: a snapshot queued before any load is dropped
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn sync_before_load_is_dropped(pool: PgPool) {
    let state = common::test_state(pool);
    let app = common::app_with_state(state.clone());
    let (token, user) = register_user(&app, "xiaoming").await;

    let snapshot = serde_json::json!({
        "level": 1,
        "levelProgress": 40,
        "totalXp": 40,
        "goldCoins": 40,
        "loginStreakDays": 1,
        "avatarUrl": null,
        "version": user["version"],
    });

    // No load has happened yet: accepted, but not queued.
    let response = put_json_auth(app.clone(), "/api/progress/sync", &token, snapshot.clone()).await;
    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["queued"], false);
    assert_eq!(state.sync.pending_count().await, 0);

    // After a load the same snapshot queues.
    get_auth(app.clone(), "/api/progress", &token).await;

    let response = put_json_auth(app.clone(), "/api/progress/sync", &token, snapshot).await;
    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["queued"], true);
    assert_eq!(state.sync.pending_count().await, 1);
}
