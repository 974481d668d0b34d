//! Integration tests for profile updates.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_auth, put_json_auth, register_user};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Test: a profile patch updates only the supplied fields
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn patch_updates_only_supplied_fields(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, _) = register_user(&app, "xiaoming").await;

    let response = put_json_auth(
        app.clone(),
        "/api/profile",
        &token,
        serde_json::json!({
            "name": "小明",
            "avatarUrl": "https://example.com/avatar.png",
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "小明");
    assert_eq!(json["data"]["avatarUrl"], "https://example.com/avatar.png");
    assert_eq!(json["data"]["backgroundImageUrl"], serde_json::Value::Null);

    // A later patch that omits the avatar keeps it.
    let response = put_json_auth(
        app.clone(),
        "/api/profile",
        &token,
        serde_json::json!({ "name": "小明同学" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "小明同学");
    assert_eq!(json["data"]["avatarUrl"], "https://example.com/avatar.png");
}

// ---------------------------------------------------------------------------
// Test: an empty patch changes nothing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn empty_patch_is_a_no_op(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, user) = register_user(&app, "xiaoming").await;

    let response = put_json_auth(app.clone(), "/api/profile", &token, serde_json::json!({})).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], user["name"]);

    // Progression numbers are out of this route's reach.
    let progress = get_auth(app.clone(), "/api/progress", &token).await;
    let progress_json = body_json(progress).await;
    assert_eq!(progress_json["data"]["user"]["totalXp"], 0);
    assert_eq!(progress_json["data"]["user"]["goldCoins"], 0);
}
