pub mod ai;
pub mod auth;
pub mod companion;
pub mod health;
pub mod profile;
pub mod progress;
pub mod store;
pub mod tasks;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                 register (public)
/// /auth/login                    login (public)
///
/// /progress                      load progress (GET)
/// /progress/sync                 queue deferred snapshot (PUT)
/// /progress/chest                open daily chest (POST)
///
/// /tasks/today                   today's set (GET)
/// /tasks/{slot}/complete         complete a slot (POST)
/// /tasks/refresh                 refresh pending generated tasks (POST)
///
/// /store/items                   catalog (GET)
/// /store/purchase                redeem an item (POST)
/// /store/purchases               history (?date=YYYY-MM-DD)
/// /store/purchases/summary       per-item counts (GET)
///
/// /profile                       patch profile (PUT)
///
/// /companion/pet                 pet stage and mood (GET)
/// /companion/journey             journey map (GET)
///
/// /ai                            generate-tasks | chat (POST, tagged body)
/// /ai/story                      story generation (POST)
/// /ai/tts                        speech synthesis (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication (register, login).
        .nest("/auth", auth::router())
        // Progress load, daily chest, and the deferred sync queue (PRD-02/03/09).
        .nest("/progress", progress::router())
        // Daily task sets (PRD-05).
        .nest("/tasks", tasks::router())
        // Reward store (PRD-06).
        .nest("/store", store::router())
        // Profile patching.
        .nest("/profile", profile::router())
        // Derived companion views: pet and journey (PRD-07/08).
        .nest("/companion", companion::router())
        // DashScope-backed AI features.
        .nest("/ai", ai::router())
}
