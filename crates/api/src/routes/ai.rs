//! Route definitions for the `/ai` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::ai;
use crate::state::AppState;

/// Routes mounted at `/ai`. All require auth.
///
/// ```text
/// POST /        -> dispatch (tagged body: generate-tasks | chat)
/// POST /story   -> story
/// POST /tts     -> tts
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(ai::dispatch))
        .route("/story", post(ai::story))
        .route("/tts", post(ai::tts))
}
