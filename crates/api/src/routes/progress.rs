//! Route definitions for the `/progress` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::progress;
use crate::state::AppState;

/// Routes mounted at `/progress`. All require auth.
///
/// ```text
/// GET  /        -> get_progress
/// PUT  /sync    -> queue_sync
/// POST /chest   -> open_chest
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(progress::get_progress))
        .route("/sync", put(progress::queue_sync))
        .route("/chest", post(progress::open_chest))
}
