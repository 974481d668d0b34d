//! Route definitions for the `/tasks` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::tasks;
use crate::state::AppState;

/// Routes mounted at `/tasks`. All require auth.
///
/// ```text
/// GET  /today             -> today
/// POST /{slot}/complete   -> complete
/// POST /refresh           -> refresh
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/today", get(tasks::today))
        .route("/{slot}/complete", post(tasks::complete))
        .route("/refresh", post(tasks::refresh))
}
