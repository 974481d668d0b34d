//! Route definitions for the `/companion` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::companion;
use crate::state::AppState;

/// Routes mounted at `/companion`. All require auth.
///
/// ```text
/// GET /pet      -> pet
/// GET /journey  -> journey
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/pet", get(companion::pet))
        .route("/journey", get(companion::journey))
}
