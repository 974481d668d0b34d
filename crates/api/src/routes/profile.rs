//! Route definition for the `/profile` resource.

use axum::routing::put;
use axum::Router;

use crate::handlers::profile;
use crate::state::AppState;

/// Routes mounted at `/profile`. Requires auth.
///
/// ```text
/// PUT /  -> update
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", put(profile::update))
}
