//! Route definitions for the `/store` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::store;
use crate::state::AppState;

/// Routes mounted at `/store`. All require auth.
///
/// ```text
/// GET  /items               -> list_items
/// POST /purchase            -> purchase
/// GET  /purchases           -> list_purchases (?date=YYYY-MM-DD)
/// GET  /purchases/summary   -> purchase_summary
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/items", get(store::list_items))
        .route("/purchase", post(store::purchase))
        .route("/purchases", get(store::list_purchases))
        .route("/purchases/summary", get(store::purchase_summary))
}
