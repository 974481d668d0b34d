//! Shared response envelope for API handlers.
//!
//! Successful responses use a `{ "data": ... }` envelope; errors use the
//! `{ "error", "code" }` shape built by `AppError`. Use [`DataResponse`]
//! instead of ad-hoc `serde_json::json!({ "data": ... })` so the payload
//! type stays visible in the handler signature.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// # Example
///
/// ```ignore
/// Ok(Json(DataResponse { data: UserResponse::from(user) }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
