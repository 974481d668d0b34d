//! Handler for the `/profile` resource.

use axum::extract::State;
use axum::Json;
use studyquest_core::error::CoreError;
use studyquest_db::models::user::{UpdateProfile, UserResponse};
use studyquest_db::repositories::UserRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// PUT /api/profile
///
/// Partial update of display name and image URLs. Absent fields keep
/// their stored value; progression counters are never touched here.
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<UpdateProfile>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let user = UserRepo::update_profile(&state.pool, auth.user_id, &input)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        })?;

    tracing::debug!(user_id = user.id, "Profile updated");

    Ok(Json(DataResponse { data: user.into() }))
}
