//! HTTP request handlers, one module per resource.

pub mod ai;
pub mod auth;
pub mod companion;
pub mod profile;
pub mod progress;
pub mod store;
pub mod tasks;

use studyquest_core::error::CoreError;
use studyquest_core::types::DbId;
use studyquest_db::models::user::User;
use studyquest_db::repositories::UserRepo;

use crate::error::AppResult;
use crate::state::AppState;

/// Fetch the caller's row, answering 404 when the token outlives the
/// account.
pub(crate) async fn load_user(state: &AppState, user_id: DbId) -> AppResult<User> {
    let user = UserRepo::find_by_id(&state.pool, user_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "User",
            id: user_id,
        })?;
    Ok(user)
}
