//! Handlers for the `/progress` resource (load, daily chest, deferred sync).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use studyquest_core::daily::{advance_login_days, can_perform};
use studyquest_core::error::CoreError;
use studyquest_core::rewards::{coins_exceed_experience, roll_chest_reward};
use studyquest_db::models::user::{SyncUpdate, UserResponse};
use studyquest_db::repositories::UserRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::load_user;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::{self, AppState};

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// Response body for `GET /progress`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressResponse {
    pub user: UserResponse,
    pub chest_available: bool,
}

/// Response body for `POST /progress/chest`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChestResponse {
    pub reward: i64,
    pub level_up: bool,
    pub progress: UserResponse,
}

/// Response body for `PUT /progress/sync`.
#[derive(Debug, Serialize)]
pub struct SyncAccepted {
    /// False when the snapshot was dropped because no load preceded it.
    pub queued: bool,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/progress
///
/// Load the caller's record for the dashboard. The first load of a new
/// calendar day advances the login-day counter; later loads change
/// nothing. Also reports chest eligibility and marks the session loaded
/// for the deferred write-back.
pub async fn get_progress(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<ProgressResponse>>> {
    let today = state::today();

    // 1. Load the row.
    let user = load_user(&state, auth.user_id).await?;

    // 2. Advance the login-day counter when the calendar day changed.
    let advance = advance_login_days(user.last_login_date, user.login_days, today);
    let user = if advance.persist {
        UserRepo::record_login(&state.pool, user.id, advance.login_days, today)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "User",
                id: auth.user_id,
            })?
    } else {
        user
    };

    // 3. Integrity check: spending is capped by what was ever earned.
    if coins_exceed_experience(user.total_xp, user.gold_coins) {
        tracing::warn!(
            user_id = user.id,
            total_xp = user.total_xp,
            gold_coins = user.gold_coins,
            "Coin balance exceeds cumulative experience"
        );
    }

    // 4. Chest eligibility for today.
    let chest_available = can_perform(user.last_chest_date, today);

    // 5. Loading is what arms the deferred write-back for this user.
    state.sync.mark_loaded(user.id).await;

    // A same-day login keeps the stored counter, but the dashboard still
    // shows at least one day.
    let mut response_user = UserResponse::from(user);
    response_user.login_days = advance.login_days;

    Ok(Json(DataResponse {
        data: ProgressResponse {
            user: response_user,
            chest_available,
        },
    }))
}

/// POST /api/progress/chest
///
/// Open the daily chest: one roll per calendar day, credited to both
/// counters and stamped in one transaction.
pub async fn open_chest(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<ChestResponse>>> {
    let today = state::today();

    // 1. The gate first: a closed gate never rolls.
    let user = load_user(&state, auth.user_id).await?;
    if !can_perform(user.last_chest_date, today) {
        return Err(AppError::Core(CoreError::Conflict(
            "Chest already opened today".into(),
        )));
    }

    // 2. Roll and credit.
    let reward = {
        let mut rng = rand::rng();
        roll_chest_reward(&mut rng)
    };
    let (user, level_up) = UserRepo::credit_chest(&state.pool, user.id, reward, today).await?;

    if level_up {
        tracing::info!(user_id = user.id, level = user.level, "Level up");
    }
    tracing::info!(user_id = user.id, reward, "Daily chest opened");

    Ok(Json(DataResponse {
        data: ChestResponse {
            reward,
            level_up,
            progress: user.into(),
        },
    }))
}

/// PUT /api/progress/sync
///
/// Queue the batched snapshot for the deferred writer. This never writes
/// directly; the writer persists it after the quiet interval elapses.
pub async fn queue_sync(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<SyncUpdate>,
) -> AppResult<(StatusCode, Json<DataResponse<SyncAccepted>>)> {
    let queued = state.sync.enqueue(auth.user_id, input).await;

    Ok((
        StatusCode::ACCEPTED,
        Json(DataResponse {
            data: SyncAccepted { queued },
        }),
    ))
}
