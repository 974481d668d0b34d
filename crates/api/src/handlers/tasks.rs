//! Handlers for the `/tasks` resource (today's set, completion, refresh).

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;
use studyquest_core::error::CoreError;
use studyquest_db::models::daily_task::TaskResponse;
use studyquest_db::models::user::UserResponse;
use studyquest_db::repositories::task_repo::CompletionOutcome;
use studyquest_db::repositories::TaskRepo;

use crate::engine::daily_tasks;
use crate::error::{AppError, AppResult};
use crate::handlers::load_user;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::{self, AppState};

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// Response body for `POST /tasks/{slot}/complete`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteResponse {
    pub task: TaskResponse,
    pub level_up: bool,
    pub user: UserResponse,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/tasks/today
///
/// Today's five-task set, built on first demand and resumed afterwards.
pub async fn today(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<Vec<TaskResponse>>>> {
    let date = state::today();
    let user = load_user(&state, auth.user_id).await?;

    let rows = daily_tasks::today_set(&state, &user, date).await?;

    Ok(Json(DataResponse {
        data: rows.into_iter().map(TaskResponse::from).collect(),
    }))
}

/// POST /api/tasks/{slot}/complete
///
/// One-way completion. The first call flips the row and credits its
/// reward; a repeat call reports the completed row and changes nothing.
pub async fn complete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(slot): Path<i64>,
) -> AppResult<Json<DataResponse<CompleteResponse>>> {
    let date = state::today();

    // Slots live in 1..=5; anything unrepresentable is just unknown.
    let slot_id = slot;
    let Ok(slot) = i16::try_from(slot) else {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Task",
            id: slot_id,
        }));
    };

    match TaskRepo::complete(&state.pool, auth.user_id, date, slot).await? {
        CompletionOutcome::Credited {
            task,
            user,
            level_up,
        } => {
            if level_up {
                tracing::info!(user_id = user.id, level = user.level, "Level up");
            }
            tracing::info!(user_id = user.id, slot, coins = task.reward_coins, "Task completed");
            Ok(Json(DataResponse {
                data: CompleteResponse {
                    task: task.into(),
                    level_up,
                    user: user.into(),
                },
            }))
        }
        CompletionOutcome::AlreadyDone(task) => {
            let user = load_user(&state, auth.user_id).await?;
            Ok(Json(DataResponse {
                data: CompleteResponse {
                    task: task.into(),
                    level_up: false,
                    user: user.into(),
                },
            }))
        }
        CompletionOutcome::Missing => Err(AppError::Core(CoreError::NotFound {
            entity: "Task",
            id: slot_id,
        })),
    }
}

/// POST /api/tasks/refresh
///
/// Swap the pending generated tasks for new ones. Completed tasks and
/// the fixed pair stay; 409 when there is nothing pending to swap.
pub async fn refresh(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<Vec<TaskResponse>>>> {
    let date = state::today();

    let rows = daily_tasks::refresh_pending(&state, auth.user_id, date).await?;

    Ok(Json(DataResponse {
        data: rows.into_iter().map(TaskResponse::from).collect(),
    }))
}
