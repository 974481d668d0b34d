//! Handlers for the `/companion` resource (study pet, journey map).
//!
//! Everything here is derived on the fly from the user's row and today's
//! completions; nothing companion-specific is stored.

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use studyquest_core::journey::{build_journey, JourneyNode};
use studyquest_core::pet::{PetMood, PetStage};
use studyquest_core::progression::derive_progress;
use studyquest_db::repositories::TaskRepo;

use crate::error::AppResult;
use crate::handlers::load_user;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::{self, AppState};

/// Response body for `GET /companion/pet`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PetResponse {
    pub stage: PetStage,
    pub emoji: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub mood: PetMood,
}

/// GET /api/companion/pet
///
/// The pet's stage follows the level; its mood follows today's
/// completions, the streak, and the local hour.
pub async fn pet(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<PetResponse>>> {
    let date = state::today();
    let user = load_user(&state, auth.user_id).await?;

    let completed_today = TaskRepo::completed_count(&state.pool, user.id, date).await?;

    let progress = derive_progress(user.total_xp);
    let stage = PetStage::for_level(progress.level);
    let mood = PetMood::derive(completed_today, state::local_hour(), user.login_days);

    Ok(Json(DataResponse {
        data: PetResponse {
            stage,
            emoji: stage.emoji(),
            name: stage.name(),
            description: stage.description(),
            mood,
        },
    }))
}

/// GET /api/companion/journey
///
/// The twenty-node map, positioned by the level rederived from
/// cumulative experience.
pub async fn journey(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<Vec<JourneyNode>>>> {
    let user = load_user(&state, auth.user_id).await?;

    let progress = derive_progress(user.total_xp);

    Ok(Json(DataResponse {
        data: build_journey(progress.level),
    }))
}
