//! Daily task set orchestration (PRD-05).
//!
//! The first request of a calendar day builds a fresh five-task set and
//! stamps the user's task gate. Later requests on the same day resume the
//! stored set; a refresh replaces only the pending generated slots.
//! Generated slots come from the AI provider when it is configured and
//! answering, and from the built-in pool otherwise.

use studyquest_ai::client::{build_messages, AiError, ChatMessage, QwenClient};
use studyquest_ai::{parse, prompts};
use studyquest_core::daily::can_perform;
use studyquest_core::error::CoreError;
use studyquest_core::tasks::{
    assign_ai_slots, fallback_drafts, fixed_task_seeds, TaskDraft, TaskOrigin, AI_SLOTS,
    DAILY_TASK_COUNT,
};
use studyquest_core::types::{CalendarDate, DbId};
use studyquest_db::models::daily_task::{CreateDailyTask, DailyTask};
use studyquest_db::models::user::User;
use studyquest_db::repositories::{TaskRepo, UserRepo};

use crate::error::AppResult;
use crate::state::AppState;

/// Today's set for the user.
///
/// When the task gate is open this is the first sighting of the day: a
/// fresh set is built and the gate is stamped. When the gate is closed the
/// stored set is returned as-is, unless fewer than five rows survived, in
/// which case the set is rebuilt without touching the gate.
pub async fn today_set(
    state: &AppState,
    user: &User,
    date: CalendarDate,
) -> AppResult<Vec<DailyTask>> {
    if can_perform(user.last_task_date, date) {
        let rows = build_fresh_set(state, user.id, date).await?;
        UserRepo::stamp_task_date(&state.pool, user.id, date).await?;
        tracing::info!(user_id = user.id, "Built today's task set");
        return Ok(rows);
    }

    let rows = TaskRepo::list_for_day(&state.pool, user.id, date).await?;
    if rows.len() >= DAILY_TASK_COUNT {
        return Ok(rows);
    }

    tracing::warn!(
        user_id = user.id,
        stored = rows.len(),
        "Incomplete task set on record, rebuilding"
    );
    build_fresh_set(state, user.id, date).await
}

/// Replace the pending generated slots with new drafts.
///
/// Completed slots and the fixed slots are never touched, and the task
/// gate is not re-stamped. Errors with a conflict when every generated
/// slot is already completed (or no set exists yet).
pub async fn refresh_pending(
    state: &AppState,
    user_id: DbId,
    date: CalendarDate,
) -> AppResult<Vec<DailyTask>> {
    let rows = TaskRepo::list_for_day(&state.pool, user_id, date).await?;

    let pending = rows
        .iter()
        .filter(|r| TaskOrigin::parse(&r.origin) == TaskOrigin::Ai && !r.completed)
        .count();
    if pending == 0 {
        return Err(CoreError::Conflict("No pending generated tasks to refresh".into()).into());
    }

    let kept: Vec<i16> = rows
        .iter()
        .filter(|r| TaskOrigin::parse(&r.origin) == TaskOrigin::Ai && r.completed)
        .map(|r| r.slot)
        .collect();

    let drafts = generate_drafts(state, pending).await;
    let seeds = assign_ai_slots(&kept, drafts);
    let inputs: Vec<CreateDailyTask> = seeds
        .iter()
        .map(|seed| CreateDailyTask::from_seed(user_id, date, seed))
        .collect();
    TaskRepo::refresh_slots(&state.pool, user_id, date, &inputs).await?;
    tracing::info!(user_id, replaced = inputs.len(), "Refreshed pending tasks");

    // Reload so the caller sees the whole day in slot order.
    Ok(TaskRepo::list_for_day(&state.pool, user_id, date).await?)
}

/// Build and store a full set: two fixed seeds plus three generated ones.
async fn build_fresh_set(
    state: &AppState,
    user_id: DbId,
    date: CalendarDate,
) -> AppResult<Vec<DailyTask>> {
    let mut seeds = fixed_task_seeds();
    let drafts = generate_drafts(state, AI_SLOTS.len()).await;
    seeds.extend(assign_ai_slots(&[], drafts));

    let inputs: Vec<CreateDailyTask> = seeds
        .iter()
        .map(|seed| CreateDailyTask::from_seed(user_id, date, seed))
        .collect();
    Ok(TaskRepo::replace_day(&state.pool, user_id, date, &inputs).await?)
}

/// Produce exactly `count` drafts.
///
/// Asks the AI provider first and tops up from the built-in pool when the
/// provider is unconfigured, unreachable, or answers with fewer usable
/// drafts than requested. A long answer is truncated to `count`.
pub async fn generate_drafts(state: &AppState, count: usize) -> Vec<TaskDraft> {
    let mut drafts = match &state.ai {
        Some(client) => match request_ai_drafts(client).await {
            Ok(drafts) => drafts,
            Err(error) => {
                tracing::warn!(%error, "AI task generation failed, drawing from the built-in pool");
                Vec::new()
            }
        },
        None => Vec::new(),
    };

    drafts.truncate(count);
    if drafts.len() < count {
        let missing = count - drafts.len();
        let mut rng = rand::rng();
        drafts.extend(fallback_drafts(missing, &mut rng));
    }
    drafts
}

async fn request_ai_drafts(client: &QwenClient) -> Result<Vec<TaskDraft>, AiError> {
    // The rng must not be held across the await below.
    let prompt = {
        let mut rng = rand::rng();
        prompts::build_task_prompt(&mut rng, chrono::Utc::now())
    };
    let history = [ChatMessage {
        role: "user".to_string(),
        content: prompt,
    }];
    let messages = build_messages(prompts::TASK_SYSTEM_PROMPT, &history);

    let reply = client
        .chat(messages, prompts::TASK_TEMPERATURE, prompts::TASK_MAX_TOKENS)
        .await?;
    Ok(parse::parse_task_drafts(&reply))
}
