//! Handlers for the `/ai` resource (task generation, tutor chat, story,
//! speech synthesis).
//!
//! Every route here needs the DashScope client; a missing API key answers
//! with a configuration error. Chat-shaped routes degrade to a canned
//! reply when the upstream call fails, speech synthesis does not.

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use studyquest_ai::client::{build_messages, ChatMessage, QwenClient};
use studyquest_ai::prompts;
use studyquest_core::tasks::{Difficulty, TaskDraft, AI_SLOTS};

use crate::engine::daily_tasks;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Tagged request body for `POST /ai`.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum AiRequest {
    /// Produce fresh task drafts for the daily set.
    GenerateTasks,
    /// Tutor chat over the running message history.
    Chat { messages: Vec<ChatMessage> },
}

/// One generated draft on the wire.
#[derive(Debug, Serialize)]
pub struct GeneratedTask {
    pub text: String,
    pub coins: i64,
    pub difficulty: Difficulty,
}

impl From<TaskDraft> for GeneratedTask {
    fn from(draft: TaskDraft) -> Self {
        GeneratedTask {
            text: draft.text,
            coins: draft.reward_coins,
            difficulty: draft.difficulty,
        }
    }
}

/// Response body for the generate-tasks branch.
#[derive(Debug, Serialize)]
pub struct GeneratedTasks {
    pub tasks: Vec<GeneratedTask>,
}

/// Response body for the chat branch.
#[derive(Debug, Serialize)]
pub struct ChatReply {
    pub content: String,
}

/// Request body for `POST /ai/story`.
#[derive(Debug, Deserialize)]
pub struct StoryRequest {
    pub prompt: Option<String>,
}

/// Response body for `POST /ai/story`.
#[derive(Debug, Serialize)]
pub struct StoryReply {
    pub story: String,
}

/// Request body for `POST /ai/tts`.
#[derive(Debug, Deserialize)]
pub struct TtsRequest {
    pub text: String,
}

/// Response body for `POST /ai/tts`.
#[derive(Debug, Serialize)]
pub struct TtsReply {
    /// URL of the synthesized clip, hosted by DashScope.
    pub audio: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/ai
///
/// Dispatch on the tagged body: task generation or tutor chat.
pub async fn dispatch(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<AiRequest>,
) -> AppResult<Response> {
    match input {
        AiRequest::GenerateTasks => {
            require_client(&state)?;

            // The provider path pads short or failed answers from the
            // built-in pool, so this always yields three drafts.
            let drafts = daily_tasks::generate_drafts(&state, AI_SLOTS.len()).await;
            let tasks = drafts.into_iter().map(GeneratedTask::from).collect();

            Ok(Json(DataResponse {
                data: GeneratedTasks { tasks },
            })
            .into_response())
        }
        AiRequest::Chat { messages } => {
            let client = require_client(&state)?;

            let outgoing = build_messages(prompts::TUTOR_SYSTEM_PROMPT, &messages);
            let content = match client
                .chat(outgoing, prompts::CHAT_TEMPERATURE, prompts::CHAT_MAX_TOKENS)
                .await
            {
                Ok(reply) => reply,
                Err(error) => {
                    tracing::warn!(user_id = auth.user_id, %error, "Tutor chat failed, answering with the canned reply");
                    prompts::TUTOR_FALLBACK_REPLY.to_string()
                }
            };

            Ok(Json(DataResponse {
                data: ChatReply { content },
            })
            .into_response())
        }
    }
}

/// POST /api/ai/story
///
/// Generate a bedtime story, optionally steered by the caller's prompt.
pub async fn story(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<StoryRequest>,
) -> AppResult<Json<DataResponse<StoryReply>>> {
    let client = require_client(&state)?;

    let prompt = prompts::build_story_prompt(input.prompt.as_deref());
    let history = [ChatMessage {
        role: "user".to_string(),
        content: prompt,
    }];
    let outgoing = build_messages(prompts::STORY_SYSTEM_PROMPT, &history);

    let story = match client
        .chat(outgoing, prompts::STORY_TEMPERATURE, prompts::STORY_MAX_TOKENS)
        .await
    {
        Ok(reply) => reply,
        Err(error) => {
            tracing::warn!(user_id = auth.user_id, %error, "Story generation failed, answering with the canned story");
            prompts::STORY_FALLBACK.to_string()
        }
    };

    Ok(Json(DataResponse {
        data: StoryReply { story },
    }))
}

/// POST /api/ai/tts
///
/// Synthesize speech for a snippet of text. No canned fallback here:
/// an upstream failure surfaces as a sanitized 500.
pub async fn tts(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<TtsRequest>,
) -> AppResult<Json<DataResponse<TtsReply>>> {
    let client = require_client(&state)?;

    let text = input.text.trim();
    if text.is_empty() {
        return Err(AppError::BadRequest("Text is required".into()));
    }

    let audio = client.synthesize_speech(text).await.map_err(|error| {
        tracing::warn!(user_id = auth.user_id, %error, "Speech synthesis failed");
        AppError::InternalError(format!("Speech synthesis failed: {error}"))
    })?;

    Ok(Json(DataResponse {
        data: TtsReply { audio },
    }))
}

/// The configured DashScope client, or the configuration error every AI
/// route answers with when the key is absent.
fn require_client(state: &AppState) -> AppResult<&QwenClient> {
    state.ai.as_deref().ok_or_else(|| {
        AppError::Configuration(
            "DASHSCOPE_API_KEY is not set; AI features are unavailable".into(),
        )
    })
}
