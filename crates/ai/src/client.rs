//! HTTP client for the DashScope endpoints.
//!
//! The chat side speaks the OpenAI-compatible `/chat/completions` wire
//! format; speech synthesis uses DashScope's own TTS service. Both paths
//! surface failures as [`AiError`] and leave fallback policy to callers.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::AiConfig;

/// Errors from the DashScope client.
#[derive(Debug, thiserror::Error)]
pub enum AiError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// DashScope returned a non-2xx status code.
    #[error("DashScope error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// A 2xx reply that carried no usable content.
    #[error("DashScope returned an empty reply")]
    EmptyReply,
}

/// One turn of a chat exchange, in the OpenAI-compatible wire shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Option<Vec<ChatChoice>>,
    /// Some DashScope deployments put the text here instead.
    content: Option<String>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: Option<ChatMessage>,
}

#[derive(Deserialize)]
struct TtsResponse {
    output: Option<TtsOutput>,
}

#[derive(Deserialize)]
struct TtsOutput {
    url: Option<String>,
}

/// Prepend a system prompt and normalize history roles.
///
/// Anything that is not a user turn is sent as the assistant, which is
/// how the dashboard has always replayed its transcript.
pub fn build_messages(system: &str, history: &[ChatMessage]) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(history.len() + 1);
    messages.push(ChatMessage {
        role: "system".to_string(),
        content: system.to_string(),
    });
    for m in history {
        messages.push(ChatMessage {
            role: if m.role == "user" { "user" } else { "assistant" }.to_string(),
            content: m.content.clone(),
        });
    }
    messages
}

/// Client for a configured DashScope account.
pub struct QwenClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    chat_base_url: String,
    tts_url: String,
}

impl QwenClient {
    /// Build a client from config. `None` when no API key is configured;
    /// callers turn that into their configuration error.
    pub fn from_config(config: &AiConfig) -> Option<Self> {
        let api_key = config.api_key.clone()?;
        Some(Self {
            client: reqwest::Client::new(),
            api_key,
            model: config.model.clone(),
            chat_base_url: config.chat_base_url.clone(),
            tts_url: config.tts_url.clone(),
        })
    }

    /// Run one chat completion and return the reply text.
    pub async fn chat(
        &self,
        messages: Vec<ChatMessage>,
        temperature: f32,
        max_tokens: u32,
    ) -> Result<String, AiError> {
        let url = format!(
            "{}/chat/completions",
            self.chat_base_url.trim_end_matches('/')
        );
        debug!(model = %self.model, %url, "qwen chat request");

        let body = ChatCompletionRequest {
            model: self.model.clone(),
            messages,
            temperature,
            max_tokens,
        };

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await?;
        let parsed: ChatCompletionResponse = Self::parse_response(response).await?;

        let text = parsed
            .choices
            .as_ref()
            .and_then(|c| c.first())
            .and_then(|c| c.message.as_ref())
            .map(|m| m.content.clone())
            .or(parsed.content)
            .unwrap_or_default();

        if text.is_empty() {
            return Err(AiError::EmptyReply);
        }
        Ok(text)
    }

    /// Synthesize speech for `text`, returning the audio URL DashScope
    /// hosts the clip at.
    pub async fn synthesize_speech(&self, text: &str) -> Result<String, AiError> {
        debug!(url = %self.tts_url, "qwen tts request");

        let body = serde_json::json!({
            "model": "sambert-zhinan-v1",
            "input": { "text": text },
            "parameters": {
                "format": "mp3",
                "sample_rate": 16000,
                "voice": "Aixia",
            },
        });

        let response = self
            .client
            .post(&self.tts_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await?;
        let parsed: TtsResponse = Self::parse_response(response).await?;

        parsed
            .output
            .and_then(|o| o.url)
            .filter(|u| !u.is_empty())
            .ok_or(AiError::EmptyReply)
    }

    /// Ensure a success status and parse the JSON body.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, AiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(AiError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json::<T>().await?)
    }
}
