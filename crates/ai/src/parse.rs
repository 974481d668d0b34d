//! Lift task drafts out of a model reply.
//!
//! The model is asked for a bare JSON array but routinely wraps it in
//! prose or code fences, so the parser grabs the first bracketed span
//! and deserializes that. Anything unusable yields an empty vec; the
//! caller pads from the fallback pool.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use studyquest_core::tasks::{Difficulty, TaskDraft};

static ARRAY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\[.*\]").expect("valid regex"));

/// Default coin value for a task the model priced badly or not at all.
const DEFAULT_COINS: i64 = 12;

#[derive(Deserialize)]
struct RawTask {
    text: String,
    coins: Option<i64>,
    difficulty: Option<String>,
}

/// Parse the model reply into task drafts. Missing coin values default
/// to 12, unknown difficulty labels to medium, blank texts are dropped.
pub fn parse_task_drafts(content: &str) -> Vec<TaskDraft> {
    let Some(span) = ARRAY_RE.find(content) else {
        return Vec::new();
    };

    let raw: Vec<RawTask> = match serde_json::from_str(span.as_str()) {
        Ok(raw) => raw,
        Err(err) => {
            tracing::warn!(%err, "task reply held no parseable JSON array");
            return Vec::new();
        }
    };

    raw.into_iter()
        .filter(|t| !t.text.trim().is_empty())
        .map(|t| TaskDraft {
            text: t.text,
            reward_coins: t.coins.filter(|c| *c > 0).unwrap_or(DEFAULT_COINS),
            difficulty: Difficulty::parse(t.difficulty.as_deref().unwrap_or("")),
        })
        .collect()
}
