//! DashScope (通义千问) client for StudyQuest's AI features.
//!
//! Covers the four upstream calls the dashboard makes: daily task
//! generation, the tutor chat, story creation, and speech synthesis.
//! Prompt text lives in [`prompts`], reply parsing in [`parse`]; the
//! HTTP plumbing in [`client`] knows nothing about either.

pub mod client;
pub mod config;
pub mod parse;
pub mod prompts;
