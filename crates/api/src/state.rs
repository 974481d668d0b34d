use std::sync::Arc;

use chrono::Timelike;
use studyquest_ai::client::QwenClient;
use studyquest_core::types::CalendarDate;

use crate::config::ServerConfig;
use crate::engine::sync::SyncQueue;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: studyquest_db::DbPool,
    /// Server configuration (accessed by middleware and handlers).
    pub config: Arc<ServerConfig>,
    /// DashScope client; `None` when no API key is configured, in which
    /// case AI routes answer with a configuration error.
    pub ai: Option<Arc<QwenClient>>,
    /// Deferred progress write-back queue (drained by the sync writer).
    pub sync: Arc<SyncQueue>,
}

/// Resolve the current calendar day from the server clock.
///
/// Single choke point: every daily gate consulted during one request
/// agrees on the day.
pub fn today() -> CalendarDate {
    chrono::Local::now().date_naive()
}

/// Current local clock hour (0..=23). Drives the pet's sleep window.
pub fn local_hour() -> u32 {
    chrono::Local::now().hour()
}
