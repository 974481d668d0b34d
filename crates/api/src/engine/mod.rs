//! Orchestration that sits between the HTTP handlers and the repositories.
//!
//! - [`daily_tasks`]: builds, resumes, and refreshes the day's task set.
//! - [`sync`]: the deferred progress write-back queue and its writer loop.

pub mod daily_tasks;
pub mod sync;
