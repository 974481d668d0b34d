//! Domain logic for the StudyQuest learning dashboard.
//!
//! Everything in this crate is pure: progression arithmetic, the calendar-day
//! gates, reward application, task-set planning, and the static catalogs.
//! Persistence and HTTP live in the `db` and `api` crates; randomness is
//! injected by callers so every function here is deterministic under test.

pub mod daily;
pub mod error;
pub mod journey;
pub mod pet;
pub mod progression;
pub mod rewards;
pub mod store;
pub mod tasks;
pub mod types;
