//! StudyQuest HTTP API.
//!
//! Library crate so integration tests can assemble the same router and
//! middleware stack the binary serves.

pub mod auth;
pub mod config;
pub mod engine;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod state;
