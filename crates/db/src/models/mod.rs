//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - Create/update DTOs for inserts and patches
//! - Serializable response shapes for the API

pub mod daily_task;
pub mod purchase;
pub mod user;
