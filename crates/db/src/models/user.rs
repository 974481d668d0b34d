//! User entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use studyquest_core::progression::{derive_progress, Title};
use studyquest_core::types::{CalendarDate, DbId, Timestamp};

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses
/// directly. Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub password_hash: String,
    pub email: Option<String>,
    pub name: String,
    pub level: i64,
    pub current_xp: i64,
    pub total_xp: i64,
    pub gold_coins: i64,
    pub login_days: i64,
    pub last_login_date: Option<CalendarDate>,
    pub last_chest_date: Option<CalendarDate>,
    pub last_task_date: Option<CalendarDate>,
    pub avatar_url: Option<String>,
    pub background_image_url: Option<String>,
    pub version: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe user representation for API responses (no password hash).
///
/// `level`, `levelProgress`, and `title` are rederived from `total_xp`
/// rather than echoed from the stored columns, so a drifted row is
/// repaired in every response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: DbId,
    pub username: String,
    pub email: Option<String>,
    pub name: String,
    pub level: i64,
    pub level_progress: i64,
    pub total_xp: i64,
    pub gold_coins: i64,
    pub title: Title,
    #[serde(rename = "loginStreakDays")]
    pub login_days: i64,
    pub avatar_url: Option<String>,
    pub background_image_url: Option<String>,
    pub version: i64,
    pub created_at: Timestamp,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        let progress = derive_progress(user.total_xp);
        UserResponse {
            id: user.id,
            username: user.username,
            email: user.email,
            name: user.name,
            level: progress.level,
            level_progress: progress.level_progress,
            total_xp: user.total_xp,
            gold_coins: user.gold_coins,
            title: progress.title,
            login_days: user.login_days,
            avatar_url: user.avatar_url,
            background_image_url: user.background_image_url,
            version: user.version,
            created_at: user.created_at,
        }
    }
}

/// DTO for creating a new user. Progression columns start at their
/// schema defaults (level 1, empty counters).
#[derive(Debug)]
pub struct CreateUser {
    pub username: String,
    pub password_hash: String,
    pub email: Option<String>,
    pub name: String,
}

/// DTO for the profile patch. All fields are optional.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfile {
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub background_image_url: Option<String>,
}

/// The batched progress snapshot a client session accumulates between
/// deferred writes. `version` is the write counter the client observed
/// when it loaded; a mismatch at write time means another session wrote
/// in between.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncUpdate {
    pub level: i64,
    pub level_progress: i64,
    pub total_xp: i64,
    pub gold_coins: i64,
    #[serde(rename = "loginStreakDays")]
    pub login_days: i64,
    pub avatar_url: Option<String>,
    pub version: i64,
}
