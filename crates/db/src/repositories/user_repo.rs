//! Repository for the `users` table.
//!
//! Reward credits run read-compute-write inside a transaction so the
//! counters, the rederived level pair, and any date stamp land together
//! or not at all. Every UPDATE bumps the `version` write counter.

use sqlx::{PgPool, Postgres, Transaction};
use studyquest_core::rewards::apply_reward;
use studyquest_core::types::{CalendarDate, DbId};

use crate::models::user::{CreateUser, SyncUpdate, UpdateProfile, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, username, password_hash, email, name, level, current_xp, \
                        total_xp, gold_coins, login_days, last_login_date, last_chest_date, \
                        last_task_date, avatar_url, background_image_url, version, \
                        created_at, updated_at";

/// Provides persistence operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    ///
    /// A duplicate username surfaces as a database error carrying the
    /// `uq_users_username` constraint.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (username, password_hash, email, name)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.username)
            .bind(&input.password_hash)
            .bind(&input.email)
            .bind(&input.name)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by username (case-sensitive).
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE username = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// Stamp a login day: persist the advanced counter and today's date.
    ///
    /// Only called when the calendar day actually changed; a same-day
    /// repeat load skips the write entirely.
    pub async fn record_login(
        pool: &PgPool,
        id: DbId,
        login_days: i64,
        today: CalendarDate,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                login_days = $2,
                last_login_date = $3,
                version = version + 1,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(login_days)
            .bind(today)
            .fetch_optional(pool)
            .await
    }

    /// Credit the daily chest: apply the rolled reward to both counters
    /// and stamp `last_chest_date`, atomically.
    ///
    /// Returns the updated row and whether the credit crossed a level
    /// boundary. A missing user surfaces as [`sqlx::Error::RowNotFound`].
    pub async fn credit_chest(
        pool: &PgPool,
        id: DbId,
        reward: i64,
        today: CalendarDate,
    ) -> Result<(User, bool), sqlx::Error> {
        let mut tx = pool.begin().await?;
        let result = credit_reward_tx(&mut tx, id, reward, Some(today)).await?;
        tx.commit().await?;
        Ok(result)
    }

    /// Apply a deferred progress snapshot.
    ///
    /// The stored `version` is compared with the one the client observed;
    /// a mismatch means another session wrote in between. That lost
    /// update is logged and the write proceeds anyway (last write wins).
    pub async fn apply_sync(
        pool: &PgPool,
        id: DbId,
        update: &SyncUpdate,
    ) -> Result<Option<User>, sqlx::Error> {
        let Some(current) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        if current.version != update.version {
            tracing::warn!(
                user_id = id,
                stored_version = current.version,
                snapshot_version = update.version,
                "lost update detected, applying snapshot anyway"
            );
        }

        let query = format!(
            "UPDATE users SET
                level = $2,
                current_xp = $3,
                total_xp = $4,
                gold_coins = $5,
                login_days = $6,
                avatar_url = COALESCE($7, avatar_url),
                version = version + 1,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(update.level)
            .bind(update.level_progress)
            .bind(update.total_xp)
            .bind(update.gold_coins)
            .bind(update.login_days)
            .bind(&update.avatar_url)
            .fetch_optional(pool)
            .await
    }

    /// Update profile fields. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_profile(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProfile,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                name = COALESCE($2, name),
                avatar_url = COALESCE($3, avatar_url),
                background_image_url = COALESCE($4, background_image_url),
                version = version + 1,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.avatar_url)
            .bind(&input.background_image_url)
            .fetch_optional(pool)
            .await
    }

    /// Stamp `last_task_date = today`, marking the daily set as generated.
    pub async fn stamp_task_date(
        pool: &PgPool,
        id: DbId,
        today: CalendarDate,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE users SET last_task_date = $2, version = version + 1, updated_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .bind(today)
        .execute(pool)
        .await?;
        Ok(())
    }
}

/// Read-compute-write reward credit inside an open transaction.
///
/// Shared by the chest path and task completion (which flips the task row
/// in the same transaction). The row is re-read inside the transaction so
/// concurrent credits cannot base the level pair on stale counters;
/// [`sqlx::Error::RowNotFound`] from the read is the fatal readback-miss.
pub(crate) async fn credit_reward_tx(
    tx: &mut Transaction<'_, Postgres>,
    id: DbId,
    reward: i64,
    chest_date: Option<CalendarDate>,
) -> Result<(User, bool), sqlx::Error> {
    let select = format!("SELECT {COLUMNS} FROM users WHERE id = $1 FOR UPDATE");
    let user = sqlx::query_as::<_, User>(&select)
        .bind(id)
        .fetch_one(&mut **tx)
        .await?;

    let outcome = apply_reward(user.total_xp, user.gold_coins, reward, reward);

    let update = format!(
        "UPDATE users SET
            total_xp = $2,
            gold_coins = $3,
            level = $4,
            current_xp = $5,
            last_chest_date = COALESCE($6, last_chest_date),
            version = version + 1,
            updated_at = NOW()
         WHERE id = $1
         RETURNING {COLUMNS}"
    );
    let updated = sqlx::query_as::<_, User>(&update)
        .bind(id)
        .bind(outcome.total_xp)
        .bind(outcome.gold_coins)
        .bind(outcome.progress.level)
        .bind(outcome.progress.level_progress)
        .bind(chest_date)
        .fetch_one(&mut **tx)
        .await?;

    Ok((updated, outcome.level_up))
}

/// Guarded coin debit inside an open transaction.
///
/// Matches only when the balance still covers the cost, so callers get
/// `None` instead of a constraint violation when a racing write spent the
/// coins first.
pub(crate) async fn debit_coins_tx(
    tx: &mut Transaction<'_, Postgres>,
    id: DbId,
    cost: i64,
) -> Result<Option<User>, sqlx::Error> {
    let query = format!(
        "UPDATE users SET
            gold_coins = gold_coins - $2,
            version = version + 1,
            updated_at = NOW()
         WHERE id = $1 AND gold_coins >= $2
         RETURNING {COLUMNS}"
    );
    sqlx::query_as::<_, User>(&query)
        .bind(id)
        .bind(cost)
        .fetch_optional(&mut **tx)
        .await
}
