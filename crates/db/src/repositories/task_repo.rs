//! Repository for the `daily_tasks` table.
//!
//! Set builds and refreshes replace rows transactionally so a failed
//! insert never leaves a partial day behind. Completion flips the row and
//! credits the reward in one transaction; the `completed = false` guard
//! in the UPDATE is what makes completion one-way.

use sqlx::PgPool;
use studyquest_core::types::{CalendarDate, DbId};

use crate::models::daily_task::{CreateDailyTask, DailyTask};
use crate::models::user::User;
use crate::repositories::user_repo::credit_reward_tx;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, task_date, slot, text, reward_coins, difficulty, \
                        origin, completed, completed_at, created_at";

/// Outcome of a completion attempt.
#[derive(Debug)]
pub enum CompletionOutcome {
    /// No row for that slot on that day.
    Missing,
    /// The row was already completed; nothing changed.
    AlreadyDone(DailyTask),
    /// The row flipped and the reward was credited.
    Credited {
        task: DailyTask,
        user: User,
        level_up: bool,
    },
}

/// Provides persistence operations for daily task sets.
pub struct TaskRepo;

impl TaskRepo {
    /// The day's rows for a user, ordered by slot.
    pub async fn list_for_day(
        pool: &PgPool,
        user_id: DbId,
        date: CalendarDate,
    ) -> Result<Vec<DailyTask>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM daily_tasks
             WHERE user_id = $1 AND task_date = $2
             ORDER BY slot"
        );
        sqlx::query_as::<_, DailyTask>(&query)
            .bind(user_id)
            .bind(date)
            .fetch_all(pool)
            .await
    }

    /// Replace the whole day with the given rows, atomically.
    ///
    /// Used for a fresh day and for regenerating a partial cached set;
    /// the delete is a no-op when there is nothing to discard.
    pub async fn replace_day(
        pool: &PgPool,
        user_id: DbId,
        date: CalendarDate,
        inputs: &[CreateDailyTask],
    ) -> Result<Vec<DailyTask>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM daily_tasks WHERE user_id = $1 AND task_date = $2")
            .bind(user_id)
            .bind(date)
            .execute(&mut *tx)
            .await?;

        let mut rows = Vec::with_capacity(inputs.len());
        for input in inputs {
            rows.push(insert_row(&mut tx, input).await?);
        }

        tx.commit().await?;
        Ok(rows)
    }

    /// Swap out specific slots, atomically. The slots being written are
    /// deleted first, everything else is untouched.
    pub async fn refresh_slots(
        pool: &PgPool,
        user_id: DbId,
        date: CalendarDate,
        inputs: &[CreateDailyTask],
    ) -> Result<Vec<DailyTask>, sqlx::Error> {
        let slots: Vec<i16> = inputs.iter().map(|i| i.slot).collect();
        let mut tx = pool.begin().await?;

        sqlx::query(
            "DELETE FROM daily_tasks
             WHERE user_id = $1 AND task_date = $2 AND slot = ANY($3)",
        )
        .bind(user_id)
        .bind(date)
        .bind(&slots)
        .execute(&mut *tx)
        .await?;

        let mut rows = Vec::with_capacity(inputs.len());
        for input in inputs {
            rows.push(insert_row(&mut tx, input).await?);
        }

        tx.commit().await?;
        Ok(rows)
    }

    /// Complete a slot and credit its reward in one transaction.
    ///
    /// The guarded UPDATE only matches a pending row, so a repeat call
    /// reports [`CompletionOutcome::AlreadyDone`] without touching the
    /// counters.
    pub async fn complete(
        pool: &PgPool,
        user_id: DbId,
        date: CalendarDate,
        slot: i16,
    ) -> Result<CompletionOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let flip = format!(
            "UPDATE daily_tasks SET completed = true, completed_at = NOW()
             WHERE user_id = $1 AND task_date = $2 AND slot = $3 AND completed = false
             RETURNING {COLUMNS}"
        );
        let flipped = sqlx::query_as::<_, DailyTask>(&flip)
            .bind(user_id)
            .bind(date)
            .bind(slot)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(task) = flipped else {
            // Nothing flipped: either the slot is absent or already done.
            let select = format!(
                "SELECT {COLUMNS} FROM daily_tasks
                 WHERE user_id = $1 AND task_date = $2 AND slot = $3"
            );
            let existing = sqlx::query_as::<_, DailyTask>(&select)
                .bind(user_id)
                .bind(date)
                .bind(slot)
                .fetch_optional(&mut *tx)
                .await?;
            tx.commit().await?;
            return Ok(match existing {
                Some(task) => CompletionOutcome::AlreadyDone(task),
                None => CompletionOutcome::Missing,
            });
        };

        let (user, level_up) = credit_reward_tx(&mut tx, user_id, task.reward_coins, None).await?;
        tx.commit().await?;

        Ok(CompletionOutcome::Credited {
            task,
            user,
            level_up,
        })
    }

    /// Number of completed rows for the day. Drives the pet's mood.
    pub async fn completed_count(
        pool: &PgPool,
        user_id: DbId,
        date: CalendarDate,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM daily_tasks
             WHERE user_id = $1 AND task_date = $2 AND completed = true",
        )
        .bind(user_id)
        .bind(date)
        .fetch_one(pool)
        .await
    }
}

/// Insert one row inside an open transaction.
async fn insert_row(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    input: &CreateDailyTask,
) -> Result<DailyTask, sqlx::Error> {
    let query = format!(
        "INSERT INTO daily_tasks
            (user_id, task_date, slot, text, reward_coins, difficulty, origin)
         VALUES ($1, $2, $3, $4, $5, $6, $7)
         RETURNING {COLUMNS}"
    );
    sqlx::query_as::<_, DailyTask>(&query)
        .bind(input.user_id)
        .bind(input.task_date)
        .bind(input.slot)
        .bind(&input.text)
        .bind(input.reward_coins)
        .bind(&input.difficulty)
        .bind(&input.origin)
        .fetch_one(&mut **tx)
        .await
}
