//! Daily task entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use studyquest_core::tasks::TaskSeed;
use studyquest_core::types::{CalendarDate, DbId, Timestamp};

/// Full row from the `daily_tasks` table.
#[derive(Debug, Clone, FromRow)]
pub struct DailyTask {
    pub id: DbId,
    pub user_id: DbId,
    pub task_date: CalendarDate,
    pub slot: i16,
    pub text: String,
    pub reward_coins: i64,
    pub difficulty: String,
    pub origin: String,
    pub completed: bool,
    pub completed_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// DTO for inserting one slot of a day's set.
#[derive(Debug, Clone)]
pub struct CreateDailyTask {
    pub user_id: DbId,
    pub task_date: CalendarDate,
    pub slot: i16,
    pub text: String,
    pub reward_coins: i64,
    pub difficulty: String,
    pub origin: String,
}

impl CreateDailyTask {
    /// Pin a planned seed to a user and day.
    pub fn from_seed(user_id: DbId, task_date: CalendarDate, seed: &TaskSeed) -> Self {
        CreateDailyTask {
            user_id,
            task_date,
            slot: seed.slot,
            text: seed.text.clone(),
            reward_coins: seed.reward_coins,
            difficulty: seed.difficulty.as_str().to_string(),
            origin: seed.origin.as_str().to_string(),
        }
    }
}

/// Task shape the dashboard consumes. The slot doubles as the task id.
#[derive(Debug, Clone, Serialize)]
pub struct TaskResponse {
    pub id: i64,
    pub text: String,
    pub coins: i64,
    pub completed: bool,
    #[serde(rename = "type")]
    pub kind: String,
    pub difficulty: String,
}

impl From<DailyTask> for TaskResponse {
    fn from(task: DailyTask) -> Self {
        TaskResponse {
            id: i64::from(task.slot),
            text: task.text,
            coins: task.reward_coins,
            completed: task.completed,
            kind: task.origin,
            difficulty: task.difficulty,
        }
    }
}
