//! Daily task set composition (PRD-05).
//!
//! A day's set holds five slots: slots 1 and 2 carry the fixed homework and
//! exercise tasks, slots 3 through 5 carry generated tasks. Generation fills
//! whichever of the generated slots are free, drawing either from the AI
//! provider or, when it is unavailable, from the built-in fourth-grade pool.
//! Completion is one-way; a refresh replaces only generated tasks that are
//! still pending, keeping completed ones in place.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Slot layout
// ---------------------------------------------------------------------------

/// Slots occupied by the two fixed tasks.
pub const FIXED_SLOTS: [i16; 2] = [1, 2];

/// Slots occupied by generated tasks.
pub const AI_SLOTS: [i16; 3] = [3, 4, 5];

/// Size of a complete daily set.
pub const DAILY_TASK_COUNT: usize = 5;

// ---------------------------------------------------------------------------
// Task attributes
// ---------------------------------------------------------------------------

/// Difficulty rating shown next to a task. Serialized with the Chinese
/// labels the dashboard displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    #[serde(rename = "简单")]
    Easy,
    #[serde(rename = "中等")]
    Medium,
    #[serde(rename = "困难")]
    Hard,
}

impl Difficulty {
    /// Display label, identical to the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "简单",
            Difficulty::Medium => "中等",
            Difficulty::Hard => "困难",
        }
    }

    /// Parse a stored or provider-supplied label. Unknown labels fall back
    /// to medium, matching how unrated generated tasks are treated.
    pub fn parse(label: &str) -> Difficulty {
        match label.trim() {
            "简单" => Difficulty::Easy,
            "困难" => Difficulty::Hard,
            _ => Difficulty::Medium,
        }
    }
}

/// Where a task came from. Fixed tasks survive refreshes unconditionally;
/// generated tasks survive only once completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskOrigin {
    Fixed,
    Ai,
}

impl TaskOrigin {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskOrigin::Fixed => "fixed",
            TaskOrigin::Ai => "ai",
        }
    }

    pub fn parse(label: &str) -> TaskOrigin {
        match label {
            "fixed" => TaskOrigin::Fixed,
            _ => TaskOrigin::Ai,
        }
    }
}

// ---------------------------------------------------------------------------
// Drafts and seeds
// ---------------------------------------------------------------------------

/// A generated task before it is pinned to a slot: the provider's (or the
/// fallback pool's) text, coin value, and difficulty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    pub text: String,
    pub reward_coins: i64,
    pub difficulty: Difficulty,
}

/// A task ready to be inserted for a given day: a draft pinned to a slot
/// with its origin recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSeed {
    pub slot: i16,
    pub text: String,
    pub reward_coins: i64,
    pub difficulty: Difficulty,
    pub origin: TaskOrigin,
}

/// The two fixed tasks every day starts with.
pub fn fixed_task_seeds() -> Vec<TaskSeed> {
    vec![
        TaskSeed {
            slot: 1,
            text: "课后作业：完成今日所有科目的作业".to_string(),
            reward_coins: 20,
            difficulty: Difficulty::Hard,
            origin: TaskOrigin::Fixed,
        },
        TaskSeed {
            slot: 2,
            text: "运动打卡：完成30分钟运动（跑步/跳绳/打球等）".to_string(),
            reward_coins: 10,
            difficulty: Difficulty::Easy,
            origin: TaskOrigin::Fixed,
        },
    ]
}

/// Generated slots not occupied by a kept task, in ascending order.
///
/// `kept_slots` lists the generated slots being preserved (completed tasks
/// during a refresh; empty for a fresh day). Fixed slots are never free.
pub fn free_ai_slots(kept_slots: &[i16]) -> Vec<i16> {
    AI_SLOTS
        .iter()
        .copied()
        .filter(|slot| !kept_slots.contains(slot))
        .collect()
}

/// Pin drafts to the free generated slots, smallest slot first.
///
/// Surplus drafts are dropped; a short supply fills only the leading free
/// slots. An empty free-slot list therefore yields an empty plan, which is
/// how a refresh with every generated task completed becomes a no-op.
pub fn assign_ai_slots(kept_slots: &[i16], drafts: Vec<TaskDraft>) -> Vec<TaskSeed> {
    free_ai_slots(kept_slots)
        .into_iter()
        .zip(drafts)
        .map(|(slot, draft)| TaskSeed {
            slot,
            text: draft.text,
            reward_coins: draft.reward_coins,
            difficulty: draft.difficulty,
            origin: TaskOrigin::Ai,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Fallback pool
// ---------------------------------------------------------------------------

struct PoolEntry {
    text: &'static str,
    coins: i64,
    difficulty: Difficulty,
}

/// Built-in fourth-grade task pool, drawn from when the AI provider is
/// unavailable or returns nothing usable.
const FALLBACK_POOL: [PoolEntry; 24] = [
    PoolEntry { text: "数学：完成10道加减法混合运算", coins: 10, difficulty: Difficulty::Easy },
    PoolEntry { text: "数学：完成5道乘法练习题（2位数×1位数）", coins: 12, difficulty: Difficulty::Easy },
    PoolEntry { text: "数学：完成3道除法练习题", coins: 14, difficulty: Difficulty::Medium },
    PoolEntry { text: "数学：完成5道分数练习题", coins: 15, difficulty: Difficulty::Medium },
    PoolEntry { text: "数学：完成2道应用题", coins: 16, difficulty: Difficulty::Medium },
    PoolEntry { text: "语文：朗读课文《观潮》3遍", coins: 8, difficulty: Difficulty::Easy },
    PoolEntry { text: "语文：背诵古诗《静夜思》", coins: 10, difficulty: Difficulty::Easy },
    PoolEntry { text: "语文：完成生字练习（10个生字）", coins: 12, difficulty: Difficulty::Medium },
    PoolEntry { text: "语文：写一篇150字的日记", coins: 14, difficulty: Difficulty::Medium },
    PoolEntry { text: "语文：阅读课外书30分钟", coins: 11, difficulty: Difficulty::Easy },
    PoolEntry { text: "英语：背诵10个新单词", coins: 12, difficulty: Difficulty::Medium },
    PoolEntry { text: "英语：跟读英语课文5遍", coins: 10, difficulty: Difficulty::Easy },
    PoolEntry { text: "英语：完成英语练习册1页", coins: 13, difficulty: Difficulty::Medium },
    PoolEntry { text: "英语：听英语故事15分钟", coins: 9, difficulty: Difficulty::Easy },
    PoolEntry { text: "科学：观察植物生长并记录", coins: 14, difficulty: Difficulty::Medium },
    PoolEntry { text: "科学：完成科学实验报告", coins: 17, difficulty: Difficulty::Hard },
    PoolEntry { text: "科学：学习天气变化知识", coins: 11, difficulty: Difficulty::Easy },
    PoolEntry { text: "科学：制作一个简单的手工作品", coins: 15, difficulty: Difficulty::Medium },
    PoolEntry { text: "美术：画一幅风景画", coins: 12, difficulty: Difficulty::Medium },
    PoolEntry { text: "美术：完成手工作业", coins: 14, difficulty: Difficulty::Medium },
    PoolEntry { text: "音乐：学唱一首新歌", coins: 10, difficulty: Difficulty::Easy },
    PoolEntry { text: "音乐：练习乐器20分钟", coins: 13, difficulty: Difficulty::Medium },
    PoolEntry { text: "阅读：阅读课外书30分钟", coins: 11, difficulty: Difficulty::Easy },
    PoolEntry { text: "阅读：完成阅读笔记", coins: 14, difficulty: Difficulty::Medium },
];

/// Draw `count` distinct tasks from the fallback pool, without replacement.
/// Asking for more than the pool holds returns the whole pool, shuffled.
pub fn fallback_drafts(count: usize, rng: &mut impl Rng) -> Vec<TaskDraft> {
    let mut indices: Vec<usize> = (0..FALLBACK_POOL.len()).collect();
    indices.shuffle(rng);
    indices
        .into_iter()
        .take(count)
        .map(|i| {
            let entry = &FALLBACK_POOL[i];
            TaskDraft {
                text: entry.text.to_string(),
                reward_coins: entry.coins,
                difficulty: entry.difficulty,
            }
        })
        .collect()
}
