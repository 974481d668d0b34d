//! Pet companion presentation state (PRD-07).
//!
//! The pet evolves with the user's level and reacts to the day: finishing
//! tasks makes it happy, late nights and early mornings put it to sleep,
//! and a run of login days gets it excited. Pure lookups; the clock hour
//! is passed in by the caller.

use serde::Serialize;

// ---------------------------------------------------------------------------
// Evolution stages
// ---------------------------------------------------------------------------

/// Evolution stage, decided by the current level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PetStage {
    Egg,
    Chick,
    Bird,
    Eagle,
    Unicorn,
}

impl PetStage {
    /// Stage for a level. Levels below 1 never occur but map to the egg.
    pub fn for_level(level: i64) -> PetStage {
        match level {
            i64::MIN..=3 => PetStage::Egg,
            4..=9 => PetStage::Chick,
            10..=19 => PetStage::Bird,
            20..=29 => PetStage::Eagle,
            _ => PetStage::Unicorn,
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            PetStage::Egg => "🥚",
            PetStage::Chick => "🐣",
            PetStage::Bird => "🐥",
            PetStage::Eagle => "🦅",
            PetStage::Unicorn => "🦄",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PetStage::Egg => "神秘蛋",
            PetStage::Chick => "小黄鸡",
            PetStage::Bird => "活泼小鸟",
            PetStage::Eagle => "勇敢之鹰",
            PetStage::Unicorn => "传说独角兽",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            PetStage::Egg => "正在孵化中...",
            PetStage::Chick => "刚刚破壳而出！",
            PetStage::Bird => "正在学习飞翔！",
            PetStage::Eagle => "翱翔天际！",
            PetStage::Unicorn => "智慧的象征！",
        }
    }
}

// ---------------------------------------------------------------------------
// Mood
// ---------------------------------------------------------------------------

/// Mood for the day. The checks are ordered: completed tasks win over the
/// sleeping window, which wins over login-day excitement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PetMood {
    Happy,
    Sleeping,
    Excited,
    Neutral,
}

impl PetMood {
    /// Derive the mood from today's completed-task count, the local clock
    /// hour (0..=23), and the cumulative login-day counter.
    pub fn derive(tasks_completed_today: i64, hour: u32, login_days: i64) -> PetMood {
        if tasks_completed_today > 0 {
            PetMood::Happy
        } else if !(7..=21).contains(&hour) {
            PetMood::Sleeping
        } else if login_days > 2 {
            PetMood::Excited
        } else {
            PetMood::Neutral
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // Stages
    // -----------------------------------------------------------------------

    #[test]
    fn stage_boundaries() {
        assert_eq!(PetStage::for_level(1), PetStage::Egg);
        assert_eq!(PetStage::for_level(3), PetStage::Egg);
        assert_eq!(PetStage::for_level(4), PetStage::Chick);
        assert_eq!(PetStage::for_level(9), PetStage::Chick);
        assert_eq!(PetStage::for_level(10), PetStage::Bird);
        assert_eq!(PetStage::for_level(19), PetStage::Bird);
        assert_eq!(PetStage::for_level(20), PetStage::Eagle);
        assert_eq!(PetStage::for_level(29), PetStage::Eagle);
        assert_eq!(PetStage::for_level(30), PetStage::Unicorn);
        assert_eq!(PetStage::for_level(999), PetStage::Unicorn);
    }

    #[test]
    fn stage_labels_are_consistent() {
        let stage = PetStage::for_level(12);
        assert_eq!(stage.emoji(), "🐥");
        assert_eq!(stage.name(), "活泼小鸟");
        assert_eq!(stage.description(), "正在学习飞翔！");
    }

    // -----------------------------------------------------------------------
    // Mood
    // -----------------------------------------------------------------------

    #[test]
    fn completed_tasks_beat_everything() {
        assert_eq!(PetMood::derive(1, 23, 0), PetMood::Happy);
        assert_eq!(PetMood::derive(3, 12, 10), PetMood::Happy);
    }

    #[test]
    fn sleeping_outside_waking_hours() {
        assert_eq!(PetMood::derive(0, 6, 10), PetMood::Sleeping);
        assert_eq!(PetMood::derive(0, 22, 10), PetMood::Sleeping);
    }

    #[test]
    fn awake_at_the_edges_of_the_day() {
        assert_eq!(PetMood::derive(0, 7, 0), PetMood::Neutral);
        assert_eq!(PetMood::derive(0, 21, 0), PetMood::Neutral);
    }

    #[test]
    fn login_run_gets_excited() {
        assert_eq!(PetMood::derive(0, 12, 3), PetMood::Excited);
        assert_eq!(PetMood::derive(0, 12, 2), PetMood::Neutral);
    }
}
