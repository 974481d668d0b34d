//! Reward ledger arithmetic and the daily chest roll (PRD-04).
//!
//! A reward credits both counters at once: the task's coin value (or the
//! chest roll) is added to cumulative experience and to the spendable coin
//! balance. Only purchases ever reduce the coin balance, and nothing
//! reduces cumulative experience, which is what keeps the
//! coins-never-exceed-experience invariant true under normal flows.

use rand::Rng;

use crate::progression::{derive_progress, ProgressSnapshot};

// ---------------------------------------------------------------------------
// Chest bounds
// ---------------------------------------------------------------------------

/// Smallest possible daily chest reward, inclusive.
pub const CHEST_REWARD_MIN: i64 = 10;

/// Largest possible daily chest reward, inclusive.
pub const CHEST_REWARD_MAX: i64 = 50;

/// Roll the daily chest reward, uniform over the inclusive bounds.
pub fn roll_chest_reward(rng: &mut impl Rng) -> i64 {
    rng.random_range(CHEST_REWARD_MIN..=CHEST_REWARD_MAX)
}

// ---------------------------------------------------------------------------
// Reward application
// ---------------------------------------------------------------------------

/// The state of both counters after a reward, with its derived progression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewardOutcome {
    /// Cumulative experience after the credit.
    pub total_xp: i64,
    /// Coin balance after the credit.
    pub gold_coins: i64,
    /// Progression derived from the new cumulative experience.
    pub progress: ProgressSnapshot,
    /// Whether the credit pushed the level up. Callers surface this as a
    /// level-up notification; no other state change is implied.
    pub level_up: bool,
}

/// Apply a non-negative experience/coin delta and rederive progression.
///
/// Pure; persistence and rollback are the caller's concern. Deltas are
/// never negative in any reward path (purchases debit coins through their
/// own transaction, not through the ledger).
pub fn apply_reward(
    total_xp: i64,
    gold_coins: i64,
    delta_xp: i64,
    delta_coins: i64,
) -> RewardOutcome {
    let before = derive_progress(total_xp);
    let new_total_xp = total_xp + delta_xp;
    let new_gold_coins = gold_coins + delta_coins;
    let progress = derive_progress(new_total_xp);

    RewardOutcome {
        total_xp: new_total_xp,
        gold_coins: new_gold_coins,
        progress,
        level_up: progress.level > before.level,
    }
}

/// Detect the coins-exceed-experience integrity violation.
///
/// Both counters rise together and only coins fall, so a coin balance above
/// cumulative experience means the record was mutated outside the normal
/// flows. Surfaced as a logged warning, never a failure.
pub fn coins_exceed_experience(total_xp: i64, gold_coins: i64) -> bool {
    gold_coins > total_xp
}
