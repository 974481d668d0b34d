//! Level, title, and level-progress derivation from cumulative experience
//! (PRD-02).
//!
//! Cumulative experience (`total_xp`) is the single source of truth; the
//! level, the progress within the level, and the honorary title are all
//! derived from it. Stored copies of the derived values exist in the `users`
//! table purely so the dashboard can read them back without re-deriving.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Experience points required to advance one level.
pub const XP_PER_LEVEL: i64 = 100;

// ---------------------------------------------------------------------------
// Titles
// ---------------------------------------------------------------------------

/// Honorary title awarded at level thresholds.
///
/// Serializes to the Chinese display label the dashboard renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Title {
    #[serde(rename = "学习新星")]
    NovaLearner,
    #[serde(rename = "进步之星")]
    Improving,
    #[serde(rename = "学习达人")]
    Adept,
    #[serde(rename = "智慧大师")]
    Sage,
    #[serde(rename = "知识王者")]
    Monarch,
}

impl Title {
    /// Select the title for a level: the highest threshold in
    /// {20, 15, 10, 5} the level meets, else the starting title.
    pub fn for_level(level: i64) -> Title {
        if level >= 20 {
            Title::Monarch
        } else if level >= 15 {
            Title::Sage
        } else if level >= 10 {
            Title::Adept
        } else if level >= 5 {
            Title::Improving
        } else {
            Title::NovaLearner
        }
    }

    /// The display label shown on the dashboard.
    pub fn label(&self) -> &'static str {
        match self {
            Title::NovaLearner => "学习新星",
            Title::Improving => "进步之星",
            Title::Adept => "学习达人",
            Title::Sage => "智慧大师",
            Title::Monarch => "知识王者",
        }
    }
}

// ---------------------------------------------------------------------------
// Derivation
// ---------------------------------------------------------------------------

/// The derived progression values for a given cumulative experience.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSnapshot {
    /// Current level, starting at 1.
    pub level: i64,
    /// Experience within the current level, in `0..XP_PER_LEVEL`.
    pub level_progress: i64,
    /// Honorary title for the current level.
    pub title: Title,
}

/// Derive level, level progress, and title from cumulative experience.
///
/// - `level = total_xp / 100 + 1`
/// - `level_progress = total_xp % 100`
/// - title per [`Title::for_level`]
///
/// Total and pure. Negative input is clamped to 0 rather than panicking;
/// cumulative experience is never negative in normal operation.
pub fn derive_progress(total_xp: i64) -> ProgressSnapshot {
    let total = total_xp.max(0);
    let level = total / XP_PER_LEVEL + 1;
    ProgressSnapshot {
        level,
        level_progress: total % XP_PER_LEVEL,
        title: Title::for_level(level),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // Derivation arithmetic
    // -----------------------------------------------------------------------

    #[test]
    fn zero_experience_is_level_one() {
        let p = derive_progress(0);
        assert_eq!(p.level, 1);
        assert_eq!(p.level_progress, 0);
        assert_eq!(p.title, Title::NovaLearner);
    }

    #[test]
    fn level_and_progress_track_floor_and_remainder() {
        for xp in [0, 1, 99, 100, 101, 250, 999, 1000, 12_345] {
            let p = derive_progress(xp);
            assert_eq!(p.level, xp / 100 + 1, "level for xp={xp}");
            assert_eq!(p.level_progress, xp % 100, "progress for xp={xp}");
        }
    }

    #[test]
    fn boundary_just_below_level_five() {
        let p = derive_progress(499);
        assert_eq!(p.level, 5);
        assert_eq!(p.level_progress, 99);
        assert_eq!(p.title, Title::Improving);
    }

    #[test]
    fn boundary_at_level_six() {
        let p = derive_progress(500);
        assert_eq!(p.level, 6);
        assert_eq!(p.level_progress, 0);
        assert_eq!(p.title, Title::Improving);
    }

    #[test]
    fn negative_experience_clamps_to_floor() {
        let p = derive_progress(-50);
        assert_eq!(p.level, 1);
        assert_eq!(p.level_progress, 0);
    }

    // -----------------------------------------------------------------------
    // Title thresholds
    // -----------------------------------------------------------------------

    #[test]
    fn titles_change_exactly_at_thresholds() {
        assert_eq!(Title::for_level(1), Title::NovaLearner);
        assert_eq!(Title::for_level(4), Title::NovaLearner);
        assert_eq!(Title::for_level(5), Title::Improving);
        assert_eq!(Title::for_level(9), Title::Improving);
        assert_eq!(Title::for_level(10), Title::Adept);
        assert_eq!(Title::for_level(14), Title::Adept);
        assert_eq!(Title::for_level(15), Title::Sage);
        assert_eq!(Title::for_level(19), Title::Sage);
        assert_eq!(Title::for_level(20), Title::Monarch);
        assert_eq!(Title::for_level(99), Title::Monarch);
    }

    #[test]
    fn title_serializes_to_display_label() {
        let json = serde_json::to_string(&Title::NovaLearner).unwrap();
        assert_eq!(json, "\"学习新星\"");
        let json = serde_json::to_string(&Title::Monarch).unwrap();
        assert_eq!(json, "\"知识王者\"");
    }

    #[test]
    fn snapshot_serializes_camel_case() {
        let p = derive_progress(105);
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["level"], 2);
        assert_eq!(json["levelProgress"], 5);
        assert_eq!(json["title"], "学习新星");
    }
}
