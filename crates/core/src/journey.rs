//! Learning journey map (PRD-08).
//!
//! A linear track of level nodes: everything below the current level is
//! completed, the current level is in progress, everything above is locked.
//! Every fifth node is a boss stage.

use serde::Serialize;

/// Number of nodes on the map.
pub const JOURNEY_LENGTH: i64 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeState {
    Completed,
    Current,
    Locked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct JourneyNode {
    pub level: i64,
    pub state: NodeState,
    pub boss: bool,
}

/// Build the map for a user at `current_level`.
pub fn build_journey(current_level: i64) -> Vec<JourneyNode> {
    (1..=JOURNEY_LENGTH)
        .map(|level| JourneyNode {
            level,
            state: if level < current_level {
                NodeState::Completed
            } else if level == current_level {
                NodeState::Current
            } else {
                NodeState::Locked
            },
            boss: level % 5 == 0,
        })
        .collect()
}
