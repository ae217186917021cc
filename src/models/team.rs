//! Team identifiers and the per-team score view of a set.

use serde::{Deserialize, Serialize};

/// Opaque team identifier, unique within a match or set.
pub type TeamId = String;

/// Legacy score value meaning "this team forfeited".
pub const FORFEIT_SCORE: i32 = -1;

/// A team's standing in a set: either its match-win count or a forfeit.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamScore {
    Wins(u32),
    Forfeited,
}

impl TeamScore {
    /// Integer encoding used by persisted data and `Set::scores`: forfeits become `-1`.
    pub fn legacy(self) -> i32 {
        match self {
            TeamScore::Wins(n) => i32::try_from(n).unwrap_or(i32::MAX),
            TeamScore::Forfeited => FORFEIT_SCORE,
        }
    }

    /// Number of match wins, or `None` for a forfeited team.
    pub fn wins(self) -> Option<u32> {
        match self {
            TeamScore::Wins(n) => Some(n),
            TeamScore::Forfeited => None,
        }
    }
}
