//! Errors returned by match and set operations.

use crate::models::team::TeamId;

/// Errors that can occur while building or mutating a match or set.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ScoringError {
    /// A state-gated mutation was attempted outside its allowed state.
    #[error("cannot {action} {entity}: {reason}")]
    InvalidTransition {
        entity: String,
        action: &'static str,
        reason: String,
    },
    /// The team id is not a participant of the match or set.
    #[error("team {0:?} is not a participant")]
    UnknownTeam(TeamId),
    /// Construction input breaks an invariant (seeds, teams, ids, goal).
    #[error("malformed entity: {0}")]
    MalformedEntity(String),
    /// The score collides with the reserved forfeit sentinel.
    #[error("score {score} for team {team:?} is reserved for forfeits")]
    ReservedScore { team: TeamId, score: i32 },
}

impl ScoringError {
    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        ScoringError::MalformedEntity(msg.into())
    }
}
