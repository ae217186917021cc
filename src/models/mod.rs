//! Data structures for match and set scoring: teams, matches, sets, progressions, records.

mod error;
mod game;
mod progression;
mod record;
mod set;
mod team;

pub use error::ScoringError;
pub use game::{GameMatch, MatchId, MatchState};
pub use progression::{Progression, ProgressionTarget, Progressions};
pub use record::{MatchRecord, SetRecord};
pub use set::{Series, Set, SetId, SetState};
pub use team::{TeamId, TeamScore, FORFEIT_SCORE};
