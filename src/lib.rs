//! Match and set scoring engine: per-match scores, best-of-N sets, standings with seed
//! tie-breaks, forfeits and lifecycle state. Persistence and transport are left to the caller.

pub mod logic;
pub mod models;

pub use logic::{check_roster, check_seeds, derive_set_state, rank};
pub use models::{
    GameMatch, MatchId, MatchRecord, MatchState, Progression, ProgressionTarget, Progressions,
    ScoringError, Series, Set, SetId, SetRecord, SetState, TeamId, TeamScore, FORFEIT_SCORE,
};
