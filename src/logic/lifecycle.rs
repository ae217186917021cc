//! Set lifecycle derivation from team scores and match states.

use crate::models::{MatchState, SetState, TeamScore};

/// Derive a set's state.
///
/// 1. `Completed` if any team has `goal` wins, or at most one team has not forfeited.
/// 2. `NotStarted` if there are no matches, or a single match that has not started.
/// 3. `InProgress` otherwise.
///
/// Forfeit-driven completion wins over the "no matches yet" check.
pub fn derive_set_state<S, M>(scores: S, goal: u32, match_states: M) -> SetState
where
    S: IntoIterator<Item = TeamScore>,
    M: IntoIterator<Item = MatchState>,
{
    let mut active = 0usize;
    let mut goal_reached = false;
    for score in scores {
        if let Some(n) = score.wins() {
            active += 1;
            goal_reached |= n >= goal;
        }
    }
    if goal_reached || active <= 1 {
        return SetState::Completed;
    }

    let mut states = match_states.into_iter();
    match (states.next(), states.next()) {
        (None, _) | (Some(MatchState::NotStarted), None) => SetState::NotStarted,
        _ => SetState::InProgress,
    }
}
