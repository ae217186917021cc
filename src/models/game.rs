//! A single match (game) between any number of teams, with per-team scores and a lifecycle.

use crate::logic::{check_permutation, check_roster, check_seeds, rank};
use crate::models::error::ScoringError;
use crate::models::team::{TeamId, FORFEIT_SCORE};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = String;

/// Lifecycle of a match. Only ever moves forward.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchState {
    #[default]
    NotStarted,
    InProgress,
    Completed,
}

/// A single match: the participating teams, their scores and the seeding used to break ties.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GameMatch {
    id: MatchId,
    /// Participants. Order is informational, not a ranking.
    teams: Vec<TeamId>,
    /// One entry per team in `teams`.
    scores: HashMap<TeamId, i32>,
    /// Highest seed first.
    seeds: Vec<TeamId>,
    /// True when exact scores were recorded rather than a plain win/loss.
    is_detailed_score: bool,
    state: MatchState,
    started_at: Option<DateTime<Utc>>,
    finished_at: Option<DateTime<Utc>>,
}

impl GameMatch {
    /// Create an unplayed match: every score 0, state `NotStarted`.
    pub fn new(
        id: impl Into<MatchId>,
        teams: Vec<TeamId>,
        seeds: Vec<TeamId>,
    ) -> Result<Self, ScoringError> {
        let id = id.into();
        check_id(&id)?;
        check_roster(&teams)?;
        check_seeds(&teams, &seeds)?;
        let scores = teams.iter().map(|t| (t.clone(), 0)).collect();
        Ok(Self {
            id,
            teams,
            scores,
            seeds,
            is_detailed_score: false,
            state: MatchState::NotStarted,
            started_at: None,
            finished_at: None,
        })
    }

    /// Rebuild a match that has already started from its persisted scores.
    ///
    /// Teams are the keys of `scores`, listed in seed order. The state is `Completed` when
    /// `finished` is set and `InProgress` otherwise. A stored `-1` (legacy forfeit) is kept as is.
    pub fn rehydrate(
        id: impl Into<MatchId>,
        scores: HashMap<TeamId, i32>,
        seeds: Vec<TeamId>,
        is_detailed_score: bool,
        finished: bool,
    ) -> Result<Self, ScoringError> {
        let id = id.into();
        check_id(&id)?;
        let keys: Vec<TeamId> = scores.keys().cloned().collect();
        check_roster(&keys)?;
        check_seeds(&keys, &seeds)?;
        Ok(Self {
            id,
            teams: seeds.clone(),
            scores,
            seeds,
            is_detailed_score,
            state: if finished {
                MatchState::Completed
            } else {
                MatchState::InProgress
            },
            started_at: None,
            finished_at: None,
        })
    }

    /// A fresh random match id.
    pub fn generate_id() -> MatchId {
        Uuid::new_v4().to_string()
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn teams(&self) -> &[TeamId] {
        &self.teams
    }

    pub fn seeds(&self) -> &[TeamId] {
        &self.seeds
    }

    pub fn scores(&self) -> &HashMap<TeamId, i32> {
        &self.scores
    }

    /// Score of one team, `None` if it is not a participant.
    pub fn score(&self, team_id: &str) -> Option<i32> {
        self.scores.get(team_id).copied()
    }

    pub fn is_detailed_score(&self) -> bool {
        self.is_detailed_score
    }

    pub fn state(&self) -> MatchState {
        self.state
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        self.finished_at
    }

    /// Mark the match as in progress. Calling it again, or on a completed match, changes nothing.
    pub fn start(&mut self) {
        if self.state == MatchState::Completed {
            log::debug!("match {}: start ignored, already completed", self.id);
            return;
        }
        self.state = MatchState::InProgress;
        self.started_at.get_or_insert_with(Utc::now);
        log::debug!("match {}: started", self.id);
    }

    /// Overwrite a team's score.
    pub fn set_score(&mut self, team_id: &str, score: i32) -> Result<(), ScoringError> {
        if score == FORFEIT_SCORE {
            return Err(ScoringError::ReservedScore {
                team: team_id.to_string(),
                score,
            });
        }
        let slot = self
            .scores
            .get_mut(team_id)
            .ok_or_else(|| ScoringError::UnknownTeam(team_id.to_string()))?;
        *slot = score;
        log::debug!("match {}: {} scored {}", self.id, team_id, score);
        Ok(())
    }

    /// Mark the match as completed. Idempotent.
    pub fn finish(&mut self) {
        let now = Utc::now();
        self.state = MatchState::Completed;
        self.started_at.get_or_insert(now);
        self.finished_at.get_or_insert(now);
        log::debug!("match {}: finished", self.id);
    }

    /// Flag whether scores are exact or just win/loss. No effect on state or standings.
    pub fn set_detailed_score(&mut self, is_detailed: bool) {
        self.is_detailed_score = is_detailed;
    }

    /// Teams ordered best first: score descending, then seed order.
    pub fn standings(&self) -> Vec<TeamId> {
        rank(&self.scores, &self.seeds)
    }

    /// The team currently holding the top standing.
    pub fn leader(&self) -> Option<TeamId> {
        self.standings().into_iter().next()
    }

    /// Restore persisted timestamps (used when loading records).
    pub(crate) fn restore_timestamps(
        &mut self,
        started_at: Option<DateTime<Utc>>,
        finished_at: Option<DateTime<Utc>>,
    ) {
        self.started_at = started_at;
        self.finished_at = finished_at;
    }

    /// Restore the stored participant order; `teams` must list exactly the scored teams.
    pub(crate) fn restore_teams(&mut self, teams: Vec<TeamId>) -> Result<(), ScoringError> {
        let keys: Vec<TeamId> = self.scores.keys().cloned().collect();
        check_permutation(&keys, &teams, "team")?;
        self.teams = teams;
        Ok(())
    }

    /// Apply a persisted score verbatim, bypassing the sentinel check.
    pub(crate) fn restore_score(&mut self, team_id: &str, score: i32) -> Result<(), ScoringError> {
        let slot = self
            .scores
            .get_mut(team_id)
            .ok_or_else(|| ScoringError::malformed(format!("score for unknown team {team_id:?}")))?;
        *slot = score;
        Ok(())
    }
}

pub(crate) fn check_id(id: &str) -> Result<(), ScoringError> {
    if id.is_empty() {
        return Err(ScoringError::malformed("id must not be empty"));
    }
    Ok(())
}
