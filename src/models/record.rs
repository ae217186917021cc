//! Persisted shapes of matches and sets, as read from and written to the document store.
//!
//! The store itself is the caller's business; these records only carry the fields a set
//! needs to be rebuilt. Loading goes through the same checks as the constructors.

use crate::models::error::ScoringError;
use crate::models::game::{GameMatch, MatchId, MatchState};
use crate::models::progression::{Progression, ProgressionTarget};
use crate::models::set::{Set, SetId};
use crate::models::team::TeamId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Stored form of a [`GameMatch`].
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    pub id: MatchId,
    /// Participants in their recorded order. When empty, the scored teams are used.
    #[serde(default)]
    pub teams: Vec<TeamId>,
    /// Team id -> score. `-1` marks a legacy per-match forfeit.
    pub scores: BTreeMap<TeamId, i32>,
    pub seeds: Vec<TeamId>,
    #[serde(default)]
    pub is_detailed_score: bool,
    #[serde(default)]
    pub state: MatchState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,
}

/// Stored form of a [`Set`]. Derived scores, standings and state are never stored.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetRecord {
    pub id: SetId,
    pub goal: u32,
    /// Full roster. When empty, the roster is the union of the matches' teams.
    #[serde(default)]
    pub teams: Vec<TeamId>,
    pub seeds: Vec<TeamId>,
    #[serde(default)]
    pub forfeits: Vec<TeamId>,
    #[serde(default)]
    pub matches: BTreeMap<MatchId, MatchRecord>,
    #[serde(default)]
    pub progressions: Vec<ProgressionTarget>,
}

impl GameMatch {
    /// Load a match from its stored record.
    pub fn from_record(record: MatchRecord) -> Result<Self, ScoringError> {
        let MatchRecord {
            id,
            teams,
            scores,
            seeds,
            is_detailed_score,
            state,
            started_at,
            finished_at,
        } = record;

        let mut game = match state {
            MatchState::NotStarted => {
                let keys: Vec<TeamId> = scores.keys().cloned().collect();
                let mut game = GameMatch::new(id, keys, seeds)?;
                for (team, score) in &scores {
                    game.restore_score(team, *score)?;
                }
                game.set_detailed_score(is_detailed_score);
                game
            }
            MatchState::InProgress | MatchState::Completed => GameMatch::rehydrate(
                id,
                scores.into_iter().collect::<HashMap<_, _>>(),
                seeds,
                is_detailed_score,
                state == MatchState::Completed,
            )?,
        };
        if !teams.is_empty() {
            game.restore_teams(teams)?;
        }
        game.restore_timestamps(started_at, finished_at);
        Ok(game)
    }

    pub fn to_record(&self) -> MatchRecord {
        MatchRecord {
            id: self.id().to_string(),
            teams: self.teams().to_vec(),
            scores: self
                .scores()
                .iter()
                .map(|(team, score)| (team.clone(), *score))
                .collect(),
            seeds: self.seeds().to_vec(),
            is_detailed_score: self.is_detailed_score(),
            state: self.state(),
            started_at: self.started_at(),
            finished_at: self.finished_at(),
        }
    }
}

impl Set {
    /// Load a set and all of its matches from the stored record.
    pub fn from_record(record: SetRecord) -> Result<Self, ScoringError> {
        let SetRecord {
            id,
            goal,
            teams,
            seeds,
            forfeits,
            matches,
            progressions,
        } = record;

        let mut set = if teams.is_empty() {
            let mut loaded = HashMap::with_capacity(matches.len());
            for (key, m) in matches {
                loaded.insert(key, GameMatch::from_record(m)?);
            }
            Set::rehydrate(id, goal, loaded, seeds, forfeits)?
        } else {
            let mut set = Set::new(id, goal, teams, seeds)?;
            for (key, m) in matches {
                if key != m.id {
                    return Err(ScoringError::malformed(format!(
                        "match stored under {key:?} has id {:?}",
                        m.id
                    )));
                }
                set.add_match(GameMatch::from_record(m)?)?;
            }
            set.restore_forfeits(forfeits)?;
            set
        };
        set.progression_mut().set_targets(progressions);
        log::debug!("loaded set {} with {} match(es)", set.id(), set.matches().len());
        Ok(set)
    }

    pub fn to_record(&self) -> SetRecord {
        SetRecord {
            id: self.id().to_string(),
            goal: self.goal(),
            teams: self.teams().to_vec(),
            seeds: self.seeds().to_vec(),
            forfeits: self.forfeits().to_vec(),
            matches: self
                .matches()
                .iter()
                .map(|(id, m)| (id.clone(), m.to_record()))
                .collect(),
            progressions: self.progressions().to_vec(),
        }
    }
}
