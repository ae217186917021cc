//! Set (best-of-N series): a group of matches between the same teams, won by reaching a win goal.

use crate::logic::{check_roster, check_seeds, derive_set_state, rank};
use crate::models::error::ScoringError;
use crate::models::game::{check_id, GameMatch, MatchId};
use crate::models::progression::{Progression, ProgressionTarget, Progressions};
use crate::models::team::{TeamId, TeamScore};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Unique identifier for a set.
pub type SetId = String;

/// Older name for a set, kept for callers that still speak of series.
pub type Series = Set;

/// Current phase of a set, derived from its matches and forfeits.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SetState {
    #[default]
    NotStarted,
    InProgress,
    Completed,
}

/// A best-of-N set. Scores, standings and state are computed from `matches` and `forfeits`
/// on every call; nothing derived is cached.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Set {
    id: SetId,
    /// Match wins needed to take the set.
    goal: u32,
    teams: Vec<TeamId>,
    /// Highest seed first. Breaks ties in set standings.
    seeds: Vec<TeamId>,
    matches: HashMap<MatchId, GameMatch>,
    /// Teams that withdrew from the whole set, in the order they withdrew.
    forfeits: Vec<TeamId>,
    progression: Progressions,
}

impl Set {
    /// Create an empty set that has not started.
    pub fn new(
        id: impl Into<SetId>,
        goal: u32,
        teams: Vec<TeamId>,
        seeds: Vec<TeamId>,
    ) -> Result<Self, ScoringError> {
        let id = id.into();
        check_id(&id)?;
        check_goal(goal)?;
        check_roster(&teams)?;
        check_seeds(&teams, &seeds)?;
        Ok(Self {
            id,
            goal,
            teams,
            seeds,
            matches: HashMap::new(),
            forfeits: Vec::new(),
            progression: Progressions::default(),
        })
    }

    /// Rebuild a set from its persisted matches. Teams are the distinct union of the
    /// matches' teams, listed in seed order.
    pub fn rehydrate(
        id: impl Into<SetId>,
        goal: u32,
        matches: HashMap<MatchId, GameMatch>,
        seeds: Vec<TeamId>,
        forfeits: Vec<TeamId>,
    ) -> Result<Self, ScoringError> {
        let id = id.into();
        check_id(&id)?;
        check_goal(goal)?;

        let mut union: Vec<TeamId> = Vec::new();
        let mut seen: HashSet<&str> = HashSet::new();
        for (key, m) in &matches {
            if key != m.id() {
                return Err(ScoringError::malformed(format!(
                    "match stored under {key:?} has id {:?}",
                    m.id()
                )));
            }
            for team in m.teams() {
                if seen.insert(team.as_str()) {
                    union.push(team.clone());
                }
            }
        }
        check_seeds(&union, &seeds)?;

        let mut set = Self {
            id,
            goal,
            teams: seeds.clone(),
            seeds,
            matches,
            forfeits: Vec::with_capacity(forfeits.len()),
            progression: Progressions::default(),
        };
        set.restore_forfeits(forfeits)?;
        Ok(set)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn goal(&self) -> u32 {
        self.goal
    }

    pub fn teams(&self) -> &[TeamId] {
        &self.teams
    }

    pub fn seeds(&self) -> &[TeamId] {
        &self.seeds
    }

    pub fn forfeits(&self) -> &[TeamId] {
        &self.forfeits
    }

    pub fn matches(&self) -> &HashMap<MatchId, GameMatch> {
        &self.matches
    }

    pub fn get_match(&self, match_id: &str) -> Option<&GameMatch> {
        self.matches.get(match_id)
    }

    /// Mutable access for the per-match `start` / `set_score` / `finish` entry points.
    pub fn get_match_mut(&mut self, match_id: &str) -> Option<&mut GameMatch> {
        self.matches.get_mut(match_id)
    }

    pub fn has_team(&self, team_id: &str) -> bool {
        self.teams.iter().any(|t| t == team_id)
    }

    pub fn is_forfeited(&self, team_id: &str) -> bool {
        self.forfeits.iter().any(|t| t == team_id)
    }

    /// Add an existing match. Its teams must all belong to this set and its id must be new.
    pub fn add_match(&mut self, game: GameMatch) -> Result<&mut GameMatch, ScoringError> {
        if self.matches.contains_key(game.id()) {
            return Err(ScoringError::malformed(format!(
                "set {} already has match {}",
                self.id,
                game.id()
            )));
        }
        if let Some(outsider) = game.teams().iter().find(|t| !self.has_team(t)) {
            return Err(ScoringError::malformed(format!(
                "match {} includes team {outsider:?} outside set {}",
                game.id(),
                self.id
            )));
        }
        log::debug!("set {}: added match {}", self.id, game.id());
        let id = game.id().to_string();
        Ok(self.matches.entry(id).or_insert(game))
    }

    /// Create an unplayed match between all of the set's teams, seeded like the set.
    pub fn create_match(&mut self) -> Result<&mut GameMatch, ScoringError> {
        let game = GameMatch::new(
            GameMatch::generate_id(),
            self.teams.clone(),
            self.seeds.clone(),
        )?;
        self.add_match(game)
    }

    /// Change the number of wins needed. Only allowed before the set has started.
    pub fn set_goal(&mut self, goal: u32) -> Result<(), ScoringError> {
        let state = self.state();
        if state != SetState::NotStarted {
            log::warn!("set {}: goal change to {} rejected in state {:?}", self.id, goal, state);
            return Err(ScoringError::InvalidTransition {
                entity: format!("set {}", self.id),
                action: "change goal of",
                reason: format!("set is {state:?}, goal can only change before it starts"),
            });
        }
        check_goal(goal)?;
        log::debug!("set {}: goal {} -> {}", self.id, self.goal, goal);
        self.goal = goal;
        Ok(())
    }

    /// Withdraw a team from the set. Forfeiting twice is a no-op.
    pub fn forfeit(&mut self, team_id: &str) -> Result<(), ScoringError> {
        if !self.has_team(team_id) {
            return Err(ScoringError::UnknownTeam(team_id.to_string()));
        }
        if self.is_forfeited(team_id) {
            return Ok(());
        }
        self.forfeits.push(team_id.to_string());
        log::debug!("set {}: {} forfeited", self.id, team_id);
        Ok(())
    }

    /// Per-team score: match wins, or `Forfeited`.
    ///
    /// A team wins a match by holding its top standing, whatever the match's state.
    pub fn team_scores(&self) -> HashMap<TeamId, TeamScore> {
        let mut wins: HashMap<TeamId, u32> = HashMap::new();
        for m in self.matches.values() {
            if let Some(leader) = m.leader() {
                *wins.entry(leader).or_default() += 1;
            }
        }
        self.teams
            .iter()
            .map(|team| {
                let score = if self.is_forfeited(team) {
                    TeamScore::Forfeited
                } else {
                    TeamScore::Wins(wins.get(team).copied().unwrap_or(0))
                };
                (team.clone(), score)
            })
            .collect()
    }

    /// Per-team score in the integer encoding: win count, or `-1` for a forfeit.
    pub fn scores(&self) -> HashMap<TeamId, i32> {
        self.team_scores()
            .into_iter()
            .map(|(team, score)| (team, score.legacy()))
            .collect()
    }

    /// Teams ordered best first: wins descending, seed order on ties, forfeits last.
    pub fn standings(&self) -> Vec<TeamId> {
        rank(&self.scores(), &self.seeds)
    }

    pub fn state(&self) -> SetState {
        derive_set_state(
            self.team_scores().into_values(),
            self.goal,
            self.matches.values().map(GameMatch::state),
        )
    }

    /// The set's winner once it is completed.
    pub fn winner(&self) -> Option<TeamId> {
        if self.state() != SetState::Completed {
            return None;
        }
        self.standings()
            .into_iter()
            .next()
            .filter(|team| !self.is_forfeited(team))
    }

    /// Progression targets, handed over by the bracket topology.
    pub fn progression_mut(&mut self) -> &mut Progressions {
        &mut self.progression
    }

    pub(crate) fn restore_forfeits(&mut self, forfeits: Vec<TeamId>) -> Result<(), ScoringError> {
        for team in forfeits {
            if !self.has_team(&team) {
                return Err(ScoringError::malformed(format!(
                    "forfeit by {team:?} who is not in set {}",
                    self.id
                )));
            }
            if self.is_forfeited(&team) {
                return Err(ScoringError::malformed(format!(
                    "team {team:?} forfeited set {} more than once",
                    self.id
                )));
            }
            self.forfeits.push(team);
        }
        Ok(())
    }
}

impl Progression for Set {
    fn progressions(&self) -> &[ProgressionTarget] {
        self.progression.progressions()
    }
}

fn check_goal(goal: u32) -> Result<(), ScoringError> {
    if goal == 0 {
        return Err(ScoringError::malformed("goal must be at least 1"));
    }
    Ok(())
}
