//! Standings resolver shared by matches and sets: score descending, seed order as tie-break.

use crate::models::{ScoringError, TeamId};
use std::collections::{HashMap, HashSet};

/// Order teams from best to worst.
///
/// Primary key is score (descending), secondary key is the team's position in `seeds`
/// (lower index wins the tie). Teams missing from `seeds` sort after every seeded team
/// with the same score; any remaining tie falls back to the team id so the output
/// never depends on map iteration order.
pub fn rank(scores: &HashMap<TeamId, i32>, seeds: &[TeamId]) -> Vec<TeamId> {
    let mut seed_index: HashMap<&str, usize> = HashMap::with_capacity(seeds.len());
    for (i, team) in seeds.iter().enumerate() {
        seed_index.entry(team.as_str()).or_insert(i);
    }

    let mut ranked: Vec<(&TeamId, i32, usize)> = scores
        .iter()
        .map(|(team, &score)| {
            let seed = seed_index.get(team.as_str()).copied().unwrap_or(usize::MAX);
            (team, score, seed)
        })
        .collect();
    ranked.sort_by(|a, b| {
        b.1.cmp(&a.1)
            .then_with(|| a.2.cmp(&b.2))
            .then_with(|| a.0.cmp(b.0))
    });
    ranked.into_iter().map(|(team, _, _)| team.clone()).collect()
}

/// Team ids must be non-empty and distinct.
pub fn check_roster(teams: &[TeamId]) -> Result<(), ScoringError> {
    let mut seen = HashSet::with_capacity(teams.len());
    for team in teams {
        if team.is_empty() {
            return Err(ScoringError::malformed("team id must not be empty"));
        }
        if !seen.insert(team.as_str()) {
            return Err(ScoringError::malformed(format!("team {team:?} listed more than once")));
        }
    }
    Ok(())
}

/// Seeds must be a permutation of `teams`.
pub fn check_seeds(teams: &[TeamId], seeds: &[TeamId]) -> Result<(), ScoringError> {
    check_permutation(teams, seeds, "seed")
}

/// `given` must list every id of `expected` exactly once and nothing else.
pub(crate) fn check_permutation(
    expected: &[TeamId],
    given: &[TeamId],
    what: &str,
) -> Result<(), ScoringError> {
    let team_set: HashSet<&str> = expected.iter().map(String::as_str).collect();
    let mut seen = HashSet::with_capacity(given.len());
    for team in given {
        if !team_set.contains(team.as_str()) {
            return Err(ScoringError::malformed(format!("{what} {team:?} is not a participant")));
        }
        if !seen.insert(team.as_str()) {
            return Err(ScoringError::malformed(format!("{what} {team:?} listed more than once")));
        }
    }
    if seen.len() != team_set.len() {
        return Err(ScoringError::malformed(format!(
            "{what}s cover {} of {} teams",
            seen.len(),
            team_set.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(v: &[&str]) -> Vec<TeamId> {
        v.iter().map(|s| s.to_string()).collect()
    }

    fn scores(v: &[(&str, i32)]) -> HashMap<TeamId, i32> {
        v.iter().map(|(t, s)| (t.to_string(), *s)).collect()
    }

    #[test]
    fn unseeded_teams_sort_after_seeded_ones_on_equal_score() {
        let ranked = rank(&scores(&[("x", 1), ("a", 1), ("b", 1)]), &ids(&["b", "a"]));
        assert_eq!(ranked, ids(&["b", "a", "x"]));
    }

    #[test]
    fn duplicate_seed_uses_first_position() {
        let ranked = rank(&scores(&[("a", 0), ("b", 0)]), &ids(&["b", "a", "b"]));
        assert_eq!(ranked, ids(&["b", "a"]));
    }

    #[test]
    fn roster_rejects_empty_and_duplicate_ids() {
        assert!(check_roster(&ids(&["a", ""])).is_err());
        assert!(check_roster(&ids(&["a", "a"])).is_err());
        assert!(check_roster(&ids(&["a", "b"])).is_ok());
    }

    #[test]
    fn seeds_must_be_a_permutation() {
        let teams = ids(&["a", "b", "c"]);
        assert!(check_seeds(&teams, &ids(&["c", "a", "b"])).is_ok());
        assert!(check_seeds(&teams, &ids(&["a", "b"])).is_err());
        assert!(check_seeds(&teams, &ids(&["a", "b", "d"])).is_err());
        assert!(check_seeds(&teams, &ids(&["a", "b", "b"])).is_err());
    }
}
