//! Integration tests for loading and saving sets through their stored records.

use serde_json::json;
use set_scoring::{
    GameMatch, MatchRecord, MatchState, Progression, ScoringError, Set, SetRecord, SetState,
};

fn stored_set() -> serde_json::Value {
    json!({
        "id": "set-1",
        "goal": 2,
        "seeds": ["red", "blue"],
        "forfeits": [],
        "matches": {
            "g1": {
                "id": "g1",
                "scores": { "red": 3, "blue": 1 },
                "seeds": ["red", "blue"],
                "isDetailedScore": true,
                "state": "completed",
                "startedAt": "2024-05-01T18:00:00Z",
                "finishedAt": "2024-05-01T18:40:00Z"
            },
            "g2": {
                "id": "g2",
                "scores": { "red": 0, "blue": 2 },
                "seeds": ["red", "blue"],
                "state": "in_progress"
            }
        },
        "progressions": ["upper-final", "lower-semi"]
    })
}

#[test]
fn loads_a_set_from_its_stored_json() {
    let record: SetRecord = serde_json::from_value(stored_set()).unwrap();
    let set = Set::from_record(record).unwrap();

    assert_eq!(set.id(), "set-1");
    assert_eq!(set.goal(), 2);
    assert_eq!(set.teams().len(), 2);
    assert_eq!(set.scores()["red"], 1);
    assert_eq!(set.scores()["blue"], 1);
    assert_eq!(set.state(), SetState::InProgress);
    assert_eq!(set.standings(), vec!["red".to_string(), "blue".to_string()]);
    assert_eq!(set.progressions().len(), 2);

    let g1 = set.get_match("g1").unwrap();
    assert_eq!(g1.state(), MatchState::Completed);
    assert!(g1.is_detailed_score());
    assert!(g1.finished_at().is_some());
    assert!(!set.get_match("g2").unwrap().is_detailed_score());
}

#[test]
fn save_then_load_keeps_everything_the_set_derives_from() {
    let mut set = Set::new(
        "s",
        3,
        vec!["a".into(), "b".into(), "c".into()],
        vec!["b".into(), "a".into(), "c".into()],
    )
    .unwrap();
    let id = set.create_match().unwrap().id().to_string();
    let game = set.get_match_mut(&id).unwrap();
    game.start();
    game.set_score("a", 7).unwrap();
    game.set_detailed_score(true);
    set.create_match().unwrap();
    set.forfeit("c").unwrap();

    let stored = serde_json::to_string(&set.to_record()).unwrap();
    let reloaded = Set::from_record(serde_json::from_str(&stored).unwrap()).unwrap();

    assert_eq!(reloaded, set);
    assert_eq!(reloaded.scores(), set.scores());
    assert_eq!(reloaded.state(), set.state());
}

#[test]
fn unstarted_match_record_round_trips_its_state() {
    let teams = vec!["x".to_string(), "y".to_string()];
    let game = GameMatch::new("m", teams, vec!["y".into(), "x".into()]).unwrap();
    let record = game.to_record();
    assert_eq!(record.state, MatchState::NotStarted);
    assert_eq!(GameMatch::from_record(record).unwrap(), game);
}

#[test]
fn legacy_forfeit_score_is_accepted_on_load() {
    let record: MatchRecord = serde_json::from_value(json!({
        "id": "m",
        "scores": { "x": -1, "y": 0 },
        "seeds": ["x", "y"],
        "state": "completed"
    }))
    .unwrap();
    let game = GameMatch::from_record(record).unwrap();
    assert_eq!(game.score("x"), Some(-1));
    assert_eq!(game.leader(), Some("y".to_string()));
}

#[test]
fn record_without_roster_uses_match_union() {
    let mut value = stored_set();
    value["teams"] = json!([]);
    let set = Set::from_record(serde_json::from_value(value).unwrap()).unwrap();
    assert_eq!(set.teams(), ["red".to_string(), "blue".to_string()].as_slice());
}

#[test]
fn record_with_roster_keeps_teams_without_matches() {
    let record: SetRecord = serde_json::from_value(json!({
        "id": "s",
        "goal": 3,
        "teams": ["a", "b"],
        "seeds": ["a", "b"],
        "forfeits": ["b"]
    }))
    .unwrap();
    let set = Set::from_record(record).unwrap();
    assert!(set.matches().is_empty());
    assert_eq!(set.scores()["b"], -1);
    assert_eq!(set.state(), SetState::Completed);
    assert_eq!(set.winner(), Some("a".to_string()));
}

#[test]
fn inconsistent_records_are_rejected() {
    let mut value = stored_set();
    value["forfeits"] = json!(["green"]);
    let err = Set::from_record(serde_json::from_value(value).unwrap()).unwrap_err();
    assert!(matches!(err, ScoringError::MalformedEntity(_)));

    let mut value = stored_set();
    value["matches"]["g2"]["id"] = json!("g9");
    assert!(Set::from_record(serde_json::from_value(value).unwrap()).is_err());

    let mut value = stored_set();
    value["teams"] = json!(["red", "blue"]);
    value["matches"]["g2"]["scores"] = json!({ "red": 0, "green": 2 });
    value["matches"]["g2"]["seeds"] = json!(["red", "green"]);
    assert!(Set::from_record(serde_json::from_value(value).unwrap()).is_err());
}
