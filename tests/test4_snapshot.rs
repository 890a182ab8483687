use rusty_stableford::model::player::Player;
use rusty_stableford::model::screen::Screen;
use rusty_stableford::mvu::game::{GameModel, GameSettings};
use rusty_stableford::storage::snapshot::{GameSnapshot, SNAPSHOT_KEY, SnapshotParts};
use rusty_stableford::storage::{FileSnapshotStore, SnapshotStore};

fn player(name: &str, handicap: i32, scores: Vec<Option<u32>>) -> Player {
    Player {
        name: name.to_string(),
        handicap,
        scores,
    }
}

#[test]
fn test4_snapshot_uses_the_saved_field_names() -> Result<(), Box<dyn std::error::Error>> {
    let snapshot = GameSnapshot {
        players: vec![player("Ann", 3, vec![Some(4), None])],
        current_hole: 1,
        tab: Screen::Scorecard,
        is_team_play: true,
    };
    let value: serde_json::Value = serde_json::from_str(&snapshot.encode()?)?;
    assert_eq!(value["currentHole"], 1);
    assert_eq!(value["tab"], "scorecard");
    assert_eq!(value["isTeamPlay"], true);
    assert_eq!(value["players"][0]["scores"][1], serde_json::Value::Null);

    let parts = GameSnapshot::decode_lenient(&snapshot.encode()?);
    assert_eq!(parts.players, Some(snapshot.players.clone()));
    assert_eq!(parts.current_hole, 1);
    assert_eq!(parts.tab, Screen::Scorecard);
    assert!(parts.is_team_play);
    Ok(())
}

#[test]
fn test4_garbage_decodes_to_defaults() {
    for blob in ["", "not json", "[1,2,3]", "42", "null"] {
        assert_eq!(GameSnapshot::decode_lenient(blob), SnapshotParts::default(), "{blob}");
    }
}

#[test]
fn test4_malformed_fields_fall_back_one_by_one() {
    let blob = r#"{
        "players": [{"name": "Ann", "handicap": "x", "scores": [4, -1, "five", null]}, 7],
        "currentHole": -3,
        "tab": "somewhere",
        "isTeamPlay": "yes"
    }"#;
    let parts = GameSnapshot::decode_lenient(blob);
    let players = parts.players.expect("players kept");
    assert_eq!(players, vec![player("Ann", 0, vec![Some(4), None, None, None])]);
    assert_eq!(parts.current_hole, 0);
    assert_eq!(parts.tab, Screen::Home);
    assert!(!parts.is_team_play);

    let parts = GameSnapshot::decode_lenient(r#"{"players": "nope", "tab": "final"}"#);
    assert_eq!(parts.players, None);
    assert_eq!(parts.tab, Screen::Final);
}

#[test]
fn test4_invalid_restored_scorecard_returns_to_setup() {
    let parts = SnapshotParts {
        players: Some(vec![player("", 2, vec![None; 18])]),
        current_hole: 4,
        tab: Screen::Scorecard,
        is_team_play: false,
    };
    let model = GameModel::from_snapshot(GameSettings::default(), parts);
    assert_eq!(model.screen, Screen::Setup);
    assert_eq!(model.round.current_hole, 4);

    let parts = SnapshotParts {
        players: Some(vec![player("Ann", 2, vec![Some(5)])]),
        current_hole: 30,
        tab: Screen::Scorecard,
        is_team_play: true,
    };
    let model = GameModel::from_snapshot(GameSettings::default(), parts);
    assert_eq!(model.screen, Screen::Scorecard);
    assert_eq!(model.round.current_hole, 17);
    assert_eq!(model.round.players[0].scores.len(), 18);
    assert!(model.round.is_team_play);
}

#[test]
fn test4_missing_players_start_a_fresh_round() {
    let parts = SnapshotParts {
        players: None,
        tab: Screen::Setup,
        is_team_play: true,
        ..SnapshotParts::default()
    };
    let model = GameModel::from_snapshot(GameSettings::default(), parts);
    assert_eq!(model.round.players.len(), 1);
    assert!(model.round.is_team_play);
    assert_eq!(model.screen, Screen::Setup);
}

#[test]
fn test4_file_store_round_trip() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let store = FileSnapshotStore::new(dir.path().join("nested"));
    assert_eq!(store.load(SNAPSHOT_KEY)?, None);

    store.save(SNAPSHOT_KEY, "{\"tab\":\"setup\"}")?;
    store.save(SNAPSHOT_KEY, "{\"tab\":\"final\"}")?;
    assert_eq!(store.load(SNAPSHOT_KEY)?.as_deref(), Some("{\"tab\":\"final\"}"));
    assert!(store.path_for(SNAPSHOT_KEY).ends_with("golfGame.json"));
    assert!(!dir.path().join("nested/golfGame.json.tmp").exists());
    Ok(())
}
