use rusty_stableford::AppError;
use rusty_stableford::model::course::Course;
use rusty_stableford::model::player::{Player, PlayerField};
use rusty_stableford::model::round::{HoleStep, Round};
use rusty_stableford::model::stableford::PointsScale;

fn named_round(names: &[&str]) -> Round {
    let mut round = Round::new(18);
    for (idx, name) in names.iter().enumerate() {
        if idx > 0 {
            round.add_player();
        }
        round
            .update_player_info(idx, PlayerField::Name((*name).to_string()))
            .expect("valid index");
    }
    round
}

#[test]
fn test2_new_round_has_one_empty_player() {
    let round = Round::new(18);
    assert_eq!(round.players.len(), 1);
    assert_eq!(round.players[0].scores, vec![None; 18]);
    assert_eq!(round.current_hole, 0);
    assert!(!round.is_team_play);
}

#[test]
fn test2_add_and_remove_players() -> Result<(), Box<dyn std::error::Error>> {
    let mut round = named_round(&["Ann", "Ben", "Cal"]);
    assert_eq!(round.add_player(), 3);
    assert_eq!(round.players[3].scores.len(), 18);

    let removed = round.remove_player(1)?;
    assert_eq!(removed.name, "Ben");
    let names: Vec<_> = round.players.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Ann", "Cal", ""]);

    assert_eq!(
        round.remove_player(9),
        Err(AppError::InvalidPlayerIndex { index: 9, len: 3 })
    );
    Ok(())
}

#[test]
fn test2_record_score_returns_document() -> Result<(), Box<dyn std::error::Error>> {
    let course = Course::default();
    let mut round = named_round(&["  Ann  "]);
    round.update_player_info(0, PlayerField::Handicap(10))?;

    round.record_score(0, 0, 4, &course, PointsScale::Standard)?;
    let doc = round.record_score(0, 1, 3, &course, PointsScale::Standard)?;
    assert_eq!(doc.player_name, "Ann");
    assert_eq!(doc.handicap, 10);
    assert_eq!(doc.total_score, 5);
    assert_eq!(doc.scores[..3], [Some(4), Some(3), None]);
    assert_eq!(round.players[0].holes_played(), 2);
    Ok(())
}

#[test]
fn test2_record_score_rejects_bad_input_without_mutation() {
    let course = Course::default();
    let mut round = named_round(&["Ann"]);
    let before = round.clone();

    assert_eq!(
        round.record_score(0, 0, -1, &course, PointsScale::Standard),
        Err(AppError::NegativeScore(-1))
    );
    assert!(matches!(
        round.record_score(1, 0, 4, &course, PointsScale::Standard),
        Err(AppError::InvalidPlayerIndex { index: 1, len: 1 })
    ));
    assert!(matches!(
        round.record_score(0, 18, 4, &course, PointsScale::Standard),
        Err(AppError::InvalidHoleIndex { index: 18, len: 18 })
    ));
    assert_eq!(round, before);
}

#[test]
fn test2_hole_pointer_stays_in_range() {
    let mut round = Round::new(3);
    assert_eq!(round.retreat_hole(), 0);
    assert_eq!(round.advance_hole(), HoleStep::Moved(1));
    assert_eq!(round.advance_hole(), HoleStep::Moved(2));
    assert_eq!(round.advance_hole(), HoleStep::PastLastHole);
    assert_eq!(round.current_hole, 2);
    assert_eq!(round.retreat_hole(), 1);
}

#[test]
fn test2_validate_players() {
    let mut round = named_round(&["Ann", "Ben"]);
    assert!(round.validate_players().is_ok());

    // handicap zero is allowed
    round.players[0].handicap = 0;
    assert!(round.validate_players().is_ok());

    round.players[1].handicap = -1;
    assert!(matches!(round.validate_players(), Err(AppError::Validation(_))));
    round.players[1].handicap = 4;

    round.players[1].name = "   ".into();
    assert!(matches!(round.validate_players(), Err(AppError::Validation(_))));

    round.players[1].name = " Ann".into();
    assert!(matches!(round.validate_players(), Err(AppError::Validation(_))));

    round.players.clear();
    assert!(round.validate_players().is_err());
}

#[test]
fn test2_from_parts_repairs_restored_state() {
    let mut short = Player::new(2);
    short.name = "Ann".into();
    short.scores = vec![Some(5), Some(4)];
    let round = Round::from_parts(vec![short], 40, true, 18);

    assert_eq!(round.current_hole, 17);
    assert!(round.is_team_play);
    assert_eq!(round.players[0].scores.len(), 18);
    assert_eq!(round.players[0].scores[..2], [Some(5), Some(4)]);
}

#[test]
fn test2_add_then_remove_same_player_restores_count() -> Result<(), Box<dyn std::error::Error>> {
    let mut round = named_round(&["Ann", "Ben"]);
    let before = round.players.clone();
    let idx = round.add_player();
    round.update_player_info(idx, PlayerField::Name("Cal".into()))?;
    let removed = round.remove_player(idx)?;
    assert_eq!(removed.name, "Cal");
    assert_eq!(round.players, before);
    Ok(())
}

#[test]
fn test2_short_score_line_is_an_index_error() {
    let course = Course::default();
    let mut round = named_round(&["Ann"]);
    let mut short = Player::new(2);
    short.name = "Ben".into();
    round.players.push(short);

    assert_eq!(
        round.record_score(1, 5, 4, &course, PointsScale::Standard),
        Err(AppError::InvalidHoleIndex { index: 5, len: 2 })
    );
    assert_eq!(round.players[1].scores, vec![None, None]);
    assert!(round.record_score(1, 1, 4, &course, PointsScale::Standard).is_ok());
}
