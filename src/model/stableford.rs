use serde::{Deserialize, Serialize};
use tracing::warn;

use super::course::Course;
use super::player::Player;

pub const MAX_POINTS: u8 = 6;

/// How far above par-minus-two the points scale extends.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum PointsScale {
    /// 2 points for net par, one more per stroke under, up to 6.
    #[default]
    Standard,
    /// Same as `Standard`, but albatross or better is flat 5 points.
    #[value(name = "capped_at_five")]
    CappedAtFive,
}

/// A player gets one stroke of relief on every hole whose stroke index is at
/// or below their handicap.
#[must_use]
pub fn receives_stroke(handicap: i32, stroke_index: u8) -> bool {
    handicap >= i32::from(stroke_index)
}

#[must_use]
pub fn stableford_points_with_scale(
    gross: Option<u32>,
    par: u8,
    handicap: i32,
    stroke_index: u8,
    scale: PointsScale,
) -> u8 {
    let Some(gross) = gross else {
        return 0;
    };

    let strokes = i64::from(receives_stroke(handicap, stroke_index));
    let net = i64::from(gross) - strokes;
    let diff = net - i64::from(par);

    let points = (2 - diff).clamp(0, i64::from(MAX_POINTS));
    let points = match scale {
        PointsScale::Standard => points,
        PointsScale::CappedAtFive => points.min(5),
    };
    // clamped to 0..=6 above
    u8::try_from(points).unwrap_or(0)
}

#[must_use]
pub fn stableford_points(gross: Option<u32>, par: u8, handicap: i32, stroke_index: u8) -> u8 {
    stableford_points_with_scale(gross, par, handicap, stroke_index, PointsScale::default())
}

/// Sum of per-hole points for one score line.
///
/// A score line that does not match the course length is tolerated: missing
/// holes count as absent, extra entries are ignored.
#[must_use]
pub fn round_total(
    scores: &[Option<u32>],
    course: &Course,
    handicap: i32,
    scale: PointsScale,
) -> u32 {
    if scores.len() != course.len() {
        warn!(
            scores = scores.len(),
            holes = course.len(),
            "score line length does not match course"
        );
    }

    course
        .holes()
        .iter()
        .enumerate()
        .map(|(idx, hole)| {
            let gross = scores.get(idx).copied().flatten();
            u32::from(stableford_points_with_scale(
                gross,
                hole.par,
                handicap,
                hole.stroke_index,
                scale,
            ))
        })
        .sum()
}

#[must_use]
pub fn player_total(player: &Player, course: &Course, scale: PointsScale) -> u32 {
    round_total(&player.scores, course, player.handicap, scale)
}

/// Combined points of every player, shown on the final screen for team play.
#[must_use]
pub fn team_total(players: &[Player], course: &Course, scale: PointsScale) -> u32 {
    players
        .iter()
        .map(|p| player_total(p, course, scale))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diff_table_standard() {
        // par 4, no relief (hcp 0, SI 1)
        let expected = [(8, 0), (7, 0), (6, 0), (5, 1), (4, 2), (3, 3), (2, 4), (1, 5)];
        for (gross, pts) in expected {
            assert_eq!(stableford_points(Some(gross), 4, 0, 1), pts, "gross {gross}");
        }
        // par 5, gross 1 is diff -4
        assert_eq!(stableford_points(Some(1), 5, 0, 1), 6);
        assert_eq!(stableford_points(Some(0), 5, 0, 1), 6);
    }

    #[test]
    fn capped_scale_flattens_albatross() {
        let scale = PointsScale::CappedAtFive;
        assert_eq!(stableford_points_with_scale(Some(1), 5, 0, 1, scale), 5);
        assert_eq!(stableford_points_with_scale(Some(2), 5, 0, 1, scale), 5);
        assert_eq!(stableford_points_with_scale(Some(3), 5, 0, 1, scale), 4);
    }
}
