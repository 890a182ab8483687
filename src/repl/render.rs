use std::fmt::Write;

use crate::model::leaderboard::{LeaderboardEntry, rank};
use crate::model::screen::Screen;
use crate::mvu::game::GameModel;

/// Plain-text rendering of whatever screen the model is on.
#[must_use]
pub fn render_screen(model: &GameModel) -> String {
    if model.screen.shows_results() {
        return render_final(model);
    }
    match model.screen {
        Screen::Setup => render_setup(model),
        Screen::Scorecard => render_scorecard(model),
        _ => render_home(),
    }
}

fn render_home() -> String {
    "Choose Game Type: 'singles' or 'team'".to_string()
}

fn render_setup(model: &GameModel) -> String {
    let mut out = String::from("Setup Game");
    if model.round.is_team_play {
        out.push_str(" (team)");
    }
    for (idx, player) in model.round.players.iter().enumerate() {
        let name = if player.display_name().is_empty() {
            "<no name>"
        } else {
            player.display_name()
        };
        let _ = write!(out, "\n  {}. {name}  handicap {}", idx + 1, player.handicap);
    }
    let remote = model.remote_players();
    if !remote.is_empty() {
        out.push_str("\nAlso in the store:");
        for doc in remote {
            let _ = write!(
                out,
                "\n  {}  handicap {}  {} pts",
                doc.player_name, doc.handicap, doc.total_score
            );
        }
    }
    out.push_str("\n'add', 'name N NAME', 'handicap N HCP', 'remove N', then 'continue'");
    out
}

fn render_scorecard(model: &GameModel) -> String {
    let hole = model.current_hole();
    let mut out = format!(
        "Hole {} of {} - Par {} - Stroke Index {}",
        hole.number,
        model.settings.course.len(),
        hole.par,
        hole.stroke_index
    );
    for (idx, player) in model.round.players.iter().enumerate() {
        let gross = player
            .scores
            .get(model.round.current_hole)
            .copied()
            .flatten()
            .map_or_else(|| "-".to_string(), |g| g.to_string());
        let points = model.hole_points(player, model.round.current_hole);
        let shot = if model.is_shot_hole(player) {
            "  *Shot Hole*"
        } else {
            ""
        };
        let _ = write!(
            out,
            "\n  {}. {}: {gross}  Stableford: {points}  (total {}){shot}",
            idx + 1,
            player.display_name(),
            model.player_total(player)
        );
    }
    out
}

fn render_final(model: &GameModel) -> String {
    let mut out = String::from(if model.screen == Screen::Final {
        "Final Scores"
    } else {
        "Leaderboard"
    });
    if model.round.is_team_play {
        let _ = write!(out, "\nTeam Score: {}", model.team_total());
    }
    out.push('\n');
    out.push_str(&render_leaderboard(&model.leaderboard));
    out
}

#[must_use]
pub fn render_leaderboard(entries: &[LeaderboardEntry]) -> String {
    if entries.is_empty() {
        return "No scores yet.".to_string();
    }
    let mut out = String::from("Pos  Player                Points");
    for row in rank(entries) {
        let _ = write!(
            out,
            "\n{:<4} {:<21} {}",
            row.position, row.entry.player_name, row.entry.total_score
        );
    }
    out
}
