use chrono::{DateTime, Utc};
use maud::{Markup, html};

use crate::model::leaderboard::{LeaderboardEntry, LeaderboardOrder, rank};

fn last_update(entries: &[LeaderboardEntry]) -> Option<DateTime<Utc>> {
    entries.iter().filter_map(|e| e.updated_at).max()
}

#[must_use]
pub fn render_leaderboard(entries: &[LeaderboardEntry], order: LeaderboardOrder) -> Markup {
    html! {
        h2 { "Leaderboard" }
        @if entries.is_empty() {
            p { "No scores yet." }
        } @else {
            table class="styled-table" {
                thead {
                    tr {
                        th { "Position" }
                        th { "Player" }
                        th { "Handicap" }
                        th { "Holes" }
                        th { "Stableford Points" }
                    }
                }
                tbody {
                    @for row in rank(entries) {
                        tr {
                            td { (row.position) }
                            td { (row.entry.player_name) }
                            td { (row.entry.handicap) }
                            td { (row.entry.scores.iter().filter(|s| s.is_some()).count()) }
                            td { (row.entry.total_score) }
                        }
                    }
                }
            }
            p class="refresh" {
                "Sorted by points, " (order) "."
                @if let Some(ts) = last_update(entries) {
                    " Last update " (ts.format("%H:%M:%S UTC")) "."
                }
            }
        }
    }
}

/// Final results: optional team total followed by the leaderboard.
#[must_use]
pub fn render_final_scores(
    entries: &[LeaderboardEntry],
    order: LeaderboardOrder,
    team_total: Option<u32>,
) -> Markup {
    html! {
        h1 { "Final Scores" }
        @if let Some(total) = team_total {
            h2 { "Team Score: " (total) }
        }
        (render_leaderboard(entries, order))
    }
}
