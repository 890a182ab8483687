use std::collections::HashSet;

use super::course::Course;
use super::leaderboard::ScoreDocument;
use super::player::{Player, PlayerField};
use super::stableford::{PointsScale, player_total};
use crate::mvu::error::AppError;

/// Result of moving the hole pointer forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoleStep {
    Moved(usize),
    PastLastHole,
}

/// The in-progress round: players in display order, the hole being scored and
/// the singles/team flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    pub players: Vec<Player>,
    pub current_hole: usize,
    pub is_team_play: bool,
    hole_count: usize,
}

impl Round {
    /// A fresh round starts with one unnamed player.
    #[must_use]
    pub fn new(hole_count: usize) -> Self {
        Self {
            players: vec![Player::new(hole_count)],
            current_hole: 0,
            is_team_play: false,
            hole_count,
        }
    }

    /// Rebuild a round from restored parts, repairing anything that breaks the
    /// length and range invariants.
    #[must_use]
    pub fn from_parts(
        mut players: Vec<Player>,
        current_hole: usize,
        is_team_play: bool,
        hole_count: usize,
    ) -> Self {
        for player in &mut players {
            if player.fit_scores(hole_count) {
                tracing::warn!(player = %player.name, hole_count, "resized restored score line");
            }
        }
        let last = hole_count.saturating_sub(1);
        Self {
            players,
            current_hole: current_hole.min(last),
            is_team_play,
            hole_count,
        }
    }

    #[must_use]
    pub fn hole_count(&self) -> usize {
        self.hole_count
    }

    pub fn add_player(&mut self) -> usize {
        self.players.push(Player::new(self.hole_count));
        self.players.len() - 1
    }

    /// # Errors
    ///
    /// Returns `AppError::InvalidPlayerIndex` if `index` is out of range.
    pub fn remove_player(&mut self, index: usize) -> Result<Player, AppError> {
        self.check_player(index)?;
        Ok(self.players.remove(index))
    }

    /// Set a name or handicap. Values are not validated here; see
    /// [`Round::validate_players`].
    ///
    /// # Errors
    ///
    /// Returns `AppError::InvalidPlayerIndex` if `index` is out of range.
    pub fn update_player_info(&mut self, index: usize, field: PlayerField) -> Result<(), AppError> {
        self.check_player(index)?;
        let player = &mut self.players[index];
        match field {
            PlayerField::Name(name) => player.name = name,
            PlayerField::Handicap(handicap) => player.handicap = handicap,
        }
        Ok(())
    }

    /// Record a gross score and return the player's document for the store.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NegativeScore` for `score < 0` and an index error for
    /// an unknown player or hole, including a hole past the end of a score
    /// line that was pushed short. Nothing is mutated on error.
    pub fn record_score(
        &mut self,
        player_index: usize,
        hole_index: usize,
        score: i32,
        course: &Course,
        scale: PointsScale,
    ) -> Result<ScoreDocument, AppError> {
        let gross = u32::try_from(score).map_err(|_| AppError::NegativeScore(score))?;
        self.check_player(player_index)?;
        if hole_index >= self.hole_count {
            return Err(AppError::InvalidHoleIndex {
                index: hole_index,
                len: self.hole_count,
            });
        }

        let player = &mut self.players[player_index];
        let len = player.scores.len();
        let Some(slot) = player.scores.get_mut(hole_index) else {
            return Err(AppError::InvalidHoleIndex {
                index: hole_index,
                len,
            });
        };
        *slot = Some(gross);
        Ok(score_document(player, course, scale))
    }

    pub fn advance_hole(&mut self) -> HoleStep {
        if self.current_hole + 1 < self.hole_count {
            self.current_hole += 1;
            HoleStep::Moved(self.current_hole)
        } else {
            HoleStep::PastLastHole
        }
    }

    pub fn retreat_hole(&mut self) -> usize {
        self.current_hole = self.current_hole.saturating_sub(1);
        self.current_hole
    }

    /// At least one player is required. Every player needs a non-blank name, a
    /// handicap of at least zero and a name no other player uses, since the
    /// name keys the score document.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` describing the first offending player.
    pub fn validate_players(&self) -> Result<(), AppError> {
        if self.players.is_empty() {
            return Err(AppError::Validation("add at least one player".into()));
        }
        let mut names = HashSet::new();
        for (idx, player) in self.players.iter().enumerate() {
            let name = player.name.trim();
            if name.is_empty() {
                return Err(AppError::Validation(format!(
                    "player {} needs a name",
                    idx + 1
                )));
            }
            if player.handicap < 0 {
                return Err(AppError::Validation(format!(
                    "{name} has a negative handicap ({})",
                    player.handicap
                )));
            }
            if !names.insert(name) {
                return Err(AppError::Validation(format!(
                    "more than one player is named {name}"
                )));
            }
        }
        Ok(())
    }

    fn check_player(&self, index: usize) -> Result<(), AppError> {
        if index < self.players.len() {
            Ok(())
        } else {
            Err(AppError::InvalidPlayerIndex {
                index,
                len: self.players.len(),
            })
        }
    }
}

#[must_use]
pub fn score_document(player: &Player, course: &Course, scale: PointsScale) -> ScoreDocument {
    ScoreDocument {
        player_name: player.display_name().to_string(),
        handicap: player.handicap,
        scores: player.scores.clone(),
        total_score: player_total(player, course, scale),
        updated_at: None,
    }
}
