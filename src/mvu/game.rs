use tracing::{debug, info, warn};

use super::error::AppError;
use crate::model::course::{Course, Hole};
use crate::model::leaderboard::{LeaderboardEntry, LeaderboardOrder, ScoreDocument};
use crate::model::player::{Player, PlayerField};
use crate::model::round::{HoleStep, Round};
use crate::model::screen::{MenuTarget, Screen};
use crate::model::stableford::{
    PointsScale, player_total, receives_stroke, stableford_points_with_scale, team_total,
};
use crate::storage::snapshot::{GameSnapshot, SNAPSHOT_KEY, SnapshotParts, SnapshotStore};
use crate::storage::writer::ScoreWriter;

/// Fixed inputs of a session.
#[derive(Debug, Clone, Default)]
pub struct GameSettings {
    pub course: Course,
    pub scale: PointsScale,
    pub order: LeaderboardOrder,
}

#[derive(Debug, Clone)]
pub struct GameModel {
    pub settings: GameSettings,
    pub round: Round,
    pub screen: Screen,
    /// Ordered leaderboard as last delivered by the store.
    pub leaderboard: Vec<LeaderboardEntry>,
    /// Raw `scores` collection, kept only when roster sync is on.
    pub roster: Vec<ScoreDocument>,
    /// Last error to show the user. Cleared by the next user action.
    pub error: Option<AppError>,
    pub last_saved: Option<String>,
    pub failed_writes: usize,
}

impl GameModel {
    #[must_use]
    pub fn new(settings: GameSettings) -> Self {
        let round = Round::new(settings.course.len());
        Self {
            settings,
            round,
            screen: Screen::Home,
            leaderboard: Vec::new(),
            roster: Vec::new(),
            error: None,
            last_saved: None,
            failed_writes: 0,
        }
    }

    /// Rebuild the model from a leniently decoded snapshot. A restored
    /// scorecard that fails the setup guard is sent back to setup.
    #[must_use]
    pub fn from_snapshot(settings: GameSettings, parts: SnapshotParts) -> Self {
        let hole_count = settings.course.len();
        let round = match parts.players {
            Some(players) => {
                Round::from_parts(players, parts.current_hole, parts.is_team_play, hole_count)
            }
            None => {
                let mut round = Round::new(hole_count);
                round.is_team_play = parts.is_team_play;
                round
            }
        };

        let mut screen = parts.tab;
        if screen == Screen::Scorecard
            && let Err(e) = round.validate_players()
        {
            warn!(error = %e, "restored scorecard has invalid players, returning to setup");
            screen = Screen::Setup;
        }

        Self {
            screen,
            round,
            ..Self::new(settings)
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            players: self.round.players.clone(),
            current_hole: self.round.current_hole,
            tab: self.screen,
            is_team_play: self.round.is_team_play,
        }
    }

    #[must_use]
    pub fn current_hole(&self) -> &Hole {
        // current_hole is kept in range by Round
        &self.settings.course.holes()[self.round.current_hole]
    }

    #[must_use]
    pub fn hole_points(&self, player: &Player, hole_index: usize) -> u8 {
        self.settings.course.hole(hole_index).map_or(0, |hole| {
            stableford_points_with_scale(
                player.scores.get(hole_index).copied().flatten(),
                hole.par,
                player.handicap,
                hole.stroke_index,
                self.settings.scale,
            )
        })
    }

    #[must_use]
    pub fn is_shot_hole(&self, player: &Player) -> bool {
        receives_stroke(player.handicap, self.current_hole().stroke_index)
    }

    #[must_use]
    pub fn player_total(&self, player: &Player) -> u32 {
        player_total(player, &self.settings.course, self.settings.scale)
    }

    /// Documents in the raw collection that belong to nobody in this round,
    /// in store order.
    #[must_use]
    pub fn remote_players(&self) -> Vec<&ScoreDocument> {
        self.roster
            .iter()
            .filter(|doc| {
                !self
                    .round
                    .players
                    .iter()
                    .any(|p| p.display_name() == doc.key())
            })
            .collect()
    }

    #[must_use]
    pub fn team_total(&self) -> u32 {
        team_total(&self.round.players, &self.settings.course, self.settings.scale)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    ChooseGameType { team: bool },
    AddPlayer,
    RemovePlayer(usize),
    UpdatePlayerInfo { index: usize, field: PlayerField },
    ContinueToScoring,
    BackToHome,
    RecordScore { player: usize, hole: usize, score: i32 },
    NextHole,
    PrevHole,
    BackToSetup,
    Navigate(MenuTarget),
    ResetRound,
    LeaderboardReplaced(Vec<LeaderboardEntry>),
    RosterReplaced(Vec<ScoreDocument>),
    UpsertQueued { player: String },
    ScoreSaved { player: String },
    PersistenceFailed(AppError),
    SnapshotSaved,
    Failed(AppError),
}

impl Msg {
    /// Messages that come from the person using the app, as opposed to
    /// results of effects or store callbacks.
    #[must_use]
    pub fn is_user_action(&self) -> bool {
        !matches!(
            self,
            Msg::LeaderboardReplaced(_)
                | Msg::RosterReplaced(_)
                | Msg::UpsertQueued { .. }
                | Msg::ScoreSaved { .. }
                | Msg::PersistenceFailed(_)
                | Msg::SnapshotSaved
                | Msg::Failed(_)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    SaveSnapshot,
    UpsertScore(ScoreDocument),
}

fn reject(model: &mut GameModel, err: AppError) -> Vec<Effect> {
    debug!(code = err.code(), error = %err, "action rejected");
    model.error = Some(err);
    vec![]
}

fn require_screen(model: &GameModel, screen: Screen, action: &'static str) -> Result<(), AppError> {
    if model.screen == screen {
        Ok(())
    } else {
        Err(AppError::WrongScreen {
            action,
            screen: model.screen,
        })
    }
}

fn enter_screen(model: &mut GameModel, screen: Screen) -> Vec<Effect> {
    if model.screen == screen {
        return vec![];
    }
    info!(from = %model.screen, to = %screen, "screen change");
    model.screen = screen;
    vec![Effect::SaveSnapshot]
}

/// Apply one message. Rejected actions leave the round and screen untouched
/// and set `model.error`.
pub fn update(model: &mut GameModel, msg: Msg) -> Vec<Effect> {
    if msg.is_user_action() {
        model.error = None;
    }

    match msg {
        Msg::ChooseGameType { team } => {
            if let Err(e) = require_screen(model, Screen::Home, "choosing a game type") {
                return reject(model, e);
            }
            model.round.is_team_play = team;
            model.screen = Screen::Setup;
            vec![Effect::SaveSnapshot]
        }
        Msg::AddPlayer => {
            if let Err(e) = require_screen(model, Screen::Setup, "adding a player") {
                return reject(model, e);
            }
            model.round.add_player();
            vec![Effect::SaveSnapshot]
        }
        Msg::RemovePlayer(index) => {
            if let Err(e) = require_screen(model, Screen::Setup, "removing a player") {
                return reject(model, e);
            }
            match model.round.remove_player(index) {
                Ok(_) => vec![Effect::SaveSnapshot],
                Err(e) => reject(model, e),
            }
        }
        Msg::UpdatePlayerInfo { index, field } => {
            if let Err(e) = require_screen(model, Screen::Setup, "editing a player") {
                return reject(model, e);
            }
            match model.round.update_player_info(index, field) {
                Ok(()) => vec![Effect::SaveSnapshot],
                Err(e) => reject(model, e),
            }
        }
        Msg::ContinueToScoring => {
            if let Err(e) = require_screen(model, Screen::Setup, "continuing to scoring") {
                return reject(model, e);
            }
            go_to_scorecard(model)
        }
        Msg::BackToHome => {
            if let Err(e) = require_screen(model, Screen::Setup, "going back") {
                return reject(model, e);
            }
            enter_screen(model, Screen::Home)
        }
        Msg::RecordScore {
            player,
            hole,
            score,
        } => {
            if let Err(e) = require_screen(model, Screen::Scorecard, "recording a score") {
                return reject(model, e);
            }
            let GameSettings { course, scale, .. } = &model.settings;
            match model.round.record_score(player, hole, score, course, *scale) {
                Ok(doc) => vec![Effect::SaveSnapshot, Effect::UpsertScore(doc)],
                Err(e) => reject(model, e),
            }
        }
        Msg::NextHole => {
            if let Err(e) = require_screen(model, Screen::Scorecard, "moving to the next hole") {
                return reject(model, e);
            }
            match model.round.advance_hole() {
                HoleStep::Moved(_) => vec![Effect::SaveSnapshot],
                HoleStep::PastLastHole => enter_screen(model, Screen::Final),
            }
        }
        Msg::PrevHole => {
            if let Err(e) = require_screen(model, Screen::Scorecard, "moving to the previous hole")
            {
                return reject(model, e);
            }
            let before = model.round.current_hole;
            if model.round.retreat_hole() == before {
                vec![]
            } else {
                vec![Effect::SaveSnapshot]
            }
        }
        Msg::BackToSetup => {
            if let Err(e) = require_screen(model, Screen::Scorecard, "going back to setup") {
                return reject(model, e);
            }
            enter_screen(model, Screen::Setup)
        }
        Msg::Navigate(target) => match target {
            MenuTarget::Scorecard => go_to_scorecard(model),
            other => enter_screen(model, other.screen()),
        },
        Msg::ResetRound => {
            info!("starting a new round");
            let is_team_play = model.round.is_team_play;
            model.round = Round::new(model.settings.course.len());
            model.round.is_team_play = is_team_play;
            model.screen = Screen::Home;
            vec![Effect::SaveSnapshot]
        }
        Msg::LeaderboardReplaced(entries) => {
            model.leaderboard = entries;
            vec![]
        }
        Msg::RosterReplaced(docs) => {
            model.roster = docs;
            vec![]
        }
        Msg::UpsertQueued { player } => {
            debug!(player = %player, "score upsert queued");
            vec![]
        }
        Msg::ScoreSaved { player } => {
            model.last_saved = Some(player);
            vec![]
        }
        Msg::PersistenceFailed(e) => {
            model.failed_writes += 1;
            model.error = Some(e);
            vec![]
        }
        Msg::SnapshotSaved => vec![],
        Msg::Failed(e) => {
            model.error = Some(e);
            vec![]
        }
    }
}

/// The single path onto the scorecard; every caller goes through the guard.
fn go_to_scorecard(model: &mut GameModel) -> Vec<Effect> {
    if let Err(e) = model.round.validate_players() {
        return reject(model, e);
    }
    enter_screen(model, Screen::Scorecard)
}

#[derive(Clone, Copy)]
pub struct Deps<'a> {
    pub snapshots: &'a dyn SnapshotStore,
    pub writer: Option<&'a ScoreWriter>,
}

pub fn run_effect(effect: Effect, model: &GameModel, deps: Deps<'_>) -> Msg {
    match effect {
        Effect::SaveSnapshot => {
            let saved = model
                .snapshot()
                .encode()
                .and_then(|blob| deps.snapshots.save(SNAPSHOT_KEY, &blob));
            match saved {
                Ok(()) => Msg::SnapshotSaved,
                Err(e) => {
                    warn!(error = %e, "saving snapshot failed");
                    Msg::Failed(AppError::Snapshot(e.to_string()))
                }
            }
        }
        Effect::UpsertScore(doc) => {
            let player = doc.player_name.clone();
            let Some(writer) = deps.writer else {
                return Msg::PersistenceFailed(AppError::PersistenceWriteFailed {
                    player,
                    reason: "no score store attached".into(),
                });
            };
            match writer.submit(doc) {
                Ok(()) => Msg::UpsertQueued { player },
                Err(e) => {
                    warn!(player = %player, error = %e, "could not queue score write");
                    Msg::PersistenceFailed(AppError::PersistenceWriteFailed {
                        player,
                        reason: e.to_string(),
                    })
                }
            }
        }
    }
}
