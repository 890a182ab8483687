use futures::future::join_all;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::model::leaderboard::ScoreDocument;
use crate::mvu::error::AppError;
use crate::mvu::game::{Deps, GameModel, GameSettings, Msg};
use crate::mvu::runtime::run_game;
use crate::storage::snapshot::{GameSnapshot, SNAPSHOT_KEY, SnapshotStore};
use crate::storage::subscription::Subscription;
use crate::storage::writer::{ScoreWriter, WriteOutcome};
use crate::storage::{ScoreStore, StorageError};

/// Owns the model and every asynchronous resource tied to it. All mutation
/// goes through [`Session::dispatch`], one message at a time.
pub struct Session {
    model: GameModel,
    snapshots: Arc<dyn SnapshotStore>,
    writer: Option<ScoreWriter>,
    outcomes: mpsc::UnboundedReceiver<WriteOutcome>,
    leaderboard: Option<Subscription>,
    roster: Option<Subscription>,
}

impl Session {
    /// Restore the saved round (if any), subscribe to the leaderboard and start
    /// the score writer. Store problems are logged and recorded on the model;
    /// they never stop the session from starting.
    pub async fn start(
        settings: GameSettings,
        store: Arc<dyn ScoreStore>,
        snapshots: Arc<dyn SnapshotStore>,
        sync_roster: bool,
    ) -> Self {
        let mut model = restore_model(settings, snapshots.as_ref());
        let order = model.settings.order;

        let leaderboard = match store.subscribe(Some(order)).await {
            Ok(sub) => Some(sub),
            Err(e) => {
                warn!(error = %e, "leaderboard subscription failed");
                model.error = Some(AppError::SubscribeFailed(e.to_string()));
                None
            }
        };
        let roster = if sync_roster {
            match store.subscribe(None).await {
                Ok(sub) => Some(sub),
                Err(e) => {
                    warn!(error = %e, "roster subscription failed");
                    model.error = Some(AppError::SubscribeFailed(e.to_string()));
                    None
                }
            }
        } else {
            None
        };

        let (outcome_tx, outcomes) = mpsc::unbounded_channel();
        let writer = ScoreWriter::spawn(store, outcome_tx);
        info!(
            screen = %model.screen,
            players = model.round.players.len(),
            order = %order,
            "session started"
        );

        Self {
            model,
            snapshots,
            writer: Some(writer),
            outcomes,
            leaderboard,
            roster,
        }
    }

    #[must_use]
    pub fn model(&self) -> &GameModel {
        &self.model
    }

    /// Handle one message and every effect it triggers.
    ///
    /// # Errors
    ///
    /// Returns the user-visible error raised by this message, if any.
    pub fn dispatch(&mut self, msg: Msg) -> Result<(), AppError> {
        let deps = Deps {
            snapshots: self.snapshots.as_ref(),
            writer: self.writer.as_ref(),
        };
        run_game(&mut self.model, msg, deps)
    }

    /// Apply every store delivery and write outcome that has already arrived.
    /// Returns how many messages were applied.
    pub fn pump(&mut self) -> usize {
        let mut pending = Vec::new();
        while let Some(snapshot) = self.leaderboard.as_mut().and_then(Subscription::try_next) {
            pending.push(snapshot_msg(snapshot, Msg::LeaderboardReplaced));
        }
        while let Some(snapshot) = self.roster.as_mut().and_then(Subscription::try_next) {
            pending.push(snapshot_msg(snapshot, Msg::RosterReplaced));
        }
        while let Ok(outcome) = self.outcomes.try_recv() {
            pending.push(outcome_msg(outcome));
        }

        let applied = pending.len();
        for msg in pending {
            // already logged and recorded on the model
            let _ = self.dispatch(msg);
        }
        applied
    }

    /// Wait for the next leaderboard delivery and apply it.
    /// Returns false once the subscription is gone.
    pub async fn next_leaderboard(&mut self) -> bool {
        let Some(sub) = self.leaderboard.as_mut() else {
            return false;
        };
        match sub.next().await {
            Some(snapshot) => {
                let _ = self.dispatch(snapshot_msg(snapshot, Msg::LeaderboardReplaced));
                true
            }
            None => false,
        }
    }

    /// Wait for the next roster delivery and apply it.
    pub async fn next_roster(&mut self) -> bool {
        let Some(sub) = self.roster.as_mut() else {
            return false;
        };
        match sub.next().await {
            Some(snapshot) => {
                let _ = self.dispatch(snapshot_msg(snapshot, Msg::RosterReplaced));
                true
            }
            None => false,
        }
    }

    /// Wait for the next write outcome, apply it and hand it back.
    pub async fn next_write_outcome(&mut self) -> Option<WriteOutcome> {
        let outcome = self.outcomes.recv().await?;
        let _ = self.dispatch(outcome_msg(outcome.clone()));
        Some(outcome)
    }

    /// Flush queued writes, release both subscriptions and return the final
    /// model. Nothing touches the model after this returns.
    pub async fn shutdown(mut self) -> GameModel {
        if let Some(writer) = self.writer.take() {
            writer.close().await;
        }
        while let Ok(outcome) = self.outcomes.try_recv() {
            let _ = self.dispatch(outcome_msg(outcome));
        }
        let subscriptions = [self.leaderboard.take(), self.roster.take()];
        join_all(
            subscriptions
                .into_iter()
                .flatten()
                .map(|mut sub| async move { sub.cancel().await }),
        )
        .await;
        info!("session closed");
        self.model
    }
}

fn restore_model(settings: GameSettings, snapshots: &dyn SnapshotStore) -> GameModel {
    match snapshots.load(SNAPSHOT_KEY) {
        Ok(Some(blob)) => {
            let parts = GameSnapshot::decode_lenient(&blob);
            GameModel::from_snapshot(settings, parts)
        }
        Ok(None) => GameModel::new(settings),
        Err(e) => {
            warn!(error = %e, "could not read saved round, starting fresh");
            GameModel::new(settings)
        }
    }
}

fn snapshot_msg(
    snapshot: Result<Vec<ScoreDocument>, StorageError>,
    wrap: fn(Vec<ScoreDocument>) -> Msg,
) -> Msg {
    match snapshot {
        Ok(docs) => wrap(docs),
        Err(e) => {
            warn!(error = %e, "subscription delivery failed");
            Msg::Failed(AppError::SubscribeFailed(e.to_string()))
        }
    }
}

fn outcome_msg(outcome: WriteOutcome) -> Msg {
    match outcome {
        WriteOutcome::Saved { player } => Msg::ScoreSaved { player },
        WriteOutcome::Failed { player, error } => {
            Msg::PersistenceFailed(AppError::PersistenceWriteFailed {
                player,
                reason: error.to_string(),
            })
        }
    }
}
