use ahash::AHashMap;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::{ScoreStore, StorageError};
use crate::model::leaderboard::ScoreDocument;

/// Observable result of one score upsert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    Saved { player: String },
    Failed { player: String, error: StorageError },
}

/// Background task that pushes score documents to the store.
///
/// Writes run one at a time, so there is never more than one write in flight
/// for a key. Documents queued behind an in-flight write are coalesced per
/// player name and only the latest one is written. Failures are reported on
/// the outcome channel and never retried.
#[derive(Debug)]
pub struct ScoreWriter {
    tx: mpsc::UnboundedSender<ScoreDocument>,
    task: JoinHandle<()>,
}

impl ScoreWriter {
    pub fn spawn(
        store: Arc<dyn ScoreStore>,
        outcomes: mpsc::UnboundedSender<WriteOutcome>,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(write_loop(store, rx, outcomes));
        Self { tx, task }
    }

    /// Queue a document. Fire-and-forget: the result arrives as a `WriteOutcome`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Closed` if the writer task is gone.
    pub fn submit(&self, doc: ScoreDocument) -> Result<(), StorageError> {
        self.tx.send(doc).map_err(|_| StorageError::Closed)
    }

    /// Stop accepting writes and wait until everything queued has been written.
    pub async fn close(self) {
        drop(self.tx);
        if let Err(e) = self.task.await {
            warn!(error = %e, "score writer task ended abnormally");
        }
    }
}

async fn write_loop(
    store: Arc<dyn ScoreStore>,
    mut rx: mpsc::UnboundedReceiver<ScoreDocument>,
    outcomes: mpsc::UnboundedSender<WriteOutcome>,
) {
    while let Some(first) = rx.recv().await {
        let mut order: Vec<String> = Vec::new();
        let mut latest: AHashMap<String, ScoreDocument> = AHashMap::new();
        let mut queued = 0usize;

        let mut push = |doc: ScoreDocument| {
            queued += 1;
            if !latest.contains_key(doc.key()) {
                order.push(doc.player_name.clone());
            }
            latest.insert(doc.player_name.clone(), doc);
        };
        push(first);
        while let Ok(doc) = rx.try_recv() {
            push(doc);
        }
        if queued > order.len() {
            debug!(queued, writes = order.len(), "coalesced queued score writes");
        }

        for key in order {
            let Some(doc) = latest.remove(&key) else {
                continue;
            };
            let outcome = match store.upsert(&doc).await {
                Ok(()) => {
                    info!(player = %doc.player_name, total = doc.total_score, "score saved");
                    WriteOutcome::Saved { player: key }
                }
                Err(error) => {
                    warn!(player = %doc.player_name, error = %error, "score write failed");
                    WriteOutcome::Failed { player: key, error }
                }
            };
            // nobody listening is fine, the write itself already happened
            let _ = outcomes.send(outcome);
        }
    }
    debug!("score writer stopped");
}
