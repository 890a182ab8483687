use std::future::Future;
use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::StorageError;
use crate::model::leaderboard::ScoreDocument;

pub type Snapshot = Result<Vec<ScoreDocument>, StorageError>;

const SNAPSHOT_BUFFER: usize = 16;

/// Bumped by a store after every accepted write; subscriptions wait on it.
#[derive(Debug, Clone)]
pub struct ChangeFeed {
    tx: Arc<watch::Sender<u64>>,
}

impl ChangeFeed {
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(0);
        Self { tx: Arc::new(tx) }
    }

    pub fn notify(&self) {
        self.tx.send_modify(|version| *version = version.wrapping_add(1));
    }

    #[must_use]
    pub fn watch(&self) -> watch::Receiver<u64> {
        self.tx.subscribe()
    }
}

impl Default for ChangeFeed {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle to a live query. Every delivery is the whole collection, never a
/// diff. Dropping the handle stops the background task.
#[derive(Debug)]
pub struct Subscription {
    rx: mpsc::Receiver<Snapshot>,
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl Subscription {
    /// Spawn the query loop: fetch once, then again after each change.
    pub fn spawn<F, Fut>(mut changes: watch::Receiver<u64>, fetch: F) -> Self
    where
        F: Fn() -> Fut + Send + 'static,
        Fut: Future<Output = Snapshot> + Send + 'static,
    {
        let (tx, rx) = mpsc::channel(SNAPSHOT_BUFFER);
        let cancel = CancellationToken::new();
        let token = cancel.clone();

        let task = tokio::spawn(async move {
            if tx.send(fetch().await).await.is_err() {
                return;
            }
            loop {
                tokio::select! {
                    biased;
                    () = token.cancelled() => break,
                    changed = changes.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        let snapshot = fetch().await;
                        if token.is_cancelled() || tx.send(snapshot).await.is_err() {
                            break;
                        }
                    }
                }
            }
            debug!("subscription stopped");
        });

        Self {
            rx,
            cancel,
            task: Some(task),
        }
    }

    /// Wait for the next snapshot. `None` once the subscription is closed.
    pub async fn next(&mut self) -> Option<Snapshot> {
        if self.cancel.is_cancelled() {
            return None;
        }
        self.rx.recv().await
    }

    /// Take a snapshot that is already waiting, without blocking.
    pub fn try_next(&mut self) -> Option<Snapshot> {
        if self.cancel.is_cancelled() {
            return None;
        }
        self.rx.try_recv().ok()
    }

    /// Stop the background task and wait for it to finish. Idempotent.
    pub async fn cancel(&mut self) {
        self.cancel.cancel();
        self.rx.close();
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
