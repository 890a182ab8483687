use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::subscription::{ChangeFeed, Subscription};
use super::{ScoreStore, StorageError};
use crate::model::leaderboard::{LeaderboardOrder, ScoreDocument};

/// In-process score store. Documents keep their first-insert position for the
/// raw listing.
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    docs: Arc<RwLock<Vec<ScoreDocument>>>,
    feed: ChangeFeed,
}

impl MemoryScoreStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.docs.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.docs.read().await.is_empty()
    }
}

#[async_trait]
impl ScoreStore for MemoryScoreStore {
    async fn upsert(&self, doc: &ScoreDocument) -> Result<(), StorageError> {
        let mut stored = doc.clone();
        stored.updated_at = Some(Utc::now());
        {
            let mut docs = self.docs.write().await;
            match docs.iter_mut().find(|d| d.player_name == doc.player_name) {
                Some(existing) => *existing = stored,
                None => docs.push(stored),
            }
        }
        self.feed.notify();
        Ok(())
    }

    async fn get(&self, player_name: &str) -> Result<Option<ScoreDocument>, StorageError> {
        let docs = self.docs.read().await;
        Ok(docs.iter().find(|d| d.player_name == player_name).cloned())
    }

    async fn list(
        &self,
        order: Option<LeaderboardOrder>,
    ) -> Result<Vec<ScoreDocument>, StorageError> {
        let mut docs = self.docs.read().await.clone();
        if let Some(order) = order {
            order.sort(&mut docs);
        }
        Ok(docs)
    }

    async fn subscribe(
        &self,
        order: Option<LeaderboardOrder>,
    ) -> Result<Subscription, StorageError> {
        let store = self.clone();
        Ok(Subscription::spawn(self.feed.watch(), move || {
            let store = store.clone();
            async move { store.list(order).await }
        }))
    }
}
