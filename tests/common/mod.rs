#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use rusty_stableford::model::leaderboard::{LeaderboardOrder, ScoreDocument};
use rusty_stableford::model::player::PlayerField;
use rusty_stableford::mvu::game::{Deps, GameModel, GameSettings, Msg};
use rusty_stableford::mvu::runtime::run_game;
use rusty_stableford::storage::subscription::ChangeFeed;
use rusty_stableford::storage::{
    MemoryScoreStore, MemorySnapshotStore, ScoreStore, StorageError, Subscription,
};

pub fn doc(name: &str, total: u32) -> ScoreDocument {
    ScoreDocument {
        player_name: name.to_string(),
        handicap: 0,
        scores: vec![None; 18],
        total_score: total,
        updated_at: None,
    }
}

/// Drive a fresh model to the setup screen with the given named players.
pub fn model_in_setup(players: &[(&str, i32)], snapshots: &MemorySnapshotStore) -> GameModel {
    let mut model = GameModel::new(GameSettings::default());
    let deps = Deps {
        snapshots,
        writer: None,
    };
    run_game(&mut model, Msg::ChooseGameType { team: false }, deps).expect("choose game type");
    for (idx, (name, handicap)) in players.iter().enumerate() {
        if idx > 0 {
            run_game(&mut model, Msg::AddPlayer, deps).expect("add player");
        }
        run_game(
            &mut model,
            Msg::UpdatePlayerInfo {
                index: idx,
                field: PlayerField::Name((*name).to_string()),
            },
            deps,
        )
        .expect("set name");
        run_game(
            &mut model,
            Msg::UpdatePlayerInfo {
                index: idx,
                field: PlayerField::Handicap(*handicap),
            },
            deps,
        )
        .expect("set handicap");
    }
    model
}

/// A store whose every call fails.
pub struct FailingStore;

#[async_trait]
impl ScoreStore for FailingStore {
    async fn upsert(&self, _doc: &ScoreDocument) -> Result<(), StorageError> {
        Err(StorageError::Backend("offline".into()))
    }

    async fn get(&self, _player_name: &str) -> Result<Option<ScoreDocument>, StorageError> {
        Err(StorageError::Backend("offline".into()))
    }

    async fn list(
        &self,
        _order: Option<LeaderboardOrder>,
    ) -> Result<Vec<ScoreDocument>, StorageError> {
        Err(StorageError::Backend("offline".into()))
    }

    async fn subscribe(
        &self,
        _order: Option<LeaderboardOrder>,
    ) -> Result<Subscription, StorageError> {
        Err(StorageError::Backend("offline".into()))
    }
}

pub fn failing_store() -> Arc<dyn ScoreStore> {
    Arc::new(FailingStore)
}

/// Memory store that counts every `list` call, subscription fetches included.
#[derive(Clone, Default)]
pub struct CountingStore {
    inner: MemoryScoreStore,
    feed: ChangeFeed,
    lists: Arc<AtomicUsize>,
}

impl CountingStore {
    pub fn lists(&self) -> usize {
        self.lists.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ScoreStore for CountingStore {
    async fn upsert(&self, doc: &ScoreDocument) -> Result<(), StorageError> {
        self.inner.upsert(doc).await?;
        self.feed.notify();
        Ok(())
    }

    async fn get(&self, player_name: &str) -> Result<Option<ScoreDocument>, StorageError> {
        self.inner.get(player_name).await
    }

    async fn list(
        &self,
        order: Option<LeaderboardOrder>,
    ) -> Result<Vec<ScoreDocument>, StorageError> {
        self.lists.fetch_add(1, Ordering::SeqCst);
        self.inner.list(order).await
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
