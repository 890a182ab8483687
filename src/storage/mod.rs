pub mod memory;
pub mod snapshot;
pub mod sqlite;
pub mod subscription;
pub mod writer;

use async_trait::async_trait;
use thiserror::Error;

use crate::model::leaderboard::{LeaderboardOrder, ScoreDocument};
pub use memory::MemoryScoreStore;
pub use snapshot::{FileSnapshotStore, MemorySnapshotStore, SnapshotStore};
pub use sqlite::SqliteScoreStore;
pub use subscription::Subscription;
pub use writer::{ScoreWriter, WriteOutcome};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("backend error: {0}")]
    Backend(String),
    #[error("encode error: {0}")]
    Encode(String),
    #[error("io error: {0}")]
    Io(String),
    #[error("store is closed")]
    Closed,
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Backend(err.to_string())
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        Self::Encode(err.to_string())
    }
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<tokio::task::JoinError> for StorageError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::Backend(err.to_string())
    }
}

/// Document store for per-player score documents in the `scores` collection.
///
/// `order` selects the ordered leaderboard query (`Some`) or the raw collection
/// in insertion order (`None`).
#[async_trait]
pub trait ScoreStore: Send + Sync {
    /// Full overwrite of the document keyed by `doc.player_name`.
    async fn upsert(&self, doc: &ScoreDocument) -> Result<(), StorageError>;
    async fn get(&self, player_name: &str) -> Result<Option<ScoreDocument>, StorageError>;
    async fn list(&self, order: Option<LeaderboardOrder>)
    -> Result<Vec<ScoreDocument>, StorageError>;
    /// Stream a full snapshot of the collection now and after every write.
    async fn subscribe(&self, order: Option<LeaderboardOrder>)
    -> Result<Subscription, StorageError>;
}
