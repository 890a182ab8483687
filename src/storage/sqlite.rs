use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, Row, params};
use std::path::Path;
use std::sync::{Arc, Mutex};

use super::subscription::{ChangeFeed, Subscription};
use super::{ScoreStore, StorageError};
use crate::model::leaderboard::{LeaderboardOrder, ScoreDocument};

const SCHEMA: &str = include_str!("../sql/schema/sqlite/00_scores.sql");

const UPSERT: &str = "INSERT INTO scores (player_name, handicap, scores, total_score, updated_at)
    VALUES (?1, ?2, ?3, ?4, ?5)
    ON CONFLICT(player_name) DO UPDATE SET
        handicap = excluded.handicap,
        scores = excluded.scores,
        total_score = excluded.total_score,
        updated_at = excluded.updated_at";

const SELECT_COLUMNS: &str =
    "SELECT player_name, handicap, scores, total_score, updated_at FROM scores";

/// Score store backed by a sqlite `scores` table.
#[derive(Clone)]
pub struct SqliteScoreStore {
    conn: Arc<Mutex<Connection>>,
    feed: ChangeFeed,
}

impl std::fmt::Debug for SqliteScoreStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteScoreStore").finish_non_exhaustive()
    }
}

impl SqliteScoreStore {
    /// Open (or create) the database file and make sure the table exists.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Backend` if the file cannot be opened or the
    /// schema cannot be applied.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        Self::with_connection(Connection::open(path)?)
    }

    /// # Errors
    ///
    /// Returns `StorageError::Backend` if the schema cannot be applied.
    pub fn open_in_memory() -> Result<Self, StorageError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, StorageError> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            feed: ChangeFeed::new(),
        })
    }

    async fn interact<T, F>(&self, f: F) -> Result<T, StorageError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T, StorageError> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let guard = conn
                .lock()
                .map_err(|e| StorageError::Backend(format!("connection lock poisoned: {e}")))?;
            f(&guard)
        })
        .await?
    }
}

fn row_to_document(row: &Row<'_>) -> rusqlite::Result<(ScoreDocument, String, String)> {
    let total: i64 = row.get(3)?;
    let doc = ScoreDocument {
        player_name: row.get(0)?,
        handicap: row.get(1)?,
        scores: Vec::new(),
        total_score: u32::try_from(total).unwrap_or_default(),
        updated_at: None,
    };
    Ok((doc, row.get(2)?, row.get(4)?))
}

fn decode(parts: (ScoreDocument, String, String)) -> Result<ScoreDocument, StorageError> {
    let (mut doc, scores, updated_at) = parts;
    doc.scores = serde_json::from_str(&scores)?;
    doc.updated_at = DateTime::parse_from_rfc3339(&updated_at)
        .ok()
        .map(|ts| ts.with_timezone(&Utc));
    Ok(doc)
}

#[async_trait]
impl ScoreStore for SqliteScoreStore {
    async fn upsert(&self, doc: &ScoreDocument) -> Result<(), StorageError> {
        let scores = serde_json::to_string(&doc.scores)?;
        let name = doc.player_name.clone();
        let handicap = doc.handicap;
        let total = i64::from(doc.total_score);
        let updated_at = Utc::now().to_rfc3339();
        self.interact(move |conn| {
            conn.execute(UPSERT, params![name, handicap, scores, total, updated_at])?;
            Ok(())
        })
        .await?;
        self.feed.notify();
        Ok(())
    }

    async fn get(&self, player_name: &str) -> Result<Option<ScoreDocument>, StorageError> {
        let name = player_name.to_string();
        self.interact(move |conn| {
            let query = format!("{SELECT_COLUMNS} WHERE player_name = ?1");
            let parts = conn
                .query_row(&query, params![name], row_to_document)
                .optional()?;
            parts.map(decode).transpose()
        })
        .await
    }

    async fn list(
        &self,
        order: Option<LeaderboardOrder>,
    ) -> Result<Vec<ScoreDocument>, StorageError> {
        self.interact(move |conn| {
            let query = match order {
                Some(order) => format!(
                    "{SELECT_COLUMNS} ORDER BY total_score {}, player_name ASC",
                    order.as_sql()
                ),
                None => format!("{SELECT_COLUMNS} ORDER BY rowid"),
            };
            let mut stmt = conn.prepare(&query)?;
            let rows = stmt.query_map([], row_to_document)?;
            rows.map(|row| decode(row?)).collect()
        })
        .await
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
