use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tracing::warn;

use super::StorageError;
use crate::model::player::Player;
use crate::model::screen::Screen;

/// Key under which the in-progress round is saved.
pub const SNAPSHOT_KEY: &str = "golfGame";

/// Local blob store used to resume an in-progress round.
pub trait SnapshotStore: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError` if the backing store cannot be read.
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;
    /// # Errors
    ///
    /// Returns `StorageError` if the backing store cannot be written.
    fn save(&self, key: &str, blob: &str) -> Result<(), StorageError>;
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub players: Vec<Player>,
    pub current_hole: usize,
    pub tab: Screen,
    pub is_team_play: bool,
}

impl GameSnapshot {
    /// # Errors
    ///
    /// Returns `StorageError::Encode` if serialization fails.
    pub fn encode(&self) -> Result<String, StorageError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode a saved blob field by field. Anything missing or malformed takes
    /// its default (`None` for players) instead of failing.
    #[must_use]
    pub fn decode_lenient(blob: &str) -> SnapshotParts {
        let value: Value = match serde_json::from_str(blob) {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, "snapshot is not valid json, starting fresh");
                return SnapshotParts::default();
            }
        };
        let Some(obj) = value.as_object() else {
            warn!("snapshot is not a json object, starting fresh");
            return SnapshotParts::default();
        };

        let players = match obj.get("players") {
            Some(Value::Array(items)) => Some(items.iter().filter_map(decode_player).collect()),
            Some(_) => {
                warn!("snapshot players field is malformed");
                None
            }
            None => None,
        };

        let current_hole = obj
            .get("currentHole")
            .and_then(Value::as_u64)
            .and_then(|v| usize::try_from(v).ok())
            .unwrap_or_default();

        let tab = obj
            .get("tab")
            .and_then(Value::as_str)
            .and_then(Screen::from_tab)
            .unwrap_or_default();

        let is_team_play = obj
            .get("isTeamPlay")
            .and_then(Value::as_bool)
            .unwrap_or_default();

        SnapshotParts {
            players,
            current_hole,
            tab,
            is_team_play,
        }
    }
}

/// Result of a lenient decode. `players` is `None` when the field was absent
/// or unusable, so the caller can fall back to a fresh round.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SnapshotParts {
    pub players: Option<Vec<Player>>,
    pub current_hole: usize,
    pub tab: Screen,
    pub is_team_play: bool,
}

fn decode_player(value: &Value) -> Option<Player> {
    let Some(obj) = value.as_object() else {
        warn!("skipping malformed player in snapshot");
        return None;
    };
    let name = obj
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let handicap = obj
        .get("handicap")
        .and_then(Value::as_i64)
        .and_then(|v| i32::try_from(v).ok())
        .unwrap_or_default();
    let scores = obj
        .get("scores")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .map(|s| s.as_u64().and_then(|v| u32::try_from(v).ok()))
                .collect()
        })
        .unwrap_or_default();
    Some(Player {
        name,
        handicap,
        scores,
    })
}

/// One `<key>.json` file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    dir: PathBuf,
}

impl FileSnapshotStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Io(format!("read {}: {e}", path.display()))),
        }
    }

    fn save(&self, key: &str, blob: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);
        // readers never see a partially written snapshot
        let tmp = self.dir.join(format!("{key}.json.tmp"));
        fs::write(&tmp, blob)
            .map_err(|e| StorageError::Io(format!("write {}: {e}", tmp.display())))?;
        fs::rename(&tmp, &path)
            .map_err(|e| StorageError::Io(format!("rename to {}: {e}", path.display())))?;
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemorySnapshotStore {
    blobs: Arc<Mutex<HashMap<String, String>>>,
}

impl MemorySnapshotStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        let blobs = self
            .blobs
            .lock()
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        Ok(blobs.get(key).cloned())
    }

    fn save(&self, key: &str, blob: &str) -> Result<(), StorageError> {
        let mut blobs = self
            .blobs
            .lock()
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        blobs.insert(key.to_string(), blob.to_string());
        Ok(())
    }
}
