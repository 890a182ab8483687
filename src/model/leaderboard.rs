use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// One player's document in the `scores` collection, keyed by `player_name`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ScoreDocument {
    pub player_name: String,
    pub handicap: i32,
    pub scores: Vec<Option<u32>>,
    pub total_score: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ScoreDocument {
    #[must_use]
    pub fn key(&self) -> &str {
        &self.player_name
    }

    /// Compare ignoring the write timestamp.
    #[must_use]
    pub fn same_content(&self, other: &Self) -> bool {
        self.player_name == other.player_name
            && self.handicap == other.handicap
            && self.scores == other.scores
            && self.total_score == other.total_score
    }
}

pub type LeaderboardEntry = ScoreDocument;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum LeaderboardOrder {
    #[default]
    Ascending,
    Descending,
}

impl LeaderboardOrder {
    #[must_use]
    pub fn compare(self, a: &ScoreDocument, b: &ScoreDocument) -> Ordering {
        let by_total = match self {
            Self::Ascending => a.total_score.cmp(&b.total_score),
            Self::Descending => b.total_score.cmp(&a.total_score),
        };
        by_total.then_with(|| a.player_name.cmp(&b.player_name))
    }

    pub fn sort(self, entries: &mut [ScoreDocument]) {
        entries.sort_by(|a, b| self.compare(a, b));
    }

    #[must_use]
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Ascending => "ASC",
            Self::Descending => "DESC",
        }
    }
}

impl fmt::Display for LeaderboardOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LeaderboardOrder::Ascending => "ascending",
            LeaderboardOrder::Descending => "descending",
        };
        write!(f, "{s}")
    }
}

/// A leaderboard row ready for display: 1-based position plus the document.
#[derive(Serialize, Clone, Debug)]
pub struct RankedEntry<'a> {
    pub position: usize,
    pub entry: &'a LeaderboardEntry,
}

#[must_use]
pub fn rank(entries: &[LeaderboardEntry]) -> Vec<RankedEntry<'_>> {
    entries
        .iter()
        .enumerate()
        .map(|(idx, entry)| RankedEntry {
            position: idx + 1,
            entry,
        })
        .collect()
}
