use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Player {
    pub name: String,
    pub handicap: i32,
    pub scores: Vec<Option<u32>>,
}

impl Player {
    #[must_use]
    pub fn new(hole_count: usize) -> Self {
        Self {
            name: String::new(),
            handicap: 0,
            scores: vec![None; hole_count],
        }
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.trim()
    }

    #[must_use]
    pub fn holes_played(&self) -> usize {
        self.scores.iter().filter(|s| s.is_some()).count()
    }

    /// Force the score line to `hole_count` entries. Returns true if it had to change.
    pub fn fit_scores(&mut self, hole_count: usize) -> bool {
        if self.scores.len() == hole_count {
            return false;
        }
        self.scores.resize(hole_count, None);
        true
    }
}

/// The editable fields of a player on the setup screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlayerField {
    Name(String),
    Handicap(i32),
}
