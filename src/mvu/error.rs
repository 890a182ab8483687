use crate::model::screen::Screen;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),
    #[error("scores cannot be negative (got {0})")]
    NegativeScore(i32),
    #[error("no player at position {} (there are {len})", .index + 1)]
    InvalidPlayerIndex { index: usize, len: usize },
    #[error("no hole at position {} (the course has {len})", .index + 1)]
    InvalidHoleIndex { index: usize, len: usize },
    #[error("{action} is not available on the {screen} screen")]
    WrongScreen { action: &'static str, screen: Screen },
    #[error("saving scores for {player} failed: {reason}")]
    PersistenceWriteFailed { player: String, reason: String },
    #[error("leaderboard subscription failed: {0}")]
    SubscribeFailed(String),
    #[error("snapshot error: {0}")]
    Snapshot(String),
}

impl AppError {
    /// Short machine-readable code for the error class.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "Validation",
            AppError::NegativeScore(_) => "NegativeScore",
            AppError::InvalidPlayerIndex { .. } => "InvalidPlayerIndex",
            AppError::InvalidHoleIndex { .. } => "InvalidHoleIndex",
            AppError::WrongScreen { .. } => "WrongScreen",
            AppError::PersistenceWriteFailed { .. } => "PersistenceWriteFailed",
            AppError::SubscribeFailed(_) => "SubscribeFailed",
            AppError::Snapshot(_) => "Snapshot",
        }
    }

    /// Errors caused by the user's input rather than a backend.
    #[must_use]
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            AppError::Validation(_)
                | AppError::NegativeScore(_)
                | AppError::InvalidPlayerIndex { .. }
                | AppError::InvalidHoleIndex { .. }
                | AppError::WrongScreen { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_errors_are_not_user_errors() {
        assert!(AppError::NegativeScore(-1).is_user_error());
        assert!(
            AppError::WrongScreen {
                action: "recording a score",
                screen: Screen::Home,
            }
            .is_user_error()
        );
        assert!(!AppError::SubscribeFailed("offline".into()).is_user_error());
        assert!(
            !AppError::PersistenceWriteFailed {
                player: "Ann".into(),
                reason: "offline".into(),
            }
            .is_user_error()
        );
    }
}
