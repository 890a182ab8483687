pub mod args;
pub mod model {
    pub mod course;
    pub mod leaderboard;
    pub mod player;
    pub mod round;
    pub mod screen;
    pub mod stableford;
}
pub mod mvu {
    pub mod error;
    pub mod game;
    pub mod runtime;
    pub mod session;
}
pub mod controller {
    pub mod leaderboard;
}
pub mod view {
    pub mod index;
    pub mod leaderboard;
}
pub mod repl;
pub mod storage;

pub const HTMX_PATH: &str = "https://unpkg.com/htmx.org@1.9.12";

pub use model::stableford::{round_total, stableford_points};
pub use mvu::error::AppError;
