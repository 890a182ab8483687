use clap::{Parser, ValueEnum};
use serde::Deserialize;
use std::path::PathBuf;

use crate::model::course::{Course, Hole};
use crate::model::leaderboard::LeaderboardOrder;
use crate::model::stableford::PointsScale;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Score a round interactively.
    #[default]
    Play,
    /// Serve the live leaderboard over http.
    Serve,
}

#[derive(Parser, Debug, Default)]
#[command(author, version, about = "Stableford scorecard and live leaderboard", long_about = None)]
pub struct Cli {
    #[arg(long, value_enum)]
    pub mode: Option<Mode>,
    /// TOML file with any of the settings below plus an optional `[[holes]]` course.
    #[arg(
        long,
        value_name = "CONFIG_TOML",
        value_parser = crate::args::validation::check_readable_file
    )]
    pub config_toml: Option<PathBuf>,
    /// Sqlite file holding the `scores` collection.
    #[arg(long, value_name = "DATABASE_FILE")]
    pub db_path: Option<PathBuf>,
    /// Directory for the saved in-progress round.
    #[arg(long, value_name = "SNAPSHOT_DIR")]
    pub snapshot_dir: Option<PathBuf>,
    #[arg(long, value_name = "ADDR", value_parser = crate::args::validation::check_bind_addr)]
    pub bind: Option<String>,
    #[arg(long, value_enum)]
    pub leaderboard_order: Option<LeaderboardOrder>,
    #[arg(long, value_enum)]
    pub points_scale: Option<PointsScale>,
    /// Also follow the raw `scores` collection (player sync).
    #[arg(long)]
    pub sync_roster: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub mode: Option<Mode>,
    pub db_path: Option<PathBuf>,
    pub snapshot_dir: Option<PathBuf>,
    pub bind: Option<String>,
    pub leaderboard_order: Option<LeaderboardOrder>,
    pub points_scale: Option<PointsScale>,
    pub sync_roster: Option<bool>,
    pub holes: Option<Vec<Hole>>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub mode: Mode,
    pub db_path: PathBuf,
    pub snapshot_dir: PathBuf,
    pub bind: String,
    pub leaderboard_order: LeaderboardOrder,
    pub points_scale: PointsScale,
    pub sync_roster: bool,
    pub course: Course,
}

pub const DEFAULT_DB_PATH: &str = "stableford.db";
pub const DEFAULT_BIND: &str = "0.0.0.0:8081";
