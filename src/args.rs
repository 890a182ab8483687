pub mod types;
pub mod validation;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use std::fs;
use std::path::PathBuf;

use crate::model::course::Course;
pub use types::{Cli, Config, FileConfig, Mode};
use types::{DEFAULT_BIND, DEFAULT_DB_PATH};

/// Parse the command line and merge in the config file.
///
/// # Errors
///
/// Returns an error if the config file is unreadable or invalid.
pub fn args_checks() -> Result<Config> {
    load_config(Cli::parse())
}

/// Merge CLI flags over the optional TOML file over built-in defaults.
///
/// # Errors
///
/// Returns an error if the config file cannot be read or parsed, or if its
/// course is invalid.
pub fn load_config(cli: Cli) -> Result<Config> {
    let file_config = match cli.config_toml.as_ref() {
        Some(path) => {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("read config toml {}", path.display()))?;
            toml::from_str::<FileConfig>(&contents)
                .with_context(|| format!("parse config toml {}", path.display()))?
        }
        None => FileConfig::default(),
    };

    let course = match file_config.holes {
        Some(holes) => Course::new(holes).map_err(|e| anyhow!("invalid course: {e}"))?,
        None => Course::default(),
    };

    let bind = cli
        .bind
        .or(file_config.bind)
        .unwrap_or_else(|| DEFAULT_BIND.to_string());
    validation::check_bind_addr(&bind).map_err(|e| anyhow!(e))?;

    Ok(Config {
        mode: cli.mode.or(file_config.mode).unwrap_or_default(),
        db_path: cli
            .db_path
            .or(file_config.db_path)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH)),
        snapshot_dir: cli
            .snapshot_dir
            .or(file_config.snapshot_dir)
            .unwrap_or_else(|| PathBuf::from(".")),
        bind,
        leaderboard_order: cli
            .leaderboard_order
            .or(file_config.leaderboard_order)
            .unwrap_or_default(),
        points_scale: cli
            .points_scale
            .or(file_config.points_scale)
            .unwrap_or_default(),
        sync_roster: cli.sync_roster || file_config.sync_roster.unwrap_or(false),
        course,
    })
}
