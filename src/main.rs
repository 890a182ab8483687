use actix_web::web::Data;
use actix_web::{App, HttpServer};
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use rusty_stableford::args::{self, Config, Mode};
use rusty_stableford::controller::leaderboard::{LeaderboardState, configure};
use rusty_stableford::mvu::game::GameSettings;
use rusty_stableford::mvu::session::Session;
use rusty_stableford::repl::run_play_repl;
use rusty_stableford::storage::{FileSnapshotStore, ScoreStore, SqliteScoreStore};

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = args::args_checks()?;
    let store: Arc<dyn ScoreStore> = Arc::new(
        SqliteScoreStore::open(&config.db_path)
            .with_context(|| format!("open score store {}", config.db_path.display()))?,
    );

    match config.mode {
        Mode::Play => play(config, store).await,
        Mode::Serve => serve(config, store).await,
    }
}

async fn play(config: Config, store: Arc<dyn ScoreStore>) -> Result<()> {
    let settings = GameSettings {
        course: config.course,
        scale: config.points_scale,
        order: config.leaderboard_order,
    };
    let snapshots = Arc::new(FileSnapshotStore::new(config.snapshot_dir));
    let session = Session::start(settings, store, snapshots, config.sync_roster).await;
    run_play_repl(session).await?;
    Ok(())
}

async fn serve(config: Config, store: Arc<dyn ScoreStore>) -> Result<()> {
    let state = LeaderboardState {
        store,
        order: config.leaderboard_order,
    };
    info!(bind = %config.bind, order = %config.leaderboard_order, "serving leaderboard");
    HttpServer::new(move || {
        App::new()
            .app_data(Data::new(state.clone()))
            .configure(configure)
    })
    .bind(&config.bind)
    .with_context(|| format!("bind {}", config.bind))?
    .run()
    .await
    .context("http server")?;
    Ok(())
}
